//! End-to-end reservation scenarios driven through the CLI binary.

use serde_json::{Value, json};
use std::error::Error;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hotel-reservation"));
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("RESERVATION_") {
            command.env_remove(key);
        }
    }
    command.env_remove("RUST_LOG").args(args).output()
}

fn run_json(args: &[&str]) -> Result<(Option<i32>, Value), Box<dyn Error>> {
    let mut full = vec!["--quiet", "--json"];
    full.extend_from_slice(args);
    let output = run_cli(&full)?;
    let payload = serde_json::from_slice(&output.stdout)?;
    Ok((output.status.code(), payload))
}

const RITZ: [&str; 10] = [
    "--hotel",
    "Ritz",
    "--rooms",
    "5",
    "--room-type",
    "Suite",
    "--option",
    "WiFi",
    "--option",
    "Breakfast",
];

#[test]
fn valid_submission_renders_confirmation() -> Result<(), Box<dyn Error>> {
    let mut args = vec!["submit"];
    args.extend_from_slice(&RITZ);
    let (code, payload) = run_json(&args)?;

    assert_eq!(code, Some(0));
    assert_eq!(payload["status"], "confirmed");
    let reservation = &payload["document"]["reservation"];
    assert_eq!(reservation["visible"], true);
    assert_eq!(reservation["heading"], "Ritz");
    assert_eq!(reservation["chambre_nombre"], "5");
    assert_eq!(reservation["chambre_type"], "Suite");
    assert_eq!(reservation["options"], json!(["WiFi", "Breakfast"]));
    assert_eq!(reservation["photo"], "images/ritz.jpg");
    assert_eq!(payload["document"]["message"]["visible"], false);
    assert_eq!(payload["document"]["nativeSubmissions"], 0);
    Ok(())
}

#[test]
fn invalid_submission_lists_every_message_in_order() -> Result<(), Box<dyn Error>> {
    let (code, payload) = run_json(&[
        "submit",
        "--hotel",
        "0",
        "--rooms",
        "abc",
        "--room-type",
        "",
    ])?;

    assert_eq!(code, Some(2));
    assert_eq!(payload["status"], "rejected");
    assert_eq!(
        payload["outcome"]["messages"],
        json!([
            "Choisir un hôtel",
            "Entrer un nombre de chambre, maximum 12",
            "Choisir un type de chambre",
        ])
    );
    let document = &payload["document"];
    assert_eq!(document["reservation"]["visible"], false);
    assert_eq!(document["message"]["visible"], true);
    assert_eq!(
        document["message"]["innerHtml"],
        "<ul><li>Choisir un hôtel</li><li>Entrer un nombre de chambre, maximum 12</li><li>Choisir un type de chambre</li></ul>"
    );
    assert_eq!(document["nativeSubmissions"], 0);
    Ok(())
}

#[test]
fn reset_after_confirmation_hides_both_containers() -> Result<(), Box<dyn Error>> {
    let mut args = vec!["replay", "--event", "submit", "--event", "reset"];
    args.extend_from_slice(&RITZ);
    let (code, payload) = run_json(&args)?;

    assert_eq!(code, Some(0));
    let document = &payload["document"];
    assert_eq!(document["message"]["visible"], false);
    assert_eq!(document["reservation"]["visible"], false);
    assert_eq!(document["fields"]["lis_hotel"], "0");
    assert_eq!(document["fields"]["txt_nbrChambre"], "");
    Ok(())
}

#[test]
fn room_count_boundaries_follow_integer_parsing() -> Result<(), Box<dyn Error>> {
    for (rooms, expected) in [
        ("1", Some(0)),
        ("12", Some(0)),
        ("0", Some(2)),
        ("13", Some(2)),
        ("-3", Some(2)),
        ("3.7", Some(0)),
        ("0x0C", Some(0)),
    ] {
        let output = run_cli(&[
            "--quiet",
            "validate",
            "--hotel",
            "Ritz",
            "--rooms",
            rooms,
            "--room-type",
            "Double",
        ])?;
        assert_eq!(output.status.code(), expected, "rooms={rooms}");
    }
    Ok(())
}

#[test]
fn text_confirmation_summarizes_reservation() -> Result<(), Box<dyn Error>> {
    let output = run_cli(&[
        "--quiet", "submit", "--hotel", "Hilton", "--rooms", "2", "--room-type", "Double",
    ])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "status: confirmed\nhotel: Hilton\nrooms: 2\nroomType: Double\noptions: none\nphoto: images/hilton.jpg\n"
    );
    Ok(())
}
