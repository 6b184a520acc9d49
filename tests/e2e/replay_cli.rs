//! End-to-end event sequences through the replay command.

use serde_json::{Value, json};
use std::error::Error;
use std::process::{Command, Output};

fn replay(args: &[&str]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hotel-reservation"));
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("RESERVATION_") {
            command.env_remove(key);
        }
    }
    command
        .env_remove("RUST_LOG")
        .args(["--quiet", "replay"])
        .args(args)
        .output()
}

fn replay_json(args: &[&str]) -> Result<Value, Box<dyn Error>> {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = replay(&full)?;
    assert_eq!(output.status.code(), Some(0));
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn every_submit_prevents_native_submission() -> Result<(), Box<dyn Error>> {
    let payload = replay_json(&[
        "--hotel", "Ritz", "--rooms", "4", "--room-type", "Suite", "--event", "submit", "--event",
        "submit",
    ])?;

    let steps = payload["steps"].as_array().ok_or("steps missing")?;
    assert_eq!(steps.len(), 2);
    for step in steps {
        assert_eq!(step["event"], "submit");
        assert_eq!(step["defaultPrevented"], true);
        assert_eq!(step["outcome"]["decision"], "confirmed");
    }
    assert_eq!(payload["document"]["nativeSubmissions"], 0);
    Ok(())
}

#[test]
fn reset_is_not_prevented_and_restores_defaults() -> Result<(), Box<dyn Error>> {
    let payload = replay_json(&[
        "--hotel",
        "Ritz",
        "--rooms",
        "99",
        "--room-type",
        "Suite",
        "--option",
        "Parking",
        "--event",
        "submit",
        "--event",
        "reset",
    ])?;

    assert_eq!(payload["steps"][0]["outcome"]["decision"], "rejected");
    assert_eq!(
        payload["steps"][0]["outcome"]["rules"],
        json!(["room_count_in_range"])
    );
    assert_eq!(payload["steps"][1]["event"], "reset");
    assert_eq!(payload["steps"][1]["defaultPrevented"], false);
    assert_eq!(payload["steps"][1]["outcome"], Value::Null);

    let document = &payload["document"];
    assert_eq!(document["message"]["visible"], false);
    assert_eq!(
        document["message"]["innerHtml"],
        "<ul><li>Entrer un nombre de chambre, maximum 12</li></ul>"
    );
    assert_eq!(document["fields"]["chk_options[]"], json!([]));
    Ok(())
}

#[test]
fn resubmitting_after_reset_uses_restored_fields() -> Result<(), Box<dyn Error>> {
    let payload = replay_json(&[
        "--hotel", "Ritz", "--rooms", "5", "--room-type", "Suite", "--event", "submit", "--event",
        "reset", "--event", "submit",
    ])?;

    assert_eq!(payload["steps"][0]["outcome"]["decision"], "confirmed");
    assert_eq!(payload["steps"][2]["outcome"]["decision"], "rejected");
    assert_eq!(payload["steps"][2]["outcome"]["messages"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["document"]["reservation"]["visible"], false);
    assert_eq!(payload["document"]["message"]["visible"], true);
    Ok(())
}

#[test]
fn text_output_lists_steps() -> Result<(), Box<dyn Error>> {
    let output = replay(&[
        "--hotel", "Ritz", "--rooms", "5", "--room-type", "Suite", "--event", "submit", "--event",
        "reset",
    ])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "status: ok\nstep 1: submit confirmed\nstep 2: reset\nmessage: hidden\nreservation: hidden\nnativeSubmissions: 0\n"
    );
    Ok(())
}

#[test]
fn unknown_event_is_rejected() -> Result<(), Box<dyn Error>> {
    let output = replay(&["--event", "click"])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
