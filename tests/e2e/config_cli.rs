//! End-to-end config resolution through the CLI binary.

use serde_json::Value;
use std::error::Error;
use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../crates/config/tests/fixtures/config")
        .join(name)
}

fn cli(env: &[(&str, &str)], args: &[&str]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hotel-reservation"));
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("RESERVATION_") {
            command.env_remove(key);
        }
    }
    command.env_remove("RUST_LOG");
    for (key, value) in env {
        command.env(key, value);
    }
    command.arg("--quiet").args(args).output()
}

fn json_of(output: &Output) -> Result<Value, Box<dyn Error>> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn defaults_apply_without_sources() -> Result<(), Box<dyn Error>> {
    let output = cli(&[], &["--json", "config", "show"])?;
    assert_eq!(output.status.code(), Some(0));

    let payload = json_of(&output)?;
    let config = &payload["effectiveConfig"];
    assert_eq!(config["presentation"]["imageDir"], "images/");
    assert_eq!(config["presentation"]["imageExtension"], ".jpg");
    assert_eq!(config["logging"]["level"], "info");
    assert_eq!(payload["configPath"], Value::Null);
    Ok(())
}

#[test]
fn file_then_overrides_then_env() -> Result<(), Box<dyn Error>> {
    let path = fixture("reservation-config.valid.json");
    let path = path.to_string_lossy();

    let output = cli(&[], &["--json", "--config", &path, "config", "show"])?;
    let payload = json_of(&output)?;
    assert_eq!(
        payload["effectiveConfig"]["presentation"]["imageDir"],
        "static/hotels/"
    );

    let output = cli(
        &[],
        &[
            "--json",
            "--config",
            &path,
            "--overrides-json",
            r#"{"presentation":{"imageExtension":".gif"}}"#,
            "config",
            "show",
        ],
    )?;
    let payload = json_of(&output)?;
    assert_eq!(
        payload["effectiveConfig"]["presentation"]["imageExtension"],
        ".gif"
    );

    let output = cli(
        &[("RESERVATION_IMAGE_EXTENSION", ".WebP")],
        &[
            "--json",
            "--config",
            &path,
            "--overrides-json",
            r#"{"presentation":{"imageExtension":".gif"}}"#,
            "config",
            "show",
        ],
    )?;
    let payload = json_of(&output)?;
    assert_eq!(
        payload["effectiveConfig"]["presentation"]["imageExtension"],
        ".webp"
    );
    Ok(())
}

#[test]
fn configured_photo_policy_reaches_confirmation() -> Result<(), Box<dyn Error>> {
    let path = fixture("reservation-config.valid.json");
    let output = cli(
        &[],
        &[
            "--json",
            "--config",
            &path.to_string_lossy(),
            "submit",
            "--hotel",
            "Ritz",
            "--rooms",
            "1",
            "--room-type",
            "Simple",
        ],
    )?;
    assert_eq!(output.status.code(), Some(0));
    let payload = json_of(&output)?;
    assert_eq!(
        payload["document"]["reservation"]["photo"],
        "static/hotels/ritz.png"
    );
    Ok(())
}

#[test]
fn toml_show_renders_toml() -> Result<(), Box<dyn Error>> {
    let path = fixture("reservation-config.default.toml");
    let output = cli(
        &[],
        &["--config", &path.to_string_lossy(), "config", "show", "--format", "toml"],
    )?;
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("status: ok\nconfig:\n"));
    assert!(stdout.contains("[presentation]"));
    assert!(stdout.contains("imageDir = \"images/\""));
    Ok(())
}

#[test]
fn check_reports_path() -> Result<(), Box<dyn Error>> {
    let path = fixture("reservation-config.default.toml");
    let path = path.to_string_lossy();
    let output = cli(&[], &["--config", &path, "config", "check"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("status: ok\nconfig: ok\npath: {path}\n")
    );
    Ok(())
}

#[test]
fn invalid_file_fails_every_command() -> Result<(), Box<dyn Error>> {
    let path = fixture("reservation-config.invalid.json");
    let path = path.to_string_lossy();
    for command in [&["config", "check"][..], &["validate"][..]] {
        let mut args = vec!["--json", "--config", &*path];
        args.extend_from_slice(command);
        let output = cli(&[], &args)?;
        assert_eq!(output.status.code(), Some(2));

        let payload = json_of(&output)?;
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error"]["code"], "config:invalid_image_dir");
        assert_eq!(payload["error"]["metadata"]["value"], "../outside");
    }
    Ok(())
}

#[test]
fn invalid_env_value_names_the_variable() -> Result<(), Box<dyn Error>> {
    let output = cli(&[("RESERVATION_LOG_LEVEL", "verbose")], &["config", "check"])?;
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("code: config:invalid_env_enum"));
    assert!(stdout.contains("RESERVATION_LOG_LEVEL"));
    Ok(())
}

#[test]
fn missing_config_file_is_reported() -> Result<(), Box<dyn Error>> {
    let output = cli(&[], &["--config", "no/such/config.toml", "config", "check"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stdout).contains("code: config:config_file_not_found")
    );
    Ok(())
}
