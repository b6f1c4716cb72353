use std::process::{Command, Output};

#[ctor::ctor]
fn overall_init() {
    test_util::ctor_overall_init();
}

const DB_PATH: &str = "tests/key_lifecycle_cli_tests.db";

fn reset_database() {
    for suffix in ["", "-wal", "-shm"] {
        test_util::remove_file_if_exists(&format!("{}{}", DB_PATH, suffix)).expect("pass");
    }
}

fn key_lifecycle(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_key-lifecycle"))
        .args(args)
        .env("KEY_LIFECYCLE_DB_URL", test_util::sqlite_url_for_path(DB_PATH))
        .env_remove("KEY_LIFECYCLE_NO_NEWLINE")
        .env_remove("KEY_LIFECYCLE_PRETTY")
        .output()
        .expect("pass");
    tracing::debug!(
        "key-lifecycle {:?} exited with {}; stderr: {}",
        args,
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn key_lifecycle_json(args: &[&str]) -> serde_json::Value {
    let output = key_lifecycle(args);
    assert!(
        output.status.success(),
        "key-lifecycle {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.ends_with(b"\n"));
    serde_json::from_slice(&output.stdout).expect("pass")
}

#[test]
#[serial_test::serial]
fn test_cli_key_lifecycle() {
    reset_database();

    assert_eq!(key_lifecycle_json(&["list"]), serde_json::json!([]));
    assert!(!key_lifecycle(&["get"]).status.success());

    let generated = key_lifecycle_json(&["generate"]);
    assert_eq!(generated["id"], 1);
    assert_eq!(generated["status"], "Active");
    assert!(generated.get("privateKey").is_none());
    let public_key = generated["publicKey"].as_str().expect("pass").to_string();
    assert_eq!(public_key.len(), 64);

    let latest = key_lifecycle_json(&["get", "--include-private-key"]);
    assert_eq!(latest["id"], 1);
    assert_eq!(latest["privateKey"].as_str().expect("pass").len(), 64);

    let signed = key_lifecycle_json(&["sign", "--message", "hello"]);
    assert_eq!(signed["keyId"], 1);
    assert_eq!(signed["publicKey"], public_key.as_str());
    let signature = signed["signature"].as_str().expect("pass").to_string();
    assert_eq!(signature.len(), 128);

    assert_eq!(
        key_lifecycle_json(&[
            "verify",
            "--signature",
            &signature,
            "--message",
            "hello",
            "--public-key",
            &public_key,
        ]),
        serde_json::Value::Bool(true)
    );
    let output = key_lifecycle(&[
        "verify",
        "--signature",
        &signature,
        "--message",
        "goodbye",
        "--public-key",
        &public_key,
    ]);
    assert!(!output.status.success());
    assert_eq!(output.stdout, b"false\n");

    let updated = key_lifecycle_json(&["set-status", "--key-id", "1", "--status", "revoked"]);
    assert_eq!(updated["status"], "Revoked");
    let output = key_lifecycle(&["sign", "--key-id", "1", "--message", "hello"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Signing refused"));

    key_lifecycle_json(&["generate"]);
    let revoked = key_lifecycle_json(&["list", "--status", "revoked"]);
    assert_eq!(revoked.as_array().expect("pass").len(), 1);
    let all = key_lifecycle_json(&["list", "--include-private-keys"]);
    let all_v = all.as_array().expect("pass");
    assert_eq!(all_v.len(), 2);
    assert!(all_v.iter().all(|key_record| key_record["privateKey"].is_string()));

    assert_eq!(
        key_lifecycle_json(&["delete", "--key-id", "1"]),
        serde_json::json!(1)
    );
    assert!(!key_lifecycle(&["delete", "--key-id", "1"]).status.success());
    assert!(!key_lifecycle(&["get", "--key-id", "1"]).status.success());
    let remaining = key_lifecycle_json(&["list"]);
    assert_eq!(remaining.as_array().expect("pass").len(), 1);
    assert_eq!(remaining[0]["id"], 2);
}

#[test]
#[serial_test::serial]
fn test_cli_no_newline_and_hex_messages() {
    reset_database();

    key_lifecycle_json(&["generate"]);
    let output = key_lifecycle(&["sign", "--no-newline", "--message", "0x68656c6c6f"]);
    assert!(output.status.success());
    assert!(!output.stdout.ends_with(b"\n"));
    let signed_hex: serde_json::Value = serde_json::from_slice(&output.stdout).expect("pass");
    let signed_text = key_lifecycle_json(&["sign", "--message", "hello"]);
    assert_eq!(signed_hex["signature"], signed_text["signature"]);

    let output = key_lifecycle(&["verify", "-s", "zz", "-m", "hello", "-p", "00"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Encoding error"));
}

#[test]
#[serial_test::serial]
fn test_cli_pretty_output() {
    reset_database();

    let compact = key_lifecycle_json(&["generate"]);
    let output = key_lifecycle(&["get", "--pretty"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("pass");
    assert!(stdout.starts_with("{\n  \""));
    assert!(stdout.ends_with("}\n"));
    let pretty: serde_json::Value = serde_json::from_str(&stdout).expect("pass");
    assert_eq!(pretty, compact);

    let output = key_lifecycle(&["list", "--pretty", "--no-newline"]);
    assert!(output.status.success());
    assert!(output.stdout.ends_with(b"]"));
    assert!(output.stdout.contains(&b'\n'));
}
