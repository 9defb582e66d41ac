use std::{
    io::Write as _,
    process::{Command, Stdio},
};

use serde_json::Value;

fn run(subcommand: &str, stdin: &str) -> Value {
    let mut child = Command::new(env!("CARGO_BIN_EXE_promptpix"))
        .arg(subcommand)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn promptpix");

    child
        .stdin
        .as_mut()
        .expect("child stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");

    let out = child.wait_with_output().expect("wait for promptpix");
    assert!(out.status.success(), "process must exit 0 on {stdin:?}");
    serde_json::from_slice(&out.stdout).expect("stdout must be a single JSON envelope")
}

#[test]
fn image_with_empty_stdin_succeeds_with_defaults() {
    let v = run("image", "");
    let uri = v.get("dataUri").and_then(Value::as_str).expect("dataUri");
    assert!(uri.starts_with("data:image/png;base64,"));
}

#[test]
fn image_with_malformed_json_emits_error_envelope() {
    let v = run("image", "{oops");
    assert!(v.get("error").is_some());
    assert!(v.get("dataUri").is_none());
}

#[test]
fn doc_csv_conversion_round_trips() {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    let v = run("doc", r#"{"text":"a\tb","format":"csv"}"#);
    let uri = v.get("dataUri").and_then(Value::as_str).expect("dataUri");
    let payload = uri.strip_prefix("data:text/csv;base64,").unwrap();
    assert_eq!(STANDARD.decode(payload).unwrap(), b"a,b");
    assert_eq!(
        v.get("filename").and_then(Value::as_str),
        Some("spreadsheet.csv")
    );
}

#[test]
fn doc_unknown_format_falls_back_to_plain_text() {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    let v = run("doc", r#"{"text":"hi","format":"weird"}"#);
    let uri = v.get("dataUri").and_then(Value::as_str).expect("dataUri");
    let payload = uri.strip_prefix("data:text/plain;base64,").unwrap();
    assert_eq!(STANDARD.decode(payload).unwrap(), b"hi");
}
