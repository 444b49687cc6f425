#![allow(missing_docs)]

use std::process::{Command, Output};

use cadence_testkit::{array, event_typedef, fixture_path, simple_type, type_ref, typedef_message, uint};
use serde_json::Value;

#[test]
fn value_command_prints_native_json() {
	let json = run_json(&["value", &fixture_path("nft_metadata.json").display().to_string()]);
	assert_eq!(json["serial"], 1);
	assert_eq!(json["traits"]["rarity"], "legendary");
}

#[test]
fn event_command_accepts_hex_ccf() {
	let ccf = typedef_message(
		vec![event_typedef(&[0], "A.0000000000000001.Registry.Registered", vec![("id", simple_type(15))])],
		type_ref(&[0]),
		array(vec![uint(1234)]),
	);
	let dir = std::env::temp_dir().join(format!("cadence-decode-cli-{}", std::process::id()));
	std::fs::create_dir_all(&dir).expect("temp dir");
	let path = dir.join("event.hex");
	std::fs::write(&path, format!("0x{}\n", hex_text(&ccf))).expect("write payload");

	let json = run_json(&["event", &path.display().to_string(), "--hex", "--format", "ccf"]);
	assert_eq!(json, serde_json::json!({ "id": 1234 }));
}

#[test]
fn inspect_command_prints_type_ids() {
	let output = run(&["inspect", &fixture_path("id_event.json").display().to_string()]);
	assert!(output.status.success());
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Event A.0000000000000001.Registry.Registered {"), "{stdout}");
	assert!(stdout.contains("id = UInt64: 1234"), "{stdout}");
}

#[test]
fn undecodable_input_fails_with_both_causes() {
	let path = fixture_path("missing.json");
	let output = run(&["value", &path.display().to_string()]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: io:"));

	let dir = std::env::temp_dir().join(format!("cadence-decode-cli-empty-{}", std::process::id()));
	std::fs::create_dir_all(&dir).expect("temp dir");
	let empty = dir.join("empty.bin");
	std::fs::write(&empty, b"").expect("write payload");
	let output = run(&["value", &empty.display().to_string()]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("json-cdc") && stderr.contains("ccf"), "{stderr}");
}

fn hex_text(bytes: &[u8]) -> String {
	bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_cadence-decode")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"cadence-decode failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
