#![allow(missing_docs)]

use cadence_decode::cadence::{Integer, Native, decode_event_fields, decode_native};
use cadence_testkit::{array, event_typedef, read_fixture, simple_type, struct_typedef, text, type_ref, typedef_message, uint};

const STRING: u64 = 1;
const UINT64: u64 = 15;

#[test]
fn same_event_in_both_encodings_yields_same_fields() {
	let json = decode_event_fields(&read_fixture("id_event.json")).expect("json decodes");

	let ccf = typedef_message(
		vec![event_typedef(&[0], "A.0000000000000001.Registry.Registered", vec![("id", simple_type(UINT64))])],
		type_ref(&[0]),
		array(vec![uint(1234)]),
	);
	let ccf = decode_event_fields(&ccf).expect("ccf decodes");

	assert_eq!(json, ccf);
	assert_eq!(json.len(), 1);
	assert_eq!(json["id"], Native::Integer(Integer::U64(1234)));
}

#[test]
fn same_struct_in_both_encodings_yields_same_native_value() {
	let json = br#"{"type":"Struct","value":{"id":"S.test.Pair","fields":[
		{"name":"label","value":{"type":"String","value":"x"}},
		{"name":"count","value":{"type":"UInt64","value":"2"}}
	]}}"#;
	let ccf = typedef_message(
		vec![struct_typedef(&[7], "S.test.Pair", vec![("label", simple_type(STRING)), ("count", simple_type(UINT64))])],
		type_ref(&[7]),
		array(vec![text("x"), uint(2)]),
	);

	assert_eq!(decode_native(json).expect("json decodes"), decode_native(&ccf).expect("ccf decodes"));
}
