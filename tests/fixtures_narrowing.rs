#![allow(missing_docs)]

use cadence_decode::cadence::{CadenceError, decode, dictionary_string_list_values, dictionary_string_values};
use cadence_testkit::read_fixture;

#[test]
fn string_map_fixture_narrows() {
	let value = decode(&read_fixture("string_map.json")).expect("fixture decodes");
	let map = dictionary_string_values(&value).expect("all values are strings");
	assert_eq!(map["FlowToken"], "A.1654653399040a61.FlowToken");
	assert_eq!(map["USDC"], "A.b19436aae4d94622.FiatToken");
}

#[test]
fn string_list_map_fixture_narrows() {
	let value = decode(&read_fixture("string_list_map.json")).expect("fixture decodes");
	let map = dictionary_string_list_values(&value).expect("all values are string lists");
	assert_eq!(map["fungible"], ["FlowToken", "USDC"]);
	assert!(map["nonFungible"].is_empty());
}

#[test]
fn list_map_does_not_narrow_as_string_map() {
	let value = decode(&read_fixture("string_list_map.json")).expect("fixture decodes");
	let err = dictionary_string_values(&value).expect_err("lists are not strings");
	assert!(matches!(err, CadenceError::NarrowingMismatch { expected: "string", .. }), "got {err}");
}
