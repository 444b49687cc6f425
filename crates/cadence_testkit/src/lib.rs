//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

pub use ciborium::value::Value as Cbor;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture file, panicking with its path when missing.
pub fn read_fixture(name: &str) -> Vec<u8> {
	let path = fixture_path(name);
	std::fs::read(&path).unwrap_or_else(|err| panic!("read fixture {}: {err}", path.display()))
}

/// Parse a JSON fixture.
pub fn read_json_fixture(name: &str) -> serde_json::Value {
	serde_json::from_slice(&read_fixture(name)).unwrap_or_else(|err| panic!("parse fixture {name}: {err}"))
}

/// Encode one CBOR item.
pub fn encode(item: &Cbor) -> Vec<u8> {
	let mut out = Vec::new();
	ciborium::ser::into_writer(item, &mut out).expect("cbor encodes into memory");
	out
}

/// Tagged item.
pub fn tag(tag: u64, inner: Cbor) -> Cbor {
	Cbor::Tag(tag, Box::new(inner))
}

/// Text item.
pub fn text(value: &str) -> Cbor {
	Cbor::Text(value.to_owned())
}

/// Unsigned integer item.
pub fn uint(value: u64) -> Cbor {
	Cbor::Integer(value.into())
}

/// Signed integer item.
pub fn int(value: i64) -> Cbor {
	Cbor::Integer(value.into())
}

/// Byte string item.
pub fn bytes(value: &[u8]) -> Cbor {
	Cbor::Bytes(value.to_vec())
}

/// Array item.
pub fn array(items: Vec<Cbor>) -> Cbor {
	Cbor::Array(items)
}

/// Bignum: tag 2 for non-negative, tag 3 (encoding `-1 - n`) for negative.
pub fn bignum(negative: bool, big_endian: &[u8]) -> Cbor {
	tag(if negative { 3 } else { 2 }, bytes(big_endian))
}

/// CCF simple type by id.
pub fn simple_type(code: u64) -> Cbor {
	tag(137, uint(code))
}

/// CCF reference to a typedef id.
pub fn type_ref(id: &[u8]) -> Cbor {
	tag(136, bytes(id))
}

/// CCF optional type.
pub fn optional_type(inner: Cbor) -> Cbor {
	tag(138, inner)
}

/// CCF variable-sized array type.
pub fn array_type(element: Cbor) -> Cbor {
	tag(139, element)
}

/// CCF dictionary type.
pub fn dict_type(key: Cbor, value: Cbor) -> Cbor {
	tag(141, array(vec![key, value]))
}

/// CCF composite typedef with the given tag (160 struct .. 165 attachment).
pub fn composite_typedef(kind_tag: u64, id: &[u8], qualified: &str, fields: Vec<(&str, Cbor)>) -> Cbor {
	let fields = fields.into_iter().map(|(name, ty)| array(vec![text(name), ty])).collect();
	tag(kind_tag, array(vec![bytes(id), text(qualified), array(fields)]))
}

/// CCF struct typedef.
pub fn struct_typedef(id: &[u8], qualified: &str, fields: Vec<(&str, Cbor)>) -> Cbor {
	composite_typedef(160, id, qualified, fields)
}

/// CCF event typedef.
pub fn event_typedef(id: &[u8], qualified: &str, fields: Vec<(&str, Cbor)>) -> Cbor {
	composite_typedef(162, id, qualified, fields)
}

/// Inline type and value pair, tagged as embedded for abstract static types.
pub fn embedded(ty: Cbor, value: Cbor) -> Cbor {
	tag(130, array(vec![ty, value]))
}

/// Encoded typedef-and-value message.
pub fn typedef_message(typedefs: Vec<Cbor>, ty: Cbor, value: Cbor) -> Vec<u8> {
	encode(&tag(129, array(vec![array(typedefs), array(vec![ty, value])])))
}

/// Encoded type-and-value message.
pub fn type_and_value_message(ty: Cbor, value: Cbor) -> Vec<u8> {
	encode(&embedded(ty, value))
}
