use cadence_testkit::{
	Cbor, array, array_type, bignum, bytes, dict_type, embedded, encode, event_typedef, int, optional_type, simple_type, struct_typedef, tag, text,
	type_and_value_message, type_ref, typedef_message, uint,
};
use primitive_types::U256;

use super::decode_ccf;
use crate::cadence::{Address, BigInt, CcfError, NominalKind, PathDomain, SimpleType, Type, Value};

const BOOL: u64 = 0;
const STRING: u64 = 1;
const ADDRESS: u64 = 3;
const INT: u64 = 4;
const INT8: u64 = 5;
const INT256: u64 = 10;
const UINT64: u64 = 15;
const UINT256: u64 = 17;
const FIX64: u64 = 22;
const UFIX64: u64 = 23;
const STORAGE_PATH: u64 = 26;
const ANY_STRUCT: u64 = 39;
const META_TYPE: u64 = 41;

#[test]
fn scalar_type_and_value_message() {
	let bytes = type_and_value_message(simple_type(STRING), text("hello"));
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::String("hello".into()));

	let bytes = type_and_value_message(simple_type(INT8), int(-5));
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::Int8(-5));
}

#[test]
fn fixed_point_keeps_scaled_integer() {
	let bytes = type_and_value_message(simple_type(UFIX64), uint(1_250_000_000));
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::UFix64(1_250_000_000));

	let bytes = type_and_value_message(simple_type(FIX64), int(-50_000_000));
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::Fix64(-50_000_000));
}

#[test]
fn out_of_range_integer_is_rejected() {
	let bytes = type_and_value_message(simple_type(INT8), int(300));
	assert!(matches!(decode_ccf(&bytes), Err(CcfError::IntegerOutOfRange { kind: "Int8" })));
}

#[test]
fn bignum_tags_decode_for_wide_kinds() {
	// 2^100
	let mut raw = vec![0_u8; 13];
	raw[0] = 0x10;
	let bytes = type_and_value_message(simple_type(UINT256), bignum(false, &raw));
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::UInt256(U256::one() << 100_usize));

	// -1 - 2^100
	let bytes = type_and_value_message(simple_type(INT), bignum(true, &raw));
	let expected = BigInt::new(true, (U256::one() << 100_usize) + U256::one());
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::Int(expected));
}

#[test]
fn sixteen_byte_negative_bignums_keep_full_magnitude() {
	// -1 - (2^128 - 1) = -2^128
	let bytes = type_and_value_message(simple_type(INT), bignum(true, &[0xff; 16]));
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::Int(BigInt::new(true, U256::one() << 128_usize)));

	// -1 - 2^127
	let mut raw = [0_u8; 16];
	raw[0] = 0x80;
	let bytes = type_and_value_message(simple_type(INT256), bignum(true, &raw));
	let expected = BigInt::new(true, (U256::one() << 127_usize) + U256::one());
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::Int256(expected));
}

#[test]
fn indefinite_length_strings_are_joined() {
	// 130([137(1), (_ "he", "llo")])
	let bytes = [0xd8, 0x82, 0x82, 0xd8, 0x89, 0x01, 0x7f, 0x62, b'h', b'e', 0x63, b'l', b'l', b'o', 0xff];
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::String("hello".into()));
}

#[test]
fn event_with_typedef_decodes_named_fields() {
	let bytes = typedef_message(
		vec![event_typedef(
			&[0],
			"A.0000000000000001.Token.Deposited",
			vec![("amount", simple_type(UFIX64)), ("to", optional_type(simple_type(ADDRESS)))],
		)],
		type_ref(&[0]),
		array(vec![uint(100_000_000), bytes(&[0, 0, 0, 0, 0, 0, 0x12, 0x34])]),
	);

	let value = decode_ccf(&bytes).expect("decodes");
	let Value::Composite(event) = value else {
		panic!("expected composite, got {value:?}");
	};
	assert_eq!(event.kind(), NominalKind::Event);
	assert_eq!(event.type_id(), "A.0000000000000001.Token.Deposited");
	assert_eq!(event.field("amount"), Some(&Value::UFix64(100_000_000)));
	let to = Address::from_hex_digits("1234").expect("address");
	assert_eq!(event.field("to"), Some(&Value::Optional(Some(Box::new(Value::Address(to))))));
}

#[test]
fn typedef_fields_may_reference_later_typedefs() {
	let bytes = typedef_message(
		vec![
			struct_typedef(&[1], "S.test.Outer", vec![("inner", type_ref(&[2]))]),
			struct_typedef(&[2], "S.test.Inner", vec![("flag", simple_type(BOOL))]),
		],
		type_ref(&[1]),
		array(vec![array(vec![Cbor::Bool(true)])]),
	);

	let value = decode_ccf(&bytes).expect("decodes");
	let Value::Composite(outer) = value else {
		panic!("expected composite");
	};
	let Some(Value::Composite(inner)) = outer.field("inner") else {
		panic!("expected nested composite");
	};
	assert_eq!(inner.type_id(), "S.test.Inner");
	assert_eq!(inner.field("flag"), Some(&Value::Bool(true)));
}

#[test]
fn dictionary_values_are_flat_pairs() {
	let bytes = type_and_value_message(
		dict_type(simple_type(STRING), array_type(simple_type(UINT64))),
		array(vec![text("a"), array(vec![uint(1), uint(2)]), text("b"), array(Vec::new())]),
	);
	let Value::Dictionary(pairs) = decode_ccf(&bytes).expect("decodes") else {
		panic!("expected dictionary");
	};
	assert_eq!(pairs.len(), 2);
	assert_eq!(pairs[0].0, Value::String("a".into()));
	assert_eq!(pairs[0].1, Value::Array(vec![Value::UInt64(1), Value::UInt64(2)]));
	assert_eq!(pairs[1].1, Value::Array(Vec::new()));
}

#[test]
fn abstract_static_type_embeds_concrete_type() {
	let bytes = type_and_value_message(array_type(simple_type(ANY_STRUCT)), array(vec![embedded(simple_type(STRING), text("x")), embedded(simple_type(BOOL), Cbor::Bool(false))]));
	assert_eq!(
		decode_ccf(&bytes).expect("decodes"),
		Value::Array(vec![Value::String("x".into()), Value::Bool(false)])
	);
}

#[test]
fn path_and_type_values() {
	let bytes = type_and_value_message(simple_type(STORAGE_PATH), array(vec![uint(1), text("flowTokenVault")]));
	let Value::Path(path) = decode_ccf(&bytes).expect("decodes") else {
		panic!("expected path");
	};
	assert_eq!(path.domain, PathDomain::Storage);
	assert_eq!(&*path.identifier, "flowTokenVault");

	let bytes = type_and_value_message(simple_type(META_TYPE), tag(186, tag(185, uint(INT))));
	assert_eq!(
		decode_ccf(&bytes).expect("decodes"),
		Value::TypeValue(Some(Type::Optional(Box::new(Type::Simple(SimpleType::Int)))))
	);

	let bytes = type_and_value_message(simple_type(META_TYPE), Cbor::Null);
	assert_eq!(decode_ccf(&bytes).expect("decodes"), Value::TypeValue(None));
}

#[test]
fn trailing_bytes_are_rejected() {
	let mut bytes = type_and_value_message(simple_type(BOOL), Cbor::Bool(true));
	bytes.push(0x00);
	assert!(matches!(decode_ccf(&bytes), Err(CcfError::TrailingBytes { leftover: 1 })));
}

#[test]
fn unknown_type_reference_is_rejected() {
	let bytes = typedef_message(Vec::new(), type_ref(&[9]), array(Vec::new()));
	assert!(matches!(decode_ccf(&bytes), Err(CcfError::UnknownTypeRef { .. })));
}

#[test]
fn duplicate_typedef_ids_are_rejected() {
	let bytes = typedef_message(
		vec![
			struct_typedef(&[1], "S.test.A", Vec::new()),
			struct_typedef(&[1], "S.test.B", Vec::new()),
		],
		type_ref(&[1]),
		array(Vec::new()),
	);
	assert!(matches!(decode_ccf(&bytes), Err(CcfError::DuplicateTypeDef { .. })));
}

#[test]
fn untagged_root_is_rejected() {
	let bytes = encode(&array(vec![simple_type(BOOL), Cbor::Bool(true)]));
	assert!(matches!(decode_ccf(&bytes), Err(CcfError::UnexpectedItem { .. })));
}

#[test]
fn composite_arity_must_match_typedef() {
	let bytes = typedef_message(
		vec![struct_typedef(&[1], "S.test.Pair", vec![("a", simple_type(BOOL)), ("b", simple_type(BOOL))])],
		type_ref(&[1]),
		array(vec![Cbor::Bool(true)]),
	);
	assert!(matches!(decode_ccf(&bytes), Err(CcfError::ArityMismatch { .. })));
}
