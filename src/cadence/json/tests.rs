use primitive_types::U256;

use super::decode_json;
use crate::cadence::{Address, Authorization, DecodeOptions, JsonError, Native, NominalKind, PathDomain, Purity, SimpleType, Type, Value};

fn decode(text: &str) -> Value {
	decode_json(text.as_bytes(), &DecodeOptions::default()).unwrap_or_else(|err| panic!("decode {text}: {err}"))
}

fn decode_strict(text: &str) -> Result<Value, JsonError> {
	decode_json(text.as_bytes(), &DecodeOptions::strict())
}

#[test]
fn scalars() {
	assert_eq!(decode(r#"{"type":"Void"}"#), Value::Void);
	assert_eq!(decode(r#"{"type":"Bool","value":true}"#), Value::Bool(true));
	assert_eq!(decode(r#"{"type":"String","value":"hi"}"#), Value::String("hi".into()));
	assert_eq!(decode(r#"{"type":"Int16","value":"-300"}"#), Value::Int16(-300));
	assert_eq!(decode(r#"{"type":"Word8","value":"255"}"#), Value::Word8(255));
	assert_eq!(
		decode(r#"{"type":"UInt256","value":"115792089237316195423570985008687907853269984665640564039457584007913129639935"}"#),
		Value::UInt256(U256::MAX)
	);
}

#[test]
fn fixed_point_literals_scale_by_ten_to_the_eighth() {
	assert_eq!(decode(r#"{"type":"UFix64","value":"12.5"}"#), Value::UFix64(1_250_000_000));
	assert_eq!(decode(r#"{"type":"Fix64","value":"-0.00000001"}"#), Value::Fix64(-1));
	assert!(decode_strict(r#"{"type":"UFix64","value":"-1.0"}"#).is_err());
	assert!(decode_strict(r#"{"type":"UFix64","value":"1.000000001"}"#).is_err());
}

#[test]
fn integer_range_is_enforced() {
	let err = decode_strict(r#"{"type":"UInt8","value":"256"}"#).expect_err("out of range");
	assert!(matches!(err, JsonError::InvalidNumber { kind: "UInt8", .. }), "got {err}");
}

#[test]
fn optional_and_containers() {
	assert_eq!(decode(r#"{"type":"Optional","value":null}"#), Value::Optional(None));
	assert_eq!(
		decode(r#"{"type":"Optional","value":{"type":"UInt8","value":"1"}}"#),
		Value::Optional(Some(Box::new(Value::UInt8(1))))
	);

	let dict = decode(
		r#"{"type":"Dictionary","value":[
			{"key":{"type":"String","value":"a"},"value":{"type":"Array","value":[{"type":"Int","value":"1"}]}}
		]}"#,
	);
	let Value::Dictionary(pairs) = dict else {
		panic!("expected dictionary");
	};
	assert_eq!(pairs.len(), 1);
	assert_eq!(pairs[0].0, Value::String("a".into()));
	assert!(matches!(&pairs[0].1, Value::Array(items) if items.len() == 1));
}

#[test]
fn composite_fields_keep_order_and_names() {
	let value = decode(
		r#"{"type":"Event","value":{"id":"A.0000000000000001.Token.Deposited","fields":[
			{"name":"amount","value":{"type":"UFix64","value":"1.0"}},
			{"name":"to","value":{"type":"Optional","value":null}}
		]}}"#,
	);
	let Value::Composite(event) = value else {
		panic!("expected composite");
	};
	assert_eq!(event.kind(), NominalKind::Event);
	let names: Vec<&str> = event.named_fields().map(|(name, _)| name).collect();
	assert_eq!(names, ["amount", "to"]);
	assert_eq!(event.field("amount"), Some(&Value::UFix64(100_000_000)));
}

#[test]
fn path_and_capability() {
	let Value::Path(path) = decode(r#"{"type":"Path","value":{"domain":"public","identifier":"receiver"}}"#) else {
		panic!("expected path");
	};
	assert_eq!(path.domain, PathDomain::Public);

	let Value::Capability(cap) = decode(
		r#"{"type":"Capability","value":{"id":"3","address":"0x0000000000000001","borrowType":{"kind":"Reference","authorization":{"kind":"Unauthorized","entitlements":null},"type":{"kind":"String"}}}}"#,
	) else {
		panic!("expected capability");
	};
	assert_eq!(cap.id, 3);
	assert_eq!(cap.address, Address::from_hex_digits("1").expect("address"));
	assert_eq!(cap.borrow_type.map(|ty| ty.id()).as_deref(), Some("&String"));
}

#[test]
fn legacy_path_capability_keeps_its_path() {
	let text = r#"{"type":"Capability","value":{
		"path":{"type":"Path","value":{"domain":"public","identifier":"receiver"}},
		"address":"0x0000000000000001",
		"borrowType":{"kind":"Reference","authorized":false,"type":{"kind":"String"}}}}"#;

	let Value::Capability(cap) = decode(text) else {
		panic!("expected capability");
	};
	assert_eq!(cap.id, 0);
	let path = cap.path.as_ref().expect("legacy path");
	assert_eq!(path.domain, PathDomain::Public);
	assert_eq!(&*path.identifier, "receiver");

	let rendered = crate::cadence::convert(&Value::Capability(cap)).expect("converts");
	let Native::String(rendered) = rendered else {
		panic!("expected text fallback, got {rendered:?}");
	};
	assert!(rendered.ends_with("(address: 0x0000000000000001, path: /public/receiver)"), "{rendered}");

	assert!(matches!(decode_strict(text), Err(JsonError::MissingField { field: "id", .. })));
}

#[test]
fn repeated_nominal_types_resolve_by_identifier() {
	let value = decode(
		r#"{"type":"Type","value":{"staticType":{"kind":"Dictionary",
			"key":{"kind":"Struct","typeID":"S.test.Foo","fields":[],"initializers":[],"type":""},
			"value":"S.test.Foo"}}}"#,
	);
	let Value::TypeValue(Some(Type::Dictionary { key, value })) = value else {
		panic!("expected dictionary type");
	};
	assert_eq!(key, value);
	assert!(matches!(*value, Type::Nominal(ref nominal) if nominal.kind == NominalKind::Struct));
}

#[test]
fn unknown_bare_type_depends_on_options() {
	let text = r#"{"type":"Type","value":{"staticType":"S.test.Unseen"}}"#;
	assert_eq!(decode(text), Value::TypeValue(Some(Type::Unstructured("S.test.Unseen".into()))));
	assert!(matches!(decode_strict(text), Err(JsonError::UnknownTypeReference { .. })));

	assert_eq!(decode(r#"{"type":"Type","value":{"staticType":""}}"#), Value::TypeValue(None));
}

#[test]
fn entitled_reference_type() {
	let value = decode(
		r#"{"type":"Type","value":{"staticType":{"kind":"Reference",
			"authorization":{"kind":"EntitlementConjunctionSet","entitlements":[{"kind":"Entitlement","typeID":"S.test.E"}]},
			"type":{"kind":"Int"}}}}"#,
	);
	let Value::TypeValue(Some(Type::Reference { authorization, .. })) = value else {
		panic!("expected reference type");
	};
	assert_eq!(authorization, Authorization::Conjunction(vec!["S.test.E".into()]));
}

#[test]
fn function_value_carries_signature() {
	let value = decode(
		r#"{"type":"Function","value":{"functionType":{"kind":"Function","purity":"view","typeParameters":[],
			"parameters":[{"label":"_","id":"x","type":{"kind":"Int"}}],"return":{"kind":"Bool"}}}}"#,
	);
	let Value::Function(function) = value else {
		panic!("expected function");
	};
	assert_eq!(function.purity, Purity::View);
	assert_eq!(function.id(), "view fun(Int):Bool");

	let err = decode_strict(r#"{"type":"Function","value":{"functionType":{"kind":"Int"}}}"#).expect_err("not a function type");
	assert!(matches!(err, JsonError::ExpectedFunctionType { .. }));
}

#[test]
fn legacy_forms_need_backwards_compatibility() {
	assert_eq!(decode(r#"{"type":"UInt64","value":42}"#), Value::UInt64(42));
	assert_eq!(
		decode(r#"{"type":"Address","value":"0000000000001234"}"#),
		Value::Address(Address::from_hex_digits("1234").expect("address"))
	);
	assert!(decode_strict(r#"{"type":"Address","value":"0000000000001234"}"#).is_err());

	let value = decode(r#"{"type":"Type","value":{"staticType":{"kind":"Reference","authorized":true,"type":{"kind":"AnyStruct"}}}}"#);
	let Value::TypeValue(Some(Type::Reference { authorization, referenced })) = value else {
		panic!("expected reference type");
	};
	assert_eq!(authorization, Authorization::Legacy);
	assert_eq!(*referenced, Type::Simple(SimpleType::AnyStruct));

	let value = decode(
		r#"{"type":"Type","value":{"staticType":{"kind":"Restriction","typeID":"AnyResource{I}","type":{"kind":"AnyResource"},
			"restrictions":[{"kind":"ResourceInterface","typeID":"S.test.I","fields":[],"initializers":[],"type":""}]}}}"#,
	);
	let Value::TypeValue(Some(ty)) = value else {
		panic!("expected type");
	};
	assert_eq!(ty.id(), "AnyResource{S.test.I}");
}

#[test]
fn malformed_input_reports_context() {
	assert!(matches!(decode_strict("not json"), Err(JsonError::Syntax(_))));
	assert!(matches!(
		decode_strict(r#"{"type":"Mystery","value":1}"#),
		Err(JsonError::UnknownValueKind { .. })
	));
	assert!(matches!(decode_strict(r#"{"value":1}"#), Err(JsonError::MissingField { field: "type", .. })));
}
