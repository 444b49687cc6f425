use std::collections::{BTreeMap, BTreeSet};

use crate::cadence::{CadenceError, Composite, Integer, Native, NominalKind, Result, Value};

/// Convert a decoded value into its schema-free native form.
///
/// Nil optionals become [`Native::Absent`]; dictionary pairs and struct/resource
/// fields whose converted value is absent are left out of the resulting map.
/// Kinds without a dedicated native shape fall back to their textual form.
pub fn convert(value: &Value) -> Result<Native> {
	let native = match value {
		Value::Optional(None) => Native::Absent,
		Value::Optional(Some(inner)) => convert(inner)?,
		Value::Dictionary(pairs) => convert_dictionary(pairs)?,
		Value::Array(items) => Native::List(items.iter().map(convert).collect::<Result<Vec<_>>>()?),
		Value::Composite(item) if matches!(item.kind(), NominalKind::Struct | NominalKind::Resource) => Native::Map(convert_fields(item)?),

		Value::Int(v) | Value::Int256(v) => Native::Integer(Integer::I256(*v)),
		Value::Int8(v) => Native::Integer(Integer::I8(*v)),
		Value::Int16(v) => Native::Integer(Integer::I16(*v)),
		Value::Int32(v) => Native::Integer(Integer::I32(*v)),
		Value::Int64(v) => Native::Integer(Integer::I64(*v)),
		Value::Int128(v) => Native::Integer(Integer::I128(*v)),
		Value::UInt(v) | Value::UInt256(v) | Value::Word256(v) => Native::Integer(Integer::U256(*v)),
		Value::UInt8(v) | Value::Word8(v) => Native::Integer(Integer::U8(*v)),
		Value::UInt16(v) | Value::Word16(v) => Native::Integer(Integer::U16(*v)),
		Value::UInt32(v) | Value::Word32(v) => Native::Integer(Integer::U32(*v)),
		Value::UInt64(v) | Value::Word64(v) => Native::Integer(Integer::U64(*v)),
		Value::UInt128(v) | Value::Word128(v) => Native::Integer(Integer::U128(*v)),
		Value::Fix64(v) => Native::Integer(Integer::I64(*v)),
		Value::UFix64(v) => Native::Integer(Integer::U64(*v)),

		Value::Bool(v) => Native::Bool(*v),
		Value::String(v) | Value::Character(v) => Native::String(v.to_string()),
		Value::Bytes(v) => Native::Bytes(v.clone()),
		Value::Address(address) => Native::String(address.hex()),
		Value::TypeValue(ty) => Native::String(ty.as_ref().map(|ty| ty.id()).unwrap_or_default()),
		Value::Function(function) => Native::String(function.id()),

		other => Native::String(other.to_string()),
	};
	Ok(native)
}

/// Convert every field of a composite (of any kind), keyed by field name.
///
/// Fields converting to [`Native::Absent`] are omitted.
pub fn convert_event_fields(value: &Value) -> Result<BTreeMap<String, Native>> {
	match value {
		Value::Composite(item) => convert_fields(item),
		other => Err(CadenceError::NarrowingMismatch {
			expected: "composite",
			got: other.kind_name().to_owned(),
		}),
	}
}

fn convert_fields(item: &Composite) -> Result<BTreeMap<String, Native>> {
	let mut out = BTreeMap::new();
	for (name, field) in item.named_fields() {
		let native = convert(field)?;
		if native.is_absent() {
			continue;
		}
		out.insert(name.to_owned(), native);
	}
	Ok(out)
}

fn convert_dictionary(pairs: &[(Value, Value)]) -> Result<Native> {
	let mut out = BTreeMap::new();
	// Omitted pairs still claim their key.
	let mut seen = BTreeSet::new();
	for (key, value) in pairs {
		let key = dictionary_key(convert(key)?)?;
		if !seen.insert(key.clone()) {
			return Err(CadenceError::InvalidDictionaryKey {
				reason: format!("key {key:?} occurs more than once after conversion"),
			});
		}
		let value = convert(value)?;
		if value.is_absent() {
			continue;
		}
		out.insert(key, value);
	}
	Ok(Native::Map(out))
}

fn dictionary_key(key: Native) -> Result<String> {
	let text = match key {
		Native::String(text) => text,
		Native::Integer(v) => v.to_string(),
		Native::Bool(v) => v.to_string(),
		Native::Bytes(v) => hex::encode(v),
		other => {
			return Err(CadenceError::InvalidDictionaryKey {
				reason: format!("{} key has no text form", other.kind_name()),
			});
		}
	};
	if text.is_empty() {
		return Err(CadenceError::InvalidDictionaryKey {
			reason: "key converted to an empty string".to_owned(),
		});
	}
	Ok(text)
}
