use std::collections::BTreeMap;
use std::fmt;

use primitive_types::U256;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::cadence::BigInt;

/// Integer with its source signedness and width preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Integer {
	/// 8-bit signed.
	I8(i8),
	/// 16-bit signed.
	I16(i16),
	/// 32-bit signed.
	I32(i32),
	/// 64-bit signed.
	I64(i64),
	/// 128-bit signed.
	I128(i128),
	/// Signed, up to 256 bits.
	I256(BigInt),
	/// 8-bit unsigned.
	U8(u8),
	/// 16-bit unsigned.
	U16(u16),
	/// 32-bit unsigned.
	U32(u32),
	/// 64-bit unsigned.
	U64(u64),
	/// 128-bit unsigned.
	U128(u128),
	/// Unsigned, up to 256 bits.
	U256(U256),
}

impl Integer {
	/// Whether the source kind was signed.
	pub fn is_signed(&self) -> bool {
		matches!(self, Self::I8(_) | Self::I16(_) | Self::I32(_) | Self::I64(_) | Self::I128(_) | Self::I256(_))
	}

	/// Value as `i128`, when it fits.
	pub fn to_i128(&self) -> Option<i128> {
		match *self {
			Self::I8(v) => Some(i128::from(v)),
			Self::I16(v) => Some(i128::from(v)),
			Self::I32(v) => Some(i128::from(v)),
			Self::I64(v) => Some(i128::from(v)),
			Self::I128(v) => Some(v),
			Self::I256(v) => v.to_i128(),
			Self::U8(v) => Some(i128::from(v)),
			Self::U16(v) => Some(i128::from(v)),
			Self::U32(v) => Some(i128::from(v)),
			Self::U64(v) => Some(i128::from(v)),
			Self::U128(v) => i128::try_from(v).ok(),
			Self::U256(v) => BigInt::from_u256(v).to_i128(),
		}
	}
}

impl fmt::Display for Integer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::I8(v) => write!(f, "{v}"),
			Self::I16(v) => write!(f, "{v}"),
			Self::I32(v) => write!(f, "{v}"),
			Self::I64(v) => write!(f, "{v}"),
			Self::I128(v) => write!(f, "{v}"),
			Self::I256(v) => write!(f, "{v}"),
			Self::U8(v) => write!(f, "{v}"),
			Self::U16(v) => write!(f, "{v}"),
			Self::U32(v) => write!(f, "{v}"),
			Self::U64(v) => write!(f, "{v}"),
			Self::U128(v) => write!(f, "{v}"),
			Self::U256(v) => write!(f, "{v}"),
		}
	}
}

/// Schema-free value produced by conversion.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Native {
	/// Absence (a nil optional).
	#[default]
	Absent,
	/// Boolean.
	Bool(bool),
	/// Text.
	String(String),
	/// Raw bytes.
	Bytes(Vec<u8>),
	/// Integer of preserved width.
	Integer(Integer),
	/// Ordered sequence.
	List(Vec<Native>),
	/// Name-keyed mapping.
	Map(BTreeMap<String, Native>),
}

impl Native {
	/// Shape name, used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Absent => "absent",
			Self::Bool(_) => "bool",
			Self::String(_) => "string",
			Self::Bytes(_) => "bytes",
			Self::Integer(_) => "integer",
			Self::List(_) => "list",
			Self::Map(_) => "map",
		}
	}

	/// Whether this is the absence value.
	pub fn is_absent(&self) -> bool {
		matches!(self, Self::Absent)
	}

	/// Borrow as text.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow as integer.
	pub fn as_integer(&self) -> Option<&Integer> {
		match self {
			Self::Integer(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow as list.
	pub fn as_list(&self) -> Option<&[Native]> {
		match self {
			Self::List(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow as map.
	pub fn as_map(&self) -> Option<&BTreeMap<String, Native>> {
		match self {
			Self::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Map lookup; `None` for missing keys and non-map values.
	pub fn get(&self, key: &str) -> Option<&Native> {
		self.as_map().and_then(|map| map.get(key))
	}
}

impl From<Integer> for Native {
	fn from(value: Integer) -> Self {
		Self::Integer(value)
	}
}

impl From<&str> for Native {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Native {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<bool> for Native {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

/// 256-bit integers serialize as decimal strings.
impl Serialize for Integer {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match *self {
			Self::I8(v) => serializer.serialize_i8(v),
			Self::I16(v) => serializer.serialize_i16(v),
			Self::I32(v) => serializer.serialize_i32(v),
			Self::I64(v) => serializer.serialize_i64(v),
			Self::I128(v) => serializer.serialize_i128(v),
			Self::U8(v) => serializer.serialize_u8(v),
			Self::U16(v) => serializer.serialize_u16(v),
			Self::U32(v) => serializer.serialize_u32(v),
			Self::U64(v) => serializer.serialize_u64(v),
			Self::U128(v) => serializer.serialize_u128(v),
			Self::I256(_) | Self::U256(_) => serializer.collect_str(self),
		}
	}
}

/// Absence serializes as `null`, bytes as a `0x`-prefixed hex string.
impl Serialize for Native {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Absent => serializer.serialize_none(),
			Self::Bool(v) => serializer.serialize_bool(*v),
			Self::String(v) => serializer.serialize_str(v),
			Self::Bytes(v) => serializer.serialize_str(&format!("0x{}", hex::encode(v))),
			Self::Integer(v) => v.serialize(serializer),
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use primitive_types::U256;

	use super::{Integer, Native};

	#[test]
	fn json_rendering_keeps_widths() {
		let mut map = BTreeMap::new();
		map.insert("amount".to_owned(), Native::Integer(Integer::U64(1234)));
		map.insert("big".to_owned(), Native::Integer(Integer::U256(U256::from(7_u8))));
		map.insert("raw".to_owned(), Native::Bytes(vec![0xca, 0xfe]));
		map.insert("tags".to_owned(), Native::List(vec![Native::from("a"), Native::Absent]));

		let json = serde_json::to_value(Native::Map(map)).expect("serializes");
		assert_eq!(json["amount"], 1234);
		assert_eq!(json["big"], "7");
		assert_eq!(json["raw"], "0xcafe");
		assert_eq!(json["tags"][0], "a");
		assert!(json["tags"][1].is_null());
	}

	#[test]
	fn map_lookup_treats_missing_as_none() {
		let mut map = BTreeMap::new();
		map.insert("id".to_owned(), Native::Integer(Integer::U64(1)));
		let native = Native::Map(map);
		assert_eq!(native.get("id").and_then(Native::as_integer).and_then(Integer::to_i128), Some(1));
		assert!(native.get("missing").is_none());
		assert!(Native::from("x").get("id").is_none());
	}
}
