use std::fmt;
use std::sync::Arc;

use primitive_types::U256;

use crate::cadence::number::format_fixed_point;
use crate::cadence::{Address, BigInt, CompositeType, FunctionType, NominalKind, Type};

/// Decoded Cadence value with full type information.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// `()`
	Void,
	/// Optional with zero or one inner value.
	Optional(Option<Box<Value>>),
	/// Boolean.
	Bool(bool),
	/// UTF-8 string.
	String(Box<str>),
	/// Single extended grapheme cluster.
	Character(Box<str>),
	/// Raw byte sequence.
	Bytes(Vec<u8>),
	/// Account address.
	Address(Address),
	/// Arbitrary-precision signed integer (held in 256 bits).
	Int(BigInt),
	/// `Int8`
	Int8(i8),
	/// `Int16`
	Int16(i16),
	/// `Int32`
	Int32(i32),
	/// `Int64`
	Int64(i64),
	/// `Int128`
	Int128(i128),
	/// `Int256`
	Int256(BigInt),
	/// Arbitrary-precision unsigned integer (held in 256 bits).
	UInt(U256),
	/// `UInt8`
	UInt8(u8),
	/// `UInt16`
	UInt16(u16),
	/// `UInt32`
	UInt32(u32),
	/// `UInt64`
	UInt64(u64),
	/// `UInt128`
	UInt128(u128),
	/// `UInt256`
	UInt256(U256),
	/// `Word8`
	Word8(u8),
	/// `Word16`
	Word16(u16),
	/// `Word32`
	Word32(u32),
	/// `Word64`
	Word64(u64),
	/// `Word128`
	Word128(u128),
	/// `Word256`
	Word256(U256),
	/// Signed fixed point, scaled by 10^8.
	Fix64(i64),
	/// Unsigned fixed point, scaled by 10^8.
	UFix64(u64),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Key/value pairs in wire order.
	Dictionary(Vec<(Value, Value)>),
	/// Named-field aggregate.
	Composite(Composite),
	/// Storage path.
	Path(Path),
	/// Capability.
	Capability(Capability),
	/// Run-time type value; `None` when the type is unknown.
	TypeValue(Option<Type>),
	/// Function value, known only by its signature.
	Function(FunctionType),
	/// `InclusiveRange` value.
	InclusiveRange(Box<InclusiveRange>),
}

/// Composite value with fields stored positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
	ty: Arc<CompositeType>,
	fields: Vec<Value>,
}

impl Composite {
	/// Pair a field layout with positional field values.
	///
	/// Returns `None` when the value count does not match the layout.
	pub fn new(ty: Arc<CompositeType>, fields: Vec<Value>) -> Option<Self> {
		if ty.fields.len() != fields.len() {
			return None;
		}
		Some(Self { ty, fields })
	}

	/// Declaration kind.
	pub fn kind(&self) -> NominalKind {
		self.ty.kind
	}

	/// Qualified type identifier.
	pub fn type_id(&self) -> &str {
		&self.ty.id
	}

	/// Field layout.
	pub fn composite_type(&self) -> &CompositeType {
		&self.ty
	}

	/// Field values in declaration order.
	pub fn field_values(&self) -> &[Value] {
		&self.fields
	}

	/// Field value by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.ty.field_position(name).and_then(|position| self.fields.get(position))
	}

	/// Iterate `(name, value)` pairs, resolving positions through the type layout.
	pub fn named_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields
			.iter()
			.enumerate()
			.filter_map(|(position, value)| self.ty.field_name(position).map(|name| (name, value)))
	}
}

/// Path domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathDomain {
	/// `/storage/`
	Storage,
	/// `/private/`
	Private,
	/// `/public/`
	Public,
}

impl PathDomain {
	/// Domain identifier.
	pub fn identifier(self) -> &'static str {
		match self {
			Self::Storage => "storage",
			Self::Private => "private",
			Self::Public => "public",
		}
	}

	/// Look up by identifier.
	pub fn from_identifier(text: &str) -> Option<Self> {
		match text {
			"storage" => Some(Self::Storage),
			"private" => Some(Self::Private),
			"public" => Some(Self::Public),
			_ => None,
		}
	}

	/// CCF domain code.
	pub fn ccf_code(self) -> u64 {
		match self {
			Self::Storage => 1,
			Self::Private => 2,
			Self::Public => 3,
		}
	}

	/// Look up by CCF domain code.
	pub fn from_ccf_code(code: u64) -> Option<Self> {
		match code {
			1 => Some(Self::Storage),
			2 => Some(Self::Private),
			3 => Some(Self::Public),
			_ => None,
		}
	}
}

/// Path value such as `/storage/flowTokenVault`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
	/// Domain.
	pub domain: PathDomain,
	/// Identifier within the domain.
	pub identifier: Box<str>,
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "/{}/{}", self.domain.identifier(), self.identifier)
	}
}

/// Capability value.
#[derive(Debug, Clone, PartialEq)]
pub struct Capability {
	/// Capability controller id.
	pub id: u64,
	/// Issuing account.
	pub address: Address,
	/// Borrow type, when known.
	pub borrow_type: Option<Type>,
	/// Target path of a legacy path-based capability; `id` is 0 when set.
	pub path: Option<Path>,
}

/// `InclusiveRange` bounds and step.
#[derive(Debug, Clone, PartialEq)]
pub struct InclusiveRange {
	/// First element.
	pub start: Value,
	/// Last element.
	pub end: Value,
	/// Step between elements.
	pub step: Value,
}

impl Value {
	/// Cadence kind name, used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Void => "Void",
			Self::Optional(_) => "Optional",
			Self::Bool(_) => "Bool",
			Self::String(_) => "String",
			Self::Character(_) => "Character",
			Self::Bytes(_) => "Bytes",
			Self::Address(_) => "Address",
			Self::Int(_) => "Int",
			Self::Int8(_) => "Int8",
			Self::Int16(_) => "Int16",
			Self::Int32(_) => "Int32",
			Self::Int64(_) => "Int64",
			Self::Int128(_) => "Int128",
			Self::Int256(_) => "Int256",
			Self::UInt(_) => "UInt",
			Self::UInt8(_) => "UInt8",
			Self::UInt16(_) => "UInt16",
			Self::UInt32(_) => "UInt32",
			Self::UInt64(_) => "UInt64",
			Self::UInt128(_) => "UInt128",
			Self::UInt256(_) => "UInt256",
			Self::Word8(_) => "Word8",
			Self::Word16(_) => "Word16",
			Self::Word32(_) => "Word32",
			Self::Word64(_) => "Word64",
			Self::Word128(_) => "Word128",
			Self::Word256(_) => "Word256",
			Self::Fix64(_) => "Fix64",
			Self::UFix64(_) => "UFix64",
			Self::Array(_) => "Array",
			Self::Dictionary(_) => "Dictionary",
			Self::Composite(item) => item.kind().name(),
			Self::Path(_) => "Path",
			Self::Capability(_) => "Capability",
			Self::TypeValue(_) => "Type",
			Self::Function(_) => "Function",
			Self::InclusiveRange(_) => "InclusiveRange",
		}
	}
}

/// Cadence source-like rendering, used as the textual fallback during conversion.
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Void => f.write_str("()"),
			Self::Optional(None) => f.write_str("nil"),
			Self::Optional(Some(inner)) => write!(f, "{inner}"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::String(v) | Self::Character(v) => write!(f, "{v:?}"),
			Self::Bytes(v) => write!(f, "0x{}", hex::encode(v)),
			Self::Address(v) => write!(f, "{v}"),
			Self::Int(v) | Self::Int256(v) => write!(f, "{v}"),
			Self::Int8(v) => write!(f, "{v}"),
			Self::Int16(v) => write!(f, "{v}"),
			Self::Int32(v) => write!(f, "{v}"),
			Self::Int64(v) => write!(f, "{v}"),
			Self::Int128(v) => write!(f, "{v}"),
			Self::UInt(v) | Self::UInt256(v) | Self::Word256(v) => write!(f, "{v}"),
			Self::UInt8(v) | Self::Word8(v) => write!(f, "{v}"),
			Self::UInt16(v) | Self::Word16(v) => write!(f, "{v}"),
			Self::UInt32(v) | Self::Word32(v) => write!(f, "{v}"),
			Self::UInt64(v) | Self::Word64(v) => write!(f, "{v}"),
			Self::UInt128(v) | Self::Word128(v) => write!(f, "{v}"),
			Self::Fix64(v) => f.write_str(&format_fixed_point(*v < 0, u128::from(v.unsigned_abs()))),
			Self::UFix64(v) => f.write_str(&format_fixed_point(false, u128::from(*v))),
			Self::Array(items) => {
				f.write_str("[")?;
				write_joined(f, items.iter(), |f, item| write!(f, "{item}"))?;
				f.write_str("]")
			}
			Self::Dictionary(pairs) => {
				f.write_str("{")?;
				write_joined(f, pairs.iter(), |f, (key, value)| write!(f, "{key}: {value}"))?;
				f.write_str("}")
			}
			Self::Composite(item) => {
				write!(f, "{}(", item.type_id())?;
				write_joined(f, item.named_fields(), |f, (name, value)| write!(f, "{name}: {value}"))?;
				f.write_str(")")
			}
			Self::Path(path) => write!(f, "{path}"),
			Self::Capability(cap) => {
				match &cap.borrow_type {
					Some(ty) => write!(f, "Capability<{ty}>")?,
					None => f.write_str("Capability")?,
				}
				match &cap.path {
					Some(path) => write!(f, "(address: {}, path: {path})", cap.address),
					None => write!(f, "(address: {}, id: {})", cap.address, cap.id),
				}
			}
			Self::TypeValue(Some(ty)) => write!(f, "Type<{ty}>()"),
			Self::TypeValue(None) => f.write_str("Type()"),
			Self::Function(function) => write!(f, "Function<{}>()", function.id()),
			Self::InclusiveRange(range) => write!(f, "InclusiveRange(start: {}, end: {}, step: {})", range.start, range.end, range.step),
		}
	}
}

fn write_joined<I, T>(f: &mut fmt::Formatter<'_>, items: I, mut write_item: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result) -> fmt::Result
where
	I: Iterator<Item = T>,
{
	for (idx, item) in items.enumerate() {
		if idx > 0 {
			f.write_str(", ")?;
		}
		write_item(f, item)?;
	}
	Ok(())
}
