use std::collections::HashMap;
use std::sync::Arc;

use ciborium::value::Value as CborValue;
use primitive_types::U256;

use crate::cadence::{
	Address, Authorization, BigInt, Capability, CcfError, Composite, CompositeType, FieldType, FunctionType, InclusiveRange, NominalKind,
	NominalType, Parameter, Path, PathDomain, Purity, SimpleType, Type, TypeParameter, Value,
};

mod cbor;

type CcfResult<T> = std::result::Result<T, CcfError>;

const TAG_BIGNUM_POS: u64 = 2;
const TAG_BIGNUM_NEG: u64 = 3;

const TAG_TYPEDEF_AND_VALUE: u64 = 129;
const TAG_TYPE_AND_VALUE: u64 = 130;

const TAG_TYPE_REF: u64 = 136;
const TAG_SIMPLE_TYPE: u64 = 137;
const TAG_OPTIONAL_TYPE: u64 = 138;
const TAG_VARSIZED_ARRAY_TYPE: u64 = 139;
const TAG_CONSTSIZED_ARRAY_TYPE: u64 = 140;
const TAG_DICT_TYPE: u64 = 141;
const TAG_REFERENCE_TYPE: u64 = 142;
const TAG_INTERSECTION_TYPE: u64 = 143;
const TAG_CAPABILITY_TYPE: u64 = 144;
const TAG_INCLUSIVE_RANGE_TYPE: u64 = 145;
const TAG_ENTITLEMENT_SET_AUTH: u64 = 146;
const TAG_ENTITLEMENT_MAP_AUTH: u64 = 147;

const TAG_TYPE_VALUE_REF: u64 = 184;
const TAG_SIMPLE_TYPE_VALUE: u64 = 185;
const TAG_OPTIONAL_TYPE_VALUE: u64 = 186;
const TAG_VARSIZED_ARRAY_TYPE_VALUE: u64 = 187;
const TAG_CONSTSIZED_ARRAY_TYPE_VALUE: u64 = 188;
const TAG_DICT_TYPE_VALUE: u64 = 189;
const TAG_REFERENCE_TYPE_VALUE: u64 = 190;
const TAG_INTERSECTION_TYPE_VALUE: u64 = 191;
const TAG_CAPABILITY_TYPE_VALUE: u64 = 192;
const TAG_FUNCTION_TYPE_VALUE: u64 = 193;
const TAG_INCLUSIVE_RANGE_TYPE_VALUE: u64 = 194;

/// Declaration kind for composite and interface typedef tags (160..=178)
/// and type value tags (208..=226).
fn nominal_kind(tag: u64) -> Option<NominalKind> {
	Some(match tag {
		160 | 208 => NominalKind::Struct,
		161 | 209 => NominalKind::Resource,
		162 | 210 => NominalKind::Event,
		163 | 211 => NominalKind::Contract,
		164 | 212 => NominalKind::Enum,
		165 | 213 => NominalKind::Attachment,
		176 | 224 => NominalKind::StructInterface,
		177 | 225 => NominalKind::ResourceInterface,
		178 | 226 => NominalKind::ContractInterface,
		_ => return None,
	})
}

/// Decode one CCF message.
///
/// The input must hold exactly one CBOR item tagged as a typedef-and-value
/// or type-and-value message.
pub fn decode_ccf(bytes: &[u8]) -> CcfResult<Value> {
	let (root, consumed) = cbor::read_item(bytes)?;
	if consumed < bytes.len() {
		return Err(CcfError::TrailingBytes {
			leftover: bytes.len() - consumed,
		});
	}

	let mut decoder = CcfDecoder::default();
	let (tag, body) = tagged(&root, "message")?;
	match tag {
		TAG_TYPEDEF_AND_VALUE => {
			let parts = sized(body, "typedef-and-value message", 2)?;
			decoder.typedefs(&parts[0])?;
			decoder.type_and_value(&parts[1])
		}
		TAG_TYPE_AND_VALUE => decoder.type_and_value(body),
		tag => Err(CcfError::UnexpectedTag { tag, context: "message" }),
	}
}

#[derive(Default)]
struct CcfDecoder {
	/// Typedef ids of this message.
	types: HashMap<Vec<u8>, NominalType>,
	/// Field layouts by qualified identifier.
	composites: HashMap<Box<str>, Arc<CompositeType>>,
	/// Ids bound by composite type values.
	type_values: HashMap<Vec<u8>, Type>,
}

impl CcfDecoder {
	/// Register every typedef before resolving field types, so fields may
	/// reference typedefs listed later.
	fn typedefs(&mut self, item: &CborValue) -> CcfResult<()> {
		let defs = array(item, "typedefs")?;

		let mut pending = Vec::with_capacity(defs.len());
		for def in defs {
			let (tag, body) = tagged(def, "typedef")?;
			let kind = nominal_kind(tag)
				.filter(|_| tag < 200)
				.ok_or(CcfError::UnexpectedTag { tag, context: "typedef" })?;
			let body = array(body, "typedef")?;
			if body.len() < 2 {
				return Err(CcfError::ArityMismatch {
					context: "typedef",
					expected: "at least 2".to_owned(),
					got: body.len(),
				});
			}
			let id = bytes(&body[0], "typedef id")?;
			let qualified = text(&body[1], "typedef qualified id")?;
			if self.types.contains_key(id) {
				return Err(CcfError::DuplicateTypeDef { id: hex::encode(id) });
			}
			self.types.insert(
				id.to_vec(),
				NominalType {
					kind,
					id: qualified.into(),
				},
			);
			pending.push((kind, qualified, body));
		}

		for (kind, qualified, body) in pending {
			let fields = match (kind, body.len()) {
				(kind, 2) if kind.is_interface() => continue,
				(NominalKind::Attachment, 4) => {
					self.inline_type(&body[2])?;
					&body[3]
				}
				(kind, 3) if !kind.is_interface() => &body[2],
				(_, got) => {
					return Err(CcfError::ArityMismatch {
						context: "typedef",
						expected: if kind.is_interface() { "2" } else { "3" }.to_owned(),
						got,
					});
				}
			};

			let mut layout = Vec::new();
			for field in array(fields, "typedef fields")? {
				let pair = sized(field, "typedef field", 2)?;
				layout.push(FieldType {
					name: text(&pair[0], "field name")?.into(),
					ty: Some(self.inline_type(&pair[1])?),
				});
			}
			self.composites.insert(
				qualified.into(),
				Arc::new(CompositeType {
					kind,
					id: qualified.into(),
					fields: layout,
				}),
			);
		}
		Ok(())
	}

	fn type_and_value(&mut self, item: &CborValue) -> CcfResult<Value> {
		let pair = sized(item, "type and value", 2)?;
		let ty = self.inline_type(&pair[0])?;
		self.value(&ty, &pair[1])
	}

	fn inline_type(&self, item: &CborValue) -> CcfResult<Type> {
		let (tag, body) = tagged(item, "inline type")?;
		let ty = match tag {
			TAG_TYPE_REF => {
				let id = bytes(body, "type reference")?;
				let nominal = self.types.get(id).ok_or_else(|| CcfError::UnknownTypeRef { id: hex::encode(id) })?;
				Type::Nominal(nominal.clone())
			}
			TAG_SIMPLE_TYPE => Type::Simple(simple(body)?),
			TAG_OPTIONAL_TYPE => Type::Optional(Box::new(self.inline_type(body)?)),
			TAG_VARSIZED_ARRAY_TYPE => Type::VariableSizedArray(Box::new(self.inline_type(body)?)),
			TAG_CONSTSIZED_ARRAY_TYPE => {
				let parts = sized(body, "constant-sized array type", 2)?;
				Type::ConstantSizedArray {
					size: uint(&parts[0], "array size")?,
					element: Box::new(self.inline_type(&parts[1])?),
				}
			}
			TAG_DICT_TYPE => {
				let parts = sized(body, "dictionary type", 2)?;
				Type::Dictionary {
					key: Box::new(self.inline_type(&parts[0])?),
					value: Box::new(self.inline_type(&parts[1])?),
				}
			}
			TAG_REFERENCE_TYPE => {
				let parts = sized(body, "reference type", 2)?;
				Type::Reference {
					authorization: authorization(&parts[0])?,
					referenced: Box::new(self.inline_type(&parts[1])?),
				}
			}
			TAG_INTERSECTION_TYPE => {
				let (legacy, types) = intersection_parts(body)?;
				Type::Intersection {
					types: types.iter().map(|item| self.inline_type(item)).collect::<CcfResult<_>>()?,
					legacy_base: match legacy {
						Some(base) => Some(Box::new(self.inline_type(base)?)),
						None => None,
					},
				}
			}
			TAG_CAPABILITY_TYPE => match body {
				CborValue::Null => Type::Capability(None),
				borrow => Type::Capability(Some(Box::new(self.inline_type(borrow)?))),
			},
			TAG_INCLUSIVE_RANGE_TYPE => Type::InclusiveRange(Box::new(self.inline_type(body)?)),
			tag => return Err(CcfError::UnexpectedTag { tag, context: "inline type" }),
		};
		Ok(ty)
	}

	/// Decode a run-time type value; `None` is the unknown type.
	fn type_value(&mut self, item: &CborValue) -> CcfResult<Option<Type>> {
		if matches!(item, CborValue::Null) {
			return Ok(None);
		}
		let (tag, body) = tagged(item, "type value")?;
		let ty = match tag {
			TAG_TYPE_VALUE_REF => {
				let id = bytes(body, "type value reference")?;
				self.type_values
					.get(id)
					.cloned()
					.ok_or_else(|| CcfError::UnknownTypeRef { id: hex::encode(id) })?
			}
			TAG_SIMPLE_TYPE_VALUE => Type::Simple(simple(body)?),
			TAG_OPTIONAL_TYPE_VALUE => Type::Optional(Box::new(self.required_type_value(body)?)),
			TAG_VARSIZED_ARRAY_TYPE_VALUE => Type::VariableSizedArray(Box::new(self.required_type_value(body)?)),
			TAG_CONSTSIZED_ARRAY_TYPE_VALUE => {
				let parts = sized(body, "constant-sized array type value", 2)?;
				Type::ConstantSizedArray {
					size: uint(&parts[0], "array size")?,
					element: Box::new(self.required_type_value(&parts[1])?),
				}
			}
			TAG_DICT_TYPE_VALUE => {
				let parts = sized(body, "dictionary type value", 2)?;
				Type::Dictionary {
					key: Box::new(self.required_type_value(&parts[0])?),
					value: Box::new(self.required_type_value(&parts[1])?),
				}
			}
			TAG_REFERENCE_TYPE_VALUE => {
				let parts = sized(body, "reference type value", 2)?;
				Type::Reference {
					authorization: authorization(&parts[0])?,
					referenced: Box::new(self.required_type_value(&parts[1])?),
				}
			}
			TAG_INTERSECTION_TYPE_VALUE => {
				let (legacy, types) = intersection_parts(body)?;
				let legacy_base = match legacy {
					Some(base) => Some(Box::new(self.required_type_value(base)?)),
					None => None,
				};
				Type::Intersection {
					types: types.iter().map(|item| self.required_type_value(item)).collect::<CcfResult<_>>()?,
					legacy_base,
				}
			}
			TAG_CAPABILITY_TYPE_VALUE => Type::Capability(self.type_value(body)?.map(Box::new)),
			TAG_FUNCTION_TYPE_VALUE => Type::Function(Box::new(self.function_type(body)?)),
			TAG_INCLUSIVE_RANGE_TYPE_VALUE => Type::InclusiveRange(Box::new(self.required_type_value(body)?)),
			tag => match nominal_kind(tag).filter(|_| tag >= 200) {
				Some(kind) => self.nominal_type_value(kind, body)?,
				None => return Err(CcfError::UnexpectedTag { tag, context: "type value" }),
			},
		};
		Ok(Some(ty))
	}

	fn required_type_value(&mut self, item: &CborValue) -> CcfResult<Type> {
		self.type_value(item)?.ok_or(CcfError::UnexpectedItem {
			expected: "type value",
			context: "nested type value",
			got: "null",
		})
	}

	/// `[id, qualified-id, type-parameters, fields, initializers]`
	fn nominal_type_value(&mut self, kind: NominalKind, body: &CborValue) -> CcfResult<Type> {
		let parts = sized(body, "composite type value", 5)?;
		let id = bytes(&parts[0], "type value id")?;
		let ty = Type::Nominal(NominalType {
			kind,
			id: text(&parts[1], "type value qualified id")?.into(),
		});
		// Bound before the fields so recursive references resolve.
		self.type_values.insert(id.to_vec(), ty.clone());

		for field in array(&parts[3], "type value fields")? {
			let pair = sized(field, "type value field", 2)?;
			text(&pair[0], "field name")?;
			self.required_type_value(&pair[1])?;
		}
		Ok(ty)
	}

	/// `[type-parameters, parameters, return-type(, purity)]`
	fn function_type(&mut self, body: &CborValue) -> CcfResult<FunctionType> {
		let parts = array(body, "function type")?;
		if !(3..=4).contains(&parts.len()) {
			return Err(CcfError::ArityMismatch {
				context: "function type",
				expected: "3 or 4".to_owned(),
				got: parts.len(),
			});
		}

		let mut type_parameters = Vec::new();
		for item in array(&parts[0], "type parameters")? {
			let pair = sized(item, "type parameter", 2)?;
			type_parameters.push(TypeParameter {
				name: text(&pair[0], "type parameter name")?.into(),
				bound: self.type_value(&pair[1])?,
			});
		}

		let mut parameters = Vec::new();
		for item in array(&parts[1], "parameters")? {
			let triple = sized(item, "parameter", 3)?;
			parameters.push(Parameter {
				label: text(&triple[0], "parameter label")?.into(),
				identifier: text(&triple[1], "parameter identifier")?.into(),
				ty: self.required_type_value(&triple[2])?,
			});
		}

		let purity = match parts.get(3) {
			Some(item) if uint(item, "function purity")? == 1 => Purity::View,
			_ => Purity::Impure,
		};

		Ok(FunctionType {
			purity,
			type_parameters,
			parameters,
			return_type: self.required_type_value(&parts[2])?,
		})
	}

	/// Decode a value laid out for static type `ty`.
	fn value(&mut self, ty: &Type, item: &CborValue) -> CcfResult<Value> {
		let value = match ty {
			Type::Simple(simple) if simple.is_abstract() => self.embedded(item)?,
			Type::Simple(simple) => self.simple_value(*simple, item)?,
			Type::Optional(inner) => match item {
				CborValue::Null => Value::Optional(None),
				item => Value::Optional(Some(Box::new(self.value(inner, item)?))),
			},
			Type::VariableSizedArray(element) => {
				let items = array(item, "array value")?;
				Value::Array(items.iter().map(|item| self.value(element, item)).collect::<CcfResult<_>>()?)
			}
			Type::ConstantSizedArray { size, element } => {
				let items = array(item, "array value")?;
				if u64::try_from(items.len()).ok() != Some(*size) {
					return Err(CcfError::ArityMismatch {
						context: "constant-sized array value",
						expected: size.to_string(),
						got: items.len(),
					});
				}
				Value::Array(items.iter().map(|item| self.value(element, item)).collect::<CcfResult<_>>()?)
			}
			Type::Dictionary { key, value } => {
				let flat = array(item, "dictionary value")?;
				if flat.len() % 2 != 0 {
					return Err(CcfError::ArityMismatch {
						context: "dictionary value",
						expected: "an even count".to_owned(),
						got: flat.len(),
					});
				}
				let mut pairs = Vec::with_capacity(flat.len() / 2);
				for pair in flat.chunks_exact(2) {
					pairs.push((self.value(key, &pair[0])?, self.value(value, &pair[1])?));
				}
				Value::Dictionary(pairs)
			}
			Type::Reference { referenced, .. } => self.value(referenced, item)?,
			Type::Intersection { .. } => self.embedded(item)?,
			Type::Capability(borrow) => {
				let parts = sized(item, "capability value", 2)?;
				Value::Capability(Capability {
					address: address(&parts[0])?,
					id: uint(&parts[1], "capability id")?,
					borrow_type: borrow.as_deref().cloned(),
					path: None,
				})
			}
			Type::InclusiveRange(element) => {
				let parts = sized(item, "inclusive range value", 3)?;
				Value::InclusiveRange(Box::new(InclusiveRange {
					start: self.value(element, &parts[0])?,
					end: self.value(element, &parts[1])?,
					step: self.value(element, &parts[2])?,
				}))
			}
			Type::Nominal(nominal) if nominal.kind.is_interface() => self.embedded(item)?,
			Type::Nominal(nominal) => self.composite(nominal, item)?,
			Type::Function(_) => Value::Function(self.function_value(item)?),
			Type::Unstructured(id) => return Err(CcfError::UnsupportedType { id: id.to_string() }),
		};
		Ok(value)
	}

	/// Value of abstract static type, carrying its concrete type inline.
	fn embedded(&mut self, item: &CborValue) -> CcfResult<Value> {
		let (tag, body) = tagged(item, "abstract-typed value")?;
		if tag != TAG_TYPE_AND_VALUE {
			return Err(CcfError::UnexpectedTag {
				tag,
				context: "abstract-typed value",
			});
		}
		self.type_and_value(body)
	}

	fn composite(&mut self, nominal: &NominalType, item: &CborValue) -> CcfResult<Value> {
		let layout = self
			.composites
			.get(nominal.id.as_ref())
			.cloned()
			.ok_or_else(|| CcfError::MissingCompositeDef { id: nominal.id.to_string() })?;
		let items = sized(item, "composite value", layout.fields.len())?;

		let mut values = Vec::with_capacity(items.len());
		for (field, item) in layout.fields.iter().zip(items) {
			let ty = field.ty.as_ref().ok_or_else(|| CcfError::UnsupportedType { id: nominal.id.to_string() })?;
			values.push(self.value(ty, item)?);
		}

		let got = values.len();
		Composite::new(layout, values).map(Value::Composite).ok_or(CcfError::ArityMismatch {
			context: "composite value",
			expected: "one value per field".to_owned(),
			got,
		})
	}

	fn function_value(&mut self, item: &CborValue) -> CcfResult<FunctionType> {
		match item {
			CborValue::Tag(TAG_FUNCTION_TYPE_VALUE, body) => self.function_type(body),
			body => self.function_type(body),
		}
	}

	fn simple_value(&mut self, simple: SimpleType, item: &CborValue) -> CcfResult<Value> {
		let value = match simple {
			SimpleType::Void => match item {
				CborValue::Null => Value::Void,
				other => return Err(unexpected("null", "Void", other)),
			},
			SimpleType::Bool => match item {
				CborValue::Bool(v) => Value::Bool(*v),
				other => return Err(unexpected("bool", "Bool", other)),
			},
			SimpleType::String => Value::String(text(item, "String")?.into()),
			SimpleType::Character => Value::Character(text(item, "Character")?.into()),
			SimpleType::Bytes => Value::Bytes(bytes(item, "Bytes")?.to_vec()),
			SimpleType::Address => Value::Address(address(item)?),

			SimpleType::Int => Value::Int(big_int(item, "Int")?),
			SimpleType::Int8 => Value::Int8(fixed(item, "Int8")?),
			SimpleType::Int16 => Value::Int16(fixed(item, "Int16")?),
			SimpleType::Int32 => Value::Int32(fixed(item, "Int32")?),
			SimpleType::Int64 => Value::Int64(fixed(item, "Int64")?),
			SimpleType::Int128 => Value::Int128(fixed(item, "Int128")?),
			SimpleType::Int256 => {
				let value = big_int(item, "Int256")?;
				if !value.fits_int256() {
					return Err(CcfError::IntegerOutOfRange { kind: "Int256" });
				}
				Value::Int256(value)
			}
			SimpleType::UInt => Value::UInt(big_uint(item, "UInt")?),
			SimpleType::UInt8 => Value::UInt8(fixed(item, "UInt8")?),
			SimpleType::UInt16 => Value::UInt16(fixed(item, "UInt16")?),
			SimpleType::UInt32 => Value::UInt32(fixed(item, "UInt32")?),
			SimpleType::UInt64 => Value::UInt64(fixed(item, "UInt64")?),
			SimpleType::UInt128 => Value::UInt128(unsigned_128(item, "UInt128")?),
			SimpleType::UInt256 => Value::UInt256(big_uint(item, "UInt256")?),
			SimpleType::Word8 => Value::Word8(fixed(item, "Word8")?),
			SimpleType::Word16 => Value::Word16(fixed(item, "Word16")?),
			SimpleType::Word32 => Value::Word32(fixed(item, "Word32")?),
			SimpleType::Word64 => Value::Word64(fixed(item, "Word64")?),
			SimpleType::Word128 => Value::Word128(unsigned_128(item, "Word128")?),
			SimpleType::Word256 => Value::Word256(big_uint(item, "Word256")?),
			SimpleType::Fix64 => Value::Fix64(fixed(item, "Fix64")?),
			SimpleType::UFix64 => Value::UFix64(fixed(item, "UFix64")?),

			SimpleType::StoragePath | SimpleType::PublicPath | SimpleType::PrivatePath => {
				let parts = sized(item, "path value", 2)?;
				let code = uint(&parts[0], "path domain")?;
				Value::Path(Path {
					domain: PathDomain::from_ccf_code(code).ok_or(CcfError::InvalidPathDomain { code })?,
					identifier: text(&parts[1], "path identifier")?.into(),
				})
			}
			SimpleType::MetaType => Value::TypeValue(self.type_value(item)?),
			SimpleType::Function => Value::Function(self.function_value(item)?),
			other => {
				return Err(CcfError::UnsupportedType {
					id: other.id().to_owned(),
				});
			}
		};
		Ok(value)
	}
}

/// Split an intersection body into the legacy restricted type and the
/// interface set. Accepts `[types]` and `[base-or-nil, [types]]`.
fn intersection_parts(body: &CborValue) -> CcfResult<(Option<&CborValue>, &[CborValue])> {
	let parts = array(body, "intersection type")?;
	match parts {
		[base, CborValue::Array(types)] => {
			let base = match base {
				CborValue::Null => None,
				base => Some(base),
			};
			Ok((base, types.as_slice()))
		}
		types => Ok((None, types)),
	}
}

fn authorization(item: &CborValue) -> CcfResult<Authorization> {
	let auth = match item {
		CborValue::Null | CborValue::Bool(false) => Authorization::Unauthorized,
		CborValue::Bool(true) => Authorization::Legacy,
		CborValue::Tag(TAG_ENTITLEMENT_SET_AUTH, body) => {
			let parts = sized(body, "entitlement set authorization", 2)?;
			let entitlements = array(&parts[1], "entitlements")?
				.iter()
				.map(|item| text(item, "entitlement").map(Box::from))
				.collect::<CcfResult<Vec<_>>>()?;
			match uint(&parts[0], "entitlement set kind")? {
				0 => Authorization::Conjunction(entitlements),
				1 => Authorization::Disjunction(entitlements),
				_ => {
					return Err(CcfError::UnexpectedItem {
						expected: "0 or 1",
						context: "entitlement set kind",
						got: "uint",
					});
				}
			}
		}
		CborValue::Tag(TAG_ENTITLEMENT_MAP_AUTH, body) => match &**body {
			CborValue::Array(items) if items.len() == 1 => Authorization::Mapping(text(&items[0], "entitlement map")?.into()),
			other => Authorization::Mapping(text(other, "entitlement map")?.into()),
		},
		CborValue::Tag(tag, _) => {
			return Err(CcfError::UnexpectedTag {
				tag: *tag,
				context: "authorization",
			});
		}
		other => return Err(unexpected("authorization", "reference type", other)),
	};
	Ok(auth)
}

fn simple(body: &CborValue) -> CcfResult<SimpleType> {
	let code = uint(body, "simple type id")?;
	SimpleType::from_ccf_code(code).ok_or(CcfError::UnknownSimpleType { code })
}

fn address(item: &CborValue) -> CcfResult<Address> {
	let raw = bytes(item, "Address")?;
	Address::from_slice(raw).ok_or(CcfError::InvalidAddress { len: raw.len() })
}

/// Integer of up to 256 bits, from a CBOR integer or a bignum tag.
fn big_int(item: &CborValue, kind: &'static str) -> CcfResult<BigInt> {
	match item {
		CborValue::Integer(value) => Ok(BigInt::from(i128::from(*value))),
		CborValue::Tag(tag @ (TAG_BIGNUM_POS | TAG_BIGNUM_NEG), body) => {
			let raw = bytes(body, kind)?;
			if raw.len() > 32 {
				return Err(CcfError::IntegerOutOfRange { kind });
			}
			let magnitude = U256::from_big_endian(raw);
			if *tag == TAG_BIGNUM_POS {
				return Ok(BigInt::new(false, magnitude));
			}
			// Negative bignums encode -1 - n.
			let magnitude = magnitude.checked_add(U256::one()).ok_or(CcfError::IntegerOutOfRange { kind })?;
			Ok(BigInt::new(true, magnitude))
		}
		other => Err(unexpected("integer", kind, other)),
	}
}

fn big_uint(item: &CborValue, kind: &'static str) -> CcfResult<U256> {
	big_int(item, kind)?.to_u256().ok_or(CcfError::IntegerOutOfRange { kind })
}

fn unsigned_128(item: &CborValue, kind: &'static str) -> CcfResult<u128> {
	big_int(item, kind)?.to_u128().ok_or(CcfError::IntegerOutOfRange { kind })
}

fn fixed<T: TryFrom<i128>>(item: &CborValue, kind: &'static str) -> CcfResult<T> {
	let value = big_int(item, kind)?.to_i128().ok_or(CcfError::IntegerOutOfRange { kind })?;
	T::try_from(value).map_err(|_| CcfError::IntegerOutOfRange { kind })
}

fn uint(item: &CborValue, context: &'static str) -> CcfResult<u64> {
	match item {
		CborValue::Integer(value) => u64::try_from(*value).map_err(|_| unexpected("unsigned integer", context, item)),
		other => Err(unexpected("unsigned integer", context, other)),
	}
}

fn tagged<'c>(item: &'c CborValue, context: &'static str) -> CcfResult<(u64, &'c CborValue)> {
	match item {
		CborValue::Tag(tag, body) => Ok((*tag, &**body)),
		other => Err(unexpected("tagged item", context, other)),
	}
}

fn array<'c>(item: &'c CborValue, context: &'static str) -> CcfResult<&'c [CborValue]> {
	match item {
		CborValue::Array(items) => Ok(items),
		other => Err(unexpected("array", context, other)),
	}
}

fn sized<'c>(item: &'c CborValue, context: &'static str, len: usize) -> CcfResult<&'c [CborValue]> {
	let items = array(item, context)?;
	if items.len() != len {
		return Err(CcfError::ArityMismatch {
			context,
			expected: len.to_string(),
			got: items.len(),
		});
	}
	Ok(items)
}

fn bytes<'c>(item: &'c CborValue, context: &'static str) -> CcfResult<&'c [u8]> {
	match item {
		CborValue::Bytes(raw) => Ok(raw),
		other => Err(unexpected("byte string", context, other)),
	}
}

fn text<'c>(item: &'c CborValue, context: &'static str) -> CcfResult<&'c str> {
	match item {
		CborValue::Text(value) => Ok(value),
		other => Err(unexpected("text string", context, other)),
	}
}

fn unexpected(expected: &'static str, context: &'static str, got: &CborValue) -> CcfError {
	CcfError::UnexpectedItem {
		expected,
		context,
		got: shape(got),
	}
}

fn shape(item: &CborValue) -> &'static str {
	match item {
		CborValue::Integer(_) => "integer",
		CborValue::Bytes(_) => "byte string",
		CborValue::Float(_) => "float",
		CborValue::Text(_) => "text string",
		CborValue::Bool(_) => "bool",
		CborValue::Null => "null",
		CborValue::Tag(..) => "tagged item",
		CborValue::Array(_) => "array",
		CborValue::Map(_) => "map",
		_ => "unknown item",
	}
}

#[cfg(test)]
mod tests;
