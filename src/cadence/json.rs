use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use primitive_types::U256;
use serde_json::{Map, Value as JsonValue};

use crate::cadence::number::parse_fixed_point;
use crate::cadence::{
	Address, Authorization, BigInt, Capability, Composite, CompositeType, DecodeOptions, FieldType, FunctionType, InclusiveRange, JsonError,
	NominalKind, NominalType, Parameter, Path, PathDomain, Purity, SimpleType, Type, TypeParameter, Value,
};

type Object = Map<String, JsonValue>;
type JsonResult<T> = std::result::Result<T, JsonError>;

/// Decode one JSON-CDC encoded value.
pub fn decode_json(bytes: &[u8], opt: &DecodeOptions) -> JsonResult<Value> {
	let root: JsonValue = serde_json::from_slice(bytes).map_err(JsonError::Syntax)?;
	JsonDecoder::new(opt).value(&root)
}

struct JsonDecoder<'o> {
	opt: &'o DecodeOptions,
	/// Nominal types seen so far; later occurrences may be encoded as bare identifiers.
	seen: HashMap<String, Type>,
}

impl<'o> JsonDecoder<'o> {
	fn new(opt: &'o DecodeOptions) -> Self {
		Self { opt, seen: HashMap::new() }
	}

	fn value(&mut self, json: &JsonValue) -> JsonResult<Value> {
		let obj = object(json, "value")?;
		let kind = str_field(obj, "type", "value")?;
		if kind == "Void" {
			return Ok(Value::Void);
		}
		let payload = field(obj, "value", "value")?;

		let value = match kind {
			"Optional" => match payload {
				JsonValue::Null => Value::Optional(None),
				inner => Value::Optional(Some(Box::new(self.value(inner)?))),
			},
			"Bool" => Value::Bool(payload.as_bool().ok_or(JsonError::UnexpectedShape {
				expected: "boolean",
				context: "Bool",
			})?),
			"String" => Value::String(string(payload, "String")?.into()),
			"Character" => Value::Character(string(payload, "Character")?.into()),
			"Address" => Value::Address(self.address(payload)?),

			"Int" => Value::Int(self.big_int(payload, "Int")?),
			"Int8" => Value::Int8(self.fixed_int(payload, "Int8")?),
			"Int16" => Value::Int16(self.fixed_int(payload, "Int16")?),
			"Int32" => Value::Int32(self.fixed_int(payload, "Int32")?),
			"Int64" => Value::Int64(self.fixed_int(payload, "Int64")?),
			"Int128" => Value::Int128(self.fixed_int(payload, "Int128")?),
			"Int256" => {
				let value = self.big_int(payload, "Int256")?;
				if !value.fits_int256() {
					return Err(invalid_number("Int256", &value.to_string()));
				}
				Value::Int256(value)
			}
			"UInt" => Value::UInt(self.big_uint(payload, "UInt")?),
			"UInt8" => Value::UInt8(self.fixed_int(payload, "UInt8")?),
			"UInt16" => Value::UInt16(self.fixed_int(payload, "UInt16")?),
			"UInt32" => Value::UInt32(self.fixed_int(payload, "UInt32")?),
			"UInt64" => Value::UInt64(self.fixed_int(payload, "UInt64")?),
			"UInt128" => Value::UInt128(self.fixed_int(payload, "UInt128")?),
			"UInt256" => Value::UInt256(self.big_uint(payload, "UInt256")?),
			"Word8" => Value::Word8(self.fixed_int(payload, "Word8")?),
			"Word16" => Value::Word16(self.fixed_int(payload, "Word16")?),
			"Word32" => Value::Word32(self.fixed_int(payload, "Word32")?),
			"Word64" => Value::Word64(self.fixed_int(payload, "Word64")?),
			"Word128" => Value::Word128(self.fixed_int(payload, "Word128")?),
			"Word256" => Value::Word256(self.big_uint(payload, "Word256")?),
			"Fix64" => {
				let literal = self.numeric_literal(payload, "Fix64")?;
				let (negative, scaled) = parse_fixed_point(&literal).ok_or_else(|| invalid_number("Fix64", &literal))?;
				let scaled = i128::try_from(scaled).map_err(|_| invalid_number("Fix64", &literal))?;
				let signed = if negative { -scaled } else { scaled };
				Value::Fix64(i64::try_from(signed).map_err(|_| invalid_number("Fix64", &literal))?)
			}
			"UFix64" => {
				let literal = self.numeric_literal(payload, "UFix64")?;
				match parse_fixed_point(&literal) {
					Some((false, scaled)) => Value::UFix64(u64::try_from(scaled).map_err(|_| invalid_number("UFix64", &literal))?),
					_ => return Err(invalid_number("UFix64", &literal)),
				}
			}

			"Array" => {
				let items = array(payload, "Array")?;
				Value::Array(items.iter().map(|item| self.value(item)).collect::<JsonResult<_>>()?)
			}
			"Dictionary" => {
				let entries = array(payload, "Dictionary")?;
				let mut pairs = Vec::with_capacity(entries.len());
				for entry in entries {
					let entry = object(entry, "Dictionary entry")?;
					let key = self.value(field(entry, "key", "Dictionary entry")?)?;
					let value = self.value(field(entry, "value", "Dictionary entry")?)?;
					pairs.push((key, value));
				}
				Value::Dictionary(pairs)
			}
			"Struct" | "Resource" | "Event" | "Contract" | "Enum" | "Attachment" => {
				let kind = NominalKind::from_name(kind).ok_or_else(|| JsonError::UnknownValueKind { kind: kind.to_owned() })?;
				Value::Composite(self.composite(kind, payload)?)
			}
			"Path" => {
				let obj = object(payload, "Path")?;
				let domain = str_field(obj, "domain", "Path")?;
				let domain = PathDomain::from_identifier(domain).ok_or_else(|| JsonError::InvalidPathDomain { domain: domain.to_owned() })?;
				Value::Path(Path {
					domain,
					identifier: str_field(obj, "identifier", "Path")?.into(),
				})
			}
			"Capability" => {
				let obj = object(payload, "Capability")?;
				let (id, path) = match obj.get("path") {
					Some(path) if self.opt.backwards_compatible && !obj.contains_key("id") => (0, Some(self.capability_path(path)?)),
					_ => (self.fixed_int(field(obj, "id", "Capability")?, "UInt64")?, None),
				};
				let address = self.address(field(obj, "address", "Capability")?)?;
				let borrow_type = match obj.get("borrowType") {
					None | Some(JsonValue::Null) => None,
					Some(JsonValue::String(id)) if id.is_empty() => None,
					Some(ty) => Some(self.static_type(ty)?),
				};
				Value::Capability(Capability {
					id,
					address,
					borrow_type,
					path,
				})
			}
			"Type" => {
				let obj = object(payload, "Type")?;
				let ty = match obj.get("staticType") {
					None | Some(JsonValue::Null) => None,
					Some(JsonValue::String(id)) if id.is_empty() => None,
					Some(ty) => Some(self.static_type(ty)?),
				};
				Value::TypeValue(ty)
			}
			"Function" => {
				let obj = object(payload, "Function")?;
				match self.static_type(field(obj, "functionType", "Function")?)? {
					Type::Function(function) => Value::Function(*function),
					other => return Err(JsonError::ExpectedFunctionType { got: other.id() }),
				}
			}
			"InclusiveRange" => {
				let obj = object(payload, "InclusiveRange")?;
				let start = self.value(field(obj, "start", "InclusiveRange")?)?;
				let end = self.value(field(obj, "end", "InclusiveRange")?)?;
				let step = self.value(field(obj, "step", "InclusiveRange")?)?;
				Value::InclusiveRange(Box::new(InclusiveRange { start, end, step }))
			}
			other => return Err(JsonError::UnknownValueKind { kind: other.to_owned() }),
		};
		Ok(value)
	}

	/// Pre-1.0 capabilities carry a `Path` value instead of an id.
	fn capability_path(&mut self, item: &JsonValue) -> JsonResult<Path> {
		match self.value(item)? {
			Value::Path(path) => Ok(path),
			_ => Err(JsonError::UnexpectedShape {
				expected: "Path value",
				context: "Capability path",
			}),
		}
	}

	fn composite(&mut self, kind: NominalKind, payload: &JsonValue) -> JsonResult<Composite> {
		let obj = object(payload, kind.name())?;
		let id = str_field(obj, "id", kind.name())?;
		let entries = array(field(obj, "fields", kind.name())?, "composite fields")?;

		let mut fields = Vec::with_capacity(entries.len());
		let mut values = Vec::with_capacity(entries.len());
		for entry in entries {
			let entry = object(entry, "composite field")?;
			fields.push(FieldType {
				name: str_field(entry, "name", "composite field")?.into(),
				ty: None,
			});
			values.push(self.value(field(entry, "value", "composite field")?)?);
		}

		let ty = Arc::new(CompositeType {
			kind,
			id: id.into(),
			fields,
		});
		Composite::new(ty, values).ok_or(JsonError::UnexpectedShape {
			expected: "one value per field",
			context: "composite",
		})
	}

	fn static_type(&mut self, json: &JsonValue) -> JsonResult<Type> {
		let obj = match json {
			JsonValue::String(id) => return self.type_reference(id),
			other => object(other, "static type")?,
		};
		let kind = str_field(obj, "kind", "static type")?;

		let ty = match kind {
			"Optional" => Type::Optional(Box::new(self.type_field(obj, "type")?)),
			"VariableSizedArray" => Type::VariableSizedArray(Box::new(self.type_field(obj, "type")?)),
			"ConstantSizedArray" => {
				let size = field(obj, "size", "ConstantSizedArray")?.as_u64().ok_or(JsonError::UnexpectedShape {
					expected: "unsigned integer",
					context: "ConstantSizedArray size",
				})?;
				Type::ConstantSizedArray {
					size,
					element: Box::new(self.type_field(obj, "type")?),
				}
			}
			"Dictionary" => Type::Dictionary {
				key: Box::new(self.type_field(obj, "key")?),
				value: Box::new(self.type_field(obj, "value")?),
			},
			"Reference" => {
				let authorization = self.authorization(obj)?;
				Type::Reference {
					authorization,
					referenced: Box::new(self.type_field(obj, "type")?),
				}
			}
			"Intersection" => Type::Intersection {
				types: self.type_list(obj, "types")?,
				legacy_base: None,
			},
			"Restriction" | "Restricted" if self.opt.backwards_compatible => {
				let base = match obj.get("type") {
					None | Some(JsonValue::Null) => None,
					Some(JsonValue::String(id)) if id.is_empty() => None,
					Some(ty) => Some(Box::new(self.static_type(ty)?)),
				};
				Type::Intersection {
					types: self.type_list(obj, "restrictions")?,
					legacy_base: base,
				}
			}
			"Capability" => match obj.get("type") {
				None | Some(JsonValue::Null) => Type::Capability(None),
				Some(JsonValue::String(id)) if id.is_empty() => Type::Capability(None),
				Some(ty) => Type::Capability(Some(Box::new(self.static_type(ty)?))),
			},
			"InclusiveRange" => Type::InclusiveRange(Box::new(self.type_field(obj, "element")?)),
			"Function" if obj.contains_key("return") => Type::Function(Box::new(self.function_type(obj)?)),
			other => {
				if let Some(kind) = NominalKind::from_name(other) {
					return self.nominal_type(kind, obj);
				}
				match SimpleType::from_id(other) {
					Some(simple) => Type::Simple(simple),
					None => return Err(JsonError::UnknownTypeKind { kind: other.to_owned() }),
				}
			}
		};
		Ok(ty)
	}

	fn type_reference(&self, id: &str) -> JsonResult<Type> {
		if let Some(ty) = self.seen.get(id) {
			return Ok(ty.clone());
		}
		if self.opt.allow_unstructured_static_types {
			return Ok(Type::Unstructured(id.into()));
		}
		Err(JsonError::UnknownTypeReference { id: id.to_owned() })
	}

	fn nominal_type(&mut self, kind: NominalKind, obj: &Object) -> JsonResult<Type> {
		let id = str_field(obj, "typeID", kind.name())?;
		let ty = Type::Nominal(NominalType { kind, id: id.into() });
		self.seen.insert(id.to_owned(), ty.clone());

		// Nested declarations register their identifiers for later bare references.
		if let Some(fields) = obj.get("fields").and_then(JsonValue::as_array) {
			for item in fields {
				let item = object(item, "field type")?;
				self.type_field(item, "type")?;
			}
		}
		if let Some(base) = obj.get("type").filter(|ty| !matches!(ty, JsonValue::String(id) if id.is_empty())) {
			self.static_type(base)?;
		}
		Ok(ty)
	}

	fn authorization(&mut self, obj: &Object) -> JsonResult<Authorization> {
		if self.opt.backwards_compatible {
			if let Some(authorized) = obj.get("authorized").and_then(JsonValue::as_bool) {
				return Ok(if authorized { Authorization::Legacy } else { Authorization::Unauthorized });
			}
		}

		let auth = match obj.get("authorization") {
			None | Some(JsonValue::Null) => return Ok(Authorization::Unauthorized),
			Some(auth) => object(auth, "authorization")?,
		};
		let entitlements = |auth: &Object| -> JsonResult<Vec<Box<str>>> {
			array(field(auth, "entitlements", "authorization")?, "entitlements")?
				.iter()
				.map(|item| -> JsonResult<Box<str>> { Ok(str_field(object(item, "entitlement")?, "typeID", "entitlement")?.into()) })
				.collect()
		};
		match str_field(auth, "kind", "authorization")? {
			"Unauthorized" => Ok(Authorization::Unauthorized),
			"EntitlementConjunctionSet" => Ok(Authorization::Conjunction(entitlements(auth)?)),
			"EntitlementDisjunctionSet" => Ok(Authorization::Disjunction(entitlements(auth)?)),
			"EntitlementMapAuthorization" => {
				let mut ids = entitlements(auth)?;
				let id = ids.pop().ok_or(JsonError::UnexpectedShape {
					expected: "one entitlement map",
					context: "authorization",
				})?;
				Ok(Authorization::Mapping(id))
			}
			other => Err(JsonError::UnknownTypeKind { kind: other.to_owned() }),
		}
	}

	fn function_type(&mut self, obj: &Object) -> JsonResult<FunctionType> {
		let purity = match obj.get("purity").and_then(JsonValue::as_str) {
			Some("view") => Purity::View,
			_ => Purity::Impure,
		};

		let mut type_parameters = Vec::new();
		if let Some(items) = obj.get("typeParameters").and_then(JsonValue::as_array) {
			for item in items {
				let item = object(item, "type parameter")?;
				let bound = match item.get("typeBound") {
					None | Some(JsonValue::Null) => None,
					Some(JsonValue::String(id)) if id.is_empty() => None,
					Some(ty) => Some(self.static_type(ty)?),
				};
				type_parameters.push(TypeParameter {
					name: str_field(item, "name", "type parameter")?.into(),
					bound,
				});
			}
		}

		let mut parameters = Vec::new();
		for item in array(field(obj, "parameters", "Function")?, "parameters")? {
			let item = object(item, "parameter")?;
			parameters.push(Parameter {
				label: item.get("label").and_then(JsonValue::as_str).unwrap_or_default().into(),
				identifier: item.get("id").and_then(JsonValue::as_str).unwrap_or_default().into(),
				ty: self.type_field(item, "type")?,
			});
		}

		Ok(FunctionType {
			purity,
			type_parameters,
			parameters,
			return_type: self.type_field(obj, "return")?,
		})
	}

	fn type_field(&mut self, obj: &Object, name: &'static str) -> JsonResult<Type> {
		self.static_type(field(obj, name, "static type")?)
	}

	fn type_list(&mut self, obj: &Object, name: &'static str) -> JsonResult<Vec<Type>> {
		match obj.get(name) {
			None | Some(JsonValue::Null) => Ok(Vec::new()),
			Some(items) => array(items, name)?.iter().map(|item| self.static_type(item)).collect(),
		}
	}

	fn address(&self, payload: &JsonValue) -> JsonResult<Address> {
		let literal = string(payload, "Address")?;
		let digits = match literal.strip_prefix("0x") {
			Some(digits) => digits,
			None if self.opt.backwards_compatible => literal,
			None => return Err(JsonError::InvalidAddress { literal: literal.to_owned() }),
		};
		Address::from_hex_digits(digits).ok_or_else(|| JsonError::InvalidAddress { literal: literal.to_owned() })
	}

	/// Numeric payloads are decimal strings; legacy payloads may use JSON numbers.
	fn numeric_literal<'j>(&self, payload: &'j JsonValue, kind: &'static str) -> JsonResult<Cow<'j, str>> {
		match payload {
			JsonValue::String(text) => Ok(Cow::Borrowed(text)),
			JsonValue::Number(number) if self.opt.backwards_compatible => Ok(Cow::Owned(number.to_string())),
			_ => Err(JsonError::UnexpectedShape {
				expected: "decimal string",
				context: kind,
			}),
		}
	}

	fn fixed_int<T: std::str::FromStr>(&self, payload: &JsonValue, kind: &'static str) -> JsonResult<T> {
		let literal = self.numeric_literal(payload, kind)?;
		literal.parse::<T>().map_err(|_| invalid_number(kind, &literal))
	}

	fn big_int(&self, payload: &JsonValue, kind: &'static str) -> JsonResult<BigInt> {
		let literal = self.numeric_literal(payload, kind)?;
		BigInt::parse_decimal(&literal).ok_or_else(|| invalid_number(kind, &literal))
	}

	fn big_uint(&self, payload: &JsonValue, kind: &'static str) -> JsonResult<U256> {
		let literal = self.numeric_literal(payload, kind)?;
		BigInt::parse_decimal(&literal)
			.and_then(|value| value.to_u256())
			.ok_or_else(|| invalid_number(kind, &literal))
	}
}

fn invalid_number(kind: &'static str, literal: &str) -> JsonError {
	JsonError::InvalidNumber {
		kind,
		literal: literal.to_owned(),
	}
}

fn object<'j>(json: &'j JsonValue, context: &'static str) -> JsonResult<&'j Object> {
	json.as_object().ok_or(JsonError::UnexpectedShape { expected: "object", context })
}

fn array<'j>(json: &'j JsonValue, context: &'static str) -> JsonResult<&'j Vec<JsonValue>> {
	json.as_array().ok_or(JsonError::UnexpectedShape { expected: "array", context })
}

fn string<'j>(json: &'j JsonValue, context: &'static str) -> JsonResult<&'j str> {
	json.as_str().ok_or(JsonError::UnexpectedShape { expected: "string", context })
}

fn field<'j>(obj: &'j Object, name: &'static str, context: &'static str) -> JsonResult<&'j JsonValue> {
	obj.get(name).ok_or(JsonError::MissingField { field: name, context })
}

fn str_field<'j>(obj: &'j Object, name: &'static str, context: &'static str) -> JsonResult<&'j str> {
	string(field(obj, name, context)?, name)
}

#[cfg(test)]
mod tests;
