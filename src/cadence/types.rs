use std::fmt;

macro_rules! simple_types {
	($($variant:ident => $id:literal, $code:literal;)+) => {
		/// Cadence types identified by a single name.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum SimpleType {
			$(
				#[doc = concat!("`", $id, "`")]
				$variant,
			)+
		}

		impl SimpleType {
			/// Cadence type identifier.
			pub fn id(self) -> &'static str {
				match self {
					$(Self::$variant => $id,)+
				}
			}

			/// Look up by Cadence type identifier.
			pub fn from_id(id: &str) -> Option<Self> {
				match id {
					$($id => Some(Self::$variant),)+
					_ => None,
				}
			}

			/// CCF simple type id.
			pub fn ccf_code(self) -> u64 {
				match self {
					$(Self::$variant => $code,)+
				}
			}

			/// Look up by CCF simple type id.
			pub fn from_ccf_code(code: u64) -> Option<Self> {
				match code {
					$($code => Some(Self::$variant),)+
					_ => None,
				}
			}
		}
	};
}

simple_types! {
	Bool => "Bool", 0;
	String => "String", 1;
	Character => "Character", 2;
	Address => "Address", 3;
	Int => "Int", 4;
	Int8 => "Int8", 5;
	Int16 => "Int16", 6;
	Int32 => "Int32", 7;
	Int64 => "Int64", 8;
	Int128 => "Int128", 9;
	Int256 => "Int256", 10;
	UInt => "UInt", 11;
	UInt8 => "UInt8", 12;
	UInt16 => "UInt16", 13;
	UInt32 => "UInt32", 14;
	UInt64 => "UInt64", 15;
	UInt128 => "UInt128", 16;
	UInt256 => "UInt256", 17;
	Word8 => "Word8", 18;
	Word16 => "Word16", 19;
	Word32 => "Word32", 20;
	Word64 => "Word64", 21;
	Fix64 => "Fix64", 22;
	UFix64 => "UFix64", 23;
	Path => "Path", 24;
	CapabilityPath => "CapabilityPath", 25;
	StoragePath => "StoragePath", 26;
	PublicPath => "PublicPath", 27;
	PrivatePath => "PrivatePath", 28;
	DeployedContract => "DeployedContract", 35;
	Block => "Block", 37;
	Any => "Any", 38;
	AnyStruct => "AnyStruct", 39;
	AnyResource => "AnyResource", 40;
	MetaType => "Type", 41;
	Never => "Never", 42;
	Number => "Number", 43;
	SignedNumber => "SignedNumber", 44;
	Integer => "Integer", 45;
	SignedInteger => "SignedInteger", 46;
	FixedPoint => "FixedPoint", 47;
	SignedFixedPoint => "SignedFixedPoint", 48;
	Bytes => "Bytes", 49;
	Void => "Void", 50;
	Function => "Function", 51;
	Word128 => "Word128", 52;
	Word256 => "Word256", 53;
	AnyStructAttachment => "AnyStructAttachment", 54;
	AnyResourceAttachment => "AnyResourceAttachment", 55;
	StorageCapabilityController => "StorageCapabilityController", 56;
	AccountCapabilityController => "AccountCapabilityController", 57;
}

impl SimpleType {
	/// Whether values of this type carry their concrete run-time type on the wire.
	pub fn is_abstract(self) -> bool {
		matches!(
			self,
			Self::Any
				| Self::AnyStruct
				| Self::AnyResource
				| Self::AnyStructAttachment
				| Self::AnyResourceAttachment
				| Self::Number
				| Self::SignedNumber
				| Self::Integer
				| Self::SignedInteger
				| Self::FixedPoint
				| Self::SignedFixedPoint
				| Self::Path
				| Self::CapabilityPath
		)
	}
}

/// Kind of a nominal (declared) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NominalKind {
	/// `struct`
	Struct,
	/// `resource`
	Resource,
	/// `event`
	Event,
	/// `contract`
	Contract,
	/// `enum`
	Enum,
	/// `attachment`
	Attachment,
	/// `struct interface`
	StructInterface,
	/// `resource interface`
	ResourceInterface,
	/// `contract interface`
	ContractInterface,
}

impl NominalKind {
	/// Wire name used by JSON-CDC for values and static types.
	pub fn name(self) -> &'static str {
		match self {
			Self::Struct => "Struct",
			Self::Resource => "Resource",
			Self::Event => "Event",
			Self::Contract => "Contract",
			Self::Enum => "Enum",
			Self::Attachment => "Attachment",
			Self::StructInterface => "StructInterface",
			Self::ResourceInterface => "ResourceInterface",
			Self::ContractInterface => "ContractInterface",
		}
	}

	/// Look up by JSON-CDC wire name.
	pub fn from_name(name: &str) -> Option<Self> {
		Some(match name {
			"Struct" => Self::Struct,
			"Resource" => Self::Resource,
			"Event" => Self::Event,
			"Contract" => Self::Contract,
			"Enum" => Self::Enum,
			"Attachment" => Self::Attachment,
			"StructInterface" => Self::StructInterface,
			"ResourceInterface" => Self::ResourceInterface,
			"ContractInterface" => Self::ContractInterface,
			_ => return None,
		})
	}

	/// Whether this is an interface kind.
	pub fn is_interface(self) -> bool {
		matches!(self, Self::StructInterface | Self::ResourceInterface | Self::ContractInterface)
	}
}

/// Reference to a declared type by kind and qualified identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NominalType {
	/// Declaration kind.
	pub kind: NominalKind,
	/// Qualified identifier such as `A.0000000000000001.Token.Vault`.
	pub id: Box<str>,
}

/// One declared composite field.
#[derive(Debug, Clone)]
pub struct FieldType {
	/// Field identifier.
	pub name: Box<str>,
	/// Declared type; JSON-CDC values do not carry it.
	pub ty: Option<Type>,
}

/// Field layout of a composite type, in declaration order.
#[derive(Debug, Clone)]
pub struct CompositeType {
	/// Declaration kind.
	pub kind: NominalKind,
	/// Qualified identifier.
	pub id: Box<str>,
	/// Fields in the order composite values store them.
	pub fields: Vec<FieldType>,
}

impl CompositeType {
	/// Name of the field stored at `position`.
	pub fn field_name(&self, position: usize) -> Option<&str> {
		self.fields.get(position).map(|field| field.name.as_ref())
	}

	/// Storage position of the field called `name`.
	pub fn field_position(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|field| field.name.as_ref() == name)
	}

	/// Nominal reference to this type.
	pub fn nominal(&self) -> NominalType {
		NominalType {
			kind: self.kind,
			id: self.id.clone(),
		}
	}
}

impl PartialEq for CompositeType {
	fn eq(&self, other: &Self) -> bool {
		self.kind == other.kind
			&& self.id == other.id
			&& self.fields.len() == other.fields.len()
			&& self.fields.iter().zip(&other.fields).all(|(a, b)| a.name == b.name)
	}
}

/// Reference authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
	/// Plain `&T`.
	Unauthorized,
	/// Pre-entitlement `auth &T`.
	Legacy,
	/// `auth(A, B) &T`.
	Conjunction(Vec<Box<str>>),
	/// `auth(A | B) &T`.
	Disjunction(Vec<Box<str>>),
	/// `auth(mapping M) &T`.
	Mapping(Box<str>),
}

impl Authorization {
	fn prefix(&self) -> String {
		match self {
			Self::Unauthorized => String::new(),
			Self::Legacy => "auth".to_owned(),
			Self::Conjunction(items) => format!("auth({})", items.join(",")),
			Self::Disjunction(items) => format!("auth({})", items.join("|")),
			Self::Mapping(id) => format!("auth(mapping {id})"),
		}
	}
}

/// Generic type parameter of a function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
	/// Parameter name.
	pub name: Box<str>,
	/// Optional upper bound.
	pub bound: Option<Type>,
}

/// Function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
	/// Argument label (may be empty or `_`).
	pub label: Box<str>,
	/// Parameter identifier.
	pub identifier: Box<str>,
	/// Parameter type.
	pub ty: Type,
}

/// Function purity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Purity {
	/// Unannotated function.
	#[default]
	Impure,
	/// `view` function.
	View,
}

/// Function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
	/// Purity annotation.
	pub purity: Purity,
	/// Generic parameters.
	pub type_parameters: Vec<TypeParameter>,
	/// Value parameters.
	pub parameters: Vec<Parameter>,
	/// Return type.
	pub return_type: Type,
}

impl FunctionType {
	/// Cadence type identifier, e.g. `fun(Int,String):Bool`.
	pub fn id(&self) -> String {
		let purity = match self.purity {
			Purity::Impure => "",
			Purity::View => "view ",
		};
		let generics = if self.type_parameters.is_empty() {
			String::new()
		} else {
			let names: Vec<&str> = self.type_parameters.iter().map(|item| item.name.as_ref()).collect();
			format!("<{}>", names.join(","))
		};
		let params: Vec<String> = self.parameters.iter().map(|item| item.ty.id()).collect();
		format!("{purity}fun{generics}({}):{}", params.join(","), self.return_type.id())
	}
}

/// Static Cadence type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
	/// Named primitive or abstract type.
	Simple(SimpleType),
	/// `T?`
	Optional(Box<Type>),
	/// `[T]`
	VariableSizedArray(Box<Type>),
	/// `[T; N]`
	ConstantSizedArray {
		/// Fixed element count.
		size: u64,
		/// Element type.
		element: Box<Type>,
	},
	/// `{K: V}`
	Dictionary {
		/// Key type.
		key: Box<Type>,
		/// Value type.
		value: Box<Type>,
	},
	/// `&T` with optional authorization.
	Reference {
		/// Entitlements granted by the reference.
		authorization: Authorization,
		/// Referenced type.
		referenced: Box<Type>,
	},
	/// `{I1, I2}`, or pre-1.0 restricted `T{I1, I2}`.
	Intersection {
		/// Interface set.
		types: Vec<Type>,
		/// Restricted base type from the legacy form.
		legacy_base: Option<Box<Type>>,
	},
	/// `Capability<T>` or unparameterized `Capability`.
	Capability(Option<Box<Type>>),
	/// `InclusiveRange<T>`
	InclusiveRange(Box<Type>),
	/// Declared composite or interface.
	Nominal(NominalType),
	/// Function signature.
	Function(Box<FunctionType>),
	/// Static type only known by identifier.
	Unstructured(Box<str>),
}

impl Type {
	/// Cadence type identifier.
	pub fn id(&self) -> String {
		match self {
			Self::Simple(simple) => simple.id().to_owned(),
			Self::Optional(inner) => format!("{}?", inner.id()),
			Self::VariableSizedArray(element) => format!("[{}]", element.id()),
			Self::ConstantSizedArray { size, element } => format!("[{};{size}]", element.id()),
			Self::Dictionary { key, value } => format!("{{{}:{}}}", key.id(), value.id()),
			Self::Reference { authorization, referenced } => format!("{}&{}", authorization.prefix(), referenced.id()),
			Self::Intersection { types, legacy_base } => {
				let ids: Vec<String> = types.iter().map(Type::id).collect();
				let base = legacy_base.as_ref().map(|base| base.id()).unwrap_or_default();
				format!("{base}{{{}}}", ids.join(","))
			}
			Self::Capability(Some(borrow)) => format!("Capability<{}>", borrow.id()),
			Self::Capability(None) => "Capability".to_owned(),
			Self::InclusiveRange(element) => format!("InclusiveRange<{}>", element.id()),
			Self::Nominal(nominal) => nominal.id.to_string(),
			Self::Function(function) => function.id(),
			Self::Unstructured(id) => id.to_string(),
		}
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.id())
	}
}

#[cfg(test)]
mod tests {
	use super::{Authorization, FunctionType, NominalKind, NominalType, Parameter, Purity, SimpleType, Type};

	fn simple(simple: SimpleType) -> Box<Type> {
		Box::new(Type::Simple(simple))
	}

	#[test]
	fn simple_type_tables_agree() {
		for code in 0..64 {
			if let Some(simple) = SimpleType::from_ccf_code(code) {
				assert_eq!(simple.ccf_code(), code);
				assert_eq!(SimpleType::from_id(simple.id()), Some(simple));
			}
		}
		assert_eq!(SimpleType::from_id("Type"), Some(SimpleType::MetaType));
	}

	#[test]
	fn container_type_ids() {
		let dict = Type::Dictionary {
			key: simple(SimpleType::String),
			value: Box::new(Type::VariableSizedArray(simple(SimpleType::UInt64))),
		};
		assert_eq!(dict.id(), "{String:[UInt64]}");
		assert_eq!(Type::Optional(simple(SimpleType::Address)).id(), "Address?");
		assert_eq!(
			Type::ConstantSizedArray {
				size: 3,
				element: simple(SimpleType::Int8),
			}
			.id(),
			"[Int8;3]"
		);
	}

	#[test]
	fn reference_and_capability_ids() {
		let vault = Type::Nominal(NominalType {
			kind: NominalKind::Resource,
			id: "A.0000000000000001.Token.Vault".into(),
		});
		let reference = Type::Reference {
			authorization: Authorization::Conjunction(vec!["A.0000000000000001.Token.Withdraw".into()]),
			referenced: Box::new(vault),
		};
		assert_eq!(reference.id(), "auth(A.0000000000000001.Token.Withdraw)&A.0000000000000001.Token.Vault");
		assert_eq!(Type::Capability(Some(Box::new(reference))).id(), "Capability<auth(A.0000000000000001.Token.Withdraw)&A.0000000000000001.Token.Vault>");
		assert_eq!(Type::Capability(None).id(), "Capability");
	}

	#[test]
	fn function_type_id() {
		let function = FunctionType {
			purity: Purity::View,
			type_parameters: Vec::new(),
			parameters: vec![Parameter {
				label: "_".into(),
				identifier: "amount".into(),
				ty: Type::Simple(SimpleType::UFix64),
			}],
			return_type: Type::Simple(SimpleType::Bool),
		};
		assert_eq!(function.id(), "view fun(UFix64):Bool");
	}
}
