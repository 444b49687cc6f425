mod address;
mod ccf;
mod convert;
mod decode;
mod error;
mod json;
mod narrow;
mod native;
mod number;
mod types;
mod value;

/// Account address type.
pub use address::{ADDRESS_LEN, Address};
/// CCF (binary) decoding entry point.
pub use ccf::decode_ccf;
/// Native conversion entry points.
pub use convert::{convert, convert_event_fields};
/// Encoding-agnostic decoding entry points and options.
pub use decode::{DecodeOptions, WireFormat, decode, decode_event_fields, decode_native, decode_with_options};
/// Error and result aliases.
pub use error::{CadenceError, CcfError, JsonError, Result};
/// JSON-CDC decoding entry point.
pub use json::decode_json;
/// Typed narrowing of converted dictionaries.
pub use narrow::{dictionary_string_list_values, dictionary_string_values, narrow_string_list_map, narrow_string_map};
/// Schema-free native value types.
pub use native::{Integer, Native};
/// Wide integer helpers.
pub use number::{BigInt, FIX64_SCALE};
/// Static type model.
pub use types::{Authorization, CompositeType, FieldType, FunctionType, NominalKind, NominalType, Parameter, Purity, SimpleType, Type, TypeParameter};
/// Decoded value model.
pub use value::{Capability, Composite, InclusiveRange, Path, PathDomain, Value};
