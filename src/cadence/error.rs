use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Errors produced while decoding wire payloads and converting decoded values.
#[derive(Debug, Error)]
pub enum CadenceError {
	/// Neither wire encoding could parse the payload.
	#[error("{json}; ccf fallback: {ccf}")]
	BothEncodingsFailed {
		/// Failure from the JSON-CDC attempt.
		json: JsonError,
		/// Failure from the CCF attempt.
		ccf: CcfError,
	},
	/// Explicit JSON-CDC decode failed.
	#[error(transparent)]
	Json(#[from] JsonError),
	/// Explicit CCF decode failed.
	#[error(transparent)]
	Ccf(#[from] CcfError),
	/// Dictionary key converted to an empty, non-scalar, or duplicate native value.
	#[error("invalid dictionary key: {reason}")]
	InvalidDictionaryKey {
		/// Why the converted key was rejected.
		reason: String,
	},
	/// Caller-requested narrowing met a value of another native shape.
	#[error("narrowing mismatch: expected {expected}, got {got}")]
	NarrowingMismatch {
		/// Expected native or value kind.
		expected: &'static str,
		/// Actual kind encountered.
		got: String,
	},
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Hex-encoded input could not be decoded.
	#[error("hex input: {0}")]
	Hex(#[from] hex::FromHexError),
	/// Native value could not be rendered as JSON.
	#[error("render json: {0}")]
	Render(#[from] serde_json::Error),
}

/// Errors produced by the JSON-CDC decoder.
#[derive(Debug, Error)]
pub enum JsonError {
	/// Input is not a JSON document.
	#[error("json-cdc: malformed json: {0}")]
	Syntax(#[source] serde_json::Error),
	/// JSON node had another shape than required.
	#[error("json-cdc: expected {expected} for {context}")]
	UnexpectedShape {
		/// Required JSON shape.
		expected: &'static str,
		/// Field or construct being decoded.
		context: &'static str,
	},
	/// Required object member is absent.
	#[error("json-cdc: missing field {field:?} in {context}")]
	MissingField {
		/// Missing member name.
		field: &'static str,
		/// Construct being decoded.
		context: &'static str,
	},
	/// `type` member names no known value kind.
	#[error("json-cdc: unknown value type {kind:?}")]
	UnknownValueKind {
		/// Offending `type` member.
		kind: String,
	},
	/// `kind` member names no known static type kind.
	#[error("json-cdc: unknown static type kind {kind:?}")]
	UnknownTypeKind {
		/// Offending `kind` member.
		kind: String,
	},
	/// Static type given as a bare identifier that is not a known reference.
	#[error("json-cdc: unresolved type reference {id:?}")]
	UnknownTypeReference {
		/// Referenced type identifier.
		id: String,
	},
	/// Numeric literal did not parse for its kind.
	#[error("json-cdc: invalid {kind} literal {literal:?}")]
	InvalidNumber {
		/// Cadence value kind.
		kind: &'static str,
		/// Literal text.
		literal: String,
	},
	/// Address literal is malformed.
	#[error("json-cdc: invalid address {literal:?}")]
	InvalidAddress {
		/// Literal text.
		literal: String,
	},
	/// Path domain is not storage, private, or public.
	#[error("json-cdc: invalid path domain {domain:?}")]
	InvalidPathDomain {
		/// Domain text.
		domain: String,
	},
	/// Function value carried a non-function static type.
	#[error("json-cdc: expected function type, got {got}")]
	ExpectedFunctionType {
		/// Identifier of the type found instead.
		got: String,
	},
}

/// Errors produced by the CCF decoder.
#[derive(Debug, Error)]
pub enum CcfError {
	/// Input is not a single well-formed CBOR item.
	#[error("ccf: malformed cbor: {0}")]
	Cbor(String),
	/// Bytes remained after the top-level message.
	#[error("ccf: {leftover} trailing bytes after message")]
	TrailingBytes {
		/// Unconsumed byte count.
		leftover: usize,
	},
	/// CBOR item had another major type than required.
	#[error("ccf: expected {expected} for {context}, got {got}")]
	UnexpectedItem {
		/// Required CBOR shape.
		expected: &'static str,
		/// Construct being decoded.
		context: &'static str,
		/// Shape encountered.
		got: &'static str,
	},
	/// CBOR tag is not valid in this position.
	#[error("ccf: unexpected tag {tag} for {context}")]
	UnexpectedTag {
		/// Tag number encountered.
		tag: u64,
		/// Construct being decoded.
		context: &'static str,
	},
	/// Array had the wrong element count.
	#[error("ccf: {context} expects {expected} elements, got {got}")]
	ArityMismatch {
		/// Construct being decoded.
		context: &'static str,
		/// Required element count description.
		expected: String,
		/// Actual element count.
		got: usize,
	},
	/// Simple type id is not known.
	#[error("ccf: unknown simple type id {code}")]
	UnknownSimpleType {
		/// Encoded simple type id.
		code: u64,
	},
	/// Type reference names no typedef in this message.
	#[error("ccf: unresolved type reference 0x{id}")]
	UnknownTypeRef {
		/// Hex form of the referenced CCF type id.
		id: String,
	},
	/// Two typedefs share one CCF type id.
	#[error("ccf: duplicate type definition 0x{id}")]
	DuplicateTypeDef {
		/// Hex form of the CCF type id.
		id: String,
	},
	/// Composite value references a type without a definition.
	#[error("ccf: no definition for composite type {id}")]
	MissingCompositeDef {
		/// Qualified Cadence type identifier.
		id: String,
	},
	/// Integer does not fit the declared Cadence kind.
	#[error("ccf: integer out of range for {kind}")]
	IntegerOutOfRange {
		/// Cadence value kind.
		kind: &'static str,
	},
	/// Address byte string has the wrong length.
	#[error("ccf: address must be 8 bytes, got {len}")]
	InvalidAddress {
		/// Byte length encountered.
		len: usize,
	},
	/// Path domain code is not storage, private, or public.
	#[error("ccf: invalid path domain {code}")]
	InvalidPathDomain {
		/// Encoded domain code.
		code: u64,
	},
	/// Static type has no value encoding.
	#[error("ccf: values of type {id} are not supported")]
	UnsupportedType {
		/// Cadence type identifier.
		id: String,
	},
}
