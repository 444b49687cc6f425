use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::cadence::{CadenceError, Native, Result, Value, convert, convert_event_fields, decode_ccf, decode_json};

/// Behavior switches for wire decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Accept pre-1.0 JSON-CDC forms: numeric literals, unprefixed addresses,
	/// `authorized` references, restricted types, and numeric capability ids.
	pub backwards_compatible: bool,
	/// Accept bare static type identifiers that do not name a type seen earlier.
	pub allow_unstructured_static_types: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			backwards_compatible: true,
			allow_unstructured_static_types: true,
		}
	}
}

impl DecodeOptions {
	/// Preset that only accepts current-format payloads.
	pub fn strict() -> Self {
		Self {
			backwards_compatible: false,
			allow_unstructured_static_types: false,
		}
	}
}

/// Wire encoding selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
	/// Try JSON-CDC, then CCF.
	#[default]
	Auto,
	/// JSON-CDC only.
	Json,
	/// CCF only.
	Ccf,
}

impl WireFormat {
	/// Decode `bytes` in this format.
	pub fn decode_as(self, bytes: &[u8], opt: &DecodeOptions) -> Result<Value> {
		match self {
			Self::Auto => decode_with_options(bytes, opt),
			Self::Json => Ok(decode_json(bytes, opt)?),
			Self::Ccf => Ok(decode_ccf(bytes)?),
		}
	}
}

/// Decode a payload of unknown encoding with default options.
pub fn decode(bytes: &[u8]) -> Result<Value> {
	decode_with_options(bytes, &DecodeOptions::default())
}

/// Decode a payload of unknown encoding.
///
/// JSON-CDC is attempted first; CCF only when JSON fails. When both fail the
/// error carries both causes.
pub fn decode_with_options(bytes: &[u8], opt: &DecodeOptions) -> Result<Value> {
	let json = match decode_json(bytes, opt) {
		Ok(value) => {
			trace!(len = bytes.len(), kind = value.kind_name(), "decoded json-cdc payload");
			return Ok(value);
		}
		Err(err) => err,
	};
	debug!(len = bytes.len(), error = %json, "json-cdc decode failed, retrying as ccf");

	match decode_ccf(bytes) {
		Ok(value) => {
			trace!(len = bytes.len(), kind = value.kind_name(), "decoded ccf payload");
			Ok(value)
		}
		Err(ccf) => Err(CadenceError::BothEncodingsFailed { json, ccf }),
	}
}

/// Decode a payload and convert it to its native form.
pub fn decode_native(bytes: &[u8]) -> Result<Native> {
	convert(&decode(bytes)?)
}

/// Decode an event payload and convert its fields.
pub fn decode_event_fields(bytes: &[u8]) -> Result<BTreeMap<String, Native>> {
	convert_event_fields(&decode(bytes)?)
}
