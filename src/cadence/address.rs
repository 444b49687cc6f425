use std::fmt;

/// Account address width in bytes.
pub const ADDRESS_LEN: usize = 8;

/// Fixed-width Cadence account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
	/// Build from an exactly 8-byte slice.
	pub fn from_slice(bytes: &[u8]) -> Option<Self> {
		let raw: [u8; ADDRESS_LEN] = bytes.try_into().ok()?;
		Some(Self(raw))
	}

	/// Parse up to 16 hex digits, left-padding shorter input with zeros.
	///
	/// The `0x` prefix must already be stripped.
	pub fn from_hex_digits(digits: &str) -> Option<Self> {
		if digits.is_empty() || digits.len() > ADDRESS_LEN * 2 {
			return None;
		}

		let padded = format!("{digits:0>16}");
		let mut raw = [0_u8; ADDRESS_LEN];
		hex::decode_to_slice(padded, &mut raw).ok()?;
		Some(Self(raw))
	}

	/// Raw address bytes.
	pub fn bytes(&self) -> [u8; ADDRESS_LEN] {
		self.0
	}

	/// Sixteen lowercase hex digits without prefix.
	pub fn hex(&self) -> String {
		hex::encode(self.0)
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", self.hex())
	}
}
