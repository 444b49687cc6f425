use std::fmt;

use primitive_types::U256;

/// Fractional decimal digits carried by `Fix64` and `UFix64`.
pub const FIX64_SCALE: usize = 8;

const FIX64_FACTOR: u128 = 100_000_000;

/// Sign/magnitude integer wide enough for every Cadence integer kind.
///
/// Zero is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BigInt {
	negative: bool,
	magnitude: U256,
}

impl BigInt {
	/// Build from sign and magnitude.
	pub fn new(negative: bool, magnitude: U256) -> Self {
		Self {
			negative: negative && !magnitude.is_zero(),
			magnitude,
		}
	}

	/// Non-negative value from a 256-bit magnitude.
	pub fn from_u256(magnitude: U256) -> Self {
		Self::new(false, magnitude)
	}

	/// Parse an optionally signed decimal literal.
	pub fn parse_decimal(text: &str) -> Option<Self> {
		let (negative, digits) = split_sign(text);
		if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
			return None;
		}
		let magnitude = U256::from_dec_str(digits).ok()?;
		Some(Self::new(negative, magnitude))
	}

	/// Whether the value is below zero.
	pub fn is_negative(&self) -> bool {
		self.negative
	}

	/// Absolute value.
	pub fn magnitude(&self) -> U256 {
		self.magnitude
	}

	/// Whether the value lies in the `Int256` range.
	pub fn fits_int256(&self) -> bool {
		let limit = U256::one() << 255_usize;
		if self.negative { self.magnitude <= limit } else { self.magnitude < limit }
	}

	/// Narrow to `i128` when in range.
	pub fn to_i128(&self) -> Option<i128> {
		if self.magnitude.bits() > 128 {
			return None;
		}
		let raw = self.magnitude.as_u128();
		if self.negative {
			if raw == 1_u128 << 127 {
				return Some(i128::MIN);
			}
			i128::try_from(raw).ok().map(|value| -value)
		} else {
			i128::try_from(raw).ok()
		}
	}

	/// Narrow to `u128` when non-negative and in range.
	pub fn to_u128(&self) -> Option<u128> {
		if self.negative || self.magnitude.bits() > 128 {
			return None;
		}
		Some(self.magnitude.as_u128())
	}

	/// Magnitude when non-negative.
	pub fn to_u256(&self) -> Option<U256> {
		if self.negative { None } else { Some(self.magnitude) }
	}
}

impl From<i128> for BigInt {
	fn from(value: i128) -> Self {
		Self::new(value < 0, U256::from(value.unsigned_abs()))
	}
}

impl From<u128> for BigInt {
	fn from(value: u128) -> Self {
		Self::new(false, U256::from(value))
	}
}

impl fmt::Display for BigInt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.negative {
			write!(f, "-")?;
		}
		write!(f, "{}", self.magnitude)
	}
}

/// Parse a decimal literal (`-12.5`, `3`, `0.00000001`) into `(negative, value * 10^8)`.
///
/// More than eight fractional digits is rejected rather than rounded.
pub fn parse_fixed_point(text: &str) -> Option<(bool, u128)> {
	let (negative, body) = split_sign(text);
	let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
	if whole.is_empty() || fraction.len() > FIX64_SCALE {
		return None;
	}
	if !whole.bytes().chain(fraction.bytes()).all(|byte| byte.is_ascii_digit()) {
		return None;
	}

	let whole = whole.parse::<u128>().ok()?;
	let padded = format!("{fraction:0<8}");
	let fraction = padded.parse::<u128>().ok()?;
	let scaled = whole.checked_mul(FIX64_FACTOR)?.checked_add(fraction)?;
	Some((negative && scaled != 0, scaled))
}

/// Render a scaled fixed-point magnitude with all eight fractional digits.
pub fn format_fixed_point(negative: bool, scaled: u128) -> String {
	let sign = if negative { "-" } else { "" };
	format!("{sign}{}.{:08}", scaled / FIX64_FACTOR, scaled % FIX64_FACTOR)
}

fn split_sign(text: &str) -> (bool, &str) {
	if let Some(rest) = text.strip_prefix('-') {
		(true, rest)
	} else if let Some(rest) = text.strip_prefix('+') {
		(false, rest)
	} else {
		(false, text)
	}
}

#[cfg(test)]
mod tests {
	use primitive_types::U256;

	use super::{BigInt, format_fixed_point, parse_fixed_point};

	#[test]
	fn decimal_literals_keep_sign() {
		let value = BigInt::parse_decimal("-170141183460469231731687303715884105728").expect("parses");
		assert!(value.is_negative());
		assert_eq!(value.to_i128(), Some(i128::MIN));
		assert_eq!(value.to_u128(), None);
		assert_eq!(BigInt::parse_decimal("-0"), Some(BigInt::default()));
		assert!(BigInt::parse_decimal("12a").is_none());
		assert!(BigInt::parse_decimal("-").is_none());
	}

	#[test]
	fn int256_bounds() {
		let max = BigInt::new(false, (U256::one() << 255_usize) - U256::one());
		let min = BigInt::new(true, U256::one() << 255_usize);
		let over = BigInt::new(false, U256::one() << 255_usize);
		assert!(max.fits_int256());
		assert!(min.fits_int256());
		assert!(!over.fits_int256());
	}

	#[test]
	fn fixed_point_scales_by_1e8() {
		assert_eq!(parse_fixed_point("12.5"), Some((false, 1_250_000_000)));
		assert_eq!(parse_fixed_point("-0.00000001"), Some((true, 1)));
		assert_eq!(parse_fixed_point("7"), Some((false, 700_000_000)));
		assert_eq!(parse_fixed_point("-0.0"), Some((false, 0)));
		assert!(parse_fixed_point("0.000000001").is_none());
		assert!(parse_fixed_point(".5").is_none());
		assert!(parse_fixed_point("1.2.3").is_none());
	}

	#[test]
	fn fixed_point_renders_full_scale() {
		assert_eq!(format_fixed_point(false, 1_250_000_000), "12.50000000");
		assert_eq!(format_fixed_point(true, 1), "-0.00000001");
	}
}
