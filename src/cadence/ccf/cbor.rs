use ciborium::value::{Integer, Value as CborValue};
use ciborium_ll::{Decoder, Header, simple};

use crate::cadence::CcfError;

/// Nesting limit for arrays, maps, and tags.
const MAX_DEPTH: usize = 256;

/// Scratch size for byte and text string chunks.
const CHUNK_LEN: usize = 4096;

/// Read the first CBOR item of `bytes`, returning it with the number of bytes consumed.
///
/// Bignum tags keep their byte-string payload whatever the magnitude, so
/// 16-byte negative bignums below `i128::MIN` reach the value decoder intact.
pub(super) fn read_item(bytes: &[u8]) -> Result<(CborValue, usize), CcfError> {
	let mut decoder = Decoder::from(bytes);
	let item = read(&mut decoder, 0)?;
	Ok((item, decoder.offset()))
}

fn read(decoder: &mut Decoder<&[u8]>, depth: usize) -> Result<CborValue, CcfError> {
	if depth > MAX_DEPTH {
		return Err(CcfError::Cbor(format!("nesting deeper than {MAX_DEPTH}")));
	}

	Ok(match decoder.pull().map_err(malformed)? {
		Header::Positive(value) => CborValue::Integer(Integer::from(value)),
		// Major type 1 encodes -1 - n.
		Header::Negative(value) => {
			let value = Integer::try_from(-1 - i128::from(value)).map_err(|_| CcfError::Cbor("negative integer out of range".to_owned()))?;
			CborValue::Integer(value)
		}
		Header::Float(value) => CborValue::Float(value),
		Header::Simple(simple::FALSE) => CborValue::Bool(false),
		Header::Simple(simple::TRUE) => CborValue::Bool(true),
		Header::Simple(simple::NULL) => CborValue::Null,
		Header::Simple(other) => return Err(CcfError::Cbor(format!("unsupported simple value {other}"))),
		Header::Tag(tag) => CborValue::Tag(tag, Box::new(read(decoder, depth + 1)?)),
		Header::Bytes(len) => {
			let mut out = Vec::new();
			let mut buf = [0_u8; CHUNK_LEN];
			let mut segments = decoder.bytes(len);
			while let Some(mut segment) = segments.pull().map_err(malformed)? {
				while let Some(chunk) = segment.pull(&mut buf).map_err(malformed)? {
					out.extend_from_slice(chunk);
				}
			}
			CborValue::Bytes(out)
		}
		Header::Text(len) => {
			let mut out = String::new();
			let mut buf = [0_u8; CHUNK_LEN];
			let mut segments = decoder.text(len);
			while let Some(mut segment) = segments.pull().map_err(malformed)? {
				while let Some(chunk) = segment.pull(&mut buf).map_err(malformed)? {
					out.push_str(chunk);
				}
			}
			CborValue::Text(out)
		}
		Header::Array(len) => {
			let mut items = Vec::new();
			match len {
				Some(len) => {
					for _ in 0..len {
						items.push(read(decoder, depth + 1)?);
					}
				}
				None => {
					while !at_break(decoder)? {
						items.push(read(decoder, depth + 1)?);
					}
				}
			}
			CborValue::Array(items)
		}
		Header::Map(len) => {
			let mut pairs = Vec::new();
			match len {
				Some(len) => {
					for _ in 0..len {
						let key = read(decoder, depth + 1)?;
						pairs.push((key, read(decoder, depth + 1)?));
					}
				}
				None => {
					while !at_break(decoder)? {
						let key = read(decoder, depth + 1)?;
						pairs.push((key, read(decoder, depth + 1)?));
					}
				}
			}
			CborValue::Map(pairs)
		}
		Header::Break => return Err(CcfError::Cbor("unexpected break".to_owned())),
	})
}

/// Consume the break ending an indefinite-length container, or push the header back.
fn at_break(decoder: &mut Decoder<&[u8]>) -> Result<bool, CcfError> {
	match decoder.pull().map_err(malformed)? {
		Header::Break => Ok(true),
		header => {
			decoder.push(header);
			Ok(false)
		}
	}
}

fn malformed<E: std::fmt::Debug>(err: ciborium_ll::Error<E>) -> CcfError {
	CcfError::Cbor(format!("{err:?}"))
}
