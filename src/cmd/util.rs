use std::io::Read;
use std::path::PathBuf;

use cadence_decode::cadence::{DecodeOptions, Result, Value, WireFormat};
use serde::Serialize;

/// Wire format selector accepted by `--format`.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum FormatArg {
	/// JSON-CDC first, then CCF.
	#[default]
	Auto,
	/// JSON-CDC only.
	Json,
	/// CCF only.
	Ccf,
}

impl From<FormatArg> for WireFormat {
	fn from(value: FormatArg) -> Self {
		match value {
			FormatArg::Auto => Self::Auto,
			FormatArg::Json => Self::Json,
			FormatArg::Ccf => Self::Ccf,
		}
	}
}

/// Payload source and decoding flags shared by every subcommand.
#[derive(clap::Args)]
pub struct InputArgs {
	/// Payload file, or `-` for stdin.
	pub input: PathBuf,
	/// Treat the input as hex text (optional `0x` prefix, surrounding whitespace ignored).
	#[arg(long)]
	pub hex: bool,
	/// Wire format of the payload.
	#[arg(long, value_enum, default_value_t = FormatArg::Auto)]
	pub format: FormatArg,
	/// Reject legacy JSON-CDC forms and unresolved type identifiers.
	#[arg(long)]
	pub strict: bool,
	/// Pretty-print JSON output.
	#[arg(long)]
	pub pretty: bool,
}

impl InputArgs {
	/// Read and decode the payload.
	pub(crate) fn decode(&self) -> Result<Value> {
		let bytes = self.read()?;
		let options = if self.strict { DecodeOptions::strict() } else { DecodeOptions::default() };
		WireFormat::from(self.format).decode_as(&bytes, &options)
	}

	fn read(&self) -> Result<Vec<u8>> {
		let raw = if self.input.as_os_str() == "-" {
			let mut buf = Vec::new();
			std::io::stdin().read_to_end(&mut buf)?;
			buf
		} else {
			std::fs::read(&self.input)?
		};
		if !self.hex {
			return Ok(raw);
		}
		Ok(hex::decode(strip_hex_text(&raw))?)
	}
}

fn strip_hex_text(raw: &[u8]) -> &[u8] {
	let text = raw.trim_ascii();
	text.strip_prefix(b"0x").or_else(|| text.strip_prefix(b"0X")).unwrap_or(text)
}

/// Print a serializable value as JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
	let text = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
	println!("{text}");
	Ok(())
}
