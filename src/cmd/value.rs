use cadence_decode::cadence::{Result, convert};

use crate::cmd::InputArgs;
use crate::cmd::util::print_json;

/// Decode the payload and print its native form as JSON.
pub fn run(args: InputArgs) -> Result<()> {
	let value = args.decode()?;
	let native = convert(&value)?;
	print_json(&native, args.pretty)
}
