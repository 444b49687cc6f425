use cadence_decode::cadence::{Result, convert_event_fields};
use tracing::debug;

use crate::cmd::InputArgs;
use crate::cmd::util::print_json;

/// Decode an event payload and print its fields as a JSON object.
pub fn run(args: InputArgs) -> Result<()> {
	let value = args.decode()?;
	debug!(kind = value.kind_name(), "decoded event payload");
	let fields = convert_event_fields(&value)?;
	print_json(&fields, args.pretty)
}
