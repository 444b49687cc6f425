use cadence_decode::cadence::{Result, Value};

use crate::cmd::InputArgs;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	/// Nesting depth before containers are summarized.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	/// Elements printed per container.
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
}

/// Output truncation limits for the value tree.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of elements, pairs, or fields printed per container.
	pub max_items: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum nesting depth before containers are summarized.
	pub max_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_items: 32,
			max_string_len: 200,
			max_depth: 8,
		}
	}
}

/// Decode the payload and print its typed value tree.
pub fn run(args: Args) -> Result<()> {
	let defaults = PrintOptions::default();
	let options = PrintOptions {
		max_items: args.max_items.unwrap_or(defaults.max_items),
		max_string_len: defaults.max_string_len,
		max_depth: args.max_depth.unwrap_or(defaults.max_depth),
	};

	let value = args.input.decode()?;
	let mut lines = Vec::new();
	render_value(&value, 0, 0, options, &mut lines);
	for line in lines {
		println!("{line}");
	}
	Ok(())
}

/// Render one value per line, children indented under their container.
pub(crate) fn render_value(value: &Value, indent: usize, depth: u32, options: PrintOptions, out: &mut Vec<String>) {
	let pad = " ".repeat(indent);
	match value {
		Value::Optional(Some(inner)) => {
			out.push(format!("{pad}Optional"));
			render_value(inner, indent + 2, depth + 1, options, out);
		}
		Value::String(v) | Value::Character(v) => out.push(format!("{pad}{}: {:?}", value.kind_name(), truncate(v, options.max_string_len))),
		Value::Array(items) => {
			if depth >= options.max_depth {
				out.push(format!("{pad}Array[... {} items]", items.len()));
				return;
			}
			out.push(format!("{pad}Array[{}]", items.len()));
			for item in items.iter().take(options.max_items) {
				render_value(item, indent + 2, depth + 1, options, out);
			}
			if items.len() > options.max_items {
				out.push(format!("{pad}  ... {} more", items.len() - options.max_items));
			}
		}
		Value::Dictionary(pairs) => {
			if depth >= options.max_depth {
				out.push(format!("{pad}Dictionary{{... {} pairs}}", pairs.len()));
				return;
			}
			out.push(format!("{pad}Dictionary{{{}}}", pairs.len()));
			for (key, item) in pairs.iter().take(options.max_items) {
				out.push(format!("{pad}  key:"));
				render_value(key, indent + 4, depth + 1, options, out);
				out.push(format!("{pad}  value:"));
				render_value(item, indent + 4, depth + 1, options, out);
			}
			if pairs.len() > options.max_items {
				out.push(format!("{pad}  ... {} more pairs", pairs.len() - options.max_items));
			}
		}
		Value::Composite(item) => {
			if depth >= options.max_depth {
				out.push(format!("{pad}{} {} {{ ... }}", item.kind().name(), item.type_id()));
				return;
			}
			out.push(format!("{pad}{} {} {{", item.kind().name(), item.type_id()));
			for (name, field) in item.named_fields().take(options.max_items) {
				if matches!(field, Value::Composite(_) | Value::Array(_) | Value::Dictionary(_) | Value::Optional(Some(_))) {
					out.push(format!("{pad}  {name} ="));
					render_value(field, indent + 4, depth + 1, options, out);
				} else {
					let mut leaf = Vec::new();
					render_value(field, 0, depth + 1, options, &mut leaf);
					out.push(format!("{pad}  {name} = {}", leaf.join(" ")));
				}
			}
			if item.field_values().len() > options.max_items {
				out.push(format!("{pad}  ... {} more fields", item.field_values().len() - options.max_items));
			}
			out.push(format!("{pad}}}"));
		}
		other => out.push(format!("{pad}{}: {other}", other.kind_name())),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use cadence_decode::cadence::{Composite, CompositeType, FieldType, NominalKind, Value};

	use super::{PrintOptions, render_value};

	#[test]
	fn composite_fields_render_by_name() {
		let ty = CompositeType {
			kind: NominalKind::Event,
			id: "A.0000000000000001.Token.Deposited".into(),
			fields: vec![FieldType { name: "id".into(), ty: None }],
		};
		let value = Value::Composite(Composite::new(Arc::new(ty), vec![Value::UInt64(1234)]).expect("layout matches"));

		let mut lines = Vec::new();
		render_value(&value, 0, 0, PrintOptions::default(), &mut lines);
		assert_eq!(lines, ["Event A.0000000000000001.Token.Deposited {", "  id = UInt64: 1234", "}"]);
	}

	#[test]
	fn long_arrays_are_truncated() {
		let value = Value::Array((0..5).map(Value::UInt8).collect());
		let options = PrintOptions {
			max_items: 2,
			..PrintOptions::default()
		};

		let mut lines = Vec::new();
		render_value(&value, 0, 0, options, &mut lines);
		assert_eq!(lines, ["Array[5]", "  UInt8: 0", "  UInt8: 1", "  ... 3 more"]);
	}
}
