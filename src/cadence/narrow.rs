use std::collections::BTreeMap;

use crate::cadence::{CadenceError, Native, Result, Value, convert};

/// Convert a dictionary and require every value to be a string.
pub fn dictionary_string_values(value: &Value) -> Result<BTreeMap<String, String>> {
	narrow_string_map(convert_dictionary(value)?)
}

/// Convert a dictionary and require every value to be a list of strings.
pub fn dictionary_string_list_values(value: &Value) -> Result<BTreeMap<String, Vec<String>>> {
	narrow_string_list_map(convert_dictionary(value)?)
}

/// Narrow a native map whose values are all strings.
pub fn narrow_string_map(native: Native) -> Result<BTreeMap<String, String>> {
	expect_map(native)?
		.into_iter()
		.map(|(key, value)| expect_string(value).map(|text| (key, text)))
		.collect()
}

/// Narrow a native map whose values are all lists of strings.
pub fn narrow_string_list_map(native: Native) -> Result<BTreeMap<String, Vec<String>>> {
	expect_map(native)?
		.into_iter()
		.map(|(key, value)| -> Result<(String, Vec<String>)> {
			let items = match value {
				Native::List(items) => items,
				other => return Err(mismatch("list", &other)),
			};
			let items = items.into_iter().map(expect_string).collect::<Result<Vec<_>>>()?;
			Ok((key, items))
		})
		.collect()
}

fn convert_dictionary(value: &Value) -> Result<Native> {
	if !matches!(value, Value::Dictionary(_)) {
		return Err(CadenceError::NarrowingMismatch {
			expected: "Dictionary",
			got: value.kind_name().to_owned(),
		});
	}
	convert(value)
}

fn expect_map(native: Native) -> Result<BTreeMap<String, Native>> {
	match native {
		Native::Map(map) => Ok(map),
		other => Err(mismatch("map", &other)),
	}
}

fn expect_string(native: Native) -> Result<String> {
	match native {
		Native::String(text) => Ok(text),
		other => Err(mismatch("string", &other)),
	}
}

fn mismatch(expected: &'static str, got: &Native) -> CadenceError {
	CadenceError::NarrowingMismatch {
		expected,
		got: got.kind_name().to_owned(),
	}
}
