//! JSON input adapter.

use log::warn;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Rejected user input.
///
/// The display text is what the input panel shows; the position and the
/// parser's own diagnostic are kept for logging.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Invalid JSON. Please check your input.")]
pub struct InputError {
	/// 1-based line of the failure (0 when unknown).
	pub line: usize,
	/// 1-based column of the failure (0 when unknown).
	pub column: usize,
	/// serde_json's description of what went wrong.
	pub detail: String,
}

impl From<serde_json::Error> for InputError {
	fn from(err: serde_json::Error) -> Self {
		Self {
			line: err.line(),
			column: err.column(),
			detail: err.to_string(),
		}
	}
}

fn deserialize(text: &str) -> Result<Value, serde_json::Error> {
	let mut de = serde_json::Deserializer::from_str(text);
	de.disable_recursion_limit();
	// stacker needs a C toolchain for wasm targets; there the browser stack is the only bound
	#[cfg(not(target_arch = "wasm32"))]
	let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
	#[cfg(target_arch = "wasm32")]
	let value = Value::deserialize(&mut de)?;
	de.end()?;
	Ok(value)
}

/// Parse raw text into a JSON value.
///
/// Accepts any nesting depth, and numbers keep their source text, so values
/// outside the `f64` range parse instead of failing.
pub fn parse_document(text: &str) -> Result<Value, InputError> {
	deserialize(text).map_err(|err| {
		let err = InputError::from(err);
		warn!("Rejected input at {}:{}: {}", err.line, err.column, err.detail);
		err
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn parses_valid_documents() {
		let value = parse_document(r#"{"user":{"name":"Ana","age":3}}"#).unwrap();
		assert_eq!(value, json!({"user": {"name": "Ana", "age": 3}}));
		assert_eq!(parse_document(" [1, 2, 3] ").unwrap(), json!([1, 2, 3]));
		assert_eq!(parse_document("null").unwrap(), Value::Null);
	}

	#[test]
	fn keeps_document_key_order() {
		let value = parse_document(r#"{"z":1,"a":2,"m":3}"#).unwrap();
		let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
		assert_eq!(keys, ["z", "a", "m"]);
	}

	#[test]
	fn accepts_deep_nesting() {
		let depth = 2000;
		let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
		let mut value = &parse_document(&text).unwrap();
		for _ in 1..depth {
			value = &value.as_array().unwrap()[0];
		}
		assert_eq!(value, &json!([]));

		let text = format!("{}1{}", r#"{"a":"#.repeat(300), "}".repeat(300));
		assert!(parse_document(&text).is_ok());
	}

	#[test]
	fn accepts_numbers_beyond_f64() {
		let value = parse_document(r#"{"big": 1e400, "small": -1e400, "tiny": 1e-400}"#).unwrap();
		assert_eq!(value["big"].to_string(), "1e400");
		assert_eq!(value["small"].to_string(), "-1e400");
		assert!(value["tiny"].is_number());

		let value = parse_document("123456789012345678901234567890").unwrap();
		assert_eq!(value.to_string(), "123456789012345678901234567890");
	}

	#[test]
	fn accepts_exotic_number_forms() {
		let value = parse_document("[-0, 1E+2, 0.1e-5, 2.50, -17]").unwrap();
		let floats: Vec<f64> = value.as_array().unwrap().iter().map(|v| v.as_f64().unwrap()).collect();
		assert_eq!(floats, [0.0, 100.0, 0.1e-5, 2.5, -17.0]);
		assert_eq!(value[4].as_i64(), Some(-17));
	}

	#[test]
	fn decodes_unicode_escapes() {
		let value = parse_document(r#"{"s": "caf\u00e9 \ud83d\ude00 \n", "\u0041": true}"#).unwrap();
		assert_eq!(value["s"], json!("café 😀 \n"));
		assert_eq!(value["A"], json!(true));
	}

	#[test]
	fn duplicate_keys_keep_first_position_and_last_value() {
		let value = parse_document(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
		let entries: Vec<(&str, i64)> = value
			.as_object()
			.unwrap()
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_i64().unwrap()))
			.collect();
		assert_eq!(entries, [("a", 3), ("b", 2)]);
	}

	#[test]
	fn rejects_trailing_garbage() {
		assert!(parse_document("[1] 2").is_err());
		assert!(parse_document("{} x").is_err());
	}

	#[test]
	fn rejects_malformed_text() {
		let err = parse_document("not json").unwrap_err();
		assert_eq!(err.to_string(), "Invalid JSON. Please check your input.");
		assert_eq!(err.line, 1);
		assert!(!err.detail.is_empty());
	}

	#[test]
	fn rejects_blank_and_truncated_input() {
		assert!(parse_document("").is_err());
		assert!(parse_document("   \n").is_err());
		let err = parse_document("{\n  \"a\": [1, 2\n").unwrap_err();
		assert!(err.line >= 2);
	}
}
