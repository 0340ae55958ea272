use serde_json::{Map, Value};

use crate::{Error, Result};

/// Parses a model reply into a JSON object, tolerating a surrounding Markdown code fence.
pub fn parse_structured_fields(reply: &str) -> Result<Map<String, Value>> {
	let body = strip_code_fence(reply);
	let value: Value = serde_json::from_str(body)
		.map_err(|err| Error::InvalidStructuredFields { message: err.to_string() })?;

	match value {
		Value::Object(fields) => Ok(fields),
		other => Err(Error::InvalidStructuredFields {
			message: format!("expected a JSON object, got {}", json_kind(&other)),
		}),
	}
}

pub fn strip_code_fence(reply: &str) -> &str {
	let mut body = reply.trim();

	if let Some(rest) = body.strip_prefix("```json").or_else(|| body.strip_prefix("```")) {
		body = rest;
	}
	if let Some(rest) = body.strip_suffix("```") {
		body = rest;
	}

	body.trim()
}

/// Copies entries of `extra` whose keys `fields` does not have yet.
pub fn merge_missing(fields: &mut Map<String, Value>, extra: Map<String, Value>) {
	for (key, value) in extra {
		fields.entry(key).or_insert(value);
	}
}

/// Text embedded for a profile: the raw page text followed by `key: value` pairs.
pub fn embedding_text(raw_content: &str, fields: &Map<String, Value>) -> String {
	let pairs = fields
		.iter()
		.map(|(key, value)| format!("{key}: {}", render_value(value)))
		.collect::<Vec<_>>()
		.join(" ");

	format!("{}\n{pairs}", raw_content.trim()).trim().to_string()
}

/// Text shown to the verifier: the structured fields when present, else the raw page text.
pub fn profile_text(raw_content: &str, fields: &Map<String, Value>) -> String {
	if fields.is_empty() {
		return raw_content.trim().to_string();
	}

	serde_json::to_string_pretty(fields).unwrap_or_else(|_| embedding_text(raw_content, fields))
}

fn render_value(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_fenced_json() {
		let fields = parse_structured_fields("```json\n{\"name\": \"John Smith\"}\n```")
			.expect("parse failed");

		assert_eq!(fields["name"], "John Smith");
	}

	#[test]
	fn rejects_non_objects() {
		let err = parse_structured_fields("[1, 2]").expect_err("Expected error.");

		assert_eq!(
			err,
			Error::InvalidStructuredFields {
				message: "expected a JSON object, got an array".to_string()
			}
		);
	}

	#[test]
	fn merge_keeps_model_fields() {
		let mut fields = Map::new();
		let mut extra = Map::new();

		fields.insert("email".to_string(), Value::String("model@firm.example".to_string()));
		extra.insert("email".to_string(), Value::String("regex@firm.example".to_string()));
		extra.insert("phone".to_string(), Value::String("555 123 4567".to_string()));
		merge_missing(&mut fields, extra);

		assert_eq!(fields["email"], "model@firm.example");
		assert_eq!(fields["phone"], "555 123 4567");
	}

	#[test]
	fn embedding_text_appends_fields() {
		let mut fields = Map::new();

		fields.insert("education".to_string(), Value::String("Yale Law School".to_string()));
		fields.insert("years".to_string(), serde_json::json!(12));

		assert_eq!(
			embedding_text("  Media law expert ", &fields),
			"Media law expert\neducation: Yale Law School years: 12"
		);
	}

	#[test]
	fn profile_text_falls_back_to_raw_content() {
		assert_eq!(profile_text(" Corporate lawyer ", &Map::new()), "Corporate lawyer");
	}
}
