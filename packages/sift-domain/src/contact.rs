use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static PATTERNS: LazyLock<[(&str, Regex); 3]> = LazyLock::new(|| {
	[
		("email", pattern(r"[\w.-]+@[\w.-]+\.\w+")),
		("phone", pattern(r"(?:\+\d{1,2}\s)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}")),
		("bar_numbers", pattern(r"Bar No\.\s*\d+")),
	]
});

/// First match of each well-known contact pattern, keyed by field name.
pub fn extract_basic_info(text: &str) -> Map<String, Value> {
	PATTERNS
		.iter()
		.filter_map(|(field, re)| {
			re.find(text).map(|found| (field.to_string(), Value::String(found.as_str().to_string())))
		})
		.collect()
}

fn pattern(re: &str) -> Regex {
	Regex::new(re).unwrap_or_else(|err| panic!("Pattern {re:?} must compile: {err}."))
}
