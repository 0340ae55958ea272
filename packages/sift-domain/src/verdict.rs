pub const PASS: &str = "Pass";
pub const FAIL: &str = "Fail";

/// Parsed answer of one verification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
	Pass,
	Fail,
	/// The response had no well-formed `<answer>` tag or answered something other than
	/// exactly `Pass` or `Fail`.
	Malformed { raw: String },
}
impl Verdict {
	pub fn is_pass(&self) -> bool {
		matches!(self, Self::Pass)
	}
}

/// Reads the `<answer>` tag of a model response. Comparison is case-sensitive after trimming.
pub fn parse_verdict(response: &str) -> Verdict {
	match extract_tag(response, "answer").map(str::trim) {
		Some(PASS) => Verdict::Pass,
		Some(FAIL) => Verdict::Fail,
		_ => Verdict::Malformed { raw: response.to_string() },
	}
}

/// Text inside the `<thinking>` tag, if the model produced one.
pub fn reasoning(response: &str) -> Option<&str> {
	extract_tag(response, "thinking").map(str::trim).filter(|text| !text.is_empty())
}

/// Content between the first `<tag>` and the next `</tag>`.
pub fn extract_tag<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
	let open = format!("<{tag}>");
	let close = format!("</{tag}>");
	let start = text.find(&open)? + open.len();
	let end = text[start..].find(&close)?;

	Some(&text[start..start + end])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pass_with_reasoning() {
		let response = "<thinking>ok</thinking><answer>Pass</answer>";

		assert!(parse_verdict(response).is_pass());
		assert_eq!(reasoning(response), Some("ok"));
	}

	#[test]
	fn fail_without_reasoning() {
		let response = "<answer>Fail</answer>";

		assert_eq!(parse_verdict(response), Verdict::Fail);
		assert_eq!(reasoning(response), None);
	}

	#[test]
	fn surrounding_whitespace_is_trimmed() {
		assert_eq!(parse_verdict("<answer>\n  Pass \n</answer>"), Verdict::Pass);
	}

	#[test]
	fn wrong_case_is_not_a_pass() {
		let verdict = parse_verdict("<answer> pass </answer>");

		assert!(!verdict.is_pass());
		assert!(matches!(verdict, Verdict::Malformed { .. }));
	}

	#[test]
	fn missing_or_unclosed_tags_are_malformed() {
		for response in ["Pass", "<answer>Pass", "</answer>Pass<answer>", ""] {
			let verdict = parse_verdict(response);

			assert_eq!(verdict, Verdict::Malformed { raw: response.to_string() });
			assert!(!verdict.is_pass());
		}
	}

	#[test]
	fn first_answer_tag_wins() {
		assert_eq!(parse_verdict("<answer>Fail</answer><answer>Pass</answer>"), Verdict::Fail);
	}
}
