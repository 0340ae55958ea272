use sift_service::{SearchReport, VerificationStatus};

const RULE_WIDTH: usize = 50;

/// Result block for one query: the matches, then any candidates whose verification failed.
pub fn render_report(report: &SearchReport) -> String {
	let errors = report
		.errors()
		.filter_map(|verification| match &verification.status {
			VerificationStatus::Error { message } => Some((verification.id.as_str(), message.as_str())),
			_ => None,
		})
		.collect::<Vec<_>>();

	format_result(&report.query, &report.matches, &errors)
}

pub fn format_result(query: &str, matches: &[String], errors: &[(&str, &str)]) -> String {
	let heavy = "=".repeat(RULE_WIDTH);
	let light = "-".repeat(RULE_WIDTH);
	let mut out = format!("\n{heavy}\nSearch Results for: '{query}'\n{light}\n");

	if matches.is_empty() {
		out.push_str("No matches found\n");
	} else {
		out.push_str("Matching profiles:\n");

		for id in matches {
			out.push_str(&format!("- {id}\n"));
		}
	}

	if !errors.is_empty() {
		out.push_str(&format!("{light}\nCould not verify:\n"));

		for (id, message) in errors {
			out.push_str(&format!("- {id}: {message}\n"));
		}
	}

	out.push_str(&format!("{heavy}\n"));

	out
}

#[cfg(test)]
mod tests {
	use sift_service::CandidateVerification;

	use super::*;

	#[test]
	fn lists_matches_under_the_query() {
		let block = format_result("went to Yale", &["https://firm.test/jane".to_string()], &[]);

		assert!(block.contains("Search Results for: 'went to Yale'"));
		assert!(block.contains("Matching profiles:\n- https://firm.test/jane\n"));
		assert!(!block.contains("No matches found"));
		assert!(!block.contains("Could not verify"));
	}

	#[test]
	fn block_layout_is_exact() {
		let heavy = "=".repeat(RULE_WIDTH);
		let light = "-".repeat(RULE_WIDTH);
		let block = format_result("q", &["a".to_string()], &[("b", "boom")]);

		assert_eq!(
			block,
			format!(
				"\n{heavy}\nSearch Results for: 'q'\n{light}\nMatching profiles:\n- a\n{light}\nCould not verify:\n- b: boom\n{heavy}\n"
			)
		);
	}

	#[test]
	fn empty_matches_are_not_an_error() {
		let block = format_result("went to Yale", &[], &[]);

		assert!(block.contains("No matches found"));
	}

	#[test]
	fn verification_errors_are_listed_apart_from_matches() {
		let report = SearchReport {
			query: "went to Yale".to_string(),
			ranked: Vec::new(),
			verifications: vec![
				CandidateVerification {
					id: "a".to_string(),
					score: 0.9,
					status: VerificationStatus::Pass,
					reasoning: None,
				},
				CandidateVerification {
					id: "b".to_string(),
					score: 0.85,
					status: VerificationStatus::Error { message: "timed out".to_string() },
					reasoning: None,
				},
			],
			matches: vec!["a".to_string()],
		};
		let block = render_report(&report);

		assert!(block.contains("Matching profiles:\n- a\n"));
		assert!(block.contains("Could not verify:\n- b: timed out\n"));
	}
}
