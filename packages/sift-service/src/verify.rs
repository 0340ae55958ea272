use serde_json::{Map, Value};

use sift_domain::{Verdict, verdict};
use sift_providers::completion::CompletionRequest;

use crate::{Error, Result, SiftService};

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
	pub verdict: Verdict,
	/// Contents of the `<thinking>` tag, when the model produced one.
	pub reasoning: Option<String>,
}

pub fn system_prompt(entity: &str) -> String {
	format!(
		"You are evaluating a {entity} whether they pass a given criterion.\n\n\
Respond in the following format:\n\
<thinking>...</thinking>, within which you include your detailed thought process.\n\
<answer>...</answer>, within which you include your final answer. \"Pass\" or \"Fail\"."
	)
}

pub fn user_prompt(entity: &str, profile_text: &str, query: &str) -> String {
	format!(
		"You are an expert {entity} searcher.\n\
Find a {entity} that meets this requirement: {query}\n\
Here is the {entity}'s profile: {profile_text}"
	)
}

/// Deterministic-leaning request: temperature is pinned to zero whatever the provider default.
pub fn verification_request(entity: &str, profile_text: &str, query: &str) -> CompletionRequest {
	let mut params = Map::new();

	params.insert("temperature".to_string(), Value::from(0));

	CompletionRequest::new()
		.system(system_prompt(entity))
		.user(user_prompt(entity, profile_text, query))
		.params(params)
}

impl SiftService {
	/// One generative call judging whether the profile meets the literal query.
	///
	/// Provider failures are errors; an unreadable answer is a [`Verdict::Malformed`] outcome.
	pub async fn verify(&self, profile_text: &str, query: &str) -> Result<VerificationOutcome> {
		if profile_text.trim().is_empty() {
			return Err(Error::Validation {
				message: "Candidate profile text must be non-empty.".to_string(),
			});
		}
		if query.trim().is_empty() {
			return Err(Error::Validation { message: "Query must be non-empty.".to_string() });
		}

		let request = verification_request(&self.cfg.search.entity, profile_text, query);

		tracing::debug!(query, "Verifying candidate profile.");

		let response = self.providers.completion.complete(&self.cfg.providers.llm, &request).await?;
		let verdict = verdict::parse_verdict(&response);
		let reasoning = verdict::reasoning(&response).map(str::to_string);

		Ok(VerificationOutcome { verdict, reasoning })
	}
}
