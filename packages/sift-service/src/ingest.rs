use std::collections::HashSet;

use futures::{StreamExt, stream};
use time::OffsetDateTime;

use sift_domain::{Candidate, Corpus, contact, html, structured};
use sift_providers::completion::CompletionRequest;

use crate::{Error, Result, SiftService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestStatus {
	Ingested,
	/// Already in the corpus or listed earlier in the same batch.
	Skipped,
	Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
	pub link: String,
	pub status: IngestStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
	/// One entry per input link, in input order.
	pub outcomes: Vec<IngestOutcome>,
}
impl IngestReport {
	pub fn ingested(&self) -> usize {
		self.count(|status| matches!(status, IngestStatus::Ingested))
	}

	pub fn skipped(&self) -> usize {
		self.count(|status| matches!(status, IngestStatus::Skipped))
	}

	pub fn failed(&self) -> usize {
		self.count(|status| matches!(status, IngestStatus::Failed { .. }))
	}

	fn count(&self, predicate: impl Fn(&IngestStatus) -> bool) -> usize {
		self.outcomes.iter().filter(|outcome| predicate(&outcome.status)).count()
	}
}

pub fn parser_system_prompt(entity: &str) -> String {
	format!(
		"You are the best {entity} parser. Always respond with valid JSON format.\n\
The JSON should include fields like name, practice_areas, education, and experience."
	)
}

pub fn parser_user_prompt(raw_content: &str) -> String {
	format!(
		"Convert the text below into structured JSON data.\n\
Ensure the response is a valid JSON object.:\n\n{raw_content}"
	)
}

impl SiftService {
	/// Fetches, structures, and embeds every link not yet in `corpus`, then inserts the results.
	///
	/// A failing link is reported and never aborts the batch.
	pub async fn ingest(&self, corpus: &mut Corpus, links: &[String]) -> IngestReport {
		let mut seen = HashSet::new();
		let mut pending = Vec::new();
		let mut outcomes = links
			.iter()
			.enumerate()
			.map(|(idx, link)| {
				let link = link.trim().to_string();
				let status = if link.is_empty() {
					IngestStatus::Failed { reason: "Link is empty.".to_string() }
				} else if corpus.contains(&link) || !seen.insert(link.clone()) {
					IngestStatus::Skipped
				} else {
					pending.push(idx);

					IngestStatus::Ingested
				};

				IngestOutcome { link, status }
			})
			.collect::<Vec<_>>();
		let limit = self.cfg.ingest.max_concurrency.max(1) as usize;
		let built = stream::iter(pending.iter().map(|&idx| {
			let link = outcomes[idx].link.clone();

			async move { (idx, self.build_candidate(&link).await) }
		}))
		.buffered(limit)
		.collect::<Vec<_>>()
		.await;

		for (idx, result) in built {
			let link = outcomes[idx].link.clone();
			let status = match result.and_then(|candidate| Ok(corpus.insert(candidate)?)) {
				Ok(()) => {
					tracing::info!(link = %link, "Profile ingested.");

					IngestStatus::Ingested
				},
				Err(err) => {
					tracing::warn!(link = %link, error = %err, "Profile ingestion failed.");

					IngestStatus::Failed { reason: err.to_string() }
				},
			};

			outcomes[idx].status = status;
		}

		let report = IngestReport { outcomes };

		tracing::info!(
			ingested = report.ingested(),
			skipped = report.skipped(),
			failed = report.failed(),
			"Ingestion finished."
		);

		report
	}

	/// Builds one corpus entry from a profile page.
	pub async fn build_candidate(&self, link: &str) -> Result<Candidate> {
		let page = self.providers.fetcher.fetch(&self.cfg.ingest, link).await?;
		let raw_content = html::extract_main_content(&page);

		if raw_content.is_empty() {
			return Err(Error::Parse { message: format!("No readable content at {link}.") });
		}

		let request = CompletionRequest::new()
			.system(parser_system_prompt(&self.cfg.search.entity))
			.user(parser_user_prompt(&raw_content));
		let reply = self.providers.completion.complete(&self.cfg.providers.llm, &request).await?;
		let mut structured_data = structured::parse_structured_fields(&reply)?;

		structured::merge_missing(&mut structured_data, contact::extract_basic_info(&raw_content));

		let text = structured::embedding_text(&raw_content, &structured_data);
		let embedding_cfg = &self.cfg.providers.embedding;
		let vectors = self
			.providers
			.embedding
			.embed(embedding_cfg, std::slice::from_ref(&text), embedding_cfg.size)
			.await?;
		let Some(embedding) = vectors.into_iter().next() else {
			return Err(Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		Ok(Candidate {
			id: link.to_string(),
			raw_content,
			structured_data,
			embedding,
			fetched_at: Some(OffsetDateTime::now_utc()),
		})
	}
}
