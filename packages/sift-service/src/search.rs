use std::time::Duration;

use futures::future;

use sift_config::BatchMode;
use sift_domain::{Corpus, ScoredCandidate, Verdict};

use crate::{Error, Result, SiftService};

const MAX_MALFORMED_ANSWER_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationStatus {
	Pass,
	Fail,
	/// The call failed, timed out, or answered outside the Pass/Fail format.
	Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateVerification {
	pub id: String,
	pub score: f32,
	pub status: VerificationStatus,
	pub reasoning: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
	pub query: String,
	/// Similarity ranking the verifications were drawn from.
	pub ranked: Vec<ScoredCandidate>,
	/// One entry per ranked candidate, in ranking order.
	pub verifications: Vec<CandidateVerification>,
	/// Identifiers that passed both stages, in ranking order.
	pub matches: Vec<String>,
}
impl SearchReport {
	pub fn errors(&self) -> impl Iterator<Item = &CandidateVerification> {
		self.verifications
			.iter()
			.filter(|verification| matches!(verification.status, VerificationStatus::Error { .. }))
	}
}

impl SiftService {
	/// Ranks the corpus for `query`, then verifies every ranked candidate concurrently.
	///
	/// Verification futures run inside the caller's task, so dropping the returned future
	/// cancels every in-flight call. A failed verification only affects its own candidate.
	pub async fn search(&self, corpus: &Corpus, query: &str) -> Result<SearchReport> {
		let ranked = self.rank(corpus, query).await?;

		if ranked.is_empty() {
			tracing::info!(query, "No candidates above the cutoff. Skipping verification.");

			return Ok(SearchReport {
				query: query.to_string(),
				ranked,
				verifications: Vec::new(),
				matches: Vec::new(),
			});
		}

		let verifications = future::join_all(
			ranked.iter().map(|candidate| self.verify_candidate(corpus, candidate, query)),
		)
		.await;
		let matches = verifications
			.iter()
			.filter(|verification| verification.status == VerificationStatus::Pass)
			.map(|verification| verification.id.clone())
			.collect::<Vec<_>>();

		tracing::info!(
			query,
			ranked = ranked.len(),
			matches = matches.len(),
			errors = verifications
				.iter()
				.filter(|verification| matches!(verification.status, VerificationStatus::Error { .. }))
				.count(),
			"Search finished."
		);

		Ok(SearchReport { query: query.to_string(), ranked, verifications, matches })
	}

	/// Runs one independent search per query; results line up with `queries`.
	pub async fn search_batch(
		&self,
		corpus: &Corpus,
		queries: &[String],
	) -> Vec<Result<SearchReport>> {
		match self.cfg.search.batch_mode {
			BatchMode::Sequential => {
				let mut reports = Vec::with_capacity(queries.len());

				for query in queries {
					reports.push(self.search(corpus, query).await);
				}

				reports
			},
			BatchMode::Concurrent =>
				future::join_all(queries.iter().map(|query| self.search(corpus, query))).await,
		}
	}

	async fn verify_candidate(
		&self,
		corpus: &Corpus,
		candidate: &ScoredCandidate,
		query: &str,
	) -> CandidateVerification {
		let (status, reasoning) = match self.verification_status(corpus, &candidate.id, query).await
		{
			Ok((status, reasoning)) => (status, reasoning),
			Err(err) => (VerificationStatus::Error { message: err.to_string() }, None),
		};

		match &status {
			VerificationStatus::Error { message } => {
				tracing::warn!(id = %candidate.id, error = %message, "Candidate verification failed.");
			},
			status => {
				tracing::debug!(id = %candidate.id, ?status, "Candidate verified.");
			},
		}

		CandidateVerification {
			id: candidate.id.clone(),
			score: candidate.score,
			status,
			reasoning,
		}
	}

	async fn verification_status(
		&self,
		corpus: &Corpus,
		id: &str,
		query: &str,
	) -> Result<(VerificationStatus, Option<String>)> {
		let Some(profile) = corpus.get(id) else {
			return Err(Error::Validation { message: format!("Candidate {id} is not in the corpus.") });
		};
		let profile_text = profile.profile_text();
		let timeout = Duration::from_millis(self.cfg.search.verify_timeout_ms);
		let _permit = self.verify_permits.acquire().await.map_err(|_| Error::Provider {
			message: "Verification permits are closed.".to_string(),
		})?;
		let outcome = tokio::time::timeout(timeout, self.verify(&profile_text, query))
			.await
			.map_err(|_| Error::Provider {
				message: format!(
					"Verification timed out after {} ms.",
					self.cfg.search.verify_timeout_ms
				),
			})??;
		let status = match outcome.verdict {
			Verdict::Pass => VerificationStatus::Pass,
			Verdict::Fail => VerificationStatus::Fail,
			Verdict::Malformed { raw } => {
				let snippet = raw.chars().take(MAX_MALFORMED_ANSWER_CHARS).collect::<String>();

				return Err(Error::Parse {
					message: format!("Verification answer lacks a Pass/Fail answer tag: {snippet:?}"),
				});
			},
		};

		Ok((status, outcome.reasoning))
	}
}
