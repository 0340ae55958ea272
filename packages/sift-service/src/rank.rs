use sift_domain::{Corpus, ScoredCandidate, similarity};

use crate::{Error, Result, SiftService};

/// Query text as embedded for ranking, framed to land near the corpus profiles.
pub fn query_phrase(entity: &str, query: &str) -> String {
	format!("Find a {entity}: {}", query.trim())
}

impl SiftService {
	/// Candidates at or above the configured cutoff, most similar first.
	pub async fn rank(&self, corpus: &Corpus, query: &str) -> Result<Vec<ScoredCandidate>> {
		self.rank_with_cutoff(corpus, query, self.cfg.search.cutoff).await
	}

	/// Issues exactly one embedding call; any failure aborts the ranking.
	pub async fn rank_with_cutoff(
		&self,
		corpus: &Corpus,
		query: &str,
		cutoff: f32,
	) -> Result<Vec<ScoredCandidate>> {
		if query.trim().is_empty() {
			return Err(Error::Validation { message: "Query must be non-empty.".to_string() });
		}
		if corpus.is_empty() {
			return Err(Error::Validation { message: "Corpus is empty.".to_string() });
		}
		if !cutoff.is_finite() || !(-1.0..=1.0).contains(&cutoff) {
			return Err(sift_domain::Error::InvalidCutoff { cutoff }.into());
		}

		let phrase = query_phrase(&self.cfg.search.entity, query);
		let embedding_cfg = &self.cfg.providers.embedding;
		let vectors = self
			.providers
			.embedding
			.embed(embedding_cfg, std::slice::from_ref(&phrase), embedding_cfg.size)
			.await?;
		let Some(query_vec) = vectors.into_iter().next() else {
			return Err(Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};
		let ranked = similarity::rank(&query_vec, corpus.embeddings(), cutoff)?;

		for item in &ranked {
			tracing::debug!(id = %item.id, score = item.score, "Candidate above cutoff.");
		}

		tracing::info!(
			query,
			cutoff,
			candidates = corpus.len(),
			ranked = ranked.len(),
			"Ranked candidates by similarity."
		);

		Ok(ranked)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn frames_the_trimmed_query() {
		assert_eq!(query_phrase("lawyer", "  went to Yale \n"), "Find a lawyer: went to Yale");
	}
}
