use std::collections::{BTreeMap, btree_map};

use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::{Error, Result, structured};

/// One corpus entry: a profile keyed by its source identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
	pub id: String,
	pub raw_content: String,
	pub structured_data: Map<String, Value>,
	pub embedding: Vec<f32>,
	pub fetched_at: Option<OffsetDateTime>,
}
impl Candidate {
	/// Text handed to the verifier.
	pub fn profile_text(&self) -> String {
		structured::profile_text(&self.raw_content, &self.structured_data)
	}
}

/// Read-only set of candidates sharing one embedding dimensionality.
///
/// Iteration is ordered by identifier.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
	candidates: BTreeMap<String, Candidate>,
	dimensions: Option<usize>,
}
impl Corpus {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Result<Self> {
		let mut corpus = Self::new();

		for candidate in candidates {
			corpus.insert(candidate)?;
		}

		Ok(corpus)
	}

	/// Adds or replaces a candidate. The first embedding fixes the corpus dimensionality.
	pub fn insert(&mut self, candidate: Candidate) -> Result<()> {
		let actual = candidate.embedding.len();

		if actual == 0 {
			return Err(Error::EmptyEmbedding { id: candidate.id });
		}

		match self.dimensions {
			Some(expected) if expected != actual =>
				return Err(Error::DimensionMismatch { id: candidate.id, expected, actual }),
			Some(_) => {},
			None => self.dimensions = Some(actual),
		}

		self.candidates.insert(candidate.id.clone(), candidate);

		Ok(())
	}

	pub fn get(&self, id: &str) -> Option<&Candidate> {
		self.candidates.get(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.candidates.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	pub fn dimensions(&self) -> Option<usize> {
		self.dimensions
	}

	pub fn iter(&self) -> btree_map::Values<'_, String, Candidate> {
		self.candidates.values()
	}

	pub fn embeddings(&self) -> impl Iterator<Item = (&str, &[f32])> {
		self.candidates.values().map(|candidate| (candidate.id.as_str(), candidate.embedding.as_slice()))
	}
}

impl<'a> IntoIterator for &'a Corpus {
	type IntoIter = btree_map::Values<'a, String, Candidate>;
	type Item = &'a Candidate;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidate(id: &str, embedding: Vec<f32>) -> Candidate {
		Candidate {
			id: id.to_string(),
			raw_content: format!("{id} profile"),
			structured_data: Map::new(),
			embedding,
			fetched_at: None,
		}
	}

	#[test]
	fn rejects_mixed_dimensionality() {
		let err = Corpus::from_candidates([candidate("a", vec![1.0, 0.0]), candidate("b", vec![1.0])])
			.expect_err("Expected dimension mismatch.");

		assert_eq!(err, Error::DimensionMismatch { id: "b".to_string(), expected: 2, actual: 1 });
	}

	#[test]
	fn rejects_empty_embeddings() {
		let err = Corpus::from_candidates([candidate("a", Vec::new())])
			.expect_err("Expected empty embedding error.");

		assert_eq!(err, Error::EmptyEmbedding { id: "a".to_string() });
	}

	#[test]
	fn iterates_in_identifier_order() {
		let corpus = Corpus::from_candidates([
			candidate("https://b.example", vec![1.0]),
			candidate("https://a.example", vec![2.0]),
		])
		.expect("Corpus must build.");
		let ids: Vec<_> = corpus.embeddings().map(|(id, _)| id).collect();

		assert_eq!(ids, vec!["https://a.example", "https://b.example"]);
		assert_eq!(corpus.dimensions(), Some(1));
	}
}
