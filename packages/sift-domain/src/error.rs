pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("Candidate {id} has {actual} embedding dimensions; expected {expected}.")]
	DimensionMismatch { id: String, expected: usize, actual: usize },
	#[error("Candidate {id} has an empty embedding.")]
	EmptyEmbedding { id: String },
	#[error("Cutoff {cutoff} must be a finite number in the range -1.0-1.0.")]
	InvalidCutoff { cutoff: f32 },
	#[error("Query embedding has zero norm.")]
	ZeroNormQuery,
	#[error("Corpus is empty.")]
	EmptyCorpus,
	#[error("Structured fields are invalid: {message}")]
	InvalidStructuredFields { message: String },
}
