use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to access {path:?}.")]
	Io { path: PathBuf, source: std::io::Error },
	#[error("Failed to parse corpus file at {path:?}.")]
	Json { path: PathBuf, source: serde_json::Error },
	#[error("Failed to read link list at {path:?}.")]
	Csv { path: PathBuf, source: csv::Error },
	#[error("{message}")]
	Validation { message: String },
}
