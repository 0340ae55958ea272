pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	Validation { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Parse error: {message}")]
	Parse { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sift_providers::Error> for Error {
	fn from(err: sift_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<sift_domain::Error> for Error {
	fn from(err: sift_domain::Error) -> Self {
		match err {
			sift_domain::Error::InvalidStructuredFields { message } => Self::Parse { message },
			other => Self::Validation { message: other.to_string() },
		}
	}
}

impl From<sift_storage::Error> for Error {
	fn from(err: sift_storage::Error) -> Self {
		match err {
			sift_storage::Error::Validation { message } => Self::Validation { message },
			other => Self::Storage { message: other.to_string() },
		}
	}
}
