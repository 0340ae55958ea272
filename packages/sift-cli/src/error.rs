pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Invalid query list at offset {offset}: {message}")]
	InvalidQueryList { offset: usize, message: String },
}
