pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid qualified name '{value}': {message}")]
	InvalidQName { value: String, message: String },
	#[error("Unknown namespace prefix '{prefix}'.")]
	UnknownPrefix { prefix: String },
	#[error("Invalid node reference '{value}'.")]
	InvalidNodeRef { value: String },
}
