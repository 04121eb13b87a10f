pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Search text must contain at least {minimum} characters when no filter is set.")]
	InsufficientCriteria { minimum: usize },
	#[error("Invalid value for {attribute}: {message}")]
	InvalidFilterValue { attribute: String, message: String },
	#[error("Invalid query settings: {message}")]
	Settings { message: String },
	#[error(transparent)]
	SavedSearch(#[from] serde_json::Error),
}
