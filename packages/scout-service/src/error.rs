pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
	pub message: String,
}
impl BackendError {
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Query(#[from] scout_query::Error),
	#[error("Search backend error: {0}")]
	Backend(#[from] BackendError),
	#[error("Transaction error: {message}")]
	Transaction { message: String },
	#[error(transparent)]
	View(#[from] scout_view::Error),
	#[error("Invalid service settings: {message}")]
	Settings { message: String },
}
impl Error {
	pub fn user_message(&self) -> String {
		match self {
			Self::Query(scout_query::Error::InsufficientCriteria { minimum }) => format!(
				"Please enter at least {minimum} characters of search text or pick a filter."
			),
			Self::Query(scout_query::Error::InvalidFilterValue { attribute, message }) =>
				format!("The search filter for {attribute} is not valid: {message}."),
			Self::Query(scout_query::Error::SavedSearch(_)) =>
				"The saved search could not be restored.".to_string(),
			Self::Query(err) => format!("A system error happened during the search: {err}"),
			Self::Backend(_) =>
				"The search could not be completed. Please try again or refine the search."
					.to_string(),
			Self::Transaction { message } | Self::Settings { message } =>
				format!("A system error happened during the operation: {message}"),
			Self::View(err) => format!("A system error happened during the operation: {err}"),
		}
	}
}
