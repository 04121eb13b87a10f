pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to resolve property {name}: {source}")]
	Resolution {
		name: String,
		#[source]
		source: Box<Error>,
	},
	#[error("Property {name} is already being resolved.")]
	ResolutionCycle { name: String },
	#[error("Property {name} holds a {found} value, expected {expected}.")]
	TypeMismatch { name: String, expected: scout_domain::ValueKind, found: scout_domain::ValueKind },
	#[error("Repository lookup failed: {0}")]
	Source(String),
	#[error("Invalid view settings: {message}")]
	Settings { message: String },
}
