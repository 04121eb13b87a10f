use serde::{Deserialize, Serialize};

use scout_domain::iso9075;

use crate::Scope;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
	pub prefix: String,
	pub local_name: String,
}
impl PathSegment {
	pub fn new(prefix: impl Into<String>, local_name: impl Into<String>) -> Self {
		Self { prefix: prefix.into(), local_name: local_name.into() }
	}
}

pub fn scope_path(segments: &[PathSegment], include_descendants: bool) -> String {
	let mut path = String::with_capacity(segments.len() * 24 + 3);

	for segment in segments {
		path.push('/');
		path.push_str(&segment.prefix);
		path.push(':');
		path.push_str(&iso9075::encode(&segment.local_name));
	}

	path.push_str(if include_descendants { "//*" } else { "/*" });

	path
}

impl Scope {
	pub fn from_segments(segments: &[PathSegment], include_descendants: bool) -> Self {
		Self::new(scope_path(segments, include_descendants), include_descendants)
	}
}
