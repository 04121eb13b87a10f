use scout_domain::NodeRef;
use scout_service::{BackendError, SearchBackend, SearchRequest};

use crate::MemoryRepository;

impl MemoryRepository {
	pub fn set_hits(&self, hits: Vec<NodeRef>) {
		self.state().hits = hits;
	}

	pub fn fail_search(&self, message: Option<&str>) {
		self.state().search_failure = message.map(str::to_string);
	}
}
impl SearchBackend for MemoryRepository {
	fn query(&self, request: &SearchRequest) -> Result<Vec<NodeRef>, BackendError> {
		let mut state = self.state();

		state.requests.push(request.clone());

		if let Some(message) = state.search_failure.as_ref() {
			return Err(BackendError::new(message.clone()));
		}

		Ok(state.hits.clone())
	}
}
