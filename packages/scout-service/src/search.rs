use scout_query::{QueryString, SearchCriteria};
use scout_view::NormalizedResults;

use crate::{Result, SearchService};

#[derive(Debug)]
pub struct SearchResults {
	pub query: QueryString,
	pub rows: NormalizedResults,
}

impl SearchService {
	pub fn search(&self, criteria: &SearchCriteria) -> Result<SearchResults> {
		let query = self.builder.build(criteria)?;

		self.execute(&self.settings.store, self.settings.max_results, query)
	}
}
