use time::OffsetDateTime;

use scout_query::{ArchiveCriteria, build_archive_query};

use crate::{Result, SearchResults, SearchService};

impl SearchService {
	pub fn search_archive(
		&self,
		criteria: &ArchiveCriteria,
		now: OffsetDateTime,
	) -> Result<SearchResults> {
		let query = build_archive_query(criteria, &self.builder, now)?;

		self.execute(&self.settings.archive_store, self.settings.archive_max_results, query)
	}
}
