use serde::{Deserialize, Serialize};

use crate::{Error, QueryBuilder, QueryString, Result, SearchCriteria};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
	pub criteria: SearchCriteria,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query: Option<String>,
}
impl SavedSearch {
	/// Criteria too thin to search on are saved without a query. Invalid filter values fail.
	pub fn new(criteria: SearchCriteria, builder: &QueryBuilder) -> Result<Self> {
		let query = match builder.build(&criteria) {
			Ok(query) => Some(query.into_inner()),
			Err(Error::InsufficientCriteria { .. }) => None,
			Err(err) => return Err(err),
		};

		Ok(Self { criteria, query })
	}

	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	pub fn from_json(raw: &str) -> Result<Self> {
		Ok(serde_json::from_str(raw)?)
	}

	pub fn rebuild(&self, builder: &QueryBuilder) -> Result<QueryString> {
		builder.build(&self.criteria)
	}
}
