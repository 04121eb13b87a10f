use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

use scout_domain::{NodeRef, model};

use crate::{Error, QueryBuilder, QueryString, Result, escape};

const FULL_TEXT_FIELD: &str = "TEXT";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveTextMode {
	#[default]
	Name,
	Content,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchivedWithin {
	Today,
	LastWeek,
	LastMonth,
	Between { from: Date, to: Date },
}
impl ArchivedWithin {
	fn days(self, today: Date) -> Result<(Date, Date)> {
		let back = |days: i64| today.checked_sub(Duration::days(days)).unwrap_or(Date::MIN);

		match self {
			Self::Today => Ok((today, today)),
			Self::LastWeek => Ok((back(7), today)),
			Self::LastMonth => Ok((back(30), today)),
			Self::Between { from, to } if from <= to => Ok((from, to)),
			Self::Between { .. } => Err(Error::InvalidFilterValue {
				attribute: model::prop_archived_date().to_string(),
				message: "the start date is after the end date".to_string(),
			}),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveCriteria {
	pub text: String,
	pub text_mode: ArchiveTextMode,
	pub archived_by: Option<String>,
	pub archived: Option<ArchivedWithin>,
	pub root: Option<NodeRef>,
}

pub fn build_archive_query(
	criteria: &ArchiveCriteria,
	builder: &QueryBuilder,
	now: OffsetDateTime,
) -> Result<QueryString> {
	let archived_aspect = model::aspect_archived().to_string();
	let mut clauses = vec![format!("ASPECT:{}", escape::phrase(&archived_aspect))];

	if let Some(root) = criteria.root.as_ref() {
		clauses.push(format!("PARENT:{}", escape::phrase(&root.to_string())));
	}

	if let Some(user) = criteria.archived_by.as_deref().map(str::trim)
		&& !user.is_empty()
	{
		if user.chars().any(char::is_control) {
			return Err(Error::InvalidFilterValue {
				attribute: model::prop_archived_by().to_string(),
				message: "value contains a control character".to_string(),
			});
		}

		clauses.push(format!(
			"{}:{}",
			escape::field(&model::prop_archived_by()),
			escape::phrase(user)
		));
	}

	if let Some(archived) = criteria.archived {
		let (from, to) = archived.days(now.date())?;

		clauses.push(format!(
			"{}:[{} TO {}]",
			escape::field(&model::prop_archived_date()),
			escape::phrase(&escape::date_bound(from, false)),
			escape::phrase(&escape::date_bound(to, true)),
		));
	}

	if let Some(text) = builder.text_query(&criteria.text, false) {
		let name = builder.name_clause(&text);

		clauses.push(match criteria.text_mode {
			ArchiveTextMode::Name => name,
			ArchiveTextMode::Content => format!("({name} OR {})", text.clause(FULL_TEXT_FIELD)),
		});
	}

	let query = clauses.join(" AND ");

	tracing::debug!(%query, "Built archive query.");

	Ok(QueryString::new(query))
}
