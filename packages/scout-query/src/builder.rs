use std::fmt::{Display, Formatter};

use serde::Serialize;

use scout_config::Config;
use scout_domain::{QName, model};

use crate::{
	Error, Result, SearchCriteria, SearchMode, escape,
	text::{self, TextQuery},
};

const FULL_TEXT_FIELD: &str = "TEXT";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QueryString(String);
impl QueryString {
	pub(crate) fn new(query: String) -> Self {
		Self(query)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}
}
impl Display for QueryString {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}
impl AsRef<str> for QueryString {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySettings {
	pub minimum_length: usize,
	pub content_type: QName,
	pub folder_type: QName,
	pub name_attribute: QName,
	pub mimetype_attribute: QName,
	pub simple_search_attributes: Vec<QName>,
	pub force_and_terms: bool,
}
impl QuerySettings {
	pub fn from_config(cfg: &Config) -> Result<Self> {
		let prefixes = scout_config::prefixes(cfg);
		let resolve = |label: &str, value: &str| {
			prefixes
				.resolve(value)
				.map_err(|err| Error::Settings { message: format!("{label}: {err}") })
		};
		let simple_search_attributes = cfg
			.search
			.simple_search_attributes
			.iter()
			.map(|value| resolve("search.simple_search_attributes", value))
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			minimum_length: cfg.search.minimum_length as usize,
			content_type: resolve("model.content_type", &cfg.model.content_type)?,
			folder_type: resolve("model.folder_type", &cfg.model.folder_type)?,
			name_attribute: resolve("model.name_attribute", &cfg.model.name_attribute)?,
			mimetype_attribute: resolve("model.mimetype_attribute", &cfg.model.mimetype_attribute)?,
			simple_search_attributes,
			force_and_terms: cfg.search.force_and_terms,
		})
	}
}
impl Default for QuerySettings {
	fn default() -> Self {
		Self {
			minimum_length: 1,
			content_type: model::type_content(),
			folder_type: model::type_folder(),
			name_attribute: model::prop_name(),
			mimetype_attribute: model::prop_content().sub_field("mimetype"),
			simple_search_attributes: Vec::new(),
			force_and_terms: false,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
	settings: QuerySettings,
}
impl QueryBuilder {
	pub fn new(settings: QuerySettings) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &QuerySettings {
		&self.settings
	}

	pub fn build(&self, criteria: &SearchCriteria) -> Result<QueryString> {
		validate_filters(criteria)?;

		let text_query = self.text_query(&criteria.text, criteria.force_and_terms);
		let path = path_clause(criteria);
		let filters = self.filter_clauses(criteria);

		if text_query.is_none() && filters.is_empty() && path.is_none() {
			return Err(Error::InsufficientCriteria { minimum: self.settings.minimum_length });
		}

		let content_type = criteria.content_type.as_ref().unwrap_or(&self.settings.content_type);
		let folder_type = criteria.folder_type.as_ref().unwrap_or(&self.settings.folder_type);
		let content = type_clause(content_type);
		let folder = type_clause(folder_type);
		let mut query = match text_query {
			Some(text) => self.text_clause(&text, criteria, &content, &folder),
			None => match criteria.mode {
				SearchMode::All => format!("({content} OR {folder})"),
				SearchMode::FileNames | SearchMode::FileNamesContents => content,
				SearchMode::FolderNames => folder,
			},
		};

		if !filters.is_empty() {
			query = format!("{} AND ({query})", filters.join(" "));
		}
		if let Some(path) = path {
			query = format!("{path} AND ({query})");
		}

		tracing::debug!(mode = %criteria.mode, %query, "Built search query.");

		Ok(QueryString::new(query))
	}

	pub(crate) fn text_query(&self, text: &str, force_and_terms: bool) -> Option<TextQuery> {
		let text = text.trim();

		if text.is_empty() || text.chars().count() < self.settings.minimum_length {
			return None;
		}

		TextQuery::parse(text, force_and_terms || self.settings.force_and_terms)
	}

	pub(crate) fn name_clause(&self, text: &TextQuery) -> String {
		text.clause(&escape::field(&self.settings.name_attribute))
	}

	fn text_clause(
		&self,
		text: &TextQuery,
		criteria: &SearchCriteria,
		content: &str,
		folder: &str,
	) -> String {
		let mut names = vec![self.name_clause(text)];

		for attribute in self.simple_search_attributes(criteria) {
			names.push(text.clause(&escape::field(attribute)));
		}

		let names_any = names.join(" OR ");
		let names_group =
			if names.len() == 1 { names_any.clone() } else { format!("({names_any})") };
		let full_text = text.clause(FULL_TEXT_FIELD);

		match criteria.mode {
			SearchMode::All => format!(
				"({content} AND ({names_any} OR {full_text})) OR ({folder} AND {names_group})"
			),
			SearchMode::FileNames => format!("{content} AND {names_group}"),
			SearchMode::FileNamesContents =>
				format!("{content} AND ({names_any} OR {full_text})"),
			SearchMode::FolderNames => format!("{folder} AND {names_group}"),
		}
	}

	fn simple_search_attributes<'a>(&'a self, criteria: &'a SearchCriteria) -> Vec<&'a QName> {
		let mut attributes: Vec<&QName> = Vec::new();

		for attribute in
			self.settings.simple_search_attributes.iter().chain(&criteria.simple_search_attributes)
		{
			if attribute != &self.settings.name_attribute && !attributes.contains(&attribute) {
				attributes.push(attribute);
			}
		}

		attributes
	}

	fn filter_clauses(&self, criteria: &SearchCriteria) -> Vec<String> {
		let mut clauses = Vec::new();

		for (attribute, value) in &criteria.attributes {
			let value = value.trim();

			if value.is_empty() || value.chars().count() < self.settings.minimum_length {
				continue;
			}

			clauses.push(format!("+{}:{}", escape::field(attribute), text::match_value(value)));
		}
		for (attribute, value) in &criteria.fixed_values {
			clauses.push(format!("+{}:{}", escape::field(attribute), escape::phrase(value)));
		}
		for (attribute, range) in &criteria.ranges {
			let (open, close) = if range.inclusive { ('[', ']') } else { ('{', '}') };

			clauses.push(format!(
				"+{}:{open}{} TO {}{close}",
				escape::field(attribute),
				range_bound(&range.lower),
				range_bound(&range.upper),
			));
		}

		if let Some(mimetype) = criteria.mimetype.as_deref().map(str::trim)
			&& !mimetype.is_empty()
		{
			clauses.push(format!(
				"+{}:{}",
				escape::field(&self.settings.mimetype_attribute),
				escape::phrase(mimetype)
			));
		}

		clauses
	}
}

fn type_clause(type_name: &QName) -> String {
	format!("TYPE:{}", escape::phrase(&type_name.to_string()))
}

fn path_clause(criteria: &SearchCriteria) -> Option<String> {
	let mut paths = Vec::new();

	if let Some(scope) = criteria.scope.as_ref()
		&& let Some(path) = scope_step(&scope.path, scope.include_descendants)
	{
		paths.push(path);
	}

	for category in &criteria.categories {
		let category = category.trim();

		if !category.is_empty() {
			paths.push(category.to_string());
		}
	}

	let clauses: Vec<String> =
		paths.iter().map(|path| format!("PATH:{}", escape::phrase(path))).collect();

	match clauses.len() {
		0 => None,
		1 => clauses.into_iter().next(),
		_ => Some(format!("({})", clauses.join(" OR "))),
	}
}

fn scope_step(path: &str, include_descendants: bool) -> Option<String> {
	let path = path.trim();
	let path = path.strip_suffix("/*").unwrap_or(path).trim_end_matches('/');

	if path.is_empty() {
		return None;
	}

	let step = if include_descendants { "//*" } else { "/*" };

	Some(format!("{path}{step}"))
}

fn range_bound(value: &str) -> String {
	let value = value.trim();

	if value == "*" { value.to_string() } else { escape::phrase(value) }
}

fn validate_filters(criteria: &SearchCriteria) -> Result<()> {
	let invalid = |attribute: &QName, message: &str| Error::InvalidFilterValue {
		attribute: attribute.to_string(),
		message: message.to_string(),
	};

	for (attribute, range) in &criteria.ranges {
		for bound in [&range.lower, &range.upper] {
			if bound.trim().is_empty() {
				return Err(invalid(attribute, "range bounds must be non-empty; use * for open"));
			}
			if bound.chars().any(char::is_control) {
				return Err(invalid(attribute, "range bound contains a control character"));
			}
		}
	}
	for (attribute, value) in &criteria.fixed_values {
		if value.chars().any(char::is_control) {
			return Err(invalid(attribute, "value contains a control character"));
		}
		if escape::has_unbalanced_quotes(value) {
			return Err(invalid(attribute, "value contains an unterminated quote"));
		}
	}

	if let Some(mimetype) = criteria.mimetype.as_deref()
		&& mimetype.chars().any(char::is_control)
	{
		return Err(Error::InvalidFilterValue {
			attribute: "mimetype".to_string(),
			message: "value contains a control character".to_string(),
		});
	}

	Ok(())
}
