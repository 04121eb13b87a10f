use std::{
	collections::BTreeMap,
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};
use time::Date;

use scout_domain::QName;

use crate::{Error, Result, escape};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
	#[default]
	All,
	FileNamesContents,
	FileNames,
	FolderNames,
}
impl SearchMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::FileNamesContents => "file_names_contents",
			Self::FileNames => "file_names",
			Self::FolderNames => "folder_names",
		}
	}
}
impl Display for SearchMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for SearchMode {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
			"all" => Ok(Self::All),
			"file_names_contents" => Ok(Self::FileNamesContents),
			"file_names" => Ok(Self::FileNames),
			"folder_names" | "space_names" => Ok(Self::FolderNames),
			_ => Err(Error::InvalidFilterValue {
				attribute: "mode".to_string(),
				message: format!(
					"unknown search mode '{value}', expected all, file_names_contents, file_names or folder_names"
				),
			}),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
	pub path: String,
	#[serde(default)]
	pub include_descendants: bool,
}
impl Scope {
	pub fn new(path: impl Into<String>, include_descendants: bool) -> Self {
		Self { path: path.into(), include_descendants }
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
	pub lower: String,
	pub upper: String,
	#[serde(default = "default_inclusive")]
	pub inclusive: bool,
}
impl RangeFilter {
	pub fn new(lower: impl Into<String>, upper: impl Into<String>, inclusive: bool) -> Self {
		Self { lower: lower.into(), upper: upper.into(), inclusive }
	}

	pub fn dates(from: Date, to: Date, inclusive: bool) -> Self {
		Self::new(escape::date_bound(from, false), escape::date_bound(to, true), inclusive)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
	pub text: String,
	pub mode: SearchMode,
	pub scope: Option<Scope>,
	pub categories: Vec<String>,
	pub attributes: BTreeMap<QName, String>,
	pub ranges: BTreeMap<QName, RangeFilter>,
	pub fixed_values: BTreeMap<QName, String>,
	pub content_type: Option<QName>,
	pub folder_type: Option<QName>,
	pub mimetype: Option<String>,
	pub simple_search_attributes: Vec<QName>,
	pub force_and_terms: bool,
}
impl SearchCriteria {
	pub fn new(text: impl Into<String>) -> Self {
		Self { text: text.into(), ..Self::default() }
	}

	pub fn with_mode(mut self, mode: SearchMode) -> Self {
		self.mode = mode;

		self
	}

	pub fn with_scope(mut self, path: impl Into<String>, include_descendants: bool) -> Self {
		self.scope = Some(Scope::new(path, include_descendants));

		self
	}

	pub fn add_category(mut self, path: impl Into<String>) -> Self {
		self.categories.push(path.into());

		self
	}

	pub fn add_attribute(mut self, attribute: QName, value: impl Into<String>) -> Self {
		self.attributes.insert(attribute, value.into());

		self
	}

	pub fn add_range(mut self, attribute: QName, range: RangeFilter) -> Self {
		self.ranges.insert(attribute, range);

		self
	}

	pub fn add_fixed_value(mut self, attribute: QName, value: impl Into<String>) -> Self {
		self.fixed_values.insert(attribute, value.into());

		self
	}

	pub fn with_content_type(mut self, content_type: QName) -> Self {
		self.content_type = Some(content_type);

		self
	}

	pub fn with_folder_type(mut self, folder_type: QName) -> Self {
		self.folder_type = Some(folder_type);

		self
	}

	pub fn with_mimetype(mut self, mimetype: impl Into<String>) -> Self {
		self.mimetype = Some(mimetype.into());

		self
	}

	pub fn add_simple_search_attribute(mut self, attribute: QName) -> Self {
		if !self.simple_search_attributes.contains(&attribute) {
			self.simple_search_attributes.push(attribute);
		}

		self
	}

	pub fn with_force_and_terms(mut self, force_and_terms: bool) -> Self {
		self.force_and_terms = force_and_terms;

		self
	}
}

fn default_inclusive() -> bool {
	true
}
