use std::{
	collections::BTreeMap,
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const CONTENT_MODEL_URI: &str = "http://www.alfresco.org/model/content/1.0";
pub const SYSTEM_MODEL_URI: &str = "http://www.alfresco.org/model/system/1.0";
pub const APP_MODEL_URI: &str = "http://www.alfresco.org/model/application/1.0";
pub const USER_MODEL_URI: &str = "http://www.alfresco.org/model/user/1.0";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QName {
	namespace: String,
	local_name: String,
}
impl QName {
	pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
		Self { namespace: namespace.into(), local_name: local_name.into() }
	}

	pub fn content(local_name: impl Into<String>) -> Self {
		Self::new(CONTENT_MODEL_URI, local_name)
	}

	pub fn system(local_name: impl Into<String>) -> Self {
		Self::new(SYSTEM_MODEL_URI, local_name)
	}

	pub fn application(local_name: impl Into<String>) -> Self {
		Self::new(APP_MODEL_URI, local_name)
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn local_name(&self) -> &str {
		&self.local_name
	}

	pub fn sub_field(&self, field: &str) -> Self {
		Self::new(self.namespace.clone(), format!("{}.{field}", self.local_name))
	}

	pub fn to_prefix_string(&self, prefixes: &NamespacePrefixes) -> Option<String> {
		if self.namespace.is_empty() {
			return Some(self.local_name.clone());
		}

		prefixes.prefix_for(&self.namespace).map(|prefix| format!("{prefix}:{}", self.local_name))
	}
}
impl Display for QName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.namespace.is_empty() {
			write!(f, "{}", self.local_name)
		} else {
			write!(f, "{{{}}}{}", self.namespace, self.local_name)
		}
	}
}
impl FromStr for QName {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		let invalid = |message: &str| Error::InvalidQName {
			value: value.to_string(),
			message: message.to_string(),
		};

		let Some(rest) = value.strip_prefix('{') else {
			if value.is_empty() {
				return Err(invalid("local name is empty"));
			}
			if value.contains(['{', '}']) {
				return Err(invalid("unexpected brace"));
			}

			return Ok(Self::new("", value));
		};
		let (namespace, local_name) =
			rest.split_once('}').ok_or_else(|| invalid("namespace is not terminated"))?;

		if local_name.is_empty() {
			return Err(invalid("local name is empty"));
		}
		if local_name.contains(['{', '}']) {
			return Err(invalid("unexpected brace"));
		}

		Ok(Self::new(namespace, local_name))
	}
}
impl TryFrom<String> for QName {
	type Error = Error;

	fn try_from(value: String) -> Result<Self> {
		value.parse()
	}
}
impl From<QName> for String {
	fn from(value: QName) -> Self {
		value.to_string()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespacePrefixes {
	by_prefix: BTreeMap<String, String>,
}
impl NamespacePrefixes {
	pub fn empty() -> Self {
		Self { by_prefix: BTreeMap::new() }
	}

	pub fn insert(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
		self.by_prefix.insert(prefix.into(), uri.into());
	}

	pub fn uri(&self, prefix: &str) -> Option<&str> {
		self.by_prefix.get(prefix).map(String::as_str)
	}

	pub fn prefix_for(&self, uri: &str) -> Option<&str> {
		self.by_prefix
			.iter()
			.find(|(_, candidate)| candidate.as_str() == uri)
			.map(|(prefix, _)| prefix.as_str())
	}

	pub fn resolve(&self, value: &str) -> Result<QName> {
		let value = value.trim();

		if value.starts_with('{') {
			return value.parse();
		}

		let Some((prefix, local_name)) = value.split_once(':') else {
			return Err(Error::InvalidQName {
				value: value.to_string(),
				message: "expected prefix:local or {uri}local".to_string(),
			});
		};

		if local_name.is_empty() {
			return Err(Error::InvalidQName {
				value: value.to_string(),
				message: "local name is empty".to_string(),
			});
		}

		let uri =
			self.uri(prefix).ok_or_else(|| Error::UnknownPrefix { prefix: prefix.to_string() })?;

		Ok(QName::new(uri, local_name))
	}
}
impl Default for NamespacePrefixes {
	fn default() -> Self {
		let mut prefixes = Self::empty();

		prefixes.insert("app", APP_MODEL_URI);
		prefixes.insert("cm", CONTENT_MODEL_URI);
		prefixes.insert("sys", SYSTEM_MODEL_URI);
		prefixes.insert("usr", USER_MODEL_URI);

		prefixes
	}
}
