use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::NodeRef;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
	Text(String),
	Integer(i64),
	Boolean(bool),
	Node(NodeRef),
	Date(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
}
impl PropertyValue {
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Text(_) => ValueKind::Text,
			Self::Integer(_) => ValueKind::Integer,
			Self::Boolean(_) => ValueKind::Boolean,
			Self::Node(_) => ValueKind::Node,
			Self::Date(_) => ValueKind::Date,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Self::Integer(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_node(&self) -> Option<&NodeRef> {
		match self {
			Self::Node(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_date(&self) -> Option<OffsetDateTime> {
		match self {
			Self::Date(value) => Some(*value),
			_ => None,
		}
	}
}
impl Display for PropertyValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Text(value) => write!(f, "{value}"),
			Self::Integer(value) => write!(f, "{value}"),
			Self::Boolean(value) => write!(f, "{value}"),
			Self::Node(value) => write!(f, "{value}"),
			Self::Date(value) => write!(f, "{value}"),
		}
	}
}
impl From<&str> for PropertyValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}
impl From<String> for PropertyValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<i64> for PropertyValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}
impl From<bool> for PropertyValue {
	fn from(value: bool) -> Self {
		Self::Boolean(value)
	}
}
impl From<NodeRef> for PropertyValue {
	fn from(value: NodeRef) -> Self {
		Self::Node(value)
	}
}
impl From<OffsetDateTime> for PropertyValue {
	fn from(value: OffsetDateTime) -> Self {
		Self::Date(value)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
	Text,
	Integer,
	Boolean,
	Node,
	Date,
}
impl ValueKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Integer => "integer",
			Self::Boolean => "boolean",
			Self::Node => "node",
			Self::Date => "date",
		}
	}
}
impl Display for ValueKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
