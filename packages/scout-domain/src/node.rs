use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const WORKSPACE_PROTOCOL: &str = "workspace";
const ARCHIVE_PROTOCOL: &str = "archive";
const SPACES_STORE: &str = "SpacesStore";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoreRef {
	protocol: String,
	identifier: String,
}
impl StoreRef {
	pub fn new(protocol: impl Into<String>, identifier: impl Into<String>) -> Self {
		Self { protocol: protocol.into(), identifier: identifier.into() }
	}

	pub fn workspace() -> Self {
		Self::new(WORKSPACE_PROTOCOL, SPACES_STORE)
	}

	pub fn archive() -> Self {
		Self::new(ARCHIVE_PROTOCOL, SPACES_STORE)
	}

	pub fn protocol(&self) -> &str {
		&self.protocol
	}

	pub fn identifier(&self) -> &str {
		&self.identifier
	}
}
impl Display for StoreRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}://{}", self.protocol, self.identifier)
	}
}
impl FromStr for StoreRef {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		match value.split_once("://") {
			Some((protocol, identifier))
				if !protocol.is_empty() && !identifier.is_empty() && !identifier.contains('/') =>
				Ok(Self::new(protocol, identifier)),
			_ => Err(Error::InvalidNodeRef { value: value.to_string() }),
		}
	}
}
impl TryFrom<String> for StoreRef {
	type Error = Error;

	fn try_from(value: String) -> Result<Self> {
		value.parse()
	}
}
impl From<StoreRef> for String {
	fn from(value: StoreRef) -> Self {
		value.to_string()
	}
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeRef {
	store: StoreRef,
	id: String,
}
impl NodeRef {
	pub fn new(store: StoreRef, id: impl Into<String>) -> Self {
		Self { store, id: id.into() }
	}

	pub fn store(&self) -> &StoreRef {
		&self.store
	}

	pub fn id(&self) -> &str {
		&self.id
	}
}
impl Display for NodeRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{}", self.store, self.id)
	}
}
impl FromStr for NodeRef {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		let invalid = || Error::InvalidNodeRef { value: value.to_string() };
		let (store, id) = value.rsplit_once('/').ok_or_else(invalid)?;

		if id.is_empty() {
			return Err(invalid());
		}

		let store = store.parse::<StoreRef>().map_err(|_| invalid())?;

		Ok(Self::new(store, id))
	}
}
impl TryFrom<String> for NodeRef {
	type Error = Error;

	fn try_from(value: String) -> Result<Self> {
		value.parse()
	}
}
impl From<NodeRef> for String {
	fn from(value: NodeRef) -> Self {
		value.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_node_reference() {
		let node: NodeRef =
			"workspace://SpacesStore/7c2a0d7e-0f4b-4b64-9d4e-55a1f3a8f001".parse().expect("valid");

		assert_eq!(node.store(), &StoreRef::workspace());
		assert_eq!(node.id(), "7c2a0d7e-0f4b-4b64-9d4e-55a1f3a8f001");
		assert_eq!(node.to_string(), "workspace://SpacesStore/7c2a0d7e-0f4b-4b64-9d4e-55a1f3a8f001");
	}

	#[test]
	fn rejects_malformed_references() {
		assert!("SpacesStore/abc".parse::<NodeRef>().is_err());
		assert!("workspace://SpacesStore/".parse::<NodeRef>().is_err());
		assert!("workspace:///abc".parse::<NodeRef>().is_err());
	}
}
