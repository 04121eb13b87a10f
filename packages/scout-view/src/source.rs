use scout_domain::{NodeRef, PropertyValue, QName, model};

use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentData {
	pub mimetype: String,
	pub encoding: String,
	pub size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathElement {
	pub qname: QName,
	pub name: String,
}

pub trait NodeSource: Send + Sync {
	/// `None` when the node no longer exists.
	fn node_type(&self, node: &NodeRef) -> Result<Option<QName>>;

	// A type is a subtype of itself.
	fn is_subtype(&self, type_name: &QName, ancestor: &QName) -> bool;

	fn property(&self, node: &NodeRef, name: &QName) -> Result<Option<PropertyValue>>;

	fn content(&self, node: &NodeRef) -> Result<Option<ContentData>>;

	fn path(&self, node: &NodeRef) -> Result<Vec<PathElement>>;

	fn has_read_permission(&self, node: &NodeRef) -> Result<bool>;

	fn exists(&self, node: &NodeRef) -> Result<bool> {
		Ok(self.node_type(node)?.is_some())
	}

	fn is_locked(&self, node: &NodeRef) -> Result<bool> {
		Ok(self.property(node, &model::prop_lock_owner())?.is_some())
	}

	fn display_name(&self, node: &NodeRef) -> Result<String> {
		let name = self.property(node, &model::prop_name())?;

		Ok(match name {
			Some(PropertyValue::Text(name)) if !name.is_empty() => name,
			_ => node.id().to_string(),
		})
	}
}
