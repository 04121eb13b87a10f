use std::{
	cell::RefCell,
	collections::{BTreeMap, BTreeSet},
	fmt::{Debug, Formatter},
	sync::Arc,
};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use scout_domain::{NodeRef, PropertyValue, QName, ValueKind};

use crate::{Error, Result};

pub const KEY_ID: &str = "id";
pub const KEY_NODE_REF: &str = "nodeRef";
pub const KEY_NAME: &str = "name";
pub const KEY_TYPE: &str = "type";

pub type Resolver = Arc<dyn Fn(&ResultRow) -> Result<Option<PropertyValue>> + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
	Folder,
	Content,
	FolderLink,
	FileLink,
}
impl NodeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Folder => "folder",
			Self::Content => "content",
			Self::FolderLink => "folder_link",
			Self::FileLink => "file_link",
		}
	}

	pub fn is_container(self) -> bool {
		matches!(self, Self::Folder | Self::FolderLink)
	}

	pub fn is_link(self) -> bool {
		matches!(self, Self::FolderLink | Self::FileLink)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeIdentity {
	pub type_name: QName,
	pub name: String,
	pub kind: NodeKind,
}

pub struct ResultRow {
	node: NodeRef,
	identity: NodeIdentity,
	stored: BTreeMap<String, PropertyValue>,
	resolvers: BTreeMap<String, Resolver>,
	cache: RefCell<BTreeMap<String, Option<PropertyValue>>>,
	resolving: RefCell<BTreeSet<String>>,
}
impl ResultRow {
	pub fn new(node: NodeRef, identity: NodeIdentity) -> Self {
		Self {
			node,
			identity,
			stored: BTreeMap::new(),
			resolvers: BTreeMap::new(),
			cache: RefCell::new(BTreeMap::new()),
			resolving: RefCell::new(BTreeSet::new()),
		}
	}

	pub fn node(&self) -> &NodeRef {
		&self.node
	}

	pub fn kind(&self) -> NodeKind {
		self.identity.kind
	}

	pub fn name(&self) -> &str {
		&self.identity.name
	}

	pub fn register_resolver<F>(&mut self, name: impl Into<String>, resolver: F)
	where
		F: Fn(&ResultRow) -> Result<Option<PropertyValue>> + Send + Sync + 'static,
	{
		self.register_shared(name, Arc::new(resolver));
	}

	pub fn register_shared(&mut self, name: impl Into<String>, resolver: Resolver) {
		let name = name.into();

		self.cache.get_mut().remove(&name);
		self.resolvers.insert(name, resolver);
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
		self.stored.insert(name.into(), value.into());
	}

	/// Returns `Ok(None)` for names with no stored value and no resolver.
	///
	/// A resolver runs at most once per name for the lifetime of the row, and a `None` result is
	/// cached like any other. A failing resolver is not cached, so the next read retries it.
	pub fn get(&self, name: &str) -> Result<Option<PropertyValue>> {
		if let Some(value) = self.stored.get(name) {
			return Ok(Some(value.clone()));
		}
		if let Some(value) = self.identity_value(name) {
			return Ok(Some(value));
		}
		if let Some(value) = self.cache.borrow().get(name) {
			return Ok(value.clone());
		}

		let Some(resolver) = self.resolvers.get(name).cloned() else {
			return Ok(None);
		};

		if !self.resolving.borrow_mut().insert(name.to_string()) {
			return Err(Error::ResolutionCycle { name: name.to_string() });
		}

		let resolved = resolver(self);

		self.resolving.borrow_mut().remove(name);

		let value = resolved
			.map_err(|source| Error::Resolution { name: name.to_string(), source: Box::new(source) })?;

		self.cache.borrow_mut().insert(name.to_string(), value.clone());

		Ok(value)
	}

	pub fn get_text(&self, name: &str) -> Result<Option<String>> {
		self.typed(name, ValueKind::Text, |value| match value {
			PropertyValue::Text(text) => Some(text),
			_ => None,
		})
	}

	pub fn get_integer(&self, name: &str) -> Result<Option<i64>> {
		self.typed(name, ValueKind::Integer, |value| value.as_integer())
	}

	pub fn get_bool(&self, name: &str) -> Result<Option<bool>> {
		self.typed(name, ValueKind::Boolean, |value| value.as_bool())
	}

	pub fn get_node(&self, name: &str) -> Result<Option<NodeRef>> {
		self.typed(name, ValueKind::Node, |value| match value {
			PropertyValue::Node(node) => Some(node),
			_ => None,
		})
	}

	pub fn get_date(&self, name: &str) -> Result<Option<OffsetDateTime>> {
		self.typed(name, ValueKind::Date, |value| value.as_date())
	}

	fn typed<T>(
		&self,
		name: &str,
		expected: ValueKind,
		extract: impl FnOnce(PropertyValue) -> Option<T>,
	) -> Result<Option<T>> {
		let Some(value) = self.get(name)? else {
			return Ok(None);
		};
		let found = value.kind();

		extract(value)
			.map(Some)
			.ok_or_else(|| Error::TypeMismatch { name: name.to_string(), expected, found })
	}

	fn identity_value(&self, name: &str) -> Option<PropertyValue> {
		match name {
			KEY_ID => Some(PropertyValue::Text(self.node.id().to_string())),
			KEY_NODE_REF => Some(PropertyValue::Node(self.node.clone())),
			KEY_NAME => Some(PropertyValue::Text(self.identity.name.clone())),
			KEY_TYPE => Some(PropertyValue::Text(self.identity.type_name.to_string())),
			_ => None,
		}
	}
}
impl Debug for ResultRow {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResultRow")
			.field("node", &self.node)
			.field("identity", &self.identity)
			.field("stored", &self.stored)
			.field("resolvers", &self.resolvers.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use scout_domain::{StoreRef, model};

	use super::*;

	fn row() -> ResultRow {
		ResultRow::new(
			NodeRef::new(StoreRef::workspace(), "doc-1"),
			NodeIdentity {
				type_name: model::type_content(),
				name: "report.pdf".to_string(),
				kind: NodeKind::Content,
			},
		)
	}

	#[test]
	fn identity_properties_need_no_resolver() {
		let row = row();

		assert_eq!(row.get_text(KEY_ID).expect("id").as_deref(), Some("doc-1"));
		assert_eq!(row.get_text(KEY_NAME).expect("name").as_deref(), Some("report.pdf"));
		assert_eq!(
			row.get_text(KEY_TYPE).expect("type").as_deref(),
			Some("{http://www.alfresco.org/model/content/1.0}content")
		);
		assert_eq!(row.get_node(KEY_NODE_REF).expect("node"), Some(row.node().clone()));
	}

	#[test]
	fn stored_values_shadow_resolvers() {
		let mut row = row();

		row.register_resolver("size", |_| Ok(Some(PropertyValue::Integer(1))));
		row.set("size", 42_i64);

		assert_eq!(row.get_integer("size").expect("size"), Some(42));
	}

	#[test]
	fn re_registering_replaces_the_cached_value() {
		let mut row = row();

		row.register_resolver("label", |_| Ok(Some(PropertyValue::from("first"))));

		assert_eq!(row.get_text("label").expect("label").as_deref(), Some("first"));

		row.register_resolver("label", |_| Ok(Some(PropertyValue::from("second"))));

		assert_eq!(row.get_text("label").expect("label").as_deref(), Some("second"));
	}

	#[test]
	fn none_results_are_cached() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let mut row = row();

		row.register_resolver("lang", move |_| {
			counter.fetch_add(1, Ordering::SeqCst);

			Ok(None)
		});

		assert_eq!(row.get("lang").expect("lang"), None);
		assert_eq!(row.get("lang").expect("lang"), None);
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn self_referencing_resolver_reports_a_cycle() {
		let mut row = row();

		row.register_resolver("loop", |row| row.get("loop"));

		let err = row.get("loop").expect_err("cycle");

		assert!(matches!(
			err,
			Error::Resolution { ref source, .. } if matches!(**source, Error::ResolutionCycle { .. })
		));
	}
}
