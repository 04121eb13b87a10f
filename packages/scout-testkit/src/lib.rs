mod error;
mod search;
mod tx;

pub use error::{Error, Result};
pub use tx::TxCounts;

use std::{
	collections::BTreeMap,
	sync::{Arc, Mutex, MutexGuard},
};

use uuid::Uuid;

use scout_domain::{NodeRef, PropertyValue, QName, StoreRef, model};
use scout_service::SearchRequest;
use scout_view::{ContentData, NodeSource, PathElement};

#[derive(Clone)]
pub struct MemoryRepository {
	state: Arc<Mutex<State>>,
}
impl MemoryRepository {
	pub fn new() -> Self {
		let repo = Self { state: Arc::new(Mutex::new(State::default())) };

		repo.add_type(model::type_system_folder(), model::type_folder());

		repo
	}

	pub fn add_type(&self, type_name: QName, parent: QName) {
		self.state().supertypes.insert(type_name, parent);
	}

	pub fn company_home(&self) -> NodeRef {
		self.insert(None, QName::application("company_home"), "Company Home", model::type_folder())
	}

	pub fn add_folder(&self, parent: &NodeRef, name: &str) -> NodeRef {
		self.insert(Some(parent), QName::content(name), name, model::type_folder())
	}

	pub fn add_content(
		&self,
		parent: &NodeRef,
		name: &str,
		content: Option<ContentData>,
	) -> NodeRef {
		let node = self.insert(Some(parent), QName::content(name), name, model::type_content());

		if let Some(stored) = self.state().nodes.get_mut(&node) {
			stored.content = content;
		}

		node
	}

	pub fn add_node(&self, parent: Option<&NodeRef>, name: &str, type_name: QName) -> NodeRef {
		self.insert(parent, QName::content(name), name, type_name)
	}

	pub fn add_link(
		&self,
		parent: &NodeRef,
		name: &str,
		type_name: QName,
		target: &NodeRef,
	) -> NodeRef {
		let node = self.insert(Some(parent), QName::content(name), name, type_name);

		if let Some(stored) = self.state().nodes.get_mut(&node) {
			stored
				.properties
				.insert(model::prop_link_destination(), PropertyValue::Node(target.clone()));
		}

		node
	}

	pub fn set_property(
		&self,
		node: &NodeRef,
		name: QName,
		value: impl Into<PropertyValue>,
	) -> Result<()> {
		let mut state = self.state();
		let stored = state
			.nodes
			.get_mut(node)
			.ok_or_else(|| Error::Message(format!("Unknown node {node}.")))?;

		stored.properties.insert(name, value.into());

		Ok(())
	}

	pub fn remove(&self, node: &NodeRef) -> Result<()> {
		self.state()
			.nodes
			.remove(node)
			.map(|_| ())
			.ok_or_else(|| Error::Message(format!("Unknown node {node}.")))
	}

	pub fn deny_read(&self, node: &NodeRef) {
		if let Some(stored) = self.state().nodes.get_mut(node) {
			stored.readable = false;
		}
	}

	pub fn fail_lookups(&self, message: Option<&str>) {
		self.state().lookup_failure = message.map(str::to_string);
	}

	pub fn reads(&self) -> usize {
		self.state().reads
	}

	pub fn requests(&self) -> Vec<SearchRequest> {
		self.state().requests.clone()
	}

	fn insert(
		&self,
		parent: Option<&NodeRef>,
		assoc_name: QName,
		name: &str,
		type_name: QName,
	) -> NodeRef {
		let node = NodeRef::new(StoreRef::workspace(), Uuid::new_v4().to_string());
		let mut properties = BTreeMap::new();

		properties.insert(model::prop_name(), PropertyValue::Text(name.to_string()));

		self.state().nodes.insert(
			node.clone(),
			StoredNode {
				type_name,
				parent: parent.cloned(),
				assoc_name,
				properties,
				content: None,
				readable: true,
			},
		);

		node
	}

	fn state(&self) -> MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn lookup(&self) -> scout_view::Result<MutexGuard<'_, State>> {
		let state = self.state();

		if let Some(message) = state.lookup_failure.clone() {
			return Err(scout_view::Error::Source(message));
		}

		Ok(state)
	}
}
impl Default for MemoryRepository {
	fn default() -> Self {
		Self::new()
	}
}
impl NodeSource for MemoryRepository {
	fn node_type(&self, node: &NodeRef) -> scout_view::Result<Option<QName>> {
		Ok(self.lookup()?.nodes.get(node).map(|stored| stored.type_name.clone()))
	}

	fn is_subtype(&self, type_name: &QName, ancestor: &QName) -> bool {
		let state = self.state();
		let mut current = Some(type_name);

		while let Some(type_name) = current {
			if type_name == ancestor {
				return true;
			}

			current = state.supertypes.get(type_name);
		}

		false
	}

	fn property(
		&self,
		node: &NodeRef,
		name: &QName,
	) -> scout_view::Result<Option<PropertyValue>> {
		let mut state = self.lookup()?;

		state.reads += 1;

		Ok(state.nodes.get(node).and_then(|stored| stored.properties.get(name).cloned()))
	}

	fn content(&self, node: &NodeRef) -> scout_view::Result<Option<ContentData>> {
		let mut state = self.lookup()?;

		state.reads += 1;

		Ok(state.nodes.get(node).and_then(|stored| stored.content.clone()))
	}

	fn path(&self, node: &NodeRef) -> scout_view::Result<Vec<PathElement>> {
		let state = self.lookup()?;
		let mut elements = Vec::new();
		let mut current = state.nodes.get(node);

		while let Some(stored) = current {
			let name = stored
				.properties
				.get(&model::prop_name())
				.and_then(PropertyValue::as_text)
				.unwrap_or_default()
				.to_string();

			elements.push(PathElement { qname: stored.assoc_name.clone(), name });

			current = stored.parent.as_ref().and_then(|parent| state.nodes.get(parent));
		}

		elements.reverse();

		Ok(elements)
	}

	fn has_read_permission(&self, node: &NodeRef) -> scout_view::Result<bool> {
		Ok(self.lookup()?.nodes.get(node).is_some_and(|stored| stored.readable))
	}
}

#[derive(Default)]
struct State {
	nodes: BTreeMap<NodeRef, StoredNode>,
	supertypes: BTreeMap<QName, QName>,
	lookup_failure: Option<String>,
	reads: usize,
	hits: Vec<NodeRef>,
	requests: Vec<SearchRequest>,
	search_failure: Option<String>,
	tx: tx::TxState,
}

struct StoredNode {
	type_name: QName,
	parent: Option<NodeRef>,
	assoc_name: QName,
	properties: BTreeMap<QName, PropertyValue>,
	content: Option<ContentData>,
	readable: bool,
}
