use std::sync::Arc;

use scout_domain::{NodeRef, PropertyValue, QName, model};

use crate::{
	NodeIdentity, NodeKind, NodeSource, Result, ResultRow, StandardResolvers, ViewSettings,
};

#[derive(Debug, Default)]
pub struct NormalizedResults {
	pub containers: Vec<ResultRow>,
	pub content: Vec<ResultRow>,
}
impl NormalizedResults {
	pub fn len(&self) -> usize {
		self.containers.len() + self.content.len()
	}

	pub fn is_empty(&self) -> bool {
		self.containers.is_empty() && self.content.is_empty()
	}
}

pub struct Normalizer {
	source: Arc<dyn NodeSource>,
	settings: Arc<ViewSettings>,
	resolvers: StandardResolvers,
}
impl Normalizer {
	pub fn new(source: Arc<dyn NodeSource>, settings: ViewSettings) -> Self {
		let settings = Arc::new(settings);
		let resolvers = StandardResolvers::new(Arc::clone(&source), Arc::clone(&settings));

		Self { source, settings, resolvers }
	}

	pub fn settings(&self) -> &ViewSettings {
		&self.settings
	}

	pub fn normalize(&self, hits: &[NodeRef]) -> Result<NormalizedResults> {
		let mut results = NormalizedResults::default();

		for node in hits {
			let Some(type_name) = self.source.node_type(node)? else {
				tracing::warn!(%node, "Search hit no longer exists.");

				continue;
			};
			let Some(kind) = self.classify(node, &type_name)? else {
				continue;
			};
			let name = self.source.display_name(node)?;
			let mut row = ResultRow::new(node.clone(), NodeIdentity { type_name, name, kind });

			self.resolvers.register(&mut row);

			if kind.is_container() {
				results.containers.push(row);
			} else {
				results.content.push(row);
			}
		}

		tracing::debug!(
			hits = hits.len(),
			containers = results.containers.len(),
			content = results.content.len(),
			"Normalized search results."
		);

		Ok(results)
	}

	fn classify(&self, node: &NodeRef, type_name: &QName) -> Result<Option<NodeKind>> {
		let source = self.source.as_ref();

		if source.is_subtype(type_name, &self.settings.folder_type) {
			if source.is_subtype(type_name, &model::type_system_folder()) {
				return Ok(None);
			}

			return Ok(Some(NodeKind::Folder));
		}
		if source.is_subtype(type_name, &self.settings.content_type) {
			return Ok(Some(NodeKind::Content));
		}

		let kind = if *type_name == model::type_file_link() {
			NodeKind::FileLink
		} else if *type_name == model::type_folder_link() {
			NodeKind::FolderLink
		} else {
			tracing::debug!(%node, %type_name, "Skipping search hit of unlisted type.");

			return Ok(None);
		};

		if self.can_follow_link(node)? {
			Ok(Some(kind))
		} else {
			tracing::debug!(%node, "Skipping link with an unreadable destination.");

			Ok(None)
		}
	}

	fn can_follow_link(&self, link: &NodeRef) -> Result<bool> {
		match self.source.property(link, &model::prop_link_destination())? {
			Some(PropertyValue::Node(target)) => self.source.has_read_permission(&target),
			_ => Ok(false),
		}
	}
}
