use std::sync::Arc;

use serde::{Deserialize, Serialize};

use scout_domain::NodeRef;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CrumbTarget {
	Node(NodeRef),
	SavedSearch(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
	pub label: String,
	pub target: CrumbTarget,
}
impl Breadcrumb {
	pub fn node(label: impl Into<String>, node: NodeRef) -> Self {
		Self { label: label.into(), target: CrumbTarget::Node(node) }
	}

	pub fn saved_search(label: impl Into<String>, name: impl Into<String>) -> Self {
		Self { label: label.into(), target: CrumbTarget::SavedSearch(name.into()) }
	}
}

#[derive(Debug)]
struct Link {
	crumb: Breadcrumb,
	parent: Option<Arc<Link>>,
	len: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Trail {
	head: Option<Arc<Link>>,
}
impl Trail {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.head.as_ref().map_or(0, |link| link.len)
	}

	pub fn is_empty(&self) -> bool {
		self.head.is_none()
	}

	pub fn current(&self) -> Option<&Breadcrumb> {
		self.head.as_ref().map(|link| &link.crumb)
	}

	pub fn push(&self, crumb: Breadcrumb) -> Self {
		let len = self.len() + 1;

		Self { head: Some(Arc::new(Link { crumb, parent: self.head.clone(), len })) }
	}

	pub fn navigate_to(&self, index: usize) -> Option<Self> {
		let mut link = self.head.as_ref()?;

		if index >= link.len {
			return None;
		}

		while link.len > index + 1 {
			link = link.parent.as_ref()?;
		}

		Some(Self { head: Some(Arc::clone(link)) })
	}

	pub fn navigate(&self, crumb: Breadcrumb) -> Self {
		match self.position(&crumb) {
			Some(index) => self.navigate_to(index).unwrap_or_else(|| self.clone()),
			None => self.push(crumb),
		}
	}

	pub fn get(&self, index: usize) -> Option<&Breadcrumb> {
		self.links().find(|link| link.len == index + 1).map(|link| &link.crumb)
	}

	pub fn position(&self, crumb: &Breadcrumb) -> Option<usize> {
		self.links().find(|link| link.crumb == *crumb).map(|link| link.len - 1)
	}

	pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Breadcrumb> {
		let mut crumbs: Vec<&Breadcrumb> = self.links().map(|link| &link.crumb).collect();

		crumbs.reverse();
		crumbs.into_iter()
	}

	fn links(&self) -> impl Iterator<Item = &Link> {
		std::iter::successors(self.head.as_deref(), |link| link.parent.as_deref())
	}
}
impl PartialEq for Trail {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.links().zip(other.links()).all(|(a, b)| a.crumb == b.crumb)
	}
}
impl Eq for Trail {}
impl FromIterator<Breadcrumb> for Trail {
	fn from_iter<I: IntoIterator<Item = Breadcrumb>>(iter: I) -> Self {
		iter.into_iter().fold(Self::new(), |trail, crumb| trail.push(crumb))
	}
}
