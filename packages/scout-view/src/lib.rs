pub mod breadcrumb;
pub mod file_type;
pub mod resolvers;

mod error;
mod normalize;
mod row;
mod source;

pub use breadcrumb::{Breadcrumb, CrumbTarget, Trail};
pub use error::{Error, Result};
pub use normalize::{NormalizedResults, Normalizer};
pub use resolvers::{StandardResolvers, ViewSettings};
pub use row::{
	KEY_ID, KEY_NAME, KEY_NODE_REF, KEY_TYPE, NodeIdentity, NodeKind, Resolver, ResultRow,
};
pub use source::{ContentData, NodeSource, PathElement};
