pub mod archive;
pub mod escape;
pub mod saved;
pub mod scope;

mod builder;
mod criteria;
mod error;
mod text;

pub use archive::{ArchiveCriteria, ArchiveTextMode, ArchivedWithin, build_archive_query};
pub use builder::{QueryBuilder, QuerySettings, QueryString};
pub use criteria::{RangeFilter, Scope, SearchCriteria, SearchMode};
pub use error::{Error, Result};
pub use saved::SavedSearch;
pub use scope::PathSegment;
