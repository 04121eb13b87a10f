pub mod iso9075;
pub mod model;

mod error;
mod node;
mod qname;
mod value;

pub use error::{Error, Result};
pub use node::{NodeRef, StoreRef};
pub use qname::{
	APP_MODEL_URI, CONTENT_MODEL_URI, NamespacePrefixes, QName, SYSTEM_MODEL_URI, USER_MODEL_URI,
};
pub use value::{PropertyValue, ValueKind};
