use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub search: Search,
	#[serde(default)]
	pub namespaces: BTreeMap<String, String>,
	#[serde(default)]
	pub model: Model,
	#[serde(default)]
	pub view: View,
	#[serde(default)]
	pub archive: Archive,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub minimum_length: u32,
	/// Zero means unlimited.
	pub max_results: u32,
	#[serde(default = "default_search_store")]
	pub store: String,
	#[serde(default)]
	pub force_and_terms: bool,
	#[serde(default)]
	pub simple_search_attributes: Vec<String>,
}

fn default_search_store() -> String {
	"workspace://SpacesStore".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Model {
	pub content_type: String,
	pub folder_type: String,
	pub name_attribute: String,
	pub mimetype_attribute: String,
}
impl Default for Model {
	fn default() -> Self {
		Self {
			content_type: "cm:content".to_string(),
			folder_type: "cm:folder".to_string(),
			name_attribute: "cm:name".to_string(),
			mimetype_attribute: "cm:content.mimetype".to_string(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct View {
	pub default_space_icon: String,
	pub small_space_icon: String,
	pub download_url_prefix: String,
	pub browser_url_prefix: String,
}
impl Default for View {
	fn default() -> Self {
		Self {
			default_space_icon: "space-icon-default".to_string(),
			small_space_icon: "space_small".to_string(),
			download_url_prefix: "/d/a".to_string(),
			browser_url_prefix: "/d/d".to_string(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Archive {
	pub store: String,
	pub max_results: u32,
}
impl Default for Archive {
	fn default() -> Self {
		Self { store: "archive://SpacesStore".to_string(), max_results: 500 }
	}
}
