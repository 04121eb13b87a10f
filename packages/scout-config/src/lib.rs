mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Archive, Config, Model, Search, Service, View};

use std::{fs, path::Path};

use regex::Regex;

use scout_domain::{NamespacePrefixes, StoreRef};

const MAX_MINIMUM_LENGTH: u32 = 256;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn prefixes(cfg: &Config) -> NamespacePrefixes {
	let mut prefixes = NamespacePrefixes::default();

	for (prefix, uri) in &cfg.namespaces {
		prefixes.insert(prefix.clone(), uri.clone());
	}

	prefixes
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.search.minimum_length == 0 {
		return Err(Error::Validation {
			message: "search.minimum_length must be greater than zero.".to_string(),
		});
	}
	if cfg.search.minimum_length > MAX_MINIMUM_LENGTH {
		return Err(Error::Validation {
			message: format!("search.minimum_length must be {MAX_MINIMUM_LENGTH} or less."),
		});
	}

	let prefix_pattern = Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$")
		.map_err(|err| Error::Validation { message: err.to_string() })?;

	for (prefix, uri) in &cfg.namespaces {
		if !prefix_pattern.is_match(prefix) {
			return Err(Error::Validation {
				message: format!("namespaces.{prefix} is not a valid namespace prefix."),
			});
		}
		if uri.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("namespaces.{prefix} must be a non-empty URI."),
			});
		}
	}

	let prefixes = prefixes(cfg);

	for (label, value) in [
		("model.content_type", &cfg.model.content_type),
		("model.folder_type", &cfg.model.folder_type),
		("model.name_attribute", &cfg.model.name_attribute),
		("model.mimetype_attribute", &cfg.model.mimetype_attribute),
	] {
		prefixes.resolve(value).map_err(|err| Error::Validation {
			message: format!("{label} is not a valid qualified name: {err}"),
		})?;
	}

	for value in &cfg.search.simple_search_attributes {
		prefixes.resolve(value).map_err(|err| Error::Validation {
			message: format!(
				"search.simple_search_attributes entry '{value}' is not a valid qualified name: {err}"
			),
		})?;
	}

	for (label, value) in [
		("view.default_space_icon", &cfg.view.default_space_icon),
		("view.small_space_icon", &cfg.view.small_space_icon),
		("view.download_url_prefix", &cfg.view.download_url_prefix),
		("view.browser_url_prefix", &cfg.view.browser_url_prefix),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	for (label, value) in [("search.store", &cfg.search.store), ("archive.store", &cfg.archive.store)]
	{
		if value.parse::<StoreRef>().is_err() {
			return Err(Error::Validation {
				message: format!("{label} must look like protocol://identifier."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
	cfg.search.simple_search_attributes.retain(|value| !value.trim().is_empty());

	for value in &mut cfg.search.simple_search_attributes {
		*value = value.trim().to_string();
	}

	for prefix in [&mut cfg.view.download_url_prefix, &mut cfg.view.browser_url_prefix] {
		while prefix.len() > 1 && prefix.ends_with('/') {
			prefix.pop();
		}
	}
}
