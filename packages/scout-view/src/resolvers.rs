use std::sync::Arc;

use scout_config::Config;
use scout_domain::{NamespacePrefixes, NodeRef, PropertyValue, QName, iso9075, model};

use crate::{
	ContentData, Error, NodeKind, NodeSource, PathElement, Resolver, Result, ResultRow,
	file_type::file_type_image,
};

pub const KEY_PATH: &str = "path";
pub const KEY_DISPLAY_PATH: &str = "displayPath";
pub const KEY_ICON: &str = "icon";
pub const KEY_SMALL_ICON: &str = "smallIcon";
pub const KEY_SIZE: &str = "size";
pub const KEY_MIMETYPE: &str = "mimetype";
pub const KEY_ENCODING: &str = "encoding";
pub const KEY_FILE_TYPE_16: &str = "fileType16";
pub const KEY_FILE_TYPE_32: &str = "fileType32";
pub const KEY_URL: &str = "url";
pub const KEY_DOWNLOAD_URL: &str = "downloadUrl";
pub const KEY_LOCKED: &str = "locked";
pub const KEY_LANG: &str = "lang";

const MISSING_LINK_TARGET: &str = "#";
const SMALL_ICON_SUFFIX: &str = "-16";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewSettings {
	pub prefixes: NamespacePrefixes,
	pub content_type: QName,
	pub folder_type: QName,
	pub default_space_icon: String,
	pub small_space_icon: String,
	pub download_url_prefix: String,
	pub browser_url_prefix: String,
}
impl ViewSettings {
	pub fn from_config(cfg: &Config) -> Result<Self> {
		let prefixes = scout_config::prefixes(cfg);
		let resolve = |label: &str, value: &str| {
			prefixes
				.resolve(value)
				.map_err(|err| Error::Settings { message: format!("{label}: {err}") })
		};

		Ok(Self {
			content_type: resolve("model.content_type", &cfg.model.content_type)?,
			folder_type: resolve("model.folder_type", &cfg.model.folder_type)?,
			default_space_icon: cfg.view.default_space_icon.clone(),
			small_space_icon: cfg.view.small_space_icon.clone(),
			download_url_prefix: cfg.view.download_url_prefix.clone(),
			browser_url_prefix: cfg.view.browser_url_prefix.clone(),
			prefixes,
		})
	}
}
impl Default for ViewSettings {
	fn default() -> Self {
		Self {
			prefixes: NamespacePrefixes::default(),
			content_type: model::type_content(),
			folder_type: model::type_folder(),
			default_space_icon: "space-icon-default".to_string(),
			small_space_icon: "space_small".to_string(),
			download_url_prefix: "/d/a".to_string(),
			browser_url_prefix: "/d/d".to_string(),
		}
	}
}

#[derive(Clone)]
pub struct StandardResolvers {
	path: Resolver,
	display_path: Resolver,
	icon: Resolver,
	small_icon: Resolver,
	size: Resolver,
	mimetype: Resolver,
	encoding: Resolver,
	file_type_16: Resolver,
	file_type_32: Resolver,
	url: Resolver,
	download_url: Resolver,
	link_url: Resolver,
	link_download_url: Resolver,
	locked: Resolver,
	lang: Resolver,
}
impl StandardResolvers {
	pub fn new(source: Arc<dyn NodeSource>, settings: Arc<ViewSettings>) -> Self {
		Self {
			path: path_resolver(Arc::clone(&source), Arc::clone(&settings)),
			display_path: display_path_resolver(Arc::clone(&source)),
			icon: icon_resolver(Arc::clone(&source), Arc::clone(&settings), false),
			small_icon: icon_resolver(Arc::clone(&source), Arc::clone(&settings), true),
			size: size_resolver(Arc::clone(&source)),
			mimetype: content_field_resolver(Arc::clone(&source), |content| content.mimetype),
			encoding: content_field_resolver(Arc::clone(&source), |content| content.encoding),
			file_type_16: resolver(|row| Ok(Some(file_type_image(row.name(), true).into()))),
			file_type_32: resolver(|row| Ok(Some(file_type_image(row.name(), false).into()))),
			url: url_resolver(Arc::clone(&settings), UrlKind::Browser),
			download_url: url_resolver(Arc::clone(&settings), UrlKind::Download),
			link_url: link_url_resolver(Arc::clone(&source), Arc::clone(&settings), UrlKind::Browser),
			link_download_url: link_url_resolver(
				Arc::clone(&source),
				Arc::clone(&settings),
				UrlKind::Download,
			),
			locked: locked_resolver(Arc::clone(&source)),
			lang: lang_resolver(source),
		}
	}

	pub fn register(&self, row: &mut ResultRow) {
		match row.kind() {
			NodeKind::Folder | NodeKind::FolderLink => {
				row.register_shared(KEY_ICON, Arc::clone(&self.icon));
				row.register_shared(KEY_SMALL_ICON, Arc::clone(&self.small_icon));
			},
			NodeKind::Content => {
				row.register_shared(KEY_URL, Arc::clone(&self.url));
				row.register_shared(KEY_DOWNLOAD_URL, Arc::clone(&self.download_url));
				row.register_shared(KEY_SIZE, Arc::clone(&self.size));
				row.register_shared(KEY_MIMETYPE, Arc::clone(&self.mimetype));
				row.register_shared(KEY_ENCODING, Arc::clone(&self.encoding));
				row.register_shared(KEY_LOCKED, Arc::clone(&self.locked));
				self.register_file_bindings(row);
			},
			NodeKind::FileLink => {
				row.register_shared(KEY_URL, Arc::clone(&self.link_url));
				row.register_shared(KEY_DOWNLOAD_URL, Arc::clone(&self.link_download_url));
				self.register_file_bindings(row);
			},
		}

		row.register_shared(KEY_PATH, Arc::clone(&self.path));
		row.register_shared(KEY_DISPLAY_PATH, Arc::clone(&self.display_path));
	}

	fn register_file_bindings(&self, row: &mut ResultRow) {
		row.register_shared(KEY_FILE_TYPE_16, Arc::clone(&self.file_type_16));
		row.register_shared(KEY_FILE_TYPE_32, Arc::clone(&self.file_type_32));
		row.register_shared(KEY_LANG, Arc::clone(&self.lang));
	}
}

#[derive(Clone, Copy)]
enum UrlKind {
	Browser,
	Download,
}

fn resolver<F>(f: F) -> Resolver
where
	F: Fn(&ResultRow) -> Result<Option<PropertyValue>> + Send + Sync + 'static,
{
	Arc::new(f)
}

fn path_resolver(source: Arc<dyn NodeSource>, settings: Arc<ViewSettings>) -> Resolver {
	resolver(move |row| {
		let elements = source.path(row.node())?;

		Ok(Some(prefixed_path(&elements, &settings.prefixes).into()))
	})
}

fn display_path_resolver(source: Arc<dyn NodeSource>) -> Resolver {
	resolver(move |row| {
		let elements = source.path(row.node())?;

		Ok(Some(display_path(&elements).into()))
	})
}

fn icon_resolver(
	source: Arc<dyn NodeSource>,
	settings: Arc<ViewSettings>,
	small: bool,
) -> Resolver {
	resolver(move |row| {
		let icon = match source.property(row.node(), &model::prop_icon())? {
			Some(PropertyValue::Text(icon)) if !icon.is_empty() => Some(icon),
			_ => None,
		};
		let icon = match (icon, small) {
			(Some(icon), false) => icon,
			(Some(icon), true) => format!("{icon}{SMALL_ICON_SUFFIX}"),
			(None, false) => settings.default_space_icon.clone(),
			(None, true) => settings.small_space_icon.clone(),
		};

		Ok(Some(icon.into()))
	})
}

fn size_resolver(source: Arc<dyn NodeSource>) -> Resolver {
	resolver(move |row| {
		let size = source
			.content(row.node())?
			.map(|content| i64::try_from(content.size).unwrap_or(i64::MAX))
			.unwrap_or(0);

		Ok(Some(PropertyValue::Integer(size)))
	})
}

fn content_field_resolver(
	source: Arc<dyn NodeSource>,
	field: fn(ContentData) -> String,
) -> Resolver {
	resolver(move |row| {
		Ok(source.content(row.node())?.map(field).filter(|value| !value.is_empty()).map(Into::into))
	})
}

fn url_resolver(settings: Arc<ViewSettings>, kind: UrlKind) -> Resolver {
	resolver(move |row| Ok(Some(content_url(&settings, kind, row.node(), row.name()).into())))
}

fn link_url_resolver(
	source: Arc<dyn NodeSource>,
	settings: Arc<ViewSettings>,
	kind: UrlKind,
) -> Resolver {
	resolver(move |row| {
		let destination = source.property(row.node(), &model::prop_link_destination())?;
		let url = match destination {
			Some(PropertyValue::Node(target)) if source.exists(&target)? => {
				let name = source.display_name(&target)?;

				content_url(&settings, kind, &target, &name)
			},
			_ => MISSING_LINK_TARGET.to_string(),
		};

		Ok(Some(url.into()))
	})
}

fn locked_resolver(source: Arc<dyn NodeSource>) -> Resolver {
	resolver(move |row| Ok(Some(PropertyValue::Boolean(source.is_locked(row.node())?))))
}

fn lang_resolver(source: Arc<dyn NodeSource>) -> Resolver {
	resolver(move |row| {
		let lang = match source.property(row.node(), &model::prop_locale())? {
			Some(PropertyValue::Text(locale)) => language(&locale),
			_ => None,
		};

		Ok(lang.map(Into::into))
	})
}

fn content_url(settings: &ViewSettings, kind: UrlKind, node: &NodeRef, name: &str) -> String {
	let prefix = match kind {
		UrlKind::Browser => &settings.browser_url_prefix,
		UrlKind::Download => &settings.download_url_prefix,
	};
	let store = node.store();

	format!(
		"{prefix}/{}/{}/{}/{}",
		store.protocol(),
		store.identifier(),
		node.id(),
		urlencoding::encode(name)
	)
}

fn prefixed_path(elements: &[PathElement], prefixes: &NamespacePrefixes) -> String {
	let mut path = String::new();

	for element in elements {
		let local = iso9075::encode(element.qname.local_name());
		let encoded = QName::new(element.qname.namespace(), local);

		path.push('/');
		path.push_str(&encoded.to_prefix_string(prefixes).unwrap_or_else(|| encoded.to_string()));
	}

	if path.is_empty() { "/".to_string() } else { path }
}

fn display_path(elements: &[PathElement]) -> String {
	let ancestors = elements.split_last().map(|(_, ancestors)| ancestors).unwrap_or_default();
	let names: Vec<&str> = ancestors.iter().map(|element| element.name.as_str()).collect();

	format!("/{}", names.join("/"))
}

fn language(locale: &str) -> Option<String> {
	let language = locale.split(['_', '-']).next().unwrap_or_default().trim();

	if language.is_empty() { None } else { Some(language.to_lowercase()) }
}

#[cfg(test)]
mod tests {
	use scout_domain::StoreRef;

	use super::*;

	fn element(prefix_uri: &str, local: &str, name: &str) -> PathElement {
		PathElement { qname: QName::new(prefix_uri, local), name: name.to_string() }
	}

	#[test]
	fn paths_render_prefixed_and_display_forms() {
		let elements = vec![
			element(scout_domain::APP_MODEL_URI, "company_home", "Company Home"),
			element(scout_domain::CONTENT_MODEL_URI, "Q1 Reports", "Q1 Reports"),
			element(scout_domain::CONTENT_MODEL_URI, "summary.pdf", "summary.pdf"),
		];

		assert_eq!(
			prefixed_path(&elements, &NamespacePrefixes::default()),
			"/app:company_home/cm:Q1_x0020_Reports/cm:summary.pdf"
		);
		assert_eq!(display_path(&elements), "/Company Home/Q1 Reports");
		assert_eq!(display_path(&[]), "/");
		assert_eq!(prefixed_path(&[], &NamespacePrefixes::default()), "/");
	}

	#[test]
	fn unknown_namespaces_fall_back_to_clark_notation() {
		let elements = vec![element("http://example.com/model", "item", "Item")];

		assert_eq!(
			prefixed_path(&elements, &NamespacePrefixes::default()),
			"/{http://example.com/model}item"
		);
	}

	#[test]
	fn content_urls_encode_the_name() {
		let node = NodeRef::new(StoreRef::workspace(), "abc-123");
		let settings = ViewSettings::default();

		assert_eq!(
			content_url(&settings, UrlKind::Download, &node, "Q1 report.pdf"),
			"/d/a/workspace/SpacesStore/abc-123/Q1%20report.pdf"
		);
		assert_eq!(
			content_url(&settings, UrlKind::Browser, &node, "a.txt"),
			"/d/d/workspace/SpacesStore/abc-123/a.txt"
		);
	}

	#[test]
	fn language_is_taken_from_the_locale() {
		assert_eq!(language("fr_FR").as_deref(), Some("fr"));
		assert_eq!(language("EN-us").as_deref(), Some("en"));
		assert_eq!(language(""), None);
	}
}
