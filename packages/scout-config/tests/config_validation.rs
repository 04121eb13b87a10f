use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use scout_config::{Config, Error};
use scout_domain::QName;

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("scout_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> scout_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = scout_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.search.minimum_length, 3);
	assert_eq!(cfg.search.simple_search_attributes, vec!["cm:title", "cm:description"]);
	assert_eq!(cfg.view.download_url_prefix, "/d/a");
	assert_eq!(cfg.archive.max_results, 200);
}

#[test]
fn configured_prefixes_extend_builtins() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");
	let prefixes = scout_config::prefixes(&cfg);

	assert_eq!(
		prefixes.resolve("ex:budget").expect("Configured prefix must resolve."),
		QName::new("http://example.com/model/1.0", "budget")
	);
	assert!(prefixes.resolve("cm:name").is_ok());
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let payload = "[service]\nlog_level = \"debug\"\n\n[search]\nminimum_length = 2\nmax_results = 0\n";
	let cfg = load_payload(payload.to_string()).expect("Minimal config must load.");

	assert_eq!(cfg.model.name_attribute, "cm:name");
	assert_eq!(cfg.view.default_space_icon, "space-icon-default");
	assert_eq!(cfg.archive.store, "archive://SpacesStore");
	assert_eq!(cfg.search.store, "workspace://SpacesStore");
	assert!(cfg.search.simple_search_attributes.is_empty());
}

#[test]
fn minimum_length_must_be_positive() {
	let err = load_payload(sample_toml_with("search", "minimum_length", Value::Integer(0)))
		.expect_err("Expected minimum length validation error.");

	assert!(
		err.to_string().contains("search.minimum_length must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn model_names_must_use_known_prefixes() {
	let err = load_payload(sample_toml_with(
		"model",
		"content_type",
		Value::String("zz:content".to_string()),
	))
	.expect_err("Expected unknown prefix validation error.");

	assert!(matches!(err, Error::Validation { .. }));
	assert!(err.to_string().contains("model.content_type"), "Unexpected error: {err}");
}

#[test]
fn simple_search_attributes_must_resolve() {
	let err = load_payload(sample_toml_with(
		"search",
		"simple_search_attributes",
		Value::Array(vec![Value::String("title".to_string())]),
	))
	.expect_err("Expected attribute validation error.");

	assert!(err.to_string().contains("search.simple_search_attributes"), "Unexpected error: {err}");
}

#[test]
fn archive_store_must_be_a_store_reference() {
	let err = load_payload(sample_toml_with(
		"archive",
		"store",
		Value::String("SpacesStore".to_string()),
	))
	.expect_err("Expected archive store validation error.");

	assert!(err.to_string().contains("archive.store"), "Unexpected error: {err}");
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("scout_config_test_missing_file.toml");

	let err = scout_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = load_payload("[service\nlog_level = ".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}
