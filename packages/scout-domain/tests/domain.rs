use time::macros::datetime;

use scout_domain::{NodeRef, PropertyValue, QName, StoreRef, ValueKind, iso9075, model};

#[test]
fn qname_serializes_as_clark_notation() {
	let json = serde_json::to_string(&model::prop_name()).expect("Failed to serialize qname.");

	assert_eq!(json, "\"{http://www.alfresco.org/model/content/1.0}name\"");

	let parsed: QName = serde_json::from_str(&json).expect("Failed to parse qname.");

	assert_eq!(parsed, model::prop_name());
}

#[test]
fn node_ref_rejects_invalid_json() {
	assert!(serde_json::from_str::<NodeRef>("\"not a node\"").is_err());
}

#[test]
fn property_values_report_their_kind() {
	let node = NodeRef::new(StoreRef::workspace(), "abc");

	assert_eq!(PropertyValue::from("x").kind(), ValueKind::Text);
	assert_eq!(PropertyValue::from(42_i64).as_integer(), Some(42));
	assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
	assert_eq!(PropertyValue::from(node.clone()).as_node(), Some(&node));
	assert_eq!(PropertyValue::from("x").as_integer(), None);
}

#[test]
fn date_values_round_trip_through_json() {
	let value = PropertyValue::Date(datetime!(2020-01-01 10:30 UTC));
	let json = serde_json::to_value(&value).expect("Failed to serialize value.");

	assert_eq!(json["kind"], "date");
	assert_eq!(json["value"], "2020-01-01T10:30:00Z");

	let parsed: PropertyValue = serde_json::from_value(json).expect("Failed to parse value.");

	assert_eq!(parsed, value);
}

#[test]
fn archive_store_differs_from_workspace() {
	assert_eq!(StoreRef::archive().to_string(), "archive://SpacesStore");
	assert_ne!(StoreRef::archive(), StoreRef::workspace());
}

#[test]
fn iso9075_round_trips_display_names() {
	for name in ["Company Home", "Q1 (draft)", "plain", "3D models"] {
		assert_eq!(iso9075::decode(&iso9075::encode(name)), name);
	}
}
