use lessonkit_fields::{FieldCatalog, FieldDescriptor};
use lessonkit_presets::{
    OverrideRecord, PRESETS_VERSION, PresetsConfig, RecordShape, leaf_hidden_set, leaf_visible_set,
    resolve, to_hidden_record, to_hidden_set, to_visible_record, to_visible_set, upgrade,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn catalog() -> FieldCatalog {
    FieldCatalog::new(vec![
        FieldDescriptor::label_field("label", "Label"),
        FieldDescriptor::text("title", "Title"),
        FieldDescriptor::rich_text("body", "Body"),
        FieldDescriptor::media("image", "Image"),
    ])
    .unwrap()
}

fn keys(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Record shapes ────────────────────────────────────────────────

#[test]
fn record_shapes() {
    assert_eq!(OverrideRecord::from_hidden(["a"]).shape(), RecordShape::Hidden);
    assert_eq!(OverrideRecord::from_visible(["a"]).shape(), RecordShape::Visible);
    assert_eq!(OverrideRecord::default().shape(), RecordShape::Empty);

    let mixed = OverrideRecord {
        hidden_field_keys: Some(keys(&["a"])),
        visible_field_keys: Some(keys(&["b"])),
    };
    assert_eq!(mixed.shape(), RecordShape::Mixed);
}

#[test]
fn uninitialized_records() {
    assert!(OverrideRecord::default().is_uninitialized());
    assert!(OverrideRecord::from_visible(Vec::<String>::new()).is_uninitialized());
    assert!(!OverrideRecord::from_visible(["label"]).is_uninitialized());
    assert!(!OverrideRecord::from_hidden(Vec::<String>::new()).is_uninitialized());
}

// ── Conversions ──────────────────────────────────────────────────

#[test]
fn visible_set_cheap_path_returns_stored_keys() {
    let record = OverrideRecord::from_visible(["label", "retired"]);
    assert_eq!(to_visible_set(&record, &catalog()), keys(&["label", "retired"]));
}

#[test]
fn visible_set_derived_from_hidden_set() {
    let record = OverrideRecord::from_hidden(["title", "image"]);
    assert_eq!(to_visible_set(&record, &catalog()), keys(&["label", "body"]));
}

#[test]
fn hidden_set_cheap_path_returns_stored_keys() {
    let record = OverrideRecord::from_hidden(["retired"]);
    assert_eq!(to_hidden_set(&record, &catalog()), keys(&["retired"]));
}

#[test]
fn hidden_set_derived_from_visible_set() {
    let record = OverrideRecord::from_visible(["label", "body"]);
    assert_eq!(to_hidden_set(&record, &catalog()), keys(&["title", "image"]));
}

#[test]
fn mixed_record_prefers_requested_shape() {
    let record = OverrideRecord {
        hidden_field_keys: Some(keys(&["title"])),
        visible_field_keys: Some(keys(&["label"])),
    };
    let cat = catalog();
    assert_eq!(to_visible_set(&record, &cat), keys(&["label"]));
    assert_eq!(to_hidden_set(&record, &cat), keys(&["title"]));
}

#[test]
fn canonical_records_have_one_shape() {
    let cat = catalog();
    let record = OverrideRecord::from_hidden(["title"]);
    assert_eq!(to_visible_record(&record, &cat).shape(), RecordShape::Visible);
    assert_eq!(
        to_hidden_record(&to_visible_record(&record, &cat), &cat),
        OverrideRecord::from_hidden(["title"])
    );
}

#[test]
fn leaf_visible_set_falls_back_for_empty_allow_list() {
    let cat = catalog().with_type_default("quiz-slide", ["label", "title"]);
    let empty = OverrideRecord::from_visible(Vec::<String>::new());

    assert_eq!(leaf_visible_set(Some(&empty), "quiz-slide", &cat), keys(&["label", "title"]));
    assert_eq!(leaf_visible_set(None, "quiz-slide", &cat), keys(&["label", "title"]));
    assert_eq!(leaf_visible_set(Some(&empty), "poll-slide", &cat), cat.keys().clone());
}

#[test]
fn leaf_hidden_set_complements_allow_list() {
    let cat = catalog();
    let mixed = OverrideRecord {
        hidden_field_keys: Some(keys(&["title"])),
        visible_field_keys: Some(keys(&["label", "retired"])),
    };
    assert_eq!(
        leaf_hidden_set(Some(&mixed), "quiz-slide", &cat),
        keys(&["title", "body", "image"])
    );

    let legacy = OverrideRecord::from_hidden(["body", "gone"]);
    assert_eq!(leaf_hidden_set(Some(&legacy), "quiz-slide", &cat), keys(&["body"]));
}

// ── upgrade ──────────────────────────────────────────────────────

#[test]
fn upgrade_normalizes_every_record() {
    let legacy = PresetsConfig {
        version: 1,
        presets: Default::default(),
    }
    .with_override("default", OverrideRecord::from_visible(["label", "title", "body"]))
    .with_override("quiz-slide", OverrideRecord::from_hidden(["body"]))
    .with_override("poll-slide", OverrideRecord::from_visible(Vec::<String>::new()));

    let upgraded = upgrade(&legacy, &catalog());

    assert_eq!(upgraded.version, PRESETS_VERSION);
    assert_eq!(upgraded.root(), Some(&OverrideRecord::from_hidden(["image"])));
    assert_eq!(
        upgraded.leaf("quiz-slide"),
        Some(&OverrideRecord::from_visible(["label", "title"]))
    );
    assert_eq!(
        upgraded.leaf("poll-slide"),
        Some(&OverrideRecord::from_visible(Vec::<String>::new()))
    );
}

#[test]
fn upgrade_keeps_mixed_leaf_meaning() {
    let cat = catalog();
    let config = PresetsConfig::new().with_override(
        "quiz-slide",
        OverrideRecord {
            hidden_field_keys: Some(keys(&["title"])),
            visible_field_keys: Some(keys(&["label", "body"])),
        },
    );
    let before = resolve("quiz-slide", &cat, &config);

    let upgraded = upgrade(&config, &cat);

    assert_eq!(
        upgraded.leaf("quiz-slide"),
        Some(&OverrideRecord::from_visible(["label", "body"]))
    );
    assert_eq!(resolve("quiz-slide", &cat, &upgraded), before);
}

#[test]
fn upgrade_drops_root_hidden_keys_from_leaves() {
    let cat = catalog();
    let config = PresetsConfig::with_root_hidden(["title"])
        .with_override("quiz-slide", OverrideRecord::from_visible(["label", "title", "body"]));
    let before = resolve("quiz-slide", &cat, &config);

    let upgraded = upgrade(&config, &cat);

    assert_eq!(
        upgraded.leaf("quiz-slide"),
        Some(&OverrideRecord::from_visible(["label", "body"]))
    );
    assert_eq!(resolve("quiz-slide", &cat, &upgraded), before);
}

#[test]
fn upgrade_creates_missing_root() {
    let upgraded = upgrade(&PresetsConfig::new(), &catalog());
    assert_eq!(upgraded.root(), Some(&OverrideRecord::from_hidden(Vec::<String>::new())));
}

#[test]
fn upgrade_is_idempotent() {
    let cat = catalog();
    let config = PresetsConfig::with_root_hidden(["title"])
        .with_override("quiz-slide", OverrideRecord::from_hidden(["body"]));
    let once = upgrade(&config, &cat);
    assert_eq!(upgrade(&once, &cat), once);
}

// ── Wire format ──────────────────────────────────────────────────

#[test]
fn wire_format_uses_camel_case_and_omits_missing_lists() {
    let config = PresetsConfig::with_root_hidden(["title"])
        .with_override("quiz-slide", OverrideRecord::from_visible(["label"]));
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["version"], PRESETS_VERSION);
    assert_eq!(json["presets"]["default"]["hiddenFieldKeys"], serde_json::json!(["title"]));
    assert!(json["presets"]["default"].get("visibleFieldKeys").is_none());
    assert_eq!(json["presets"]["quiz-slide"]["visibleFieldKeys"], serde_json::json!(["label"]));
}

#[test]
fn wire_format_round_trips() {
    let config = PresetsConfig::with_root_hidden(["title"])
        .with_override("quiz-slide", OverrideRecord::from_visible(["label", "body"]));
    let json = serde_json::to_string(&config).unwrap();
    let back: PresetsConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
