use lessonkit_fields::{FieldCatalog, FieldDescriptor};
use lessonkit_presets::{
    KeyOrigin, OverrideRecord, PresetsConfig, VisibilityResult, resolve, resolve_with,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn catalog() -> FieldCatalog {
    FieldCatalog::new(vec![
        FieldDescriptor::label_field("label", "Label"),
        FieldDescriptor::text("title", "Title"),
        FieldDescriptor::rich_text("body", "Body"),
    ])
    .unwrap()
}

fn keys(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Root resolution ──────────────────────────────────────────────

#[test]
fn empty_config_shows_everything() {
    let result = resolve("default", &catalog(), &PresetsConfig::new());
    assert_eq!(
        result,
        VisibilityResult {
            visible_keys: keys(&["label", "title", "body"]),
            ..Default::default()
        }
    );
}

#[test]
fn empty_type_key_resolves_root() {
    let config = PresetsConfig::with_root_hidden(["title"]);
    let cat = catalog();
    assert_eq!(resolve("", &cat, &config), resolve("default", &cat, &config));
}

#[test]
fn root_hidden_keys_are_reported() {
    let config = PresetsConfig::with_root_hidden(["title"]);
    let result = resolve("default", &catalog(), &config);
    assert_eq!(result.hidden_keys, keys(&["title"]));
    assert_eq!(result.default_hidden_keys, keys(&["title"]));
    assert!(result.type_hidden_keys.is_empty());
    assert_eq!(result.visible_keys, keys(&["label", "body"]));
}

#[test]
fn required_key_in_root_hidden_set_is_ignored() {
    let config = PresetsConfig::with_root_hidden(["label", "body"]);
    let result = resolve("default", &catalog(), &config);
    assert_eq!(result.hidden_keys, keys(&["body"]));
    assert!(result.is_visible("label"));
}

#[test]
fn legacy_visible_shape_root_is_read() {
    let config = PresetsConfig::new()
        .with_override("default", OverrideRecord::from_visible(["label", "body"]));
    let result = resolve("default", &catalog(), &config);
    assert_eq!(result.default_hidden_keys, keys(&["title"]));
}

#[test]
fn uninitialized_root_hides_nothing() {
    let config = PresetsConfig::new()
        .with_override("default", OverrideRecord::from_visible(Vec::<String>::new()));
    let result = resolve("default", &catalog(), &config);
    assert_eq!(result.visible_keys, keys(&["label", "title", "body"]));
}

// ── Leaf resolution ──────────────────────────────────────────────

#[test]
fn leaf_without_override_inherits_root() {
    let config = PresetsConfig::with_root_hidden(["title"]);
    let result = resolve("quiz-slide", &catalog(), &config);
    assert_eq!(result.hidden_keys, keys(&["title"]));
    assert_eq!(result.default_hidden_keys, keys(&["title"]));
    assert!(result.type_hidden_keys.is_empty());
}

#[test]
fn root_gate_wins_over_stale_leaf_allow_list() {
    let config = PresetsConfig::with_root_hidden(["title"])
        .with_override("quiz-slide", OverrideRecord::from_visible(["label", "title"]));
    let result = resolve("quiz-slide", &catalog(), &config);
    assert_eq!(result.visible_keys, keys(&["label"]));
    assert_eq!(result.default_hidden_keys, keys(&["title"]));
    assert_eq!(result.type_hidden_keys, keys(&["body"]));
    assert_eq!(result.hidden_keys, keys(&["title", "body"]));
}

#[test]
fn leaf_allow_list_missing_required_key_still_shows_it() {
    let config =
        PresetsConfig::new().with_override("quiz-slide", OverrideRecord::from_visible(["title"]));
    let result = resolve("quiz-slide", &catalog(), &config);
    assert_eq!(result.visible_keys, keys(&["label", "title"]));
    assert_eq!(result.type_hidden_keys, keys(&["body"]));
}

#[test]
fn legacy_hidden_shape_leaf_is_read() {
    let config =
        PresetsConfig::new().with_override("quiz-slide", OverrideRecord::from_hidden(["body"]));
    let result = resolve("quiz-slide", &catalog(), &config);
    assert_eq!(result.type_hidden_keys, keys(&["body"]));
}

#[test]
fn mixed_shape_leaf_is_read_through_allow_list() {
    let config = PresetsConfig::new().with_override(
        "quiz-slide",
        OverrideRecord {
            hidden_field_keys: Some(keys(&["title"])),
            visible_field_keys: Some(keys(&["label"])),
        },
    );
    let result = resolve("quiz-slide", &catalog(), &config);
    assert_eq!(result.visible_keys, keys(&["label"]));
    assert_eq!(result.type_hidden_keys, keys(&["title", "body"]));
}

#[test]
fn empty_leaf_allow_list_falls_back_to_everything() {
    let config = PresetsConfig::new()
        .with_override("quiz-slide", OverrideRecord::from_visible(Vec::<String>::new()));
    let result = resolve("quiz-slide", &catalog(), &config);
    assert_eq!(result.visible_keys, keys(&["label", "title", "body"]));
}

#[test]
fn empty_leaf_allow_list_falls_back_to_host_default() {
    let cat = catalog().with_type_default("quiz-slide", ["label", "body"]);
    let config = PresetsConfig::new()
        .with_override("quiz-slide", OverrideRecord::from_visible(Vec::<String>::new()));
    let result = resolve("quiz-slide", &cat, &config);
    assert_eq!(result.visible_keys, keys(&["label", "body"]));
    assert_eq!(result.type_hidden_keys, keys(&["title"]));
}

#[test]
fn absent_leaf_uses_host_default() {
    let cat = catalog().with_type_default("video-slide", ["label"]);
    let result = resolve("video-slide", &cat, &PresetsConfig::new());
    assert_eq!(result.visible_keys, keys(&["label"]));
    assert_eq!(result.type_hidden_keys, keys(&["title", "body"]));
}

#[test]
fn root_hidden_key_not_duplicated_into_type_hidden() {
    let config = PresetsConfig::with_root_hidden(["body"])
        .with_override("quiz-slide", OverrideRecord::from_visible(["label"]));
    let result = resolve("quiz-slide", &catalog(), &config);
    assert_eq!(result.default_hidden_keys, keys(&["body"]));
    assert_eq!(result.type_hidden_keys, keys(&["title"]));
}

// ── Unknown keys ─────────────────────────────────────────────────

#[test]
fn unknown_root_key_counts_as_hidden_but_not_visible() {
    let config = PresetsConfig::with_root_hidden(["retired"]);
    let mut seen = Vec::new();
    let result = resolve_with("default", &catalog(), &config, |unknown| {
        seen.push((unknown.field_key.to_string(), unknown.origin));
    });

    assert_eq!(result.default_hidden_keys, keys(&["retired"]));
    assert_eq!(result.hidden_keys, keys(&["retired"]));
    assert_eq!(result.visible_keys, keys(&["label", "title", "body"]));
    assert_eq!(seen, vec![("retired".to_string(), KeyOrigin::RootHidden)]);
}

#[test]
fn unknown_leaf_keys_are_reported() {
    let config = PresetsConfig::new()
        .with_override("quiz-slide", OverrideRecord::from_visible(["label", "retired"]))
        .with_override("poll-slide", OverrideRecord::from_hidden(["gone"]));
    let cat = catalog();

    let mut seen = Vec::new();
    let quiz = resolve_with("quiz-slide", &cat, &config, |u| seen.push(u.origin));
    assert_eq!(seen, vec![KeyOrigin::LeafVisible]);
    assert!(!quiz.is_visible("retired"));

    let mut seen = Vec::new();
    let poll = resolve_with("poll-slide", &cat, &config, |u| {
        seen.push((u.type_key.to_string(), u.origin));
    });
    assert_eq!(seen, vec![("poll-slide".to_string(), KeyOrigin::LeafHidden)]);
    assert!(poll.type_hidden_keys.is_empty());
    assert_eq!(poll.visible_keys, keys(&["label", "title", "body"]));
}

#[test]
fn resolve_does_not_modify_inputs() {
    let cat = catalog();
    let config = PresetsConfig::with_root_hidden(["title"])
        .with_override("quiz-slide", OverrideRecord::from_hidden(["body"]));
    let snapshot = config.clone();

    let first = resolve("quiz-slide", &cat, &config);
    let second = resolve("quiz-slide", &cat, &config);
    assert_eq!(first, second);
    assert_eq!(config, snapshot);
}
