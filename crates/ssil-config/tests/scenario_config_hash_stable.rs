//! Config hash stability
//!
//! GREEN when:
//! - The same layers hash identically across calls.
//! - Reordering keys within YAML doesn't change the hash.
//! - A changed parameter value changes the hash.
//! - The shipped defaults layer loads and is clean under the unused-key guard.

use ssil_config::{load_layered_yaml, load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

const BASE_YAML: &str = r#"
engine:
  H: 8
  delta_max: 0.15
  wA: 0.6
  wB: 0.2
  wS: 0.2
"#;

const BASE_YAML_REORDERED: &str = r#"
engine:
  wS: 0.2
  wB: 0.2
  delta_max: 0.15
  wA: 0.6
  H: 8
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash.len(), 64);
    assert!(a.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn reordered_keys_produce_same_hash() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(base.config_hash, reordered.config_hash);
    assert_eq!(base.canonical_json, reordered.canonical_json);
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[&BASE_YAML.replace("0.15", "0.05")]).unwrap();
    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn shipped_defaults_layer_is_clean() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/engine.defaults.yaml");
    let loaded = load_layered_yaml(&[path]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.consumed_prefixes.len(), 10);
}
