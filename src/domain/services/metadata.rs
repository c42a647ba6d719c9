//! Flattening of free-form booking data into the provider's metadata map.
//!
//! The provider stores at most [`MAX_KEYS`] entries, keys of at most
//! [`MAX_KEY_CHARS`] characters and string values of at most
//! [`MAX_VALUE_CHARS`] characters. These limits are enforced here and nowhere
//! else.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::models::booking::format_number;

pub const MAX_KEYS: usize = 50;
pub const MAX_KEY_CHARS: usize = 40;
pub const MAX_VALUE_CHARS: usize = 500;

/// The shapes a metadata leaf or branch can take.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<MetadataValue>),
    Object(Vec<(String, MetadataValue)>),
}

impl From<&Value> for MetadataValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => MetadataValue::Null,
            Value::Bool(b) => MetadataValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(MetadataValue::Text(n.to_string()), MetadataValue::Number),
            Value::String(s) => MetadataValue::Text(s.clone()),
            Value::Array(items) => MetadataValue::List(items.iter().map(MetadataValue::from).collect()),
            Value::Object(map) => {
                MetadataValue::Object(map.iter().map(|(k, v)| (k.clone(), MetadataValue::from(v))).collect())
            }
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl MetadataValue {
    /// Scalar rendering used for leaves and list items.
    fn render(&self) -> String {
        match self {
            MetadataValue::Null => String::new(),
            MetadataValue::Text(s) => s.clone(),
            MetadataValue::Number(n) => format_number(*n),
            MetadataValue::Bool(b) => b.to_string(),
            MetadataValue::List(items) => items.iter().map(MetadataValue::render).collect::<Vec<_>>().join(","),
            MetadataValue::Object(entries) => {
                let map: serde_json::Map<String, Value> =
                    entries.iter().map(|(k, v)| (k.clone(), Value::String(v.render()))).collect();
                Value::Object(map).to_string()
            }
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

struct Flattener {
    out: BTreeMap<String, String>,
    emitted: usize,
}

impl Flattener {
    fn full(&self) -> bool {
        self.emitted >= MAX_KEYS
    }

    fn visit_entries(&mut self, entries: &[(String, MetadataValue)], prefix: Option<&str>) {
        for (key, value) in entries {
            if self.full() {
                return;
            }
            let full_key = match prefix {
                Some(p) => format!("{}_{}", p, key),
                None => key.clone(),
            };
            let key = truncate_chars(&full_key, MAX_KEY_CHARS);

            match value {
                MetadataValue::Null => {}
                MetadataValue::Object(children) => self.visit_entries(children, Some(&key)),
                MetadataValue::List(items) => {
                    let joined = items.iter().map(MetadataValue::render).collect::<Vec<_>>().join(", ");
                    self.emit(key, &joined);
                }
                leaf => self.emit(key, &leaf.render()),
            }
        }
    }

    fn emit(&mut self, key: String, value: &str) {
        self.out.insert(key, truncate_chars(value, MAX_VALUE_CHARS));
        self.emitted += 1;
    }
}

/// Flattens nested entries into `key -> string`, joining nested paths with `_`.
///
/// Nulls are skipped, list leaves are joined with `, `, and traversal stops after
/// [`MAX_KEYS`] leaves have been emitted; later entries are dropped.
pub fn flatten_metadata(entries: &[(String, MetadataValue)]) -> BTreeMap<String, String> {
    let mut flattener = Flattener { out: BTreeMap::new(), emitted: 0 };
    flattener.visit_entries(entries, None);
    flattener.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries_of(value: Value) -> Vec<(String, MetadataValue)> {
        match MetadataValue::from(&value) {
            MetadataValue::Object(entries) => entries,
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_caps_key_count_at_fifty() {
        let mut map = serde_json::Map::new();
        for i in 0..60 {
            map.insert(format!("field{:02}", i), json!(i));
        }
        let flat = flatten_metadata(&entries_of(Value::Object(map)));
        assert_eq!(flat.len(), MAX_KEYS);
        assert!(flat.contains_key("field00"));
        assert!(flat.contains_key("field49"));
        assert!(!flat.contains_key("field50"));
    }

    #[test]
    fn test_truncates_keys_and_values() {
        let long_key = "k".repeat(45);
        let long_value = "v".repeat(600);
        let flat = flatten_metadata(&entries_of(json!({ long_key.clone(): long_value })));
        let (key, value) = flat.iter().next().unwrap();
        assert_eq!(key.chars().count(), 40);
        assert_eq!(key, &long_key[..40]);
        assert_eq!(value.chars().count(), 500);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let flat = flatten_metadata(&entries_of(json!({ "note": "é".repeat(510) })));
        assert_eq!(flat["note"].chars().count(), 500);
    }

    #[test]
    fn test_nested_objects_join_paths() {
        let flat = flatten_metadata(&entries_of(json!({
            "pickup": { "address": "DFW", "geo": { "lat": 32.9, "lng": -97.04 } },
            "tripType": "airport"
        })));
        assert_eq!(flat["pickup_address"], "DFW");
        assert_eq!(flat["pickup_geo_lat"], "32.9");
        assert_eq!(flat["pickup_geo_lng"], "-97.04");
        assert_eq!(flat["tripType"], "airport");
    }

    #[test]
    fn test_skips_nulls_and_joins_lists() {
        let flat = flatten_metadata(&entries_of(json!({
            "stops": ["Hotel ZaZa", "Reunion Tower"],
            "luggage": null,
            "passengers": 3,
            "meetAndGreet": true
        })));
        assert_eq!(flat["stops"], "Hotel ZaZa, Reunion Tower");
        assert_eq!(flat["passengers"], "3");
        assert_eq!(flat["meetAndGreet"], "true");
        assert!(!flat.contains_key("luggage"));
    }

    #[test]
    fn test_nulls_do_not_consume_key_budget() {
        let mut map = serde_json::Map::new();
        for i in 0..10 {
            map.insert(format!("empty{}", i), Value::Null);
        }
        for i in 0..50 {
            map.insert(format!("field{:02}", i), json!("x"));
        }
        let flat = flatten_metadata(&entries_of(Value::Object(map)));
        assert_eq!(flat.len(), MAX_KEYS);
        assert!(flat.contains_key("field49"));
    }

    #[test]
    fn test_nested_prefix_is_truncated_before_joining() {
        let parent = "p".repeat(42);
        let flat = flatten_metadata(&entries_of(json!({ parent: { "child": "x" } })));
        let key = flat.keys().next().unwrap();
        assert_eq!(key, &"p".repeat(40));
    }
}
