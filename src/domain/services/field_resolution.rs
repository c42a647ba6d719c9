use serde_json::{Map, Value};

use crate::domain::models::booking::format_number;

/// One place a booking answer may have been stored: a map and the key used there.
#[derive(Clone, Copy)]
pub struct FieldSource<'a> {
    pub map: Option<&'a Map<String, Value>>,
    pub key: &'a str,
}

impl<'a> FieldSource<'a> {
    pub fn new(map: Option<&'a Map<String, Value>>, key: &'a str) -> Self {
        Self { map, key }
    }

    fn read(&self) -> Option<String> {
        match self.map?.get(self.key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.as_f64().map_or_else(|| n.to_string(), format_number)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// First non-empty value across `sources`, in the order given.
///
/// Each display field resolves independently; callers pass the precedence they need.
pub fn resolve_field(sources: &[FieldSource<'_>]) -> Option<String> {
    sources.iter().find_map(FieldSource::read)
}
