//! Icon records and the aggregated icon map.
//!
//! # Modules
//!
//! - [`scan`]: Source directory listing (non-recursive, extension filtered)
//! - [`extract`]: Per-file `viewBox` and path geometry extraction
//!
//! # Output Shape
//!
//! ```text
//! { "home": { "viewBox": "0 0 24 24", "paths": "M10 10 L20 20" },
//!   "star": { "paths": "M0 0 L5 5" } }
//! ```

mod extract;
mod scan;

pub use extract::{ExtractError, extract_icon};
pub use scan::{IconSource, scan_icon_sources};

use indexmap::IndexMap;
use serde::Serialize;

/// Extracted geometry of a single icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IconRecord {
    /// Verbatim `viewBox` of the root `svg` element, omitted when absent.
    #[serde(rename = "viewBox", skip_serializing_if = "Option::is_none")]
    pub view_box: Option<String>,
    /// Whitespace-normalized `d` data of every path, in document order.
    pub paths: String,
}

/// Name-keyed lookup table written as the compiler output.
///
/// Keys keep their first insertion position; a later insert under the same
/// name replaces the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IconMap {
    icons: IndexMap<String, IconRecord>,
}

impl IconMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record it replaced (name collision).
    pub fn insert(&mut self, name: String, record: IconRecord) -> Option<IconRecord> {
        self.icons.insert(name, record)
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&IconRecord> {
        self.icons.get(name)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.icons.keys().map(String::as_str)
    }

    /// Serialize as compact (or pretty) JSON.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(view_box: Option<&str>, paths: &str) -> IconRecord {
        IconRecord {
            view_box: view_box.map(str::to_string),
            paths: paths.to_string(),
        }
    }

    #[test]
    fn test_view_box_omitted_when_absent() {
        let mut map = IconMap::new();
        map.insert("star".into(), record(None, "M0 0 L5 5"));
        assert_eq!(map.to_json(false).unwrap(), r#"{"star":{"paths":"M0 0 L5 5"}}"#);
    }

    #[test]
    fn test_empty_map_is_empty_object() {
        assert_eq!(IconMap::new().to_json(false).unwrap(), "{}");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = IconMap::new();
        map.insert("zeta".into(), record(Some("0 0 1 1"), ""));
        map.insert("alpha".into(), record(None, ""));
        assert_eq!(map.names().collect::<Vec<_>>(), ["zeta", "alpha"]);
        assert_eq!(
            map.to_json(false).unwrap(),
            r#"{"zeta":{"viewBox":"0 0 1 1","paths":""},"alpha":{"paths":""}}"#
        );
    }

    #[test]
    fn test_collision_last_wins_keeps_position() {
        let mut map = IconMap::new();
        map.insert("home".into(), record(None, "M0 0"));
        map.insert("star".into(), record(None, "M1 1"));
        let replaced = map.insert("home".into(), record(None, "M2 2"));

        assert_eq!(replaced, Some(record(None, "M0 0")));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("home").unwrap().paths, "M2 2");
        assert_eq!(map.names().next(), Some("home"));
    }

    #[test]
    fn test_pretty_output() {
        let mut map = IconMap::new();
        map.insert("dot".into(), record(Some("0 0 2 2"), "M1 1"));
        let json = map.to_json(true).unwrap();
        assert!(json.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["dot"]["viewBox"], "0 0 2 2");
    }
}
