//! Adapter layer for turning loosely-shaped dataset JSON into domain models.
//!
//! Page datasets are hand-edited, so fields are sometimes the wrong JSON
//! type. These helpers degrade such values to the documented defaults
//! instead of rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ============================================================================
// SERDE FIELD ADAPTERS
// ============================================================================

/// Accepts any JSON value; strings pass through, everything else becomes "".
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Accepts any JSON value; arrays keep their string elements, anything that
/// is not an array becomes an empty list.
pub fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "lenient_string")]
        text: String,
        #[serde(deserialize_with = "lenient_string_list")]
        items: Vec<String>,
    }

    #[test]
    fn strings_and_arrays_pass_through() {
        let probe: Probe = serde_json::from_str(r#"{"text": "hi", "items": ["a", "b"]}"#).unwrap();
        assert_eq!(probe.text, "hi");
        assert_eq!(probe.items, vec!["a", "b"]);
    }

    #[test]
    fn wrong_types_degrade_to_empty() {
        let probe: Probe = serde_json::from_str(r#"{"text": 12, "items": {"a": 1}}"#).unwrap();
        assert!(probe.text.is_empty());
        assert!(probe.items.is_empty());
    }

    #[test]
    fn non_string_list_items_are_dropped() {
        let probe: Probe = serde_json::from_str(r#"{"text": null, "items": ["a", 3, null]}"#).unwrap();
        assert_eq!(probe.items, vec!["a"]);
    }
}
