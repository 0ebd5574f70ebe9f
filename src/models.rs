//! Form Models
//!
//! Data structures shared by the widget, the form helpers and the demo.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A candidate the user can pick from the dropdown.
///
/// `id` is the bound value written to the hidden field, `name` is both the
/// display label and the match target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Suggestion {
    pub fn new(id: impl ToString, name: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Accept both `"id": "us"` and `"id": 1` in catalog data.
fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "suggestion id must be a string or number, got {other}"
        ))),
    }
}

/// Snapshot of one field as returned by `get_value`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    /// Visible text
    pub label: String,
    /// Bound id, empty when nothing is committed
    pub value: String,
    /// The committed candidate, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Suggestion>,
}

impl FieldValue {
    pub fn is_committed(&self) -> bool {
        self.item.is_some()
    }
}

/// Aggregated values of every registered field, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormResult {
    pub fields: BTreeMap<String, FieldValue>,
}

impl FormResult {
    /// Bound value of a field, if the field exists and has one.
    pub fn value_of(&self, field_id: &str) -> Option<&str> {
        self.fields
            .get(field_id)
            .map(|f| f.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Fields that hold neither a committed item nor custom text.
    pub fn missing(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, f)| f.label.trim().is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_id_accepts_numbers_and_strings() {
        let items: Vec<Suggestion> = serde_json::from_str(
            r#"[{"id": 1, "name": "Apple"}, {"id": "us", "name": "United States", "description": "North America"}]"#,
        )
        .unwrap();

        assert_eq!(items[0], Suggestion::new(1, "Apple"));
        assert_eq!(items[1].id, "us");
        assert_eq!(items[1].description.as_deref(), Some("North America"));
    }

    #[test]
    fn test_suggestion_id_rejects_objects() {
        let result = serde_json::from_str::<Suggestion>(r#"{"id": {}, "name": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_form_result_helpers() {
        let mut result = FormResult::default();
        result.fields.insert(
            "country".into(),
            FieldValue {
                label: "Canada".into(),
                value: "ca".into(),
                item: Some(Suggestion::new("ca", "Canada")),
            },
        );
        result.fields.insert("city".into(), FieldValue::default());

        assert_eq!(result.value_of("country"), Some("ca"));
        assert_eq!(result.value_of("city"), None);
        assert_eq!(result.missing(), vec!["city"]);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fields"]["country"]["value"], "ca");
        assert!(json["fields"]["city"].get("item").is_none());
    }
}
