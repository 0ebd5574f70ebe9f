//! Field Registry
//!
//! Ordered map of field id to widget, owned by the form rather than the
//! page. Helpers address fields through the `FormField` seam so they work
//! with any widget implementation.

use crate::autocomplete::AutocompleteHandle;
use crate::error::SetupError;
use crate::models::{FieldValue, FormResult, Suggestion};

/// What the cross-field helpers need from a widget
pub trait FormField {
    fn disable(&self);
    fn replace_suggestions(&self, suggestions: Vec<Suggestion>);
    fn value(&self) -> FieldValue;
}

impl FormField for AutocompleteHandle {
    fn disable(&self) {
        AutocompleteHandle::disable(self);
    }

    fn replace_suggestions(&self, suggestions: Vec<Suggestion>) {
        self.set_suggestions(suggestions);
    }

    fn value(&self) -> FieldValue {
        self.get_value()
    }
}

pub struct FieldRegistry<F> {
    fields: Vec<(String, F)>,
}

impl<F> Default for FieldRegistry<F> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<F: FormField + Clone> FieldRegistry<F> {
    pub fn register(&mut self, field_id: &str, field: F) -> Result<(), SetupError> {
        if field_id.trim().is_empty() {
            return Err(SetupError::MissingFieldId);
        }
        if self.contains(field_id) {
            return Err(SetupError::DuplicateField(field_id.to_string()));
        }
        self.fields.push((field_id.to_string(), field));
        Ok(())
    }

    pub fn unregister(&mut self, field_id: &str) -> Option<F> {
        let pos = self.fields.iter().position(|(id, _)| id == field_id)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.fields.iter().any(|(id, _)| id == field_id)
    }

    pub fn get(&self, field_id: &str) -> Option<F> {
        self.fields
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, field)| field.clone())
    }

    pub fn ids(&self) -> Vec<String> {
        self.fields.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Fields among `field_ids` that exist, in the order given.
    /// Unknown ids are logged and skipped.
    pub fn dependents(&self, field_ids: &[&str]) -> Vec<F> {
        field_ids
            .iter()
            .filter_map(|id| {
                let field = self.get(id);
                if field.is_none() {
                    log::warn!("dependent field '{id}' is not registered");
                }
                field
            })
            .collect()
    }

    pub fn collect_values(&self) -> FormResult {
        FormResult {
            fields: self
                .fields
                .iter()
                .map(|(id, field)| (id.clone(), field.value()))
                .collect(),
        }
    }
}

/// Disable and empty each field, for cascades where an upstream value
/// changed.
pub fn reset_fields<F: FormField>(fields: &[F]) {
    for field in fields {
        field.disable();
        field.replace_suggestions(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeInner {
        disabled: bool,
        suggestions: Vec<Suggestion>,
        value: FieldValue,
    }

    #[derive(Clone, Default)]
    struct FakeField(Rc<RefCell<FakeInner>>);

    impl FakeField {
        fn committed(id: &str, name: &str) -> Self {
            let field = Self::default();
            field.0.borrow_mut().value = FieldValue {
                label: name.into(),
                value: id.into(),
                item: Some(Suggestion::new(id, name)),
            };
            field
        }
    }

    impl FormField for FakeField {
        fn disable(&self) {
            let mut inner = self.0.borrow_mut();
            inner.disabled = true;
            inner.value = FieldValue::default();
        }

        fn replace_suggestions(&self, suggestions: Vec<Suggestion>) {
            self.0.borrow_mut().suggestions = suggestions;
        }

        fn value(&self) -> FieldValue {
            self.0.borrow().value.clone()
        }
    }

    #[test]
    fn test_register_rejects_duplicates_and_blank_ids() {
        let mut registry = FieldRegistry::default();
        assert!(registry.register("country", FakeField::default()).is_ok());
        assert_eq!(
            registry.register("country", FakeField::default()),
            Err(SetupError::DuplicateField("country".into()))
        );
        assert_eq!(registry.register(" ", FakeField::default()), Err(SetupError::MissingFieldId));
    }

    #[test]
    fn test_unregister_frees_the_id() {
        let mut registry = FieldRegistry::default();
        registry.register("city", FakeField::default()).unwrap();
        assert!(registry.unregister("city").is_some());
        assert!(!registry.contains("city"));
        assert!(registry.unregister("city").is_none());
        assert!(registry.register("city", FakeField::default()).is_ok());
    }

    #[test]
    fn test_reset_dependents_disables_and_empties() {
        let mut registry = FieldRegistry::default();
        let region = FakeField::committed("on", "Ontario");
        region.replace_suggestions(vec![Suggestion::new("on", "Ontario")]);
        let city = FakeField::committed("tor", "Toronto");
        registry.register("country", FakeField::committed("ca", "Canada")).unwrap();
        registry.register("region", region.clone()).unwrap();
        registry.register("city", city.clone()).unwrap();

        reset_fields(&registry.dependents(&["region", "city", "unknown"]));

        for field in [&region, &city] {
            let inner = field.0.borrow();
            assert!(inner.disabled);
            assert!(inner.suggestions.is_empty());
            assert_eq!(inner.value, FieldValue::default());
        }
        assert_eq!(registry.collect_values().value_of("country"), Some("ca"));
    }

    #[test]
    fn test_collect_values_covers_every_field() {
        let mut registry = FieldRegistry::default();
        registry.register("country", FakeField::committed("us", "United States")).unwrap();
        registry.register("tags", FakeField::default()).unwrap();

        let result = registry.collect_values();
        assert_eq!(result.fields.len(), 2);
        assert_eq!(result.value_of("country"), Some("us"));
        assert_eq!(result.missing(), vec!["tags"]);
        assert_eq!(registry.ids(), vec!["country", "tags"]);
    }
}
