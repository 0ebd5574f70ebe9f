//! Form Context
//!
//! Form-wide coordination provided via Leptos Context API. Owns the field
//! registry and the focus coordinator; widgets register through it.

use leptos::prelude::*;

use crate::autocomplete::AutocompleteHandle;
use crate::error::SetupError;
use crate::form::cascade::{CascadeTicket, CascadeTracker};
use crate::form::coordinator::{Busy, FocusCoordinator};
use crate::form::registry::{reset_fields, FieldRegistry};
use crate::models::FormResult;

#[derive(Clone, Copy)]
pub struct FormContext {
    fields: StoredValue<FieldRegistry<AutocompleteHandle>, LocalStorage>,
    focus: StoredValue<FocusCoordinator, LocalStorage>,
    cascades: StoredValue<CascadeTracker, LocalStorage>,
}

impl FormContext {
    pub fn new() -> Self {
        Self {
            fields: StoredValue::new_local(FieldRegistry::default()),
            focus: StoredValue::new_local(FocusCoordinator::default()),
            cascades: StoredValue::new_local(CascadeTracker::default()),
        }
    }

    pub fn register(&self, field_id: &str, handle: AutocompleteHandle) -> Result<(), SetupError> {
        self.fields
            .try_update_value(|fields| fields.register(field_id, handle))
            .unwrap_or_else(|| Err(SetupError::MissingElement("form registry".into())))
    }

    pub fn unregister(&self, field_id: &str) {
        self.fields.try_update_value(|fields| fields.unregister(field_id));
        let ready = self.focus.try_update_value(|focus| focus.release_all(field_id));
        run_all(ready.unwrap_or_default());
    }

    pub fn field(&self, field_id: &str) -> Option<AutocompleteHandle> {
        self.fields.try_with_value(|fields| fields.get(field_id)).flatten()
    }

    /// Disable and empty dependent fields after an upstream change. Loads
    /// they started for their own dependents are dropped.
    pub fn reset_dependents(&self, field_ids: &[&str]) {
        self.cascades.try_update_value(|cascades| {
            for id in field_ids {
                cascades.invalidate(id);
            }
        });
        // widgets may fire on_select while resetting; no registry borrow held
        let dependents = self
            .fields
            .try_with_value(|fields| fields.dependents(field_ids))
            .unwrap_or_default();
        reset_fields(&dependents);
    }

    pub fn collect_values(&self) -> FormResult {
        self.fields
            .try_with_value(FieldRegistry::collect_values)
            .unwrap_or_default()
    }

    /// Start a dependent load for `source`; earlier loads of it go stale.
    pub fn begin_cascade(&self, source: &str) -> Option<CascadeTicket> {
        self.cascades.try_update_value(|cascades| cascades.issue(source))
    }

    pub fn is_current_cascade(&self, ticket: &CascadeTicket) -> bool {
        self.cascades
            .try_with_value(|cascades| cascades.is_current(ticket))
            .unwrap_or(false)
    }

    /// Mark `field_id` as mid-selection until the guard drops. Focus
    /// operations on other fields queue behind it.
    pub fn begin_selection(&self, field_id: &str) -> Result<SelectionGuard, Busy> {
        self.focus
            .try_update_value(|focus| focus.acquire(field_id))
            .unwrap_or(Ok(()))?;
        Ok(SelectionGuard {
            form: *self,
            field_id: field_id.to_string(),
        })
    }

    /// Run `op` now, or after the pending selection of another field.
    pub fn when_idle(&self, field_id: &str, op: impl FnOnce() + 'static) {
        let ready = self
            .focus
            .try_update_value(|focus| focus.run_or_defer(field_id, Box::new(op)));
        match ready {
            Some(Some(op)) => op(),
            Some(None) => log::debug!("focus on '{field_id}' waits for pending selection"),
            None => {}
        }
    }
}

impl Default for FormContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the focus coordinator on drop and runs what queued behind it.
pub struct SelectionGuard {
    form: FormContext,
    field_id: String,
}

impl Drop for SelectionGuard {
    fn drop(&mut self) {
        let ready = self
            .form
            .focus
            .try_update_value(|focus| focus.release(&self.field_id));
        run_all(ready.unwrap_or_default());
    }
}

fn run_all(ops: Vec<Box<dyn FnOnce()>>) {
    for op in ops {
        op();
    }
}

/// Form context if an enclosing form provided one
pub fn use_form() -> Option<FormContext> {
    use_context::<FormContext>()
}
