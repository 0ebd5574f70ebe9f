//! Cross-field coordination
//!
//! The registry, the focus coordinator and the cascade tickets are plain
//! data; `FormContext` wraps them for the reactive tree.

pub mod cascade;
pub mod coordinator;
pub mod registry;

pub use cascade::{CascadeTicket, CascadeTracker};
pub use coordinator::FocusCoordinator;
pub use registry::{reset_fields, FieldRegistry, FormField};
