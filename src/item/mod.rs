//! Item handling for lorepo.
//!
//! This module carries the boundaries between the generic item layer and the
//! resource types: the creation/edit form the types augment, the submitted
//! form data and uploads, and the lifecycle coordinator that routes item
//! operations to the matching type.

mod form;
mod lifecycle;
mod submission;

pub use form::{FieldKind, FormField, ItemForm};
pub use lifecycle::ItemLifecycle;
pub use submission::ItemSubmission;
