//! Form domain layer
//!
//! Field tables, the validation rule engine and the per-form state
//! container. Nothing in here knows about the terminal.

mod definitions;
mod field;
mod form_state;
mod rules;

pub use definitions::{FieldSpec, FormDefinition};
pub use field::{FieldKind, FieldValue, FormValues};
pub use form_state::{Focus, FormState, SubmitOutcome, ValidationMode};
