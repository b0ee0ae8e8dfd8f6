//! Form domain layer
//!
//! Type-safe values and cursor handling for the contact form.

mod field;
mod field_store;

pub use field::ContactField;
pub use field_store::{ContactFields, FieldStore, Form};
