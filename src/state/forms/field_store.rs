//! Field store for the contact form

use super::field::ContactField;
use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Trait for common form cursor operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Snapshot of the four contact values. This is also the delivery payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Company => &self.company,
            ContactField::Message => &self.message,
        }
    }

    fn slot_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Company => &mut self.company,
            ContactField::Message => &mut self.message,
        }
    }

    /// Required fields that are empty, in tab order. Presence is the only check.
    pub fn missing_required(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).is_empty())
            .collect()
    }

    #[allow(dead_code)]
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        ContactField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// Field Store: current contact values plus the editing cursor.
///
/// Every write (update, reset, typing) bumps the revision counter.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    fields: ContactFields,
    /// 0-3 are the inputs, 4 is the submit button row
    active_field_index: usize,
    revision: u64,
}

impl FieldStore {
    /// Index of the submit button row
    pub const BUTTONS_ROW: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &ContactFields {
        &self.fields
    }

    pub fn get(&self, field: ContactField) -> &str {
        self.fields.get(field)
    }

    /// Replace one field; the others are left untouched
    pub fn update(&mut self, field: ContactField, value: impl Into<String>) {
        *self.fields.slot_mut(field) = value.into();
        self.revision += 1;
    }

    /// Replace a field addressed by its payload key
    #[allow(dead_code)]
    pub fn update_named(&mut self, key: &str, value: impl Into<String>) -> Result<(), FieldError> {
        let field: ContactField = key.parse()?;
        self.update(field, value);
        Ok(())
    }

    /// Restore the empty snapshot and move the cursor back to the first input
    pub fn reset(&mut self) {
        self.fields = ContactFields::default();
        self.active_field_index = 0;
        self.revision += 1;
    }

    /// Number of writes since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn missing_required(&self) -> Vec<ContactField> {
        self.fields.missing_required()
    }

    /// The input under the cursor, `None` on the button row
    pub fn active_contact_field(&self) -> Option<ContactField> {
        ContactField::from_index(self.active_field_index)
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == Self::BUTTONS_ROW
    }

    pub fn focus(&mut self, field: ContactField) {
        self.active_field_index = field.index();
    }

    /// Append a typed character to the active input
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.active_contact_field() {
            self.fields.slot_mut(field).push(c);
            self.revision += 1;
        }
    }

    /// Remove the last character of the active input
    pub fn backspace(&mut self) {
        if let Some(field) = self.active_contact_field() {
            if self.fields.slot_mut(field).pop().is_some() {
                self.revision += 1;
            }
        }
    }

    /// Enter inside a multiline input; ignored elsewhere
    pub fn insert_newline(&mut self) {
        if self
            .active_contact_field()
            .is_some_and(ContactField::is_multiline)
        {
            self.input_char('\n');
        }
    }
}

impl Form for FieldStore {
    fn field_count(&self) -> usize {
        5 // name, email, company, message, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(Self::BUTTONS_ROW);
    }
}
