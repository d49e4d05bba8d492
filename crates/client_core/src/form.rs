//! Input state for creating or editing one contact.
//!
//! The phone and email lists hold at most one entry each; only the first entry
//! of each list is ever persisted.

use shared::domain::{Contact, ContactId};

pub use shared::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub id: FieldId,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    phone_fields: Vec<FieldEntry>,
    email_fields: Vec<FieldEntry>,
    error: Option<ValidationError>,
    editing: Option<ContactId>,
    next_field_id: u64,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from `contact`; submitting keeps the contact's id.
    pub fn for_contact(contact: &Contact) -> Self {
        let mut form = Self::new();
        form.open_edit(contact);
        form
    }

    pub fn open_new(&mut self) {
        self.reset();
    }

    pub fn open_edit(&mut self, contact: &Contact) {
        self.reset();
        self.editing = Some(contact.id.clone());

        let (first, last) = contact.split_name();
        self.first_name = first.to_string();
        self.last_name = last.to_string();

        if !contact.phone.is_empty() {
            let id = self.allocate_field_id();
            self.phone_fields.push(FieldEntry {
                id,
                value: contact.phone.clone(),
            });
        }
        if let Some(email) = contact.email.as_deref().filter(|email| !email.is_empty()) {
            let id = self.allocate_field_id();
            self.email_fields.push(FieldEntry {
                id,
                value: email.to_string(),
            });
        }
    }

    /// Clears every field and the edit target. Field ids keep counting up so
    /// stale ids from a previous session never match.
    pub fn reset(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.phone_fields.clear();
        self.email_fields.clear();
        self.error = None;
        self.editing = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn phone_fields(&self) -> &[FieldEntry] {
        &self.phone_fields
    }

    pub fn email_fields(&self) -> &[FieldEntry] {
        &self.email_fields
    }

    /// Adds an empty phone entry unless one already exists.
    pub fn add_phone_field(&mut self) -> Option<FieldId> {
        if !self.phone_fields.is_empty() {
            return None;
        }
        let id = self.allocate_field_id();
        self.phone_fields.push(FieldEntry {
            id,
            value: String::new(),
        });
        Some(id)
    }

    /// Adds an empty email entry unless one already exists.
    pub fn add_email_field(&mut self) -> Option<FieldId> {
        if !self.email_fields.is_empty() {
            return None;
        }
        let id = self.allocate_field_id();
        self.email_fields.push(FieldEntry {
            id,
            value: String::new(),
        });
        Some(id)
    }

    pub fn update_phone_field(&mut self, id: FieldId, value: impl Into<String>) -> bool {
        let updated = set_field(&mut self.phone_fields, id, value.into());
        if self.error == Some(ValidationError::PhoneRequired) {
            self.error = None;
        }
        updated
    }

    pub fn update_email_field(&mut self, id: FieldId, value: impl Into<String>) -> bool {
        set_field(&mut self.email_fields, id, value.into())
    }

    pub fn remove_phone_field(&mut self, id: FieldId) {
        self.phone_fields.retain(|field| field.id != id);
    }

    pub fn remove_email_field(&mut self, id: FieldId) {
        self.email_fields.retain(|field| field.id != id);
    }

    /// Whether "Done" is enabled. `submit` re-checks the full rules.
    pub fn can_submit(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.phone_fields.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        match self.phone_fields.first() {
            Some(phone) if !phone.value.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::PhoneRequired),
        }
    }

    /// Validates and builds the contact. On failure the error is kept on the
    /// form for inline display. Field values are left untouched either way.
    pub fn submit(&mut self) -> Result<Contact, ValidationError> {
        if let Err(err) = self.validate() {
            self.error = Some(err);
            return Err(err);
        }
        self.error = None;

        Ok(Contact {
            id: self.editing.clone().unwrap_or_else(ContactId::generate),
            name: self.full_name(),
            phone: self
                .phone_fields
                .first()
                .map(|field| field.value.clone())
                .unwrap_or_default(),
            email: self.email_fields.first().map(|field| field.value.clone()),
        })
    }

    pub fn full_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if last.is_empty() {
            first.to_string()
        } else {
            format!("{first} {last}")
        }
    }

    fn allocate_field_id(&mut self) -> FieldId {
        self.next_field_id += 1;
        FieldId(self.next_field_id)
    }
}

fn set_field(fields: &mut [FieldEntry], id: FieldId, value: String) -> bool {
    match fields.iter_mut().find(|field| field.id == id) {
        Some(field) => {
            field.value = value;
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
