use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Store-assigned contact identifier.
///
/// Contacts created on the client carry a timestamp-derived id until the store
/// echoes its own record back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl ContactId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    pub fn generate() -> Self {
        Self::from_timestamp(Utc::now())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// Some stores hand out numeric ids; keep them as their decimal text.
impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawContactId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawContactId::deserialize(deserializer)? {
            RawContactId::Text(text) => Self(text),
            RawContactId::Unsigned(value) => Self(value.to_string()),
            RawContactId::Signed(value) => Self(value.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Contact {
    pub fn new(id: impl Into<ContactId>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Splits `name` at the first space into first and last name.
    pub fn split_name(&self) -> (&str, &str) {
        self.name.split_once(' ').unwrap_or((self.name.as_str(), ""))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::PhoneRequired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_ids_from_the_store() {
        let contact: Contact =
            serde_json::from_str(r#"{"id": 42, "name": "Ann Lee", "phone": "555"}"#)
                .expect("decode");
        assert_eq!(contact.id, ContactId::new("42"));
        assert_eq!(contact.email, None);
    }

    #[test]
    fn treats_null_email_as_absent() {
        let contact: Contact = serde_json::from_str(
            r#"{"id": "a1", "name": "Ann Lee", "phone": "555", "email": null}"#,
        )
        .expect("decode");
        assert_eq!(contact.email, None);
    }

    #[test]
    fn omits_absent_email_from_request_body() {
        let body = serde_json::to_value(Contact::new("7", "Bob Lee", "555")).expect("encode");
        assert_eq!(
            body,
            serde_json::json!({"id": "7", "name": "Bob Lee", "phone": "555"})
        );
    }

    #[test]
    fn timestamp_ids_use_epoch_millis() {
        let at: DateTime<Utc> = "2024-01-01T00:00:00.123Z".parse().expect("timestamp");
        assert_eq!(ContactId::from_timestamp(at).as_str(), "1704067200123");
    }

    #[test]
    fn splits_name_at_first_space_only() {
        let contact = Contact::new("1", "Mary Ann Smith", "1");
        assert_eq!(contact.split_name(), ("Mary", "Ann Smith"));
        let single = Contact::new("2", "Cher", "1");
        assert_eq!(single.split_name(), ("Cher", ""));
    }

    #[test]
    fn validate_requires_name_then_phone() {
        assert_eq!(
            Contact::new("1", "  ", "").validate(),
            Err(ValidationError::NameRequired)
        );
        assert_eq!(
            Contact::new("1", "Ann", " ").validate(),
            Err(ValidationError::PhoneRequired)
        );
        assert_eq!(Contact::new("1", "Ann", "555").validate(), Ok(()));
    }
}
