//! Backend results delivered to the UI and error modeling for the controller.

use client_core::StoreError;
use shared::domain::{Contact, ContactId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ContactsLoaded(Result<Vec<Contact>, UiError>),
    ContactCreated(Result<Contact, UiError>),
    ContactUpdated(Result<Contact, UiError>),
    ContactDeleted {
        id: ContactId,
        result: Result<(), UiError>,
    },
    WorkerFailed(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    InvalidResponse,
    Validation,
    Backend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadContacts,
    CreateContact,
    UpdateContact,
    DeleteContact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_store(context: UiErrorContext, err: &StoreError) -> Self {
        let category = match err {
            StoreError::Network(_) => UiErrorCategory::Transport,
            StoreError::Server { .. } => UiErrorCategory::Server,
            StoreError::InvalidResponse(_) => UiErrorCategory::InvalidResponse,
            StoreError::InvalidContact(_) => UiErrorCategory::Validation,
        };
        Self::new(category, context, err.to_string())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text for alerts and the load-failure banner.
    pub fn user_message(&self) -> String {
        let action = match self.context {
            UiErrorContext::BackendStartup => "Contact service is unavailable",
            UiErrorContext::LoadContacts => "Could not load contacts",
            UiErrorContext::CreateContact => "Could not add contact",
            UiErrorContext::UpdateContact => "Could not update contact",
            UiErrorContext::DeleteContact => "Could not delete contact",
        };
        let hint = match self.category {
            UiErrorCategory::Transport => "check the server address and your network",
            UiErrorCategory::Server => "the server rejected the request",
            UiErrorCategory::InvalidResponse => "the server sent an unexpected response",
            UiErrorCategory::Validation => "a name and a phone number are required",
            UiErrorCategory::Backend => "restart the app and try again",
        };
        format!("{action}; {hint}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_names_the_failed_operation() {
        let err = UiError::new(
            UiErrorCategory::Server,
            UiErrorContext::DeleteContact,
            "contact store returned 500 Internal Server Error",
        );
        assert_eq!(
            err.user_message(),
            "Could not delete contact; the server rejected the request."
        );
        assert_eq!(err.message(), "contact store returned 500 Internal Server Error");
    }

    #[test]
    fn load_failures_point_at_the_network() {
        let err = UiError::new(
            UiErrorCategory::Transport,
            UiErrorContext::LoadContacts,
            "connection refused",
        );
        assert!(err.user_message().starts_with("Could not load contacts"));
        assert!(err.user_message().contains("network"));
    }

    #[test]
    fn server_status_maps_to_server_category() {
        let err = UiError::from_store(
            UiErrorContext::UpdateContact,
            &StoreError::Server {
                status: reqwest_status(404),
            },
        );
        assert_eq!(err.category(), UiErrorCategory::Server);
        assert_eq!(err.context(), UiErrorContext::UpdateContact);
        assert!(err.message().contains("404"));
    }

    #[test]
    fn refused_contacts_map_to_validation() {
        let err = UiError::from_store(
            UiErrorContext::CreateContact,
            &StoreError::InvalidContact(shared::error::ValidationError::PhoneRequired),
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(
            err.user_message(),
            "Could not add contact; a name and a phone number are required."
        );
    }

    fn reqwest_status(code: u16) -> client_core::store::StatusCode {
        client_core::store::StatusCode::from_u16(code).expect("valid status")
    }
}
