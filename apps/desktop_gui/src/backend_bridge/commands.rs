//! Backend commands queued from UI to backend worker.

use shared::domain::{Contact, ContactId};

use crate::controller::events::UiErrorContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    ListContacts,
    CreateContact { contact: Contact },
    UpdateContact { contact: Contact },
    DeleteContact { id: ContactId },
}

/// One in-flight slot per kind; see `controller::reducer::InFlight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    List,
    Create,
    Update,
    Delete,
}

impl RequestKind {
    pub fn error_context(self) -> UiErrorContext {
        match self {
            Self::List => UiErrorContext::LoadContacts,
            Self::Create => UiErrorContext::CreateContact,
            Self::Update => UiErrorContext::UpdateContact,
            Self::Delete => UiErrorContext::DeleteContact,
        }
    }
}

impl BackendCommand {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::ListContacts => RequestKind::List,
            Self::CreateContact { .. } => RequestKind::Create,
            Self::UpdateContact { .. } => RequestKind::Update,
            Self::DeleteContact { .. } => RequestKind::Delete,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ListContacts => "list_contacts",
            Self::CreateContact { .. } => "create_contact",
            Self::UpdateContact { .. } => "update_contact",
            Self::DeleteContact { .. } => "delete_contact",
        }
    }
}
