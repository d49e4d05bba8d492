//! Screen state and its transitions.
//!
//! `reduce` mutates `ScreenState` for one event and returns the backend
//! commands the caller must queue. It never performs I/O.

use client_core::ContactForm;
use shared::domain::{Contact, ContactId};

use crate::backend_bridge::commands::{BackendCommand, RequestKind};
use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    fn error(err: &UiError) -> Self {
        Self {
            kind: AlertKind::Error,
            title: "Error".to_string(),
            message: err.user_message(),
        }
    }
}

/// At most one outstanding request per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InFlight {
    list: bool,
    create: bool,
    update: bool,
    delete: bool,
}

impl InFlight {
    pub fn is_pending(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::List => self.list,
            RequestKind::Create => self.create,
            RequestKind::Update => self.update,
            RequestKind::Delete => self.delete,
        }
    }

    fn slot(&mut self, kind: RequestKind) -> &mut bool {
        match kind {
            RequestKind::List => &mut self.list,
            RequestKind::Create => &mut self.create,
            RequestKind::Update => &mut self.update,
            RequestKind::Delete => &mut self.delete,
        }
    }

    fn try_begin(&mut self, kind: RequestKind) -> bool {
        let slot = self.slot(kind);
        if *slot {
            tracing::debug!(?kind, "request already in flight; ignoring trigger");
            return false;
        }
        *slot = true;
        true
    }

    fn finish(&mut self, kind: RequestKind) {
        *self.slot(kind) = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub contacts: Vec<Contact>,
    pub loading: bool,
    pub error: Option<String>,
    pub form_visible: bool,
    pub editing_contact: Option<Contact>,
    pub form: ContactForm,
    pub pending_delete: Option<ContactId>,
    pub alert: Option<Alert>,
    pub in_flight: InFlight,
    /// Bumped whenever the form opens or closes.
    pub form_session: u64,
    /// Session that the outstanding update was submitted from.
    pub update_session: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    Activate,
    Retry,
    OpenNewForm,
    OpenEditForm(Contact),
    CloseForm,
    SubmitForm,
    RequestDelete(ContactId),
    ConfirmDelete,
    CancelDelete,
    DismissAlert,
    Backend(UiEvent),
    CommandRejected { kind: RequestKind, error: UiError },
}

pub fn reduce(state: &mut ScreenState, event: ScreenEvent) -> Vec<BackendCommand> {
    match event {
        ScreenEvent::Activate | ScreenEvent::Retry => load_contacts(state),
        ScreenEvent::OpenNewForm => {
            state.form_session = state.form_session.wrapping_add(1);
            state.editing_contact = None;
            state.form.open_new();
            state.form_visible = true;
            vec![]
        }
        ScreenEvent::OpenEditForm(contact) => {
            state.form_session = state.form_session.wrapping_add(1);
            state.form.open_edit(&contact);
            state.editing_contact = Some(contact);
            state.form_visible = true;
            vec![]
        }
        ScreenEvent::CloseForm => {
            close_form(state);
            vec![]
        }
        ScreenEvent::SubmitForm => submit_form(state),
        ScreenEvent::RequestDelete(id) => {
            state.pending_delete = Some(id);
            vec![]
        }
        ScreenEvent::CancelDelete => {
            state.pending_delete = None;
            vec![]
        }
        ScreenEvent::ConfirmDelete => {
            let Some(id) = state.pending_delete.clone() else {
                return vec![];
            };
            // An ignored confirm leaves the dialog up for a later attempt.
            if !state.in_flight.try_begin(RequestKind::Delete) {
                return vec![];
            }
            state.pending_delete = None;
            vec![BackendCommand::DeleteContact { id }]
        }
        ScreenEvent::DismissAlert => {
            state.alert = None;
            vec![]
        }
        ScreenEvent::Backend(event) => {
            apply_backend_event(state, event);
            vec![]
        }
        ScreenEvent::CommandRejected { kind, error } => {
            state.in_flight.finish(kind);
            if kind == RequestKind::Update {
                state.update_session = None;
            }
            fail_request(state, kind, &error);
            vec![]
        }
    }
}

fn load_contacts(state: &mut ScreenState) -> Vec<BackendCommand> {
    if !state.in_flight.try_begin(RequestKind::List) {
        return vec![];
    }
    state.loading = true;
    state.error = None;
    vec![BackendCommand::ListContacts]
}

fn close_form(state: &mut ScreenState) {
    state.form_session = state.form_session.wrapping_add(1);
    state.form.reset();
    state.form_visible = false;
    state.editing_contact = None;
}

fn submit_form(state: &mut ScreenState) -> Vec<BackendCommand> {
    let Ok(contact) = state.form.submit() else {
        return vec![];
    };

    if state.editing_contact.is_some() {
        // The edit session stays open until the store acknowledges it.
        if !state.in_flight.try_begin(RequestKind::Update) {
            return vec![];
        }
        state.update_session = Some(state.form_session);
        vec![BackendCommand::UpdateContact { contact }]
    } else {
        if !state.in_flight.try_begin(RequestKind::Create) {
            return vec![];
        }
        close_form(state);
        vec![BackendCommand::CreateContact { contact }]
    }
}

fn fail_request(state: &mut ScreenState, kind: RequestKind, error: &UiError) {
    tracing::warn!(?kind, error = error.message(), "contact request failed");
    if kind == RequestKind::List {
        state.loading = false;
        state.error = Some(error.user_message());
    } else {
        state.alert = Some(Alert::error(error));
    }
}

fn apply_backend_event(state: &mut ScreenState, event: UiEvent) {
    match event {
        UiEvent::ContactsLoaded(result) => {
            state.in_flight.finish(RequestKind::List);
            match result {
                Ok(contacts) => {
                    state.contacts = contacts;
                    state.loading = false;
                    state.error = None;
                }
                Err(err) => fail_request(state, RequestKind::List, &err),
            }
        }
        UiEvent::ContactCreated(result) => {
            state.in_flight.finish(RequestKind::Create);
            match result {
                Ok(contact) => {
                    state.contacts.push(contact);
                    state.alert = Some(Alert::success("Contact added."));
                }
                Err(err) => fail_request(state, RequestKind::Create, &err),
            }
        }
        UiEvent::ContactUpdated(result) => {
            state.in_flight.finish(RequestKind::Update);
            let submitted_from = state.update_session.take();
            match result {
                Ok(updated) => {
                    // Only the session that submitted the update is closed;
                    // a form reopened meanwhile keeps its input.
                    let editing_this = submitted_from == Some(state.form_session)
                        && state
                            .editing_contact
                            .as_ref()
                            .is_some_and(|editing| editing.id == updated.id);
                    if let Some(slot) = state
                        .contacts
                        .iter_mut()
                        .find(|contact| contact.id == updated.id)
                    {
                        *slot = updated;
                    }
                    if editing_this {
                        close_form(state);
                    }
                    state.alert = Some(Alert::success("Contact updated."));
                }
                Err(err) => fail_request(state, RequestKind::Update, &err),
            }
        }
        UiEvent::ContactDeleted { id, result } => {
            state.in_flight.finish(RequestKind::Delete);
            match result {
                Ok(()) => {
                    state.contacts.retain(|contact| contact.id != id);
                    state.alert = Some(Alert::success("Contact deleted."));
                }
                Err(err) => fail_request(state, RequestKind::Delete, &err),
            }
        }
        UiEvent::WorkerFailed(err) => {
            tracing::error!(error = err.message(), "backend worker failed");
            state.in_flight = InFlight::default();
            state.update_session = None;
            if state.loading {
                state.loading = false;
                state.error = Some(err.user_message());
            } else {
                state.alert = Some(Alert::error(&err));
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
