//! Runtime bridge between the UI command queue and the contact store.
//!
//! The worker owns a multi-thread tokio runtime on its own OS thread. Each
//! command becomes one task, so a slow request never holds up the others,
//! and each task reports exactly one `UiEvent`.

use std::sync::Arc;
use std::thread;

use client_core::ContactStore;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

pub fn launch(
    store: Arc<dyn ContactStore>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(UiError::new(
                    UiErrorCategory::Backend,
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        tracing::info!("backend worker ready");
        runtime.block_on(async move {
            // `recv` blocks this thread only; spawned tasks run on the pool.
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::info!(command = cmd.name(), "backend: handling command");
                let store = Arc::clone(&store);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = execute(store.as_ref(), cmd).await;
                    deliver(&ui_tx, event);
                });
            }
            tracing::info!("backend command queue closed; worker exiting");
        });
    });
}

/// Hands a result to the UI without blocking a runtime worker.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(event)) => {
            tracing::warn!(?event, "ui event queue is full; dropping backend result");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event receiver dropped; discarding result");
            false
        }
    }
}

/// Runs one command against the store and wraps the outcome for the UI.
pub async fn execute(store: &dyn ContactStore, cmd: BackendCommand) -> UiEvent {
    let context = cmd.kind().error_context();
    let to_ui = |err: client_core::StoreError| UiError::from_store(context, &err);

    match cmd {
        BackendCommand::ListContacts => UiEvent::ContactsLoaded(store.list().await.map_err(to_ui)),
        BackendCommand::CreateContact { contact } => {
            UiEvent::ContactCreated(store.create(&contact).await.map_err(to_ui))
        }
        BackendCommand::UpdateContact { contact } => {
            UiEvent::ContactUpdated(store.update(&contact).await.map_err(to_ui))
        }
        BackendCommand::DeleteContact { id } => {
            let result = store.delete(&id).await.map_err(to_ui);
            UiEvent::ContactDeleted { id, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::store::StatusCode;
    use client_core::StoreError;
    use crossbeam_channel::bounded;
    use shared::domain::{Contact, ContactId};
    use tokio::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct FakeStore {
        contacts: Mutex<Vec<Contact>>,
        reject_deletes: bool,
    }

    #[async_trait]
    impl ContactStore for FakeStore {
        async fn list(&self) -> Result<Vec<Contact>, StoreError> {
            Ok(self.contacts.lock().await.clone())
        }

        async fn create(&self, contact: &Contact) -> Result<Contact, StoreError> {
            self.contacts.lock().await.push(contact.clone());
            Ok(contact.clone())
        }

        async fn update(&self, contact: &Contact) -> Result<Contact, StoreError> {
            let mut contacts = self.contacts.lock().await;
            match contacts.iter_mut().find(|existing| existing.id == contact.id) {
                Some(slot) => {
                    *slot = contact.clone();
                    Ok(contact.clone())
                }
                None => Err(StoreError::Server {
                    status: StatusCode::NOT_FOUND,
                }),
            }
        }

        async fn delete(&self, id: &ContactId) -> Result<(), StoreError> {
            if self.reject_deletes {
                return Err(StoreError::Server {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                });
            }
            self.contacts.lock().await.retain(|contact| &contact.id != id);
            Ok(())
        }
    }

    fn jane() -> Contact {
        Contact::new("1", "Jane Doe", "123")
    }

    #[tokio::test]
    async fn create_then_list_reports_the_new_contact() {
        let store = FakeStore::default();

        let created = execute(
            &store,
            BackendCommand::CreateContact { contact: jane() },
        )
        .await;
        let listed = execute(&store, BackendCommand::ListContacts).await;

        assert_eq!(created, UiEvent::ContactCreated(Ok(jane())));
        assert_eq!(listed, UiEvent::ContactsLoaded(Ok(vec![jane()])));
    }

    #[tokio::test]
    async fn store_failures_carry_the_operation_context() {
        let store = FakeStore {
            reject_deletes: true,
            ..FakeStore::default()
        };

        let updated = execute(&store, BackendCommand::UpdateContact { contact: jane() }).await;
        let deleted = execute(&store, BackendCommand::DeleteContact { id: jane().id }).await;

        let UiEvent::ContactUpdated(Err(err)) = updated else {
            panic!("expected update failure, got {updated:?}");
        };
        assert_eq!(err.context(), UiErrorContext::UpdateContact);
        assert_eq!(err.category(), UiErrorCategory::Server);

        let UiEvent::ContactDeleted { id, result: Err(err) } = deleted else {
            panic!("expected delete failure, got {deleted:?}");
        };
        assert_eq!(id, jane().id);
        assert_eq!(err.context(), UiErrorContext::DeleteContact);
    }

    #[test]
    fn delivery_never_blocks_on_a_full_queue() {
        let (ui_tx, ui_rx) = bounded(1);
        let loaded = UiEvent::ContactsLoaded(Ok(vec![jane()]));

        assert!(deliver(&ui_tx, loaded.clone()));
        assert!(!deliver(&ui_tx, UiEvent::ContactsLoaded(Ok(vec![]))));
        assert_eq!(ui_rx.try_recv(), Ok(loaded));

        drop(ui_rx);
        assert!(!deliver(&ui_tx, UiEvent::ContactsLoaded(Ok(vec![]))));
    }

    #[test]
    fn launched_worker_answers_each_command() {
        let store: Arc<dyn ContactStore> = Arc::new(FakeStore::default());
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);

        launch(store, cmd_rx, ui_tx);
        cmd_tx
            .send(BackendCommand::CreateContact { contact: jane() })
            .expect("queue create");

        let event = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("create result");
        assert_eq!(event, UiEvent::ContactCreated(Ok(jane())));

        cmd_tx.send(BackendCommand::ListContacts).expect("queue list");
        let event = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("list result");
        assert_eq!(event, UiEvent::ContactsLoaded(Ok(vec![jane()])));
    }
}
