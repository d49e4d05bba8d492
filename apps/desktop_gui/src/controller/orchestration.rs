//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory};

/// Queues `cmd` without blocking the frame. A full or closed queue is
/// reported back so the caller can release the request's in-flight slot.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    let context = cmd.kind().error_context();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(UiError::new(
                UiErrorCategory::Backend,
                context,
                "UI command queue is full; please retry",
            ))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(UiError::new(
                UiErrorCategory::Backend,
                context,
                "Backend command processor disconnected (possible startup/runtime failure)",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::ContactId;

    use super::*;
    use crate::controller::events::UiErrorContext;

    #[test]
    fn queued_command_reaches_the_receiver() {
        let (cmd_tx, cmd_rx) = bounded(1);

        dispatch_backend_command(&cmd_tx, BackendCommand::ListContacts).expect("queued");

        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::ListContacts));
    }

    #[test]
    fn full_queue_reports_the_failed_operation() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        dispatch_backend_command(&cmd_tx, BackendCommand::ListContacts).expect("queued");

        let err = dispatch_backend_command(
            &cmd_tx,
            BackendCommand::DeleteContact {
                id: ContactId::new("7"),
            },
        )
        .expect_err("queue is full");

        assert_eq!(err.category(), UiErrorCategory::Backend);
        assert_eq!(err.context(), UiErrorContext::DeleteContact);
        assert!(err.message().contains("full"));
    }

    #[test]
    fn closed_queue_reports_disconnect() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(4);
        drop(cmd_rx);

        let err = dispatch_backend_command(&cmd_tx, BackendCommand::ListContacts)
            .expect_err("receiver dropped");

        assert_eq!(err.context(), UiErrorContext::LoadContacts);
        assert!(err.message().contains("disconnected"));
    }
}
