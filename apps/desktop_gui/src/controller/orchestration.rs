//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{Action, ViewState};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui command queue full; command dropped");
            *status = format!("Command queue is full; {cmd_name} was dropped, please retry");
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            *status = "Backend command processor disconnected; restart the app".to_string();
        }
    }
}

/// Feeds `action` through the reducer and queues whatever effect it asks for.
pub fn apply_action(
    state: &mut ViewState,
    action: Action,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    if let Some(effect) = state.apply(action) {
        dispatch_backend_command(cmd_tx, BackendCommand::Run(effect), status);
    }
}
