//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{execute, RecordStore};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread. Every command runs as its own task, so completions
/// reach the UI in the order the service answers, not the order they were queued.
pub fn launch(
    store: Arc<dyn RecordStore>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::BackendReady);
            while let Ok(cmd) = cmd_rx.recv() {
                let BackendCommand::Run(effect) = cmd;
                let store = Arc::clone(&store);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let action = execute(&*store, effect).await;
                    let name = action.name();
                    match ui_tx.try_send(UiEvent::Completed(action)) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::warn!(action = name, "ui event queue full; completion dropped");
                        }
                        Err(TrySendError::Disconnected(_)) => {
                            tracing::debug!(action = name, "ui closed before completion arrived");
                        }
                    }
                });
            }
            tracing::debug!("command queue closed; backend worker exiting");
        });
    })
}
