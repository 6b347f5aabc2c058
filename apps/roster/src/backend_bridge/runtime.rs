//! Runtime bridge between the UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use roster_core::{load_once, LoadOutcome, UserSource};
use tracing::{debug, error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn UserSource>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_worker(cmd_rx, ui_tx, source))
}

/// Stops the worker. The UI receiver goes first so a worker blocked on a full
/// event queue wakes up with a send error instead of waiting forever.
pub fn shutdown(
    worker: thread::JoinHandle<()>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
) -> thread::Result<()> {
    drop(ui_rx);
    drop(cmd_tx);
    worker.join()
}

fn run_worker(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, source: Arc<dyn UserSource>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(%err, "failed to build backend runtime");
            let _ = ui_tx.send(UiEvent::Loaded(LoadOutcome::Failed(format!(
                "backend worker startup failure: {err}"
            ))));
            return;
        }
    };

    while let Ok(cmd) = cmd_rx.recv() {
        debug!(command = cmd.name(), "backend received command");
        match cmd {
            BackendCommand::LoadUsers => {
                let outcome = runtime.block_on(load_once(source.as_ref()));
                if let LoadOutcome::Loaded(records) = &outcome {
                    info!(count = records.len(), "users fetched");
                }
                if ui_tx.send(UiEvent::Loaded(outcome)).is_err() {
                    break;
                }
            }
            BackendCommand::Shutdown => break,
        }
    }
    debug!("backend worker stopped");
}
