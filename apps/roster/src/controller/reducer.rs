//! State transitions: every UI event is applied to the roster synchronously,
//! one at a time, in arrival order.

use crossbeam_channel::Sender;
use roster_core::{
    ApplyOutcome, EditError, LoadOutcome, LoadState, Partitioner, RosterController, ViewSide,
};
use tracing::warn;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{
        classify_load_failure, UiError, UiErrorCategory, UiErrorContext, UiEvent, UserAction, HELP,
    },
    orchestration::dispatch_backend_command,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct RosterApp {
    pub roster: RosterController,
    pub load: LoadState,
    pub status: String,
}

impl RosterApp {
    pub fn new(partitioner: Partitioner) -> Self {
        Self {
            roster: RosterController::new(partitioner),
            load: LoadState::default(),
            status: String::new(),
        }
    }

    pub fn handle_event(&mut self, event: UiEvent, cmd_tx: &Sender<BackendCommand>) -> Flow {
        match event {
            UiEvent::Loaded(outcome) => {
                self.on_loaded(outcome);
                Flow::Continue
            }
            UiEvent::Action(action) => self.on_action(action, cmd_tx),
            UiEvent::InvalidInput(reason) => {
                self.report(UiError::from_message(UiErrorContext::Input, reason));
                Flow::Continue
            }
            UiEvent::InputClosed => {
                dispatch_backend_command(cmd_tx, BackendCommand::Shutdown, &mut self.status);
                Flow::Quit
            }
        }
    }

    fn on_loaded(&mut self, outcome: LoadOutcome) {
        self.load.observe(&outcome);
        match &outcome {
            LoadOutcome::Loaded(records) => {
                self.status = format!("Loaded {} users", records.len());
            }
            LoadOutcome::Failed(reason) => {
                let context = if reason.contains("backend worker startup failure") {
                    UiErrorContext::BackendStartup
                } else {
                    UiErrorContext::LoadUsers
                };
                self.report(UiError::from_message(context, classify_load_failure(reason)));
            }
        }
        self.roster.apply_load(outcome);
    }

    fn on_action(&mut self, action: UserAction, cmd_tx: &Sender<BackendCommand>) -> Flow {
        let split_year = self.roster.split_year();
        let result = match action {
            UserAction::Edit(id) => self.roster.open_edit(id).map(|()| {
                self.status = format!("Editing user {id}; 'set <date>' then 'apply' or 'cancel'");
            }),
            UserAction::Set(value) => self.roster.update_pending(value).map(|()| {
                self.status.clear();
            }),
            UserAction::Apply => self.roster.apply().map(|outcome| {
                self.status = match outcome {
                    ApplyOutcome::Committed { id, side } => {
                        format!("User {id} is now {}", side_label(side, split_year))
                    }
                    ApplyOutcome::TargetMissing(id) => {
                        format!("User {id} is no longer loaded; edit dropped")
                    }
                };
            }),
            UserAction::Cancel => self.roster.cancel().map(|id| {
                self.status = format!("Discarded edit for user {id}");
            }),
            UserAction::Reload => {
                self.load.begin();
                self.status = "Reloading users".to_string();
                dispatch_backend_command(cmd_tx, BackendCommand::LoadUsers, &mut self.status);
                Ok(())
            }
            UserAction::Show => Ok(()),
            UserAction::Help => {
                self.status = HELP.to_string();
                Ok(())
            }
            UserAction::Quit => {
                dispatch_backend_command(cmd_tx, BackendCommand::Shutdown, &mut self.status);
                return Flow::Quit;
            }
        };

        if let Err(err) = result {
            self.reject(err);
        }
        Flow::Continue
    }

    fn reject(&mut self, err: EditError) {
        warn!(%err, "edit operation rejected");
        self.report(UiError::from_api(UiErrorContext::Edit, err.into()));
    }

    fn report(&mut self, error: UiError) {
        let hint = match error.category() {
            UiErrorCategory::Transport => " (type 'reload' to retry)",
            UiErrorCategory::InvalidState => " (open one with 'edit <id>')",
            UiErrorCategory::Validation | UiErrorCategory::Unknown => "",
        };
        self.status = format!("{}: {}{hint}", error.context().label(), error.message());
    }
}

pub fn side_label(side: ViewSide, split_year: i32) -> String {
    match side {
        ViewSide::Before => format!("born before {split_year}"),
        ViewSide::After => format!("born after {split_year}"),
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
