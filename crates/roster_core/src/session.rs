//! Single-record edit session over the canonical record set.
//!
//! # Invariants
//! - At most one record is in edit mode at any time.
//! - Opening a different record discards the pending value of the previous one.
//! - `views` is recomputed from `records` at every mutation site and is never
//!   patched in place.
//! - A rejected operation leaves both the record set and the session untouched.

use std::collections::HashSet;

use shared::{
    domain::{UserId, UserRecord},
    error::{ApiError, ErrorCode},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    partition::{DerivedViews, Partitioner, ViewSide},
    source::LoadOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target_id: UserId,
    pub pending_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no edit session is open")]
    NoActiveSession,
    #[error("user {0} is not in the record set")]
    UnknownRecord(UserId),
}

impl EditError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoActiveSession => ErrorCode::InvalidState,
            Self::UnknownRecord(_) => ErrorCode::NotFound,
        }
    }
}

impl From<EditError> for ApiError {
    fn from(value: EditError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Committed { id: UserId, side: ViewSide },
    /// The target left the record set while the session was open; nothing was written.
    TargetMissing(UserId),
}

#[derive(Debug, Clone, Default)]
pub struct RosterController {
    records: Vec<UserRecord>,
    session: Option<EditSession>,
    partitioner: Partitioner,
    views: DerivedViews,
}

impl RosterController {
    pub fn new(partitioner: Partitioner) -> Self {
        Self {
            records: Vec::new(),
            session: None,
            partitioner,
            views: DerivedViews::default(),
        }
    }

    /// Replaces the record set wholesale, keeping the first record seen for each id.
    ///
    /// An open session is left as is; if its target is gone, `apply` becomes a no-op.
    pub fn replace_records(&mut self, records: Vec<UserRecord>) -> usize {
        let incoming = records.len();
        let mut seen = HashSet::with_capacity(incoming);
        self.records = records
            .into_iter()
            .filter(|record| seen.insert(record.id))
            .collect();

        let dropped = incoming - self.records.len();
        if dropped > 0 {
            warn!(dropped, "dropped records with duplicate ids");
        }
        self.recompute();
        info!(
            records = self.records.len(),
            before = self.views.before.len(),
            after = self.views.after.len(),
            "record set replaced"
        );
        self.records.len()
    }

    /// A failed load keeps the last known good record set and views.
    pub fn apply_load(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(records) => {
                self.replace_records(records);
            }
            LoadOutcome::Failed(reason) => {
                warn!(%reason, "user load failed; keeping current record set");
            }
        }
    }

    pub fn open_edit(&mut self, target_id: UserId) -> Result<(), EditError> {
        let committed = self
            .record(target_id)
            .map(|record| record.birth_date.clone())
            .ok_or(EditError::UnknownRecord(target_id))?;

        if let Some(previous) = self.session.take() {
            if previous.target_id != target_id {
                debug!(
                    discarded = %previous.target_id,
                    pending = %previous.pending_value,
                    "closing open edit without committing"
                );
            }
        }

        debug!(target = %target_id, "edit opened");
        self.session = Some(EditSession {
            target_id,
            pending_value: committed,
        });
        Ok(())
    }

    pub fn update_pending(&mut self, value: impl Into<String>) -> Result<(), EditError> {
        let session = self.session.as_mut().ok_or(EditError::NoActiveSession)?;
        session.pending_value = value.into();
        Ok(())
    }

    pub fn apply(&mut self) -> Result<ApplyOutcome, EditError> {
        let session = self.session.take().ok_or(EditError::NoActiveSession)?;
        let EditSession {
            target_id,
            pending_value,
        } = session;

        let Some(record) = self.records.iter_mut().find(|record| record.id == target_id) else {
            warn!(target = %target_id, "edit target no longer loaded; nothing committed");
            return Ok(ApplyOutcome::TargetMissing(target_id));
        };

        *record = record.with_birth_date(pending_value);
        let side = self.partitioner.side_for(&record.birth_date);
        info!(target = %target_id, birth_date = %record.birth_date, ?side, "edit applied");
        self.recompute();

        Ok(ApplyOutcome::Committed {
            id: target_id,
            side,
        })
    }

    pub fn cancel(&mut self) -> Result<UserId, EditError> {
        let session = self.session.take().ok_or(EditError::NoActiveSession)?;
        debug!(target = %session.target_id, "edit cancelled");
        Ok(session.target_id)
    }

    pub fn state(&self) -> EditState {
        match &self.session {
            Some(session) => EditState::Editing(session.target_id),
            None => EditState::Idle,
        }
    }

    pub fn is_editing(&self, id: UserId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.target_id == id)
    }

    pub fn pending_value(&self, id: UserId) -> Option<&str> {
        self.session
            .as_ref()
            .filter(|session| session.target_id == id)
            .map(|session| session.pending_value.as_str())
    }

    pub fn views(&self) -> &DerivedViews {
        &self.views
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn record(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn split_year(&self) -> i32 {
        self.partitioner.split_year()
    }

    fn recompute(&mut self) {
        self.views = self.partitioner.partition(&self.records);
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
