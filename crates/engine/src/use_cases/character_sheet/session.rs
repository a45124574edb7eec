//! Edit session - the single owner of one sheet's state.
//!
//! Every change goes through [`SheetSession::dispatch`], which hands back a
//! snapshot tagged with a fresh revision. When that snapshot comes back in
//! through the update channel, [`SheetSession::receive`] sees a revision it
//! already owns and drops it, so the session never re-processes its own
//! output as an external edit.

use serde::Serialize;
use serde_json::Value;
use sheetkeep_domain::{ChangeSet, DomainError, SheetCommand, SheetData, SheetEdit, SystemId};

/// State published after a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSnapshot {
    pub revision: u64,
    pub sheet: SheetData,
    pub changes: ChangeSet,
}

#[derive(Debug, Clone)]
pub struct SheetSession {
    sheet: SheetData,
    revision: u64,
}

impl SheetSession {
    pub fn new(sheet: SheetData) -> Self {
        Self { sheet, revision: 0 }
    }

    /// Open a session over loosely shaped JSON.
    pub fn open(system: SystemId, raw: &Value) -> Self {
        Self::new(SheetData::normalize(system, raw))
    }

    pub fn sheet(&self) -> &SheetData {
        &self.sheet
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn into_sheet(self) -> SheetData {
        self.sheet
    }

    /// Apply a command. On error the session state is unchanged.
    pub fn dispatch(&mut self, command: SheetCommand) -> Result<SheetSnapshot, DomainError> {
        let transition = self.sheet.reduce(command)?;
        self.revision += 1;
        self.sheet = transition.sheet;

        tracing::debug!(
            system_id = %self.sheet.system(),
            revision = self.revision,
            changed = transition.changes.paths().len(),
            "Sheet transition"
        );

        Ok(SheetSnapshot {
            revision: self.revision,
            sheet: self.sheet.clone(),
            changes: transition.changes,
        })
    }

    pub fn edit(&mut self, edits: Vec<SheetEdit>) -> Result<SheetSnapshot, DomainError> {
        self.dispatch(SheetCommand::Edit(edits))
    }

    /// Accept a sheet from the update channel.
    ///
    /// Returns `None` for anything not newer than the session's own revision.
    pub fn receive(&mut self, revision: u64, raw: &Value) -> Option<SheetSnapshot> {
        if revision <= self.revision {
            tracing::trace!(
                received = revision,
                current = self.revision,
                "Ignoring echoed sheet update"
            );
            return None;
        }

        let next = SheetData::normalize(self.sheet.system(), raw);
        let changes = ChangeSet::between(&self.sheet.data_value(), &next.data_value());
        self.sheet = next;
        self.revision = revision;

        Some(SheetSnapshot {
            revision,
            sheet: self.sheet.clone(),
            changes,
        })
    }
}
