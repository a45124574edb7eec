//! Character sheet use cases.
//!
//! Handles sheet creation, loading, edit sessions, budget-enforced saves and
//! bulk ability rolls.

mod bulk_roll;
mod error;
mod session;

pub use bulk_roll::{BulkRoll, BulkRollOutcome, RolledValue, SkippedRoll};
pub use error::CharacterSheetError;
pub use session::{SheetSession, SheetSnapshot};

use std::sync::Arc;

use serde_json::Value;
use sheetkeep_domain::{CharacterId, SheetData, SheetLedger, SystemId};

use crate::infrastructure::ports::{ClockPort, DiceRollerPort, SheetRecord, SheetRepo};

// =============================================================================
// Result Types
// =============================================================================

/// Result of starting character creation.
#[derive(Debug, Clone)]
pub struct StartCreationResult {
    /// The created draft character ID.
    pub character_id: CharacterId,
    /// Sheet filled with the system's creation defaults.
    pub sheet: SheetData,
    /// Budgets and slot usage for the fresh sheet.
    pub ledger: SheetLedger,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for character sheet use cases.
pub struct CharacterSheetUseCases {
    sheet_repo: Arc<dyn SheetRepo>,
    clock: Arc<dyn ClockPort>,
    bulk_roll: BulkRoll,
}

impl CharacterSheetUseCases {
    pub fn new(
        sheet_repo: Arc<dyn SheetRepo>,
        dice: Arc<dyn DiceRollerPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            sheet_repo,
            clock,
            bulk_roll: BulkRoll::new(dice),
        }
    }

    /// Start character creation for a rule system.
    ///
    /// Stores a draft record holding the system's default sheet.
    pub async fn start_creation(
        &self,
        system_id: SystemId,
        name: Option<String>,
    ) -> Result<StartCreationResult, CharacterSheetError> {
        let character_id = CharacterId::new();
        let sheet = SheetData::create(system_id);
        let record = SheetRecord {
            character_id,
            name: name.unwrap_or_else(|| "New Character".to_string()),
            sheet: sheet.clone(),
            updated_at: self.clock.now(),
        };

        self.sheet_repo.save(&record).await?;

        tracing::info!(
            character_id = %character_id,
            system_id = %system_id,
            "Started character creation"
        );

        Ok(StartCreationResult {
            character_id,
            ledger: sheet.ledger(),
            sheet,
        })
    }

    /// Normalize loosely shaped JSON into a new stored character.
    pub async fn import(
        &self,
        system_id: SystemId,
        name: String,
        raw: &Value,
    ) -> Result<SheetRecord, CharacterSheetError> {
        let sheet = SheetData::normalize(system_id, raw);
        self.save(CharacterId::new(), name, sheet).await
    }

    pub async fn load(&self, character_id: CharacterId) -> Result<SheetRecord, CharacterSheetError> {
        self.sheet_repo
            .get(character_id)
            .await?
            .ok_or(CharacterSheetError::SheetNotFound(character_id))
    }

    /// Open an edit session over a stored sheet.
    pub async fn open_session(
        &self,
        character_id: CharacterId,
    ) -> Result<SheetSession, CharacterSheetError> {
        let record = self.load(character_id).await?;
        Ok(SheetSession::new(record.sheet))
    }

    /// Persist a sheet. Over-budget skill points reject the save; the caller's
    /// copy is left as it was so the user can adjust and retry.
    pub async fn save(
        &self,
        character_id: CharacterId,
        name: String,
        sheet: SheetData,
    ) -> Result<SheetRecord, CharacterSheetError> {
        if let Err(e) = sheet.validate_for_save() {
            let err = CharacterSheetError::from(e);
            if let Some(budget) = err.budget() {
                tracing::warn!(
                    character_id = %character_id,
                    job_total = budget.job_total,
                    job_limit = budget.job_limit,
                    interest_total = budget.interest_total,
                    interest_limit = budget.interest_limit,
                    "Rejected save: skill point budget exceeded"
                );
            }
            return Err(err);
        }

        let record = SheetRecord {
            character_id,
            name,
            sheet,
            updated_at: self.clock.now(),
        };
        self.sheet_repo.save(&record).await?;

        tracing::info!(
            character_id = %character_id,
            system_id = %record.sheet.system(),
            "Saved character sheet"
        );

        Ok(record)
    }

    /// Save the state an edit session has reached.
    pub async fn save_session(
        &self,
        character_id: CharacterId,
        name: String,
        session: &SheetSession,
    ) -> Result<SheetRecord, CharacterSheetError> {
        self.save(character_id, name, session.sheet().clone()).await
    }

    pub async fn delete(&self, character_id: CharacterId) -> Result<(), CharacterSheetError> {
        self.sheet_repo.delete(character_id).await.map_err(|e| {
            if e.is_not_found() {
                CharacterSheetError::SheetNotFound(character_id)
            } else {
                e.into()
            }
        })?;
        tracing::info!(character_id = %character_id, "Deleted character sheet");
        Ok(())
    }

    /// Roll every field in the sheet's roll plan. Nothing is saved.
    pub async fn roll_abilities(
        &self,
        sheet: &SheetData,
    ) -> Result<BulkRollOutcome, CharacterSheetError> {
        self.bulk_roll.execute(sheet).await
    }
}
