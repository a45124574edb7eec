//! Bulk "roll all abilities".
//!
//! Every formula is parsed before the first request goes out. Requests then
//! run one after another; a failed request skips its field and the rest carry
//! on. Whatever succeeded is applied as one batch and recomputed once.

use std::sync::Arc;

use serde::Serialize;
use sheetkeep_domain::{AbilityRoll, ChangeSet, DiceFormula, SheetData};

use super::CharacterSheetError;
use crate::infrastructure::ports::DiceRollerPort;

/// A field that received a rolled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolledValue {
    pub label: String,
    pub formula: String,
    pub rolls: Vec<i32>,
    pub total: i32,
    /// Value written to the sheet (`total × multiplier`).
    pub value: i32,
}

/// A field left as it was because its roll failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRoll {
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkRollOutcome {
    pub sheet: SheetData,
    pub changes: ChangeSet,
    pub applied: Vec<RolledValue>,
    pub skipped: Vec<SkippedRoll>,
}

pub struct BulkRoll {
    dice: Arc<dyn DiceRollerPort>,
}

impl BulkRoll {
    pub fn new(dice: Arc<dyn DiceRollerPort>) -> Self {
        Self { dice }
    }

    /// Roll the sheet's own plan.
    pub async fn execute(&self, sheet: &SheetData) -> Result<BulkRollOutcome, CharacterSheetError> {
        self.execute_plan(sheet, sheet.roll_plan()).await
    }

    pub async fn execute_plan(
        &self,
        sheet: &SheetData,
        plan: Vec<AbilityRoll>,
    ) -> Result<BulkRollOutcome, CharacterSheetError> {
        let parsed = plan
            .into_iter()
            .map(|roll| match roll.parse_formula() {
                Ok(formula) => Ok((roll, formula)),
                Err(source) => Err(CharacterSheetError::InvalidFormula {
                    label: roll.label,
                    source,
                }),
            })
            .collect::<Result<Vec<(AbilityRoll, DiceFormula)>, _>>()?;

        let mut edits = Vec::with_capacity(parsed.len());
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        for (roll, formula) in parsed {
            match self.dice.roll(&formula).await {
                Ok(result) => {
                    edits.push(roll.edit_for(result.total));
                    applied.push(RolledValue {
                        value: result.total.saturating_mul(roll.multiplier),
                        label: roll.label,
                        formula: formula.to_string(),
                        rolls: result.rolls,
                        total: result.total,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        label = %roll.label,
                        formula = %formula,
                        error = %e,
                        "Dice roll failed, leaving field unchanged"
                    );
                    skipped.push(SkippedRoll {
                        label: roll.label,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let transition = sheet.apply(edits)?;

        tracing::info!(
            system_id = %sheet.system(),
            applied = applied.len(),
            skipped = skipped.len(),
            "Bulk roll finished"
        );

        Ok(BulkRollOutcome {
            sheet: transition.sheet,
            changes: transition.changes,
            applied,
            skipped,
        })
    }
}
