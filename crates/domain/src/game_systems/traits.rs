//! Common interface implemented by every rule system.

use serde::Serialize;
use serde_json::Value;

use super::cthulhu::CthulhuAttribute;
use super::ledger::SheetLedger;
use super::sw25::Sw25Attribute;
use super::SystemId;
use crate::character_sheet::SheetEdit;
use crate::error::DomainError;
use crate::value_objects::{DiceFormula, DiceParseError};

/// One rule system's derivation pipeline.
///
/// `normalize` accepts any JSON (missing fields default, wrong types read as
/// absent) and never fails. Derived fields are only ever written by
/// `recompute`; user-edited current values ride through it unchanged.
pub trait RuleSystem: Send + Sync {
    type Sheet: Clone + PartialEq + Serialize;
    type Edit: Clone + std::fmt::Debug;

    fn system_id(&self) -> SystemId;

    /// Fill defaults, then derive everything.
    fn normalize(&self, raw: &Value) -> Self::Sheet;

    /// Sheet handed out at character creation.
    fn create(&self) -> Self::Sheet {
        self.normalize(&Value::Null)
    }

    /// Primary attributes from abilities and allocations.
    fn derive_attributes(&self, sheet: Self::Sheet) -> Self::Sheet;

    /// Dependent stats from the attribute set.
    fn derive_stats(&self, sheet: Self::Sheet) -> Self::Sheet;

    fn recompute(&self, sheet: Self::Sheet) -> Self::Sheet {
        self.derive_stats(self.derive_attributes(sheet))
    }

    /// Budgets, progression and slot usage. Advisory only.
    fn ledger(&self, sheet: &Self::Sheet) -> SheetLedger;

    /// Apply one edit to root inputs without recomputing.
    fn assign(&self, sheet: &mut Self::Sheet, edit: Self::Edit) -> Result<(), DomainError>;

    /// Apply a batch to a copy and recompute once. The input is untouched on error.
    fn apply(&self, sheet: &Self::Sheet, edits: Vec<Self::Edit>) -> Result<Self::Sheet, DomainError> {
        let mut next = sheet.clone();
        for edit in edits {
            self.assign(&mut next, edit)?;
        }
        Ok(self.recompute(next))
    }

    /// Hard checks enforced on submission.
    fn validate_for_save(&self, _sheet: &Self::Sheet) -> Result<(), DomainError> {
        Ok(())
    }

    /// Fields filled by a bulk "roll all" action.
    fn roll_plan(&self, _sheet: &Self::Sheet) -> Vec<AbilityRoll> {
        Vec::new()
    }
}

/// One field of a bulk roll: roll `formula`, multiply, write to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityRoll {
    pub label: String,
    pub formula: String,
    pub multiplier: i32,
    pub target: RollTarget,
}

impl AbilityRoll {
    pub fn new(label: impl Into<String>, formula: impl Into<String>, target: RollTarget) -> Self {
        Self {
            label: label.into(),
            formula: formula.into(),
            multiplier: 1,
            target,
        }
    }

    /// Formulas are checked as a whole before anything is rolled.
    pub fn parse_formula(&self) -> Result<DiceFormula, DiceParseError> {
        DiceFormula::parse(&self.formula)
    }

    pub fn times(mut self, multiplier: i32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Edit writing a rolled total into the target field.
    pub fn edit_for(&self, total: i32) -> SheetEdit {
        self.target.edit(total.saturating_mul(self.multiplier))
    }
}

/// Field a rolled value lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollTarget {
    Cthulhu(CthulhuAttribute),
    Sw25Initial(Sw25Attribute),
}

impl RollTarget {
    pub fn edit(self, value: i32) -> SheetEdit {
        use super::cthulhu::CthulhuEdit;
        use super::sw25::Sw25Edit;

        match self {
            Self::Cthulhu(attribute) => {
                SheetEdit::Cthulhu(CthulhuEdit::SetAttribute { attribute, value })
            }
            Self::Sw25Initial(attribute) => {
                SheetEdit::Sw25(Sw25Edit::SetInitial { attribute, value })
            }
        }
    }
}
