//! Sheetkeep domain: rule-system sheets and their derivation engine.
//!
//! Everything here is pure. Sheets come in as loosely shaped JSON, are
//! normalized into typed per-system sheets, and change only through
//! [`SheetData::reduce`].

pub mod character_sheet;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use character_sheet::{ChangeSet, SheetCommand, SheetData, SheetEdit, SheetTransition};
pub use entities::{adventurer_level, ClassLevel, Skill, SkillPoint};
pub use error::DomainError;
pub use game_systems::{AbilityRoll, RollTarget, RuleSystem, SheetLedger, SlotUsage, SystemId};
pub use ids::CharacterId;
pub use value_objects::{
    experience_cost, DiceFormula, DiceParseError, DiceRollResult, PointBudget, PointLimits,
    PointUsage, ProgressionLedger,
};
