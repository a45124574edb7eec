//! Character sheet data and the edit reducer.
//!
//! [`SheetData`] is the one place where the rule system is chosen. Every
//! transition goes through [`SheetData::reduce`], which returns a new sheet
//! plus the set of paths that changed; the old sheet is never mutated.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::error::DomainError;
use crate::game_systems::{
    AbilityRoll, CthulhuEdit, CthulhuSheet, CthulhuSystem, RuleSystem, SheetLedger,
    ShinobigamiEdit, ShinobigamiSheet, ShinobigamiSystem, Sw25Edit, Sw25Sheet, Sw25System,
    SystemId,
};

// =============================================================================
// Sheet Data
// =============================================================================

/// A fully normalized sheet, tagged with its rule system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "system", content = "data")]
pub enum SheetData {
    #[serde(rename = "cthulhu6")]
    Cthulhu6(CthulhuSheet),
    #[serde(rename = "cthulhu7")]
    Cthulhu7(CthulhuSheet),
    #[serde(rename = "sw25")]
    Sw25(Sw25Sheet),
    #[serde(rename = "shinobigami")]
    Shinobigami(ShinobigamiSheet),
}

/// Runs `$body` with the matching system and the inner sheet bound.
macro_rules! with_system {
    ($sheet:expr, $system:ident, $data:ident => $body:expr) => {
        match $sheet {
            SheetData::Cthulhu6($data) => {
                let $system = CthulhuSystem::sixth();
                $body
            }
            SheetData::Cthulhu7($data) => {
                let $system = CthulhuSystem::seventh();
                $body
            }
            SheetData::Sw25($data) => {
                let $system = Sw25System;
                $body
            }
            SheetData::Shinobigami($data) => {
                let $system = ShinobigamiSystem;
                $body
            }
        }
    };
}

impl SheetData {
    /// Normalize arbitrary JSON as a sheet of `system`. Never fails.
    pub fn normalize(system: SystemId, raw: &Value) -> Self {
        match system {
            SystemId::Cthulhu6 => Self::Cthulhu6(CthulhuSystem::sixth().normalize(raw)),
            SystemId::Cthulhu7 => Self::Cthulhu7(CthulhuSystem::seventh().normalize(raw)),
            SystemId::Sw25 => Self::Sw25(Sw25System.normalize(raw)),
            SystemId::Shinobigami => Self::Shinobigami(ShinobigamiSystem.normalize(raw)),
        }
    }

    /// Sheet handed out at character creation.
    pub fn create(system: SystemId) -> Self {
        match system {
            SystemId::Cthulhu6 => Self::Cthulhu6(CthulhuSystem::sixth().create()),
            SystemId::Cthulhu7 => Self::Cthulhu7(CthulhuSystem::seventh().create()),
            SystemId::Sw25 => Self::Sw25(Sw25System.create()),
            SystemId::Shinobigami => Self::Shinobigami(ShinobigamiSystem.create()),
        }
    }

    /// Load the stored `{system, data}` shape. Only the system id can fail.
    pub fn from_stored(stored: &Value) -> Result<Self, DomainError> {
        let system = stored
            .get("system")
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::parse("stored sheet has no system id"))?
            .parse::<SystemId>()?;
        let data = stored.get("data").unwrap_or(&Value::Null);
        Ok(Self::normalize(system, data))
    }

    pub fn system(&self) -> SystemId {
        match self {
            Self::Cthulhu6(_) => SystemId::Cthulhu6,
            Self::Cthulhu7(_) => SystemId::Cthulhu7,
            Self::Sw25(_) => SystemId::Sw25,
            Self::Shinobigami(_) => SystemId::Shinobigami,
        }
    }

    pub fn recompute(self) -> Self {
        match self {
            Self::Cthulhu6(sheet) => Self::Cthulhu6(CthulhuSystem::sixth().recompute(sheet)),
            Self::Cthulhu7(sheet) => Self::Cthulhu7(CthulhuSystem::seventh().recompute(sheet)),
            Self::Sw25(sheet) => Self::Sw25(Sw25System.recompute(sheet)),
            Self::Shinobigami(sheet) => Self::Shinobigami(ShinobigamiSystem.recompute(sheet)),
        }
    }

    pub fn ledger(&self) -> SheetLedger {
        with_system!(self, system, sheet => system.ledger(sheet))
    }

    /// Hard checks run before a sheet may be persisted.
    pub fn validate_for_save(&self) -> Result<(), DomainError> {
        with_system!(self, system, sheet => system.validate_for_save(sheet))
    }

    pub fn roll_plan(&self) -> Vec<AbilityRoll> {
        with_system!(self, system, sheet => system.roll_plan(sheet))
    }

    /// The inner sheet as JSON, without the system tag.
    pub fn data_value(&self) -> Value {
        with_system!(self, _system, sheet => serde_json::to_value(sheet)).unwrap_or_default()
    }

    /// Apply a batch of edits to a copy and recompute once.
    pub fn apply(&self, edits: Vec<SheetEdit>) -> Result<SheetTransition, DomainError> {
        let system = self.system();
        let next = match self {
            Self::Cthulhu6(sheet) => {
                Self::Cthulhu6(CthulhuSystem::sixth().apply(sheet, cthulhu_edits(system, edits)?)?)
            }
            Self::Cthulhu7(sheet) => Self::Cthulhu7(
                CthulhuSystem::seventh().apply(sheet, cthulhu_edits(system, edits)?)?,
            ),
            Self::Sw25(sheet) => Self::Sw25(Sw25System.apply(sheet, sw25_edits(system, edits)?)?),
            Self::Shinobigami(sheet) => Self::Shinobigami(
                ShinobigamiSystem.apply(sheet, shinobigami_edits(system, edits)?)?,
            ),
        };
        Ok(SheetTransition::between(self, next))
    }

    /// Single entry point for every state change.
    pub fn reduce(&self, command: SheetCommand) -> Result<SheetTransition, DomainError> {
        match command {
            SheetCommand::Edit(edits) => self.apply(edits),
            SheetCommand::Replace { system, raw } => {
                Ok(SheetTransition::between(self, Self::normalize(system, &raw)))
            }
        }
    }
}

// =============================================================================
// Edits and Commands
// =============================================================================

/// A root-input edit addressed to one rule-system family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetEdit {
    Cthulhu(CthulhuEdit),
    Sw25(Sw25Edit),
    Shinobigami(ShinobigamiEdit),
}

impl SheetEdit {
    pub fn family(&self) -> &'static str {
        match self {
            Self::Cthulhu(_) => "cthulhu",
            Self::Sw25(_) => "sw25",
            Self::Shinobigami(_) => "shinobigami",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetCommand {
    Edit(Vec<SheetEdit>),
    /// Load a different sheet wholesale.
    Replace { system: SystemId, raw: Value },
}

fn cthulhu_edits(sheet: SystemId, edits: Vec<SheetEdit>) -> Result<Vec<CthulhuEdit>, DomainError> {
    edits
        .into_iter()
        .map(|edit| match edit {
            SheetEdit::Cthulhu(edit) => Ok(edit),
            other => Err(DomainError::SystemMismatch {
                sheet,
                edit: other.family(),
            }),
        })
        .collect()
}

fn sw25_edits(sheet: SystemId, edits: Vec<SheetEdit>) -> Result<Vec<Sw25Edit>, DomainError> {
    edits
        .into_iter()
        .map(|edit| match edit {
            SheetEdit::Sw25(edit) => Ok(edit),
            other => Err(DomainError::SystemMismatch {
                sheet,
                edit: other.family(),
            }),
        })
        .collect()
}

fn shinobigami_edits(
    sheet: SystemId,
    edits: Vec<SheetEdit>,
) -> Result<Vec<ShinobigamiEdit>, DomainError> {
    edits
        .into_iter()
        .map(|edit| match edit {
            SheetEdit::Shinobigami(edit) => Ok(edit),
            other => Err(DomainError::SystemMismatch {
                sheet,
                edit: other.family(),
            }),
        })
        .collect()
}

// =============================================================================
// Transitions
// =============================================================================

/// Result of one reducer step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetTransition {
    pub sheet: SheetData,
    pub changes: ChangeSet,
}

impl SheetTransition {
    fn between(before: &SheetData, after: SheetData) -> Self {
        let mut changes = ChangeSet::between(&before.data_value(), &after.data_value());
        if before.system() != after.system() {
            changes.paths.insert(0, "system".to_string());
        }
        Self {
            sheet: after,
            changes,
        }
    }
}

/// Dotted paths whose values differ between two sheets.
///
/// Objects are descended two levels (`attributes.HP`); arrays are compared
/// whole (`skills`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    paths: Vec<String>,
}

const CHANGE_DEPTH: usize = 2;

impl ChangeSet {
    pub fn between(before: &Value, after: &Value) -> Self {
        let mut paths = Vec::new();
        collect_changes("", before, after, 0, &mut paths);
        Self { paths }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn collect_changes(prefix: &str, before: &Value, after: &Value, depth: usize, out: &mut Vec<String>) {
    if before == after {
        return;
    }
    match (before, after) {
        (Value::Object(a), Value::Object(b)) if depth < CHANGE_DEPTH => {
            let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
            for key in keys {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_changes(
                    &path,
                    a.get(key).unwrap_or(&Value::Null),
                    b.get(key).unwrap_or(&Value::Null),
                    depth + 1,
                    out,
                );
            }
        }
        _ => out.push(prefix.to_string()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_systems::cthulhu::{CthulhuAttribute, Resource};
    use crate::game_systems::sw25::Sw25Attribute;
    use serde_json::json;

    fn investigator() -> SheetData {
        SheetData::normalize(
            SystemId::Cthulhu6,
            &json!({
                "attributes": { "STR": 10, "CON": 12, "POW": 11, "SIZ": 14, "EDU": 12, "INT": 13 },
                "derived": { "HP_current": 5 }
            }),
        )
    }

    #[test]
    fn serializes_with_system_tag() {
        let json = serde_json::to_value(SheetData::create(SystemId::Sw25)).unwrap();
        assert_eq!(json["system"], "sw25");
        assert_eq!(json["data"]["initialExperiencePoints"], 3000);
    }

    #[test]
    fn stored_shape_round_trips() {
        let sheet = investigator();
        let stored = serde_json::to_value(&sheet).unwrap();
        assert_eq!(SheetData::from_stored(&stored).unwrap(), sheet);
    }

    #[test]
    fn stored_legacy_id_loads_as_sixth_edition() {
        let sheet = SheetData::from_stored(&json!({ "system": "cthulhu", "data": {} })).unwrap();
        assert_eq!(sheet.system(), SystemId::Cthulhu6);
        assert!(SheetData::from_stored(&json!({ "data": {} })).is_err());
    }

    #[test]
    fn apply_reports_changed_paths_and_keeps_current() {
        let before = investigator();
        let transition = before
            .apply(vec![SheetEdit::Cthulhu(CthulhuEdit::SetAttribute {
                attribute: CthulhuAttribute::Con,
                value: 16,
            })])
            .unwrap();

        assert!(transition.changes.contains("attributes.CON"));
        assert!(transition.changes.contains("derived.HP_max"));
        assert!(!transition.changes.contains("derived.HP_current"));
        match &transition.sheet {
            SheetData::Cthulhu6(sheet) => {
                assert_eq!(sheet.derived().max(Resource::Hp), 15);
                assert_eq!(sheet.derived().current(Resource::Hp), 5);
            }
            other => panic!("unexpected system: {:?}", other.system()),
        }
    }

    #[test]
    fn mismatched_edit_is_rejected_without_change() {
        let before = investigator();
        let err = before
            .apply(vec![SheetEdit::Sw25(Sw25Edit::SetInitial {
                attribute: Sw25Attribute::Agility,
                value: 7,
            })])
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::SystemMismatch {
                sheet: SystemId::Cthulhu6,
                edit: "sw25",
            }
        );
        assert_eq!(before, investigator());
    }

    #[test]
    fn replace_loads_another_system() {
        let transition = investigator()
            .reduce(SheetCommand::Replace {
                system: SystemId::Shinobigami,
                raw: json!({ "school": "斜歯忍軍" }),
            })
            .unwrap();
        assert_eq!(transition.sheet.system(), SystemId::Shinobigami);
        assert_eq!(transition.changes.paths()[0], "system");
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let transition = investigator().apply(Vec::new()).unwrap();
        assert!(transition.changes.is_empty());
        assert_eq!(transition.sheet, investigator());
    }

    #[test]
    fn change_set_treats_arrays_as_leaves() {
        let before = json!({ "skills": [1, 2], "attributes": { "HP": 3, "nested": { "a": 1 } } });
        let after = json!({ "skills": [1, 3], "attributes": { "HP": 3, "nested": { "a": 2 } } });
        let changes = ChangeSet::between(&before, &after);
        assert_eq!(changes.paths(), ["attributes.nested", "skills"]);
    }
}
