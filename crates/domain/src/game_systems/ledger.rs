//! Per-system bookkeeping shown alongside a sheet.

use serde::Serialize;

use crate::value_objects::{PointBudget, ProgressionLedger};

/// Slots used against an optional ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotUsage {
    pub used: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

impl SlotUsage {
    pub fn new(used: usize, limit: Option<i32>) -> Self {
        Self {
            used: i32::try_from(used).unwrap_or(i32::MAX),
            limit,
        }
    }

    pub fn is_over(&self) -> bool {
        self.limit.is_some_and(|limit| self.used > limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SheetLedger {
    #[serde(rename_all = "camelCase")]
    SkillPoints { budget: PointBudget },
    #[serde(rename_all = "camelCase")]
    Experience {
        adventurer_level: i32,
        progression: ProgressionLedger,
        combat_feats: SlotUsage,
    },
    #[serde(rename_all = "camelCase")]
    Slots {
        skills: SlotUsage,
        ninpo: SlotUsage,
        okugi: SlotUsage,
    },
}

impl SheetLedger {
    /// Any advisory limit exceeded.
    pub fn has_warnings(&self) -> bool {
        match self {
            Self::SkillPoints { budget } => budget.is_over_budget(),
            Self::Experience {
                progression,
                combat_feats,
                ..
            } => progression.is_overspent() || combat_feats.is_over(),
            Self::Slots {
                skills,
                ninpo,
                okugi,
            } => skills.is_over() || ninpo.is_over() || okugi.is_over(),
        }
    }
}
