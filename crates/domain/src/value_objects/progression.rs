//! Experience cost tables and the progression ledger.

use serde::{Deserialize, Serialize};

/// Cumulative experience cost of reaching `level` in a class using `table`.
///
/// `table[n]` is the cost of the step from level `n` to `n + 1`. Levels past the
/// end of the table cost 0, and so do levels below 1.
pub fn experience_cost(level: i32, table: &[i32]) -> i32 {
    let Ok(level) = usize::try_from(level) else {
        return 0;
    };
    if level > table.len() {
        return 0;
    }
    table[..level]
        .iter()
        .fold(0i32, |acc, step| acc.saturating_add(*step))
}

/// Experience available against experience spent on classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionLedger {
    pub initial: i32,
    pub gained: i32,
    pub used: i32,
}

impl ProgressionLedger {
    pub fn available(&self) -> i32 {
        self.initial.saturating_add(self.gained)
    }

    /// May be negative; callers surface it rather than clamp it.
    pub fn remaining(&self) -> i32 {
        self.available().saturating_sub(self.used)
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining() < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [i32; 5] = [1000, 1000, 1500, 1500, 2000];

    #[test]
    fn cost_is_sum_of_first_level_steps() {
        assert_eq!(experience_cost(1, &TABLE), 1000);
        assert_eq!(experience_cost(3, &TABLE), 3500); // 1000 + 1000 + 1500
        assert_eq!(experience_cost(5, &TABLE), 7000);
    }

    #[test]
    fn level_zero_and_negative_cost_nothing() {
        assert_eq!(experience_cost(0, &TABLE), 0);
        assert_eq!(experience_cost(-2, &TABLE), 0);
    }

    #[test]
    fn level_past_table_falls_back_to_zero() {
        assert_eq!(experience_cost(6, &TABLE), 0);
    }

    #[test]
    fn remaining_can_go_negative() {
        let ledger = ProgressionLedger {
            initial: 3000,
            gained: 500,
            used: 4000,
        };
        assert_eq!(ledger.available(), 3500);
        assert_eq!(ledger.remaining(), -500);
        assert!(ledger.is_overspent());
    }
}
