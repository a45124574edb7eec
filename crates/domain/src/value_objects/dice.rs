//! Dice formula value objects and parsing
//!
//! Accepts exactly `NdM` or `NdM+K` / `NdM-K`: a dice count, a lower-case `d`,
//! a side count and an optional flat modifier. Anything else is rejected
//! before a roll service is ever contacted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest dice count the roll service accepts.
pub const MAX_DICE_COUNT: u16 = 1000;
/// Largest die size the roll service accepts.
pub const MAX_DIE_SIZE: u16 = 1000;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected NdM, NdM+K or NdM-K
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be between 1 and 1000
    #[error("Dice count must be between 1 and {MAX_DICE_COUNT}")]
    InvalidDiceCount,
    /// Die size must be between 2 and 1000
    #[error("Die size must be between 2 and {MAX_DIE_SIZE}")]
    InvalidDieSize,
    /// Modifier overflow
    #[error("Modifier value overflow")]
    ModifierOverflow,
}

/// A parsed dice formula like "2d6+6"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceFormula {
    dice_count: u16,
    die_size: u16,
    modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(dice_count: u16, die_size: u16, modifier: i32) -> Result<Self, DiceParseError> {
        if dice_count == 0 || dice_count > MAX_DICE_COUNT {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if !(2..=MAX_DIE_SIZE).contains(&die_size) {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Shorthand for the common `Nd6+K` formulas used by roll plans.
    pub fn d6(dice_count: u16, modifier: i32) -> Result<Self, DiceParseError> {
        Self::new(dice_count, 6, modifier)
    }

    /// Parse a dice formula string like "3d6", "2d6+6", "1d100-5".
    ///
    /// No whitespace, no implicit dice count and no upper-case `D`.
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let (count_str, rest) = input.split_once('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;
        if !is_digits(count_str) {
            return Err(DiceParseError::InvalidFormat(format!(
                "Invalid dice count: '{}'",
                count_str
            )));
        }

        let (size_str, modifier) = match rest.find(['+', '-']) {
            Some(pos) => {
                let (size_str, signed) = rest.split_at(pos);
                let digits = &signed[1..];
                if !is_digits(digits) {
                    return Err(DiceParseError::InvalidFormat(format!(
                        "Invalid modifier: '{}'",
                        signed
                    )));
                }
                let modifier: i32 = signed
                    .parse()
                    .map_err(|_| DiceParseError::ModifierOverflow)?;
                (size_str, modifier)
            }
            None => (rest, 0),
        };
        if !is_digits(size_str) {
            return Err(DiceParseError::InvalidFormat(format!(
                "Invalid die size: '{}'",
                size_str
            )));
        }

        let dice_count: u16 = count_str
            .parse()
            .map_err(|_| DiceParseError::InvalidDiceCount)?;
        let die_size: u16 = size_str
            .parse()
            .map_err(|_| DiceParseError::InvalidDieSize)?;

        Self::new(dice_count, die_size, modifier)
    }

    pub fn dice_count(&self) -> u16 {
        self.dice_count
    }

    pub fn die_size(&self) -> u16 {
        self.die_size
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// The dice part alone (`NdM`), for services that do not take modifiers.
    pub fn dice_notation(&self) -> String {
        format!("{}d{}", self.dice_count, self.die_size)
    }

    /// Roll with an injected die source returning a face in `1..=sides`.
    pub fn roll_with(&self, mut roll_die: impl FnMut(u16) -> i32) -> DiceRollResult {
        let rolls: Vec<i32> = (0..self.dice_count)
            .map(|_| roll_die(self.die_size))
            .collect();
        DiceRollResult::from_rolls(rolls, self.modifier)
    }

    /// Get the minimum possible roll
    pub fn min_roll(&self) -> i32 {
        i32::from(self.dice_count).saturating_add(self.modifier)
    }

    /// Get the maximum possible roll
    pub fn max_roll(&self) -> i32 {
        (i32::from(self.dice_count) * i32::from(self.die_size)).saturating_add(self.modifier)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.dice_count, self.die_size),
            m if m > 0 => write!(f, "{}d{}+{}", self.dice_count, self.die_size, m),
            m => write!(f, "{}d{}{}", self.dice_count, self.die_size, m),
        }
    }
}

impl FromStr for DiceFormula {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceFormula {
    type Error = DiceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DiceFormula> for String {
    fn from(value: DiceFormula) -> Self {
        value.to_string()
    }
}

/// Result of rolling a dice formula: each die face and the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResult {
    pub rolls: Vec<i32>,
    pub total: i32,
}

impl DiceRollResult {
    /// Build a result from die faces plus a flat modifier.
    pub fn from_rolls(rolls: Vec<i32>, modifier: i32) -> Self {
        let total = rolls
            .iter()
            .fold(modifier, |acc, roll| acc.saturating_add(*roll));
        Self { rolls, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let formula = DiceFormula::parse("3d6").unwrap();
        assert_eq!(formula.dice_count(), 3);
        assert_eq!(formula.die_size(), 6);
        assert_eq!(formula.modifier(), 0);
    }

    #[test]
    fn test_parse_with_modifiers() {
        let plus = DiceFormula::parse("2d6+6").unwrap();
        assert_eq!(plus.modifier(), 6);

        let minus = DiceFormula::parse("1d100-5").unwrap();
        assert_eq!(minus.die_size(), 100);
        assert_eq!(minus.modifier(), -5);
    }

    #[test]
    fn test_parse_rejects_loose_forms() {
        for bad in ["d20", "3D6", " 3d6", "3d6 ", "3d", "3d6+", "3d6++1", "3d6+1d4", "x3d6", "3d6*5"] {
            assert!(
                matches!(DiceFormula::parse(bad), Err(DiceParseError::InvalidFormat(_))),
                "{} should be rejected",
                bad
            );
        }
        assert_eq!(DiceFormula::parse(""), Err(DiceParseError::Empty));
    }

    #[test]
    fn test_parse_range_checks() {
        assert_eq!(DiceFormula::parse("0d6"), Err(DiceParseError::InvalidDiceCount));
        assert_eq!(DiceFormula::parse("1001d6"), Err(DiceParseError::InvalidDiceCount));
        assert_eq!(DiceFormula::parse("1d1"), Err(DiceParseError::InvalidDieSize));
        assert_eq!(DiceFormula::parse("1d1001"), Err(DiceParseError::InvalidDieSize));
        assert_eq!(
            DiceFormula::parse("1d6+99999999999"),
            Err(DiceParseError::ModifierOverflow)
        );
    }

    #[test]
    fn test_display_matches_input() {
        for text in ["3d6", "2d6+6", "1d10-2"] {
            assert_eq!(DiceFormula::parse(text).unwrap().to_string(), text);
        }
        assert_eq!(DiceFormula::parse("3d6+3").unwrap().dice_notation(), "3d6");
    }

    #[test]
    fn test_roll_with_injected_dice() {
        let formula = DiceFormula::parse("3d6+3").unwrap();
        let result = formula.roll_with(|_| 4);
        assert_eq!(result.rolls, vec![4, 4, 4]);
        assert_eq!(result.total, 15);
    }

    #[test]
    fn test_min_max() {
        let formula = DiceFormula::d6(2, 6).unwrap();
        assert_eq!(formula.min_roll(), 8);
        assert_eq!(formula.max_roll(), 18);
    }

    #[test]
    fn test_serde_as_string() {
        let formula = DiceFormula::parse("2d6+6").unwrap();
        assert_eq!(serde_json::to_value(formula).unwrap(), serde_json::json!("2d6+6"));
        let parsed: DiceFormula = serde_json::from_value(serde_json::json!("1d4")).unwrap();
        assert_eq!(parsed.die_size(), 4);
        assert!(serde_json::from_value::<DiceFormula>(serde_json::json!("1d")).is_err());
    }
}
