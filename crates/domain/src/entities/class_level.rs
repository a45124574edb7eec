//! Acquired class levels.

use serde::Serialize;

/// A class (skill discipline) and the level held in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassLevel {
    pub name: String,
    pub level: i32,
}

impl ClassLevel {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// Highest single class level held, 0 when nothing is held.
pub fn adventurer_level(classes: &[ClassLevel]) -> i32 {
    classes.iter().map(|c| c.level).fold(0, i32::max)
}

/// Level held in the named class, 0 when absent.
pub fn level_of(classes: &[ClassLevel], name: &str) -> i32 {
    classes
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.level)
        .unwrap_or(0)
}
