//! Entities shared across rule systems.

mod class_level;
mod skill;

pub use class_level::{adventurer_level, level_of, ClassLevel};
pub use skill::{Skill, SkillPoint};
