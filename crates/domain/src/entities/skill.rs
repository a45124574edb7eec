//! Percentile skill entry with a ledger-maintained total.
//!
//! The five inputs are only reachable through methods that recompute
//! `total`, so a skill can never hold a stale total.

use serde::Serialize;

/// One of the four point pools a player allocates into a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillPoint {
    Job,
    Interest,
    Growth,
    Other,
}

/// A skill on a percentile sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    base_value: i32,
    job_points: i32,
    interest_points: i32,
    growth: i32,
    other: i32,
    total: i32,
    pub is_custom: bool,
}

impl Skill {
    pub fn new(name: impl Into<String>, base_value: i32) -> Self {
        Self {
            name: name.into(),
            specialty: None,
            base_value,
            job_points: 0,
            interest_points: 0,
            growth: 0,
            other: 0,
            total: base_value,
            is_custom: false,
        }
    }

    /// A player-added skill.
    pub fn custom(name: impl Into<String>, base_value: i32) -> Self {
        let mut skill = Self::new(name, base_value);
        skill.is_custom = true;
        skill
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        let specialty = specialty.into();
        self.specialty = (!specialty.is_empty()).then_some(specialty);
        self
    }

    pub fn with_points(mut self, job: i32, interest: i32, growth: i32, other: i32) -> Self {
        self.job_points = job;
        self.interest_points = interest;
        self.growth = growth;
        self.other = other;
        self.recompute_total();
        self
    }

    pub fn base_value(&self) -> i32 {
        self.base_value
    }

    pub fn job_points(&self) -> i32 {
        self.job_points
    }

    pub fn interest_points(&self) -> i32 {
        self.interest_points
    }

    pub fn growth(&self) -> i32 {
        self.growth
    }

    pub fn other(&self) -> i32 {
        self.other
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn points(&self, pool: SkillPoint) -> i32 {
        match pool {
            SkillPoint::Job => self.job_points,
            SkillPoint::Interest => self.interest_points,
            SkillPoint::Growth => self.growth,
            SkillPoint::Other => self.other,
        }
    }

    pub fn set_points(&mut self, pool: SkillPoint, value: i32) {
        match pool {
            SkillPoint::Job => self.job_points = value,
            SkillPoint::Interest => self.interest_points = value,
            SkillPoint::Growth => self.growth = value,
            SkillPoint::Other => self.other = value,
        }
        self.recompute_total();
    }

    pub fn set_base_value(&mut self, base_value: i32) {
        self.base_value = base_value;
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total = [
            self.base_value,
            self.job_points,
            self.interest_points,
            self.growth,
            self.other,
        ]
        .into_iter()
        .fold(0i32, i32::saturating_add);
    }

    /// Identity used for matching built-in entries: name plus specialty.
    pub fn label(&self) -> String {
        match &self.specialty {
            Some(specialty) => format!("{}({})", self.name, specialty),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_total_law(skill: &Skill) {
        assert_eq!(
            skill.total(),
            skill.base_value()
                + skill.job_points()
                + skill.interest_points()
                + skill.growth()
                + skill.other()
        );
    }

    #[test]
    fn new_skill_total_is_base() {
        let skill = Skill::new("図書館", 25);
        assert_eq!(skill.total(), 25);
        assert!(!skill.is_custom);
    }

    #[test]
    fn total_follows_every_mutation() {
        let mut skill = Skill::new("目星", 25).with_points(30, 10, 2, 1);
        assert_eq!(skill.total(), 68);
        assert_total_law(&skill);

        skill.set_points(SkillPoint::Job, 5);
        assert_eq!(skill.total(), 43);
        assert_total_law(&skill);

        skill.set_base_value(1);
        assert_eq!(skill.total(), 19);
        assert_total_law(&skill);

        skill.set_points(SkillPoint::Other, -10);
        assert_total_law(&skill);
    }

    #[test]
    fn empty_specialty_is_dropped() {
        let skill = Skill::new("芸術", 5).with_specialty("");
        assert_eq!(skill.specialty, None);
        assert_eq!(skill.label(), "芸術");

        let skill = Skill::new("芸術", 5).with_specialty("絵画");
        assert_eq!(skill.label(), "芸術(絵画)");
    }

    #[test]
    fn serializes_stored_shape() {
        let skill = Skill::custom("ハッキング", 1).with_points(10, 0, 0, 0);
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json["baseValue"], 1);
        assert_eq!(json["jobPoints"], 10);
        assert_eq!(json["total"], 11);
        assert_eq!(json["isCustom"], true);
        assert!(json.get("specialty").is_none());
    }
}
