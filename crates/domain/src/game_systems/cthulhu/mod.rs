//! Cthulhu-style investigator sheets (6th and 7th edition).
//!
//! Both editions share one sheet shape. The edition decides the derived-stat
//! formulas, which built-in skills have governed bases, the skill-point
//! budget multipliers and whether LUK is rolled.

mod derived;
mod skills;

pub use derived::{move_rate, seventh_damage_bonus, sixth_damage_bonus};
pub use skills::{default_combat_skills, default_skills, MELEE_SPECIALTIES, RANGED_SPECIALTIES};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ledger::SheetLedger;
use super::raw::Raw;
use super::traits::{AbilityRoll, RollTarget, RuleSystem};
use super::SystemId;
use crate::entities::{Skill, SkillPoint};
use crate::error::DomainError;
use crate::value_objects::{PointBudget, PointLimits, PointUsage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    Sixth,
    Seventh,
}

/// Characteristics, keyed the way sheets store them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CthulhuAttribute {
    Str,
    Con,
    Pow,
    Dex,
    App,
    Int,
    Edu,
    Siz,
    Luk,
}

impl CthulhuAttribute {
    pub fn key(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Con => "CON",
            Self::Pow => "POW",
            Self::Dex => "DEX",
            Self::App => "APP",
            Self::Int => "INT",
            Self::Edu => "EDU",
            Self::Siz => "SIZ",
            Self::Luk => "LUK",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CthulhuAttributes {
    #[serde(rename = "STR")]
    pub strength: i32,
    #[serde(rename = "CON")]
    pub constitution: i32,
    #[serde(rename = "POW")]
    pub power: i32,
    #[serde(rename = "DEX")]
    pub dexterity: i32,
    #[serde(rename = "APP")]
    pub appearance: i32,
    #[serde(rename = "INT")]
    pub intelligence: i32,
    #[serde(rename = "EDU")]
    pub education: i32,
    #[serde(rename = "SIZ")]
    pub size: i32,
    /// 7th edition only.
    #[serde(rename = "LUK", skip_serializing_if = "Option::is_none")]
    pub luck: Option<i32>,
}

impl CthulhuAttributes {
    pub fn get(&self, attribute: CthulhuAttribute) -> Option<i32> {
        match attribute {
            CthulhuAttribute::Str => Some(self.strength),
            CthulhuAttribute::Con => Some(self.constitution),
            CthulhuAttribute::Pow => Some(self.power),
            CthulhuAttribute::Dex => Some(self.dexterity),
            CthulhuAttribute::App => Some(self.appearance),
            CthulhuAttribute::Int => Some(self.intelligence),
            CthulhuAttribute::Edu => Some(self.education),
            CthulhuAttribute::Siz => Some(self.size),
            CthulhuAttribute::Luk => self.luck,
        }
    }

    fn set(&mut self, attribute: CthulhuAttribute, value: i32) {
        match attribute {
            CthulhuAttribute::Str => self.strength = value,
            CthulhuAttribute::Con => self.constitution = value,
            CthulhuAttribute::Pow => self.power = value,
            CthulhuAttribute::Dex => self.dexterity = value,
            CthulhuAttribute::App => self.appearance = value,
            CthulhuAttribute::Int => self.intelligence = value,
            CthulhuAttribute::Edu => self.education = value,
            CthulhuAttribute::Siz => self.size = value,
            CthulhuAttribute::Luk => self.luck = Some(value),
        }
    }
}

/// Derived block. Only the three current values are ever set from outside
/// recomputation, and only through [`CthulhuEdit::SetCurrent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CthulhuDerived {
    #[serde(rename = "SAN_current")]
    pub(crate) san_current: i32,
    #[serde(rename = "SAN_max")]
    pub(crate) san_max: i32,
    #[serde(rename = "HP_current")]
    pub(crate) hp_current: i32,
    #[serde(rename = "HP_max")]
    pub(crate) hp_max: i32,
    #[serde(rename = "MP_current")]
    pub(crate) mp_current: i32,
    #[serde(rename = "MP_max")]
    pub(crate) mp_max: i32,
    #[serde(rename = "IDEA")]
    pub(crate) idea: i32,
    #[serde(rename = "KNOW")]
    pub(crate) know: i32,
    #[serde(rename = "LUCK")]
    pub(crate) luck: i32,
    #[serde(rename = "DB")]
    pub(crate) damage_bonus: String,
    #[serde(rename = "BUILD", skip_serializing_if = "Option::is_none")]
    pub(crate) build: Option<i32>,
    #[serde(rename = "MOV", skip_serializing_if = "Option::is_none")]
    pub(crate) mov: Option<i32>,
}

impl CthulhuDerived {
    pub fn current(&self, resource: Resource) -> i32 {
        match resource {
            Resource::San => self.san_current,
            Resource::Hp => self.hp_current,
            Resource::Mp => self.mp_current,
        }
    }

    pub fn max(&self, resource: Resource) -> i32 {
        match resource {
            Resource::San => self.san_max,
            Resource::Hp => self.hp_max,
            Resource::Mp => self.mp_max,
        }
    }

    pub fn idea(&self) -> i32 {
        self.idea
    }

    pub fn know(&self) -> i32 {
        self.know
    }

    pub fn luck(&self) -> i32 {
        self.luck
    }

    pub fn damage_bonus(&self) -> &str {
        &self.damage_bonus
    }

    pub fn build(&self) -> Option<i32> {
        self.build
    }

    pub fn mov(&self) -> Option<i32> {
        self.mov
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CthulhuWeapon {
    pub name: String,
    pub value: String,
    pub damage: String,
    pub range: String,
    pub attacks: String,
    pub ammo: i32,
    pub malfunction: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CthulhuItem {
    pub name: String,
    pub quantity: i32,
    pub detail: String,
}

/// Scenario, tome, spell, artifact or entity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MythosEntry {
    pub name: String,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CthulhuSheet {
    pub player_name: String,
    pub occupation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub gender: String,
    pub birthplace: String,
    pub school_degree: String,
    pub attributes: CthulhuAttributes,
    pub(crate) derived: CthulhuDerived,
    pub skills: Vec<Skill>,
    pub combat_skills: Vec<Skill>,
    pub custom_skills: Vec<Skill>,
    pub weapons: Vec<CthulhuWeapon>,
    pub items: Vec<CthulhuItem>,
    pub cash: String,
    pub assets: String,
    pub backstory: String,
    pub notes: String,
    pub scenarios: Vec<MythosEntry>,
    pub mythos_books: Vec<MythosEntry>,
    pub spells: Vec<MythosEntry>,
    pub artifacts: Vec<MythosEntry>,
    pub encountered_entities: Vec<MythosEntry>,
}

impl CthulhuSheet {
    pub fn derived(&self) -> &CthulhuDerived {
        &self.derived
    }

    /// Built-in, combat and custom skills in that order.
    pub fn all_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills
            .iter()
            .chain(&self.combat_skills)
            .chain(&self.custom_skills)
    }

    pub fn list(&self, list: SkillList) -> &[Skill] {
        match list {
            SkillList::General => &self.skills,
            SkillList::Combat => &self.combat_skills,
            SkillList::Custom => &self.custom_skills,
        }
    }

    fn list_mut(&mut self, list: SkillList) -> &mut Vec<Skill> {
        match list {
            SkillList::General => &mut self.skills,
            SkillList::Combat => &mut self.combat_skills,
            SkillList::Custom => &mut self.custom_skills,
        }
    }

    fn skill_mut(&mut self, list: SkillList, index: usize) -> Result<&mut Skill, DomainError> {
        self.list_mut(list)
            .get_mut(index)
            .ok_or_else(|| DomainError::not_found("Skill", format!("{}[{}]", list.key(), index)))
    }

    fn profile_mut(&mut self, field: CthulhuProfile) -> &mut String {
        match field {
            CthulhuProfile::PlayerName => &mut self.player_name,
            CthulhuProfile::Occupation => &mut self.occupation,
            CthulhuProfile::Gender => &mut self.gender,
            CthulhuProfile::Birthplace => &mut self.birthplace,
            CthulhuProfile::SchoolDegree => &mut self.school_degree,
            CthulhuProfile::Backstory => &mut self.backstory,
            CthulhuProfile::Notes => &mut self.notes,
            CthulhuProfile::Cash => &mut self.cash,
            CthulhuProfile::Assets => &mut self.assets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    San,
    Hp,
    Mp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillList {
    General,
    Combat,
    Custom,
}

impl SkillList {
    pub fn key(self) -> &'static str {
        match self {
            Self::General => "skills",
            Self::Combat => "combatSkills",
            Self::Custom => "customSkills",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CthulhuProfile {
    PlayerName,
    Occupation,
    Gender,
    Birthplace,
    SchoolDegree,
    Backstory,
    Notes,
    Cash,
    Assets,
}

/// Root-input edits on an investigator sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CthulhuEdit {
    SetAttribute {
        attribute: CthulhuAttribute,
        value: i32,
    },
    SetCurrent {
        resource: Resource,
        value: i32,
    },
    SetSkillPoints {
        list: SkillList,
        index: usize,
        pool: SkillPoint,
        value: i32,
    },
    SetSkillSpecialty {
        list: SkillList,
        index: usize,
        specialty: String,
    },
    /// Bases of built-in skills are fixed or governed; only custom ones move.
    SetCustomSkillBase {
        index: usize,
        value: i32,
    },
    AddCustomSkill {
        name: String,
        base_value: i32,
    },
    RemoveSkill {
        list: SkillList,
        index: usize,
    },
    SetProfile {
        field: CthulhuProfile,
        value: String,
    },
    SetAge(Option<i32>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CthulhuSystem {
    edition: Edition,
}

impl CthulhuSystem {
    pub const fn sixth() -> Self {
        Self {
            edition: Edition::Sixth,
        }
    }

    pub const fn seventh() -> Self {
        Self {
            edition: Edition::Seventh,
        }
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// Job points from EDU, interest points from INT.
    pub fn point_limits(&self, attributes: &CthulhuAttributes) -> PointLimits {
        let (job_multiplier, interest_multiplier) = match self.edition {
            Edition::Sixth => (20, 10),
            Edition::Seventh => (4, 2),
        };
        PointLimits::from_attributes(
            attributes.education,
            job_multiplier,
            attributes.intelligence,
            interest_multiplier,
        )
    }

    pub fn point_budget(&self, sheet: &CthulhuSheet) -> PointBudget {
        let usage = PointUsage::sum(
            sheet
                .all_skills()
                .map(|skill| (skill.points(SkillPoint::Job), skill.points(SkillPoint::Interest))),
        );
        PointBudget::new(usage, self.point_limits(&sheet.attributes))
    }

    fn characteristics(&self, sheet: &CthulhuSheet) -> derived::Characteristics {
        let a = &sheet.attributes;
        derived::Characteristics {
            strength: a.strength,
            constitution: a.constitution,
            power: a.power,
            dexterity: a.dexterity,
            intelligence: a.intelligence,
            education: a.education,
            size: a.size,
            luck: a.luck.unwrap_or(0),
            age: sheet.age,
        }
    }
}

fn read_skill(raw: Raw<'_>, custom: bool) -> Skill {
    let mut skill = Skill::new(raw.text("name"), raw.int_or("baseValue", 0)).with_points(
        raw.int_or("jobPoints", 0),
        raw.int_or("interestPoints", 0),
        raw.int_or("growth", 0),
        raw.int_or("other", 0),
    );
    if let Some(specialty) = raw.opt_text("specialty") {
        skill = skill.with_specialty(specialty);
    }
    skill.is_custom = custom || raw.flag("isCustom");
    skill
}

fn read_entries(raw: &Raw<'_>, key: &str) -> Vec<MythosEntry> {
    raw.list(key)
        .map(|r| MythosEntry {
            name: r.text("name"),
            memo: r.text("memo"),
        })
        .collect()
}

impl RuleSystem for CthulhuSystem {
    type Sheet = CthulhuSheet;
    type Edit = CthulhuEdit;

    fn system_id(&self) -> SystemId {
        match self.edition {
            Edition::Sixth => SystemId::Cthulhu6,
            Edition::Seventh => SystemId::Cthulhu7,
        }
    }

    fn normalize(&self, raw: &Value) -> CthulhuSheet {
        let raw = Raw::new(raw);
        let attrs = raw.object("attributes");
        let attributes = CthulhuAttributes {
            strength: attrs.int_or("STR", 0),
            constitution: attrs.int_or("CON", 0),
            power: attrs.int_or("POW", 0),
            dexterity: attrs.int_or("DEX", 0),
            appearance: attrs.int_or("APP", 0),
            intelligence: attrs.int_or("INT", 0),
            education: attrs.int_or("EDU", 0),
            size: attrs.int_or("SIZ", 0),
            luck: match self.edition {
                Edition::Sixth => None,
                Edition::Seventh => Some(attrs.int_or("LUK", 0)),
            },
        };

        let derived = raw.object("derived");
        let san_current = derived.int("SAN_current");
        let hp_current = derived.int("HP_current");
        let mp_current = derived.int("MP_current");

        let sheet = CthulhuSheet {
            player_name: raw.text("playerName"),
            occupation: raw.text("occupation"),
            age: raw.int("age"),
            gender: raw.text("gender"),
            birthplace: raw.text("birthplace"),
            school_degree: raw.text("schoolDegree"),
            attributes,
            derived: CthulhuDerived::default(),
            skills: raw.list("skills").map(|r| read_skill(r, false)).collect(),
            combat_skills: raw
                .list("combatSkills")
                .map(|r| read_skill(r, false))
                .collect(),
            custom_skills: raw
                .list("customSkills")
                .map(|r| read_skill(r, true))
                .collect(),
            weapons: raw
                .list("weapons")
                .map(|r| CthulhuWeapon {
                    name: r.text("name"),
                    value: r.text("value"),
                    damage: r.text("damage"),
                    range: r.text("range"),
                    attacks: r.text("attacks"),
                    ammo: r.int_or("ammo", 0),
                    malfunction: r.int_or("malfunction", 0),
                    durability: r.opt_text("durability"),
                })
                .collect(),
            items: raw
                .list("items")
                .map(|r| CthulhuItem {
                    name: r.text("name"),
                    quantity: r.int_or("quantity", 0),
                    detail: r.text("detail"),
                })
                .collect(),
            cash: raw.text("cash"),
            assets: raw.text("assets"),
            backstory: raw.text("backstory"),
            notes: raw.text("notes"),
            scenarios: read_entries(&raw, "scenarios"),
            mythos_books: read_entries(&raw, "mythosBooks"),
            spells: read_entries(&raw, "spells"),
            artifacts: read_entries(&raw, "artifacts"),
            encountered_entities: read_entries(&raw, "encounteredEntities"),
        };

        let mut sheet = self.recompute(sheet);
        // Currents start at max only when the input has none.
        sheet.derived.san_current = san_current.unwrap_or(sheet.derived.san_max);
        sheet.derived.hp_current = hp_current.unwrap_or(sheet.derived.hp_max);
        sheet.derived.mp_current = mp_current.unwrap_or(sheet.derived.mp_max);
        sheet
    }

    fn create(&self) -> CthulhuSheet {
        let mut sheet = self.normalize(&Value::Null);
        sheet.skills = default_skills(self.edition);
        sheet.combat_skills = default_combat_skills(self.edition);
        self.recompute(sheet)
    }

    /// Governed skill bases follow the characteristics.
    fn derive_attributes(&self, mut sheet: CthulhuSheet) -> CthulhuSheet {
        let attributes = sheet.attributes.clone();
        for list in [&mut sheet.skills, &mut sheet.combat_skills] {
            skills::apply_governed_bases(self.edition, list, &attributes);
        }
        sheet
    }

    fn derive_stats(&self, mut sheet: CthulhuSheet) -> CthulhuSheet {
        let m = derived::maxima(self.edition, &self.characteristics(&sheet));
        let d = &mut sheet.derived;
        d.san_max = m.san_max;
        d.hp_max = m.hp_max;
        d.mp_max = m.mp_max;
        d.idea = m.idea;
        d.know = m.know;
        d.luck = m.luck;
        d.damage_bonus = m.damage_bonus;
        d.build = m.build;
        d.mov = m.mov;
        sheet
    }

    fn ledger(&self, sheet: &CthulhuSheet) -> SheetLedger {
        SheetLedger::SkillPoints {
            budget: self.point_budget(sheet),
        }
    }

    fn assign(&self, sheet: &mut CthulhuSheet, edit: CthulhuEdit) -> Result<(), DomainError> {
        match edit {
            CthulhuEdit::SetAttribute { attribute, value } => {
                if attribute == CthulhuAttribute::Luk && self.edition == Edition::Sixth {
                    return Err(DomainError::validation(
                        "LUK is not a 6th edition characteristic",
                    ));
                }
                sheet.attributes.set(attribute, value);
            }
            CthulhuEdit::SetCurrent { resource, value } => {
                let d = &mut sheet.derived;
                match resource {
                    Resource::San => d.san_current = value,
                    Resource::Hp => d.hp_current = value,
                    Resource::Mp => d.mp_current = value,
                }
            }
            CthulhuEdit::SetSkillPoints {
                list,
                index,
                pool,
                value,
            } => sheet.skill_mut(list, index)?.set_points(pool, value),
            CthulhuEdit::SetSkillSpecialty {
                list,
                index,
                specialty,
            } => {
                let skill = sheet.skill_mut(list, index)?;
                skill.specialty = (!specialty.is_empty()).then_some(specialty);
            }
            CthulhuEdit::SetCustomSkillBase { index, value } => {
                sheet
                    .skill_mut(SkillList::Custom, index)?
                    .set_base_value(value);
            }
            CthulhuEdit::AddCustomSkill { name, base_value } => {
                if name.trim().is_empty() {
                    return Err(DomainError::validation("custom skill name is empty"));
                }
                sheet.custom_skills.push(Skill::custom(name, base_value));
            }
            CthulhuEdit::RemoveSkill { list, index } => {
                let skills = sheet.list_mut(list);
                if index >= skills.len() {
                    return Err(DomainError::not_found(
                        "Skill",
                        format!("{}[{}]", list.key(), index),
                    ));
                }
                skills.remove(index);
            }
            CthulhuEdit::SetProfile { field, value } => *sheet.profile_mut(field) = value,
            CthulhuEdit::SetAge(age) => sheet.age = age,
        }
        Ok(())
    }

    fn validate_for_save(&self, sheet: &CthulhuSheet) -> Result<(), DomainError> {
        self.point_budget(sheet).ensure_within()
    }

    fn roll_plan(&self, _sheet: &CthulhuSheet) -> Vec<AbilityRoll> {
        use CthulhuAttribute::*;

        let (plan, multiplier): (&[(CthulhuAttribute, &str)], i32) = match self.edition {
            Edition::Sixth => (
                &[
                    (Str, "3d6"),
                    (Con, "3d6"),
                    (Pow, "3d6"),
                    (Dex, "3d6"),
                    (App, "3d6"),
                    (Siz, "2d6+6"),
                    (Int, "2d6+6"),
                    (Edu, "3d6+3"),
                ],
                1,
            ),
            Edition::Seventh => (
                &[
                    (Str, "3d6"),
                    (Con, "3d6"),
                    (Pow, "3d6"),
                    (Dex, "3d6"),
                    (App, "3d6"),
                    (Siz, "2d6+6"),
                    (Int, "2d6+6"),
                    (Edu, "2d6+6"),
                    (Luk, "3d6"),
                ],
                5,
            ),
        };
        plan.iter()
            .map(|(attribute, formula)| {
                AbilityRoll::new(attribute.key(), *formula, RollTarget::Cthulhu(*attribute))
                    .times(multiplier)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sixth_sheet() -> CthulhuSheet {
        CthulhuSystem::sixth().normalize(&json!({
            "attributes": {
                "STR": 12, "CON": 11, "POW": 13, "DEX": 10, "APP": 9,
                "INT": 14, "EDU": 16, "SIZ": 14
            },
            "derived": { "SAN_current": 40, "HP_current": 7 },
            "skills": [
                { "name": "図書館", "baseValue": 25, "jobPoints": 40, "total": 999 },
                { "name": "母国語", "baseValue": 0 }
            ],
            "combatSkills": [{ "name": "回避", "interestPoints": 10 }],
            "customSkills": [{ "name": "ハッキング", "baseValue": 1, "jobPoints": 20 }]
        }))
    }

    #[test]
    fn normalize_fills_every_field() {
        let sheet = CthulhuSystem::seventh().normalize(&json!({}));
        assert_eq!(sheet.attributes.luck, Some(0));
        assert!(sheet.skills.is_empty());
        assert_eq!(sheet.derived().build(), Some(0));

        let json = serde_json::to_value(&sheet).unwrap();
        assert_eq!(json["playerName"], "");
        assert_eq!(json["attributes"]["LUK"], 0);
        assert_eq!(json["derived"]["MOV"], 8);
        assert!(json["mythosBooks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn sixth_edition_has_no_luk_build_or_mov() {
        let sheet = CthulhuSystem::sixth().normalize(&json!({ "attributes": { "LUK": 50 } }));
        let json = serde_json::to_value(&sheet).unwrap();
        assert!(json["attributes"].get("LUK").is_none());
        assert!(json["derived"].get("BUILD").is_none());
        assert!(json["derived"].get("MOV").is_none());
    }

    #[test]
    fn normalize_is_idempotent() {
        let system = CthulhuSystem::seventh();
        let once = system.normalize(&json!({
            "age": 44,
            "attributes": { "STR": 70, "DEX": 60, "SIZ": 50, "EDU": 80, "LUK": 55 },
            "derived": { "HP_current": 3 },
            "combatSkills": [{ "name": "近接戦闘", "specialty": "刀剣", "jobPoints": 30 }],
            "weapons": [{ "name": "ナイフ", "ammo": "x" }, 5]
        }));
        let twice = system.normalize(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn totals_and_governed_bases_are_recomputed() {
        let sheet = sixth_sheet();
        assert_eq!(sheet.skills[0].total(), 65);
        assert_eq!(sheet.skills[1].base_value(), 80); // EDU 16 x 5
        assert_eq!(sheet.combat_skills[0].base_value(), 20); // DEX 10 x 2
        assert_eq!(sheet.combat_skills[0].total(), 30);
        assert!(sheet.custom_skills[0].is_custom);
    }

    #[test]
    fn currents_default_to_max_only_when_absent() {
        let sheet = sixth_sheet();
        let d = sheet.derived();
        assert_eq!(d.current(Resource::San), 40);
        assert_eq!(d.current(Resource::Hp), 7);
        assert_eq!(d.current(Resource::Mp), 13);
        assert_eq!(d.max(Resource::Hp), 13);
    }

    #[test]
    fn raising_con_keeps_current_hp() {
        let system = CthulhuSystem::sixth();
        let sheet = sixth_sheet();
        let next = system
            .apply(
                &sheet,
                vec![CthulhuEdit::SetAttribute {
                    attribute: CthulhuAttribute::Con,
                    value: 17,
                }],
            )
            .unwrap();
        assert_eq!(next.derived().max(Resource::Hp), 16);
        assert_eq!(next.derived().current(Resource::Hp), 7);
    }

    #[test]
    fn edu_change_moves_own_language_before_total() {
        let system = CthulhuSystem::sixth();
        let next = system
            .apply(
                &sixth_sheet(),
                vec![CthulhuEdit::SetAttribute {
                    attribute: CthulhuAttribute::Edu,
                    value: 10,
                }],
            )
            .unwrap();
        assert_eq!(next.skills[1].base_value(), 50);
        assert_eq!(next.skills[1].total(), 50);
    }

    #[test]
    fn budget_counts_all_three_lists() {
        let sheet = sixth_sheet();
        let budget = CthulhuSystem::sixth().point_budget(&sheet);
        assert_eq!(budget.job_total, 60);
        assert_eq!(budget.job_limit, 320);
        assert_eq!(budget.interest_total, 10);
        assert_eq!(budget.interest_limit, 140);
    }

    #[test]
    fn save_rejects_job_points_over_limit() {
        let system = CthulhuSystem::sixth();
        let sheet = system.normalize(&json!({
            "attributes": { "EDU": 10, "INT": 10 },
            "skills": [
                { "name": "図書館", "jobPoints": 150 },
                { "name": "目星", "jobPoints": 51 }
            ]
        }));
        let err = system.validate_for_save(&sheet).unwrap_err();
        let budget = err.point_budget().unwrap();
        assert_eq!((budget.job_total, budget.job_limit), (201, 200));

        let fixed = system
            .apply(
                &sheet,
                vec![CthulhuEdit::SetSkillPoints {
                    list: SkillList::General,
                    index: 1,
                    pool: SkillPoint::Job,
                    value: 50,
                }],
            )
            .unwrap();
        assert!(system.validate_for_save(&fixed).is_ok());
    }

    #[test]
    fn bad_skill_index_leaves_sheet_untouched() {
        let system = CthulhuSystem::sixth();
        let sheet = sixth_sheet();
        let result = system.apply(
            &sheet,
            vec![
                CthulhuEdit::SetAge(Some(30)),
                CthulhuEdit::RemoveSkill {
                    list: SkillList::Custom,
                    index: 4,
                },
            ],
        );
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(sheet.age, None);
    }

    #[test]
    fn luk_is_rejected_on_sixth_edition() {
        let mut sheet = sixth_sheet();
        let result = CthulhuSystem::sixth().assign(
            &mut sheet,
            CthulhuEdit::SetAttribute {
                attribute: CthulhuAttribute::Luk,
                value: 50,
            },
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn creation_uses_default_lists() {
        let sheet = CthulhuSystem::seventh().create();
        assert_eq!(sheet.skills.len(), 48);
        assert_eq!(sheet.combat_skills.len(), 4);
        assert_eq!(sheet.combat_skills[2].label(), "近接戦闘(格闘)");
    }

    #[test]
    fn roll_plans_per_edition() {
        let sixth = CthulhuSystem::sixth().roll_plan(&sixth_sheet());
        assert_eq!(sixth.len(), 8);
        assert!(sixth.iter().all(|r| r.multiplier == 1));
        assert_eq!(sixth[7].formula, "3d6+3");

        let seventh = CthulhuSystem::seventh().roll_plan(&CthulhuSystem::seventh().create());
        assert_eq!(seventh.len(), 9);
        assert!(seventh.iter().all(|r| r.multiplier == 5));
        assert!(seventh.iter().all(|r| r.parse_formula().is_ok()));
        assert_eq!(seventh[8].label, "LUK");
    }
}
