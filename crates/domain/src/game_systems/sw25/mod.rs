//! Sword World 2.5 adventurer sheets.
//!
//! Three abilities (技 体 心) each feed two attributes. Attributes plus the
//! acquired classes drive every derived stat; the adventurer level is the
//! highest single class level.

mod data;

pub use data::{
    birth_available, class_category, experience_table, initial_formula, race, race_modifier,
    ClassCategory, RaceData, EXPERIENCE_TABLE_A, EXPERIENCE_TABLE_B, RACES,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ledger::{SheetLedger, SlotUsage};
use super::raw::Raw;
use super::traits::{AbilityRoll, RollTarget, RuleSystem};
use super::SystemId;
use crate::entities::{adventurer_level, level_of, ClassLevel};
use crate::error::DomainError;
use crate::value_objects::{experience_cost, ProgressionLedger};

pub const DEFAULT_INITIAL_EXPERIENCE: i32 = 3000;

/// Bonus of an attribute: one point per full six.
pub fn bonus(value: i32) -> i32 {
    value.div_euclid(6)
}

/// Combat feats learnable at an adventurer level.
pub fn combat_feat_slots(adventurer_level: i32) -> i32 {
    (adventurer_level + 1).div_euclid(2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sw25Ability {
    #[serde(rename = "技")]
    Technique,
    #[serde(rename = "体")]
    Body,
    #[serde(rename = "心")]
    Mind,
}

impl Sw25Ability {
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Technique => 0,
            Self::Body => 1,
            Self::Mind => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sw25Attribute {
    #[serde(rename = "器用度")]
    Dexterity,
    #[serde(rename = "敏捷度")]
    Agility,
    #[serde(rename = "筋力")]
    Strength,
    #[serde(rename = "生命力")]
    Vitality,
    #[serde(rename = "知力")]
    Intelligence,
    #[serde(rename = "精神力")]
    Spirit,
}

impl Sw25Attribute {
    pub const ALL: [Self; 6] = [
        Self::Dexterity,
        Self::Agility,
        Self::Strength,
        Self::Vitality,
        Self::Intelligence,
        Self::Spirit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Dexterity => "器用度",
            Self::Agility => "敏捷度",
            Self::Strength => "筋力",
            Self::Vitality => "生命力",
            Self::Intelligence => "知力",
            Self::Spirit => "精神力",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Dexterity => 0,
            Self::Agility => 1,
            Self::Strength => 2,
            Self::Vitality => 3,
            Self::Intelligence => 4,
            Self::Spirit => 5,
        }
    }

    /// Ability this attribute grows from.
    pub fn ability(self) -> Sw25Ability {
        match self {
            Self::Dexterity | Self::Agility => Sw25Ability::Technique,
            Self::Strength | Self::Vitality => Sw25Ability::Body,
            Self::Intelligence | Self::Spirit => Sw25Ability::Mind,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sw25Abilities {
    #[serde(rename = "技")]
    pub technique: i32,
    #[serde(rename = "体")]
    pub body: i32,
    #[serde(rename = "心")]
    pub mind: i32,
}

impl Sw25Abilities {
    pub fn get(&self, ability: Sw25Ability) -> i32 {
        match ability {
            Sw25Ability::Technique => self.technique,
            Sw25Ability::Body => self.body,
            Sw25Ability::Mind => self.mind,
        }
    }

    fn set(&mut self, ability: Sw25Ability, value: i32) {
        match ability {
            Sw25Ability::Technique => self.technique = value,
            Sw25Ability::Body => self.body = value,
            Sw25Ability::Mind => self.mind = value,
        }
    }
}

/// One value per attribute; used for initials, growth and the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttributeValues {
    #[serde(rename = "器用度")]
    pub dexterity: i32,
    #[serde(rename = "敏捷度")]
    pub agility: i32,
    #[serde(rename = "筋力")]
    pub strength: i32,
    #[serde(rename = "生命力")]
    pub vitality: i32,
    #[serde(rename = "知力")]
    pub intelligence: i32,
    #[serde(rename = "精神力")]
    pub spirit: i32,
}

impl AttributeValues {
    pub fn get(&self, attribute: Sw25Attribute) -> i32 {
        match attribute {
            Sw25Attribute::Dexterity => self.dexterity,
            Sw25Attribute::Agility => self.agility,
            Sw25Attribute::Strength => self.strength,
            Sw25Attribute::Vitality => self.vitality,
            Sw25Attribute::Intelligence => self.intelligence,
            Sw25Attribute::Spirit => self.spirit,
        }
    }

    fn set(&mut self, attribute: Sw25Attribute, value: i32) {
        match attribute {
            Sw25Attribute::Dexterity => self.dexterity = value,
            Sw25Attribute::Agility => self.agility = value,
            Sw25Attribute::Strength => self.strength = value,
            Sw25Attribute::Vitality => self.vitality = value,
            Sw25Attribute::Intelligence => self.intelligence = value,
            Sw25Attribute::Spirit => self.spirit = value,
        }
    }

    fn read(raw: Raw<'_>) -> Self {
        let mut values = Self::default();
        for attribute in Sw25Attribute::ALL {
            values.set(attribute, raw.int_or(attribute.key(), 0));
        }
        values
    }
}

/// Computed attribute set. Nothing in here is user-editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sw25Attributes {
    #[serde(flatten)]
    pub(crate) values: AttributeValues,
    #[serde(rename = "HP")]
    pub(crate) hp: i32,
    #[serde(rename = "MP")]
    pub(crate) mp: i32,
    #[serde(rename = "生命抵抗力")]
    pub(crate) vitality_resistance: i32,
    #[serde(rename = "精神抵抗力")]
    pub(crate) spirit_resistance: i32,
    #[serde(rename = "移動力")]
    pub(crate) movement: i32,
    #[serde(rename = "全力移動")]
    pub(crate) full_movement: i32,
    #[serde(rename = "防護点")]
    pub(crate) armor_value: i32,
    #[serde(rename = "先制力", skip_serializing_if = "Option::is_none")]
    pub(crate) initiative: Option<i32>,
    #[serde(rename = "魔物知識", skip_serializing_if = "Option::is_none")]
    pub(crate) monster_knowledge: Option<i32>,
    #[serde(rename = "命中力")]
    pub(crate) accuracy: Vec<i32>,
    #[serde(rename = "回避力")]
    pub(crate) evasion: Vec<i32>,
    #[serde(rename = "追加ダメージ")]
    pub(crate) extra_damage: Vec<i32>,
    #[serde(rename = "魔力")]
    pub(crate) magic_power: Vec<i32>,
    #[serde(rename = "技巧")]
    pub(crate) finesse: Vec<i32>,
    #[serde(rename = "運動")]
    pub(crate) athletics: Vec<i32>,
    #[serde(rename = "観察")]
    pub(crate) observation: Vec<i32>,
    #[serde(rename = "知識")]
    pub(crate) knowledge: Vec<i32>,
}

impl Sw25Attributes {
    pub fn value(&self, attribute: Sw25Attribute) -> i32 {
        self.values.get(attribute)
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn mp(&self) -> i32 {
        self.mp
    }

    pub fn vitality_resistance(&self) -> i32 {
        self.vitality_resistance
    }

    pub fn spirit_resistance(&self) -> i32 {
        self.spirit_resistance
    }

    pub fn movement(&self) -> i32 {
        self.movement
    }

    pub fn full_movement(&self) -> i32 {
        self.full_movement
    }

    pub fn armor_value(&self) -> i32 {
        self.armor_value
    }

    /// Present only while スカウト is held.
    pub fn initiative(&self) -> Option<i32> {
        self.initiative
    }

    /// Present only while セージ is held.
    pub fn monster_knowledge(&self) -> Option<i32> {
        self.monster_knowledge
    }

    pub fn accuracy(&self) -> &[i32] {
        &self.accuracy
    }

    pub fn evasion(&self) -> &[i32] {
        &self.evasion
    }

    pub fn extra_damage(&self) -> &[i32] {
        &self.extra_damage
    }

    pub fn magic_power(&self) -> &[i32] {
        &self.magic_power
    }

    pub fn finesse(&self) -> &[i32] {
        &self.finesse
    }

    pub fn athletics(&self) -> &[i32] {
        &self.athletics
    }

    pub fn observation(&self) -> &[i32] {
        &self.observation
    }

    pub fn knowledge(&self) -> &[i32] {
        &self.knowledge
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatFeat {
    pub name: String,
    pub effect: String,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sw25Magic {
    pub name: String,
    pub system: String,
    pub cost: i32,
    pub effect: String,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sw25Weapon {
    pub name: String,
    pub hit: i32,
    pub damage: String,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sw25Armor {
    pub name: String,
    pub defense: i32,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sw25Accessory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
    pub effect: String,
    pub reference_page: String,
    pub memo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sw25Item {
    pub name: String,
    pub quantity: i32,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sw25Language {
    pub name: String,
    pub speak: bool,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sw25Sheet {
    pub player_name: String,
    pub character_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub gender: String,
    pub abilities: Sw25Abilities,
    pub(crate) attributes: Sw25Attributes,
    pub attribute_initials: AttributeValues,
    pub attribute_growth: AttributeValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    pub classes: Vec<ClassLevel>,
    pub(crate) adventurer_level: i32,
    pub initial_experience_points: i32,
    pub gained_experience_points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honor_points: Option<i32>,
    pub skills: Vec<CombatFeat>,
    pub magics: Vec<Sw25Magic>,
    pub weapons: Vec<Sw25Weapon>,
    pub armors: Vec<Sw25Armor>,
    pub accessories: Vec<Sw25Accessory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<i32>,
    pub items: Vec<Sw25Item>,
    pub languages: Vec<Sw25Language>,
    pub background: String,
    pub memo: String,
}

impl Sw25Sheet {
    pub fn attributes(&self) -> &Sw25Attributes {
        &self.attributes
    }

    pub fn adventurer_level(&self) -> i32 {
        self.adventurer_level
    }

    /// Experience spent on the acquired classes.
    pub fn used_experience(&self) -> i32 {
        self.classes
            .iter()
            .map(|c| experience_cost(c.level, experience_table(&c.name)))
            .fold(0i32, i32::saturating_add)
    }

    pub fn progression(&self) -> ProgressionLedger {
        ProgressionLedger {
            initial: self.initial_experience_points,
            gained: self.gained_experience_points,
            used: self.used_experience(),
        }
    }

    fn class_mut(&mut self, name: &str) -> Result<&mut ClassLevel, DomainError> {
        self.classes
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| DomainError::not_found("Class", name))
    }

    fn armor_mut(&mut self, index: usize) -> Result<&mut Sw25Armor, DomainError> {
        self.armors
            .get_mut(index)
            .ok_or_else(|| DomainError::not_found("Armor", format!("armors[{}]", index)))
    }

    fn profile_mut(&mut self, field: Sw25Profile) -> &mut String {
        match field {
            Sw25Profile::PlayerName => &mut self.player_name,
            Sw25Profile::CharacterName => &mut self.character_name,
            Sw25Profile::Gender => &mut self.gender,
            Sw25Profile::Background => &mut self.background,
            Sw25Profile::Memo => &mut self.memo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sw25Profile {
    PlayerName,
    CharacterName,
    Gender,
    Background,
    Memo,
}

/// Root-input edits on an adventurer sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sw25Edit {
    SetAbility {
        ability: Sw25Ability,
        value: i32,
    },
    SetInitial {
        attribute: Sw25Attribute,
        value: i32,
    },
    SetGrowth {
        attribute: Sw25Attribute,
        value: i32,
    },
    /// Clears a birth the new race does not offer.
    SetRace(Option<String>),
    SetBirth(Option<String>),
    AddClass {
        name: String,
        level: i32,
    },
    SetClassLevel {
        name: String,
        level: i32,
    },
    RemoveClass {
        name: String,
    },
    AddArmor {
        name: String,
        defense: i32,
    },
    SetArmorDefense {
        index: usize,
        defense: i32,
    },
    RemoveArmor {
        index: usize,
    },
    SetInitialExperience(i32),
    SetGainedExperience(i32),
    SetProfile {
        field: Sw25Profile,
        value: String,
    },
}

/// Qualifying class levels in stored order, level 0 skipped, each plus a bonus.
fn per_class(classes: &[ClassLevel], qualifying: &[&str], attribute_bonus: i32) -> Vec<i32> {
    classes
        .iter()
        .filter(|c| c.level > 0 && qualifying.contains(&c.name.as_str()))
        .map(|c| c.level.saturating_add(attribute_bonus))
        .collect()
}

/// One entry per class name at its first position, holding the highest level seen.
fn merge_classes(entries: impl IntoIterator<Item = ClassLevel>) -> Vec<ClassLevel> {
    let mut merged: Vec<ClassLevel> = Vec::new();
    for entry in entries {
        match merged.iter_mut().find(|c| c.name == entry.name) {
            Some(existing) => existing.level = existing.level.max(entry.level),
            None => merged.push(entry),
        }
    }
    merged
}

/// Present iff the named class is held at level > 0.
fn when_held(classes: &[ClassLevel], name: &str, attribute_bonus: i32) -> Option<i32> {
    let level = level_of(classes, name);
    (level > 0).then(|| level.saturating_add(attribute_bonus))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sw25System;

impl RuleSystem for Sw25System {
    type Sheet = Sw25Sheet;
    type Edit = Sw25Edit;

    fn system_id(&self) -> SystemId {
        SystemId::Sw25
    }

    fn normalize(&self, raw: &Value) -> Sw25Sheet {
        let raw = Raw::new(raw);
        let abilities = raw.object("abilities");

        let sheet = Sw25Sheet {
            player_name: raw.text("playerName"),
            character_name: raw.text("characterName"),
            age: raw.int("age"),
            gender: raw.text("gender"),
            abilities: Sw25Abilities {
                technique: abilities.int_or("技", 0),
                body: abilities.int_or("体", 0),
                mind: abilities.int_or("心", 0),
            },
            attributes: Sw25Attributes::default(),
            attribute_initials: AttributeValues::read(raw.object("attributeInitials")),
            attribute_growth: AttributeValues::read(raw.object("attributeGrowth")),
            race: raw.opt_text("race"),
            birth: raw.opt_text("birth"),
            classes: merge_classes(
                raw.list("classes")
                    .map(|r| ClassLevel::new(r.text("name"), r.int_or("level", 0))),
            ),
            adventurer_level: 0,
            initial_experience_points: raw
                .int_or("initialExperiencePoints", DEFAULT_INITIAL_EXPERIENCE),
            gained_experience_points: raw.int_or("gainedExperiencePoints", 0),
            honor_points: raw.int("honorPoints"),
            skills: raw
                .list("skills")
                .map(|r| CombatFeat {
                    name: r.text("name"),
                    effect: r.text("effect"),
                    memo: r.text("memo"),
                })
                .collect(),
            magics: raw
                .list("magics")
                .map(|r| Sw25Magic {
                    name: r.text("name"),
                    system: r.text("system"),
                    cost: r.int_or("cost", 0),
                    effect: r.text("effect"),
                    memo: r.text("memo"),
                })
                .collect(),
            weapons: raw
                .list("weapons")
                .map(|r| Sw25Weapon {
                    name: r.text("name"),
                    hit: r.int_or("hit", 0),
                    damage: r.text("damage"),
                    memo: r.text("memo"),
                })
                .collect(),
            armors: raw
                .list("armors")
                .map(|r| Sw25Armor {
                    name: r.text("name"),
                    defense: r.int_or("defense", 0),
                    memo: r.text("memo"),
                })
                .collect(),
            accessories: raw
                .list("accessories")
                .map(|r| Sw25Accessory {
                    name: r.text("name"),
                    price: r.int("price"),
                    effect: r.text("effect"),
                    reference_page: r.text("referencePage"),
                    memo: r.text("memo"),
                    slot: r.opt_text("slot"),
                })
                .collect(),
            money: raw.int("money"),
            items: raw
                .list("items")
                .map(|r| Sw25Item {
                    name: r.text("name"),
                    quantity: r.int_or("quantity", 0),
                    memo: r.text("memo"),
                })
                .collect(),
            languages: raw
                .list("languages")
                .map(|r| Sw25Language {
                    name: r.text("name"),
                    speak: r.flag("speak"),
                    read: r.flag("read"),
                })
                .collect(),
            background: raw.text("background"),
            memo: raw.text("memo"),
        };
        self.recompute(sheet)
    }

    /// attribute = (ability + race modifier) + initial + growth.
    fn derive_attributes(&self, mut sheet: Sw25Sheet) -> Sw25Sheet {
        let race = sheet.race.as_deref();
        for attribute in Sw25Attribute::ALL {
            let ability = attribute.ability();
            let value = [
                sheet.abilities.get(ability),
                race_modifier(race, ability),
                sheet.attribute_initials.get(attribute),
                sheet.attribute_growth.get(attribute),
            ]
            .into_iter()
            .fold(0i32, i32::saturating_add);
            sheet.attributes.values.set(attribute, value);
        }
        sheet.adventurer_level = adventurer_level(&sheet.classes);
        sheet
    }

    fn derive_stats(&self, mut sheet: Sw25Sheet) -> Sw25Sheet {
        let adv = sheet.adventurer_level;
        let classes = &sheet.classes;
        let v = sheet.attributes.values;
        let magic_levels = classes
            .iter()
            .filter(|c| data::is_magic_class(&c.name))
            .map(|c| c.level)
            .fold(0i32, i32::saturating_add);

        let a = &mut sheet.attributes;
        a.hp = adv.saturating_mul(3).saturating_add(v.vitality);
        a.mp = magic_levels.saturating_mul(3).saturating_add(v.spirit);
        a.vitality_resistance = adv.saturating_add(bonus(v.vitality));
        a.spirit_resistance = adv.saturating_add(bonus(v.spirit));
        a.movement = v.agility;
        a.full_movement = v.agility.saturating_mul(3);
        a.armor_value = sheet
            .armors
            .iter()
            .map(|armor| armor.defense)
            .fold(0i32, i32::saturating_add);

        a.initiative = when_held(classes, data::SCOUT, bonus(v.agility));
        a.monster_knowledge = when_held(classes, data::SAGE, bonus(v.intelligence));

        a.accuracy = per_class(classes, data::ACCURACY_CLASSES, bonus(v.dexterity));
        a.evasion = per_class(classes, data::EVASION_CLASSES, bonus(v.agility));
        a.extra_damage = per_class(classes, data::EXTRA_DAMAGE_CLASSES, bonus(v.strength));
        a.magic_power = per_class(classes, data::MAGIC_POWER_CLASSES, bonus(v.intelligence));
        a.finesse = per_class(classes, data::EXPLORATION_CLASSES, bonus(v.dexterity));
        a.athletics = per_class(classes, data::EXPLORATION_CLASSES, bonus(v.agility));
        a.observation = per_class(classes, data::EXPLORATION_CLASSES, bonus(v.intelligence));
        a.knowledge = per_class(classes, data::KNOWLEDGE_CLASSES, bonus(v.intelligence));
        sheet
    }

    fn ledger(&self, sheet: &Sw25Sheet) -> SheetLedger {
        SheetLedger::Experience {
            adventurer_level: sheet.adventurer_level,
            progression: sheet.progression(),
            combat_feats: SlotUsage::new(
                sheet.skills.len(),
                Some(combat_feat_slots(sheet.adventurer_level)),
            ),
        }
    }

    fn assign(&self, sheet: &mut Sw25Sheet, edit: Sw25Edit) -> Result<(), DomainError> {
        match edit {
            Sw25Edit::SetAbility { ability, value } => sheet.abilities.set(ability, value),
            Sw25Edit::SetInitial { attribute, value } => {
                sheet.attribute_initials.set(attribute, value)
            }
            Sw25Edit::SetGrowth { attribute, value } => sheet.attribute_growth.set(attribute, value),
            Sw25Edit::SetRace(race) => {
                let race = race.filter(|r| !r.is_empty());
                if let (Some(race), Some(birth)) = (race.as_deref(), sheet.birth.as_deref()) {
                    if !birth_available(race, birth) {
                        sheet.birth = None;
                    }
                }
                sheet.race = race;
            }
            Sw25Edit::SetBirth(birth) => {
                let birth = birth.filter(|b| !b.is_empty());
                if let (Some(race), Some(birth)) = (sheet.race.as_deref(), birth.as_deref()) {
                    if !birth_available(race, birth) {
                        return Err(DomainError::validation(format!(
                            "{} cannot take the {} birth",
                            race, birth
                        )));
                    }
                }
                sheet.birth = birth;
            }
            Sw25Edit::AddClass { name, level } => {
                if name.trim().is_empty() {
                    return Err(DomainError::validation("class name is empty"));
                }
                if level < 1 {
                    return Err(DomainError::validation(format!(
                        "class level must be at least 1, got {}",
                        level
                    )));
                }
                if sheet.classes.iter().any(|c| c.name == name) {
                    return Err(DomainError::validation(format!(
                        "class already acquired: {}",
                        name
                    )));
                }
                sheet.classes.push(ClassLevel::new(name, level));
            }
            Sw25Edit::SetClassLevel { name, level } => {
                if level < 0 {
                    return Err(DomainError::validation(format!(
                        "class level cannot be negative, got {}",
                        level
                    )));
                }
                sheet.class_mut(&name)?.level = level;
            }
            Sw25Edit::RemoveClass { name } => {
                let before = sheet.classes.len();
                sheet.classes.retain(|c| c.name != name);
                if sheet.classes.len() == before {
                    return Err(DomainError::not_found("Class", name));
                }
            }
            Sw25Edit::AddArmor { name, defense } => sheet.armors.push(Sw25Armor {
                name,
                defense,
                memo: String::new(),
            }),
            Sw25Edit::SetArmorDefense { index, defense } => {
                sheet.armor_mut(index)?.defense = defense;
            }
            Sw25Edit::RemoveArmor { index } => {
                if index >= sheet.armors.len() {
                    return Err(DomainError::not_found("Armor", format!("armors[{}]", index)));
                }
                sheet.armors.remove(index);
            }
            Sw25Edit::SetInitialExperience(points) => sheet.initial_experience_points = points,
            Sw25Edit::SetGainedExperience(points) => sheet.gained_experience_points = points,
            Sw25Edit::SetProfile { field, value } => *sheet.profile_mut(field) = value,
        }
        Ok(())
    }

    /// One initial-value roll per attribute, dice chosen by race.
    fn roll_plan(&self, sheet: &Sw25Sheet) -> Vec<AbilityRoll> {
        let race = sheet.race.as_deref();
        Sw25Attribute::ALL
            .into_iter()
            .map(|attribute| {
                AbilityRoll::new(
                    attribute.key(),
                    initial_formula(race, attribute),
                    RollTarget::Sw25Initial(attribute),
                )
            })
            .collect()
    }
}
