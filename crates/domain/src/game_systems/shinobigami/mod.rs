//! Shinobigami ninja sheets.
//!
//! Little here is arithmetic: the derived parts are the school's enemy, the
//! effective skill domain and the rank's advisory slot limits.

mod data;

pub use data::{
    locate_skill, rank, school, skill_at, Rank, School, DEFAULT_DOMAIN, DOMAINS, HENCHO, KORYU,
    RANKS, SCHOOLS,
};

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::ledger::{SheetLedger, SlotUsage};
use super::raw::Raw;
use super::traits::RuleSystem;
use super::SystemId;
use crate::error::DomainError;

pub const DEFAULT_HP: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShinobiAttribute {
    Taijutsu,
    Ninjutsu,
    Boujutsu,
    Senjutsu,
    Kijutsu,
    Shinjutsu,
}

impl ShinobiAttribute {
    pub const ALL: [Self; 6] = [
        Self::Taijutsu,
        Self::Ninjutsu,
        Self::Boujutsu,
        Self::Senjutsu,
        Self::Kijutsu,
        Self::Shinjutsu,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Taijutsu => "体術",
            Self::Ninjutsu => "忍術",
            Self::Boujutsu => "謀術",
            Self::Senjutsu => "戦術",
            Self::Kijutsu => "器術",
            Self::Shinjutsu => "心術",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShinobiAttributes {
    #[serde(rename = "体術")]
    pub taijutsu: i32,
    #[serde(rename = "忍術")]
    pub ninjutsu: i32,
    #[serde(rename = "謀術")]
    pub boujutsu: i32,
    #[serde(rename = "戦術")]
    pub senjutsu: i32,
    #[serde(rename = "器術")]
    pub kijutsu: i32,
    #[serde(rename = "心術")]
    pub shinjutsu: i32,
}

impl ShinobiAttributes {
    pub fn get(&self, attribute: ShinobiAttribute) -> i32 {
        match attribute {
            ShinobiAttribute::Taijutsu => self.taijutsu,
            ShinobiAttribute::Ninjutsu => self.ninjutsu,
            ShinobiAttribute::Boujutsu => self.boujutsu,
            ShinobiAttribute::Senjutsu => self.senjutsu,
            ShinobiAttribute::Kijutsu => self.kijutsu,
            ShinobiAttribute::Shinjutsu => self.shinjutsu,
        }
    }

    fn set(&mut self, attribute: ShinobiAttribute, value: i32) {
        match attribute {
            ShinobiAttribute::Taijutsu => self.taijutsu = value,
            ShinobiAttribute::Ninjutsu => self.ninjutsu = value,
            ShinobiAttribute::Boujutsu => self.boujutsu = value,
            ShinobiAttribute::Senjutsu => self.senjutsu = value,
            ShinobiAttribute::Kijutsu => self.kijutsu = value,
            ShinobiAttribute::Shinjutsu => self.shinjutsu = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShinobiSkill {
    pub name: String,
    pub value: i32,
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ninpo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub skill: String,
    pub range: String,
    pub cost: String,
    pub effect: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Okugi {
    pub name: String,
    pub skill: String,
    pub effect: String,
    pub strength: String,
    pub weakness: String,
    pub page: String,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Emotion {
    pub pc_name: String,
    pub emotion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Background {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub koseki: String,
    pub effect: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub disguise: String,
    pub true_name: String,
    pub setting: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ningu {
    pub heiryomaru: i32,
    pub jintsumaru: i32,
    pub tonkofu: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShinobigamiSheet {
    pub attributes: ShinobiAttributes,
    pub skills: Vec<ShinobiSkill>,
    pub school: String,
    pub upper_school: String,
    pub ryuugi: String,
    /// Only held under [`KORYU`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) skill_domain: Option<String>,
    pub(crate) enemy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    pub(crate) hp: i32,
    pub hencho: Vec<String>,
    pub ninpo: Vec<Ninpo>,
    pub okugi: Vec<Okugi>,
    pub emotions: Vec<Emotion>,
    pub backgrounds: Vec<Background>,
    pub personas: Vec<Persona>,
    pub ningu: Ningu,
    #[serde(rename = "secret_flag")]
    pub secret_flag: bool,
    pub background: String,
    pub memo: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub surface_face: String,
    pub shinnen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub koseki: Option<i32>,
}

impl ShinobigamiSheet {
    /// School the sheet is governed by; the upper school wins when set.
    pub fn governing_school(&self) -> &str {
        if self.upper_school.is_empty() {
            &self.school
        } else {
            &self.upper_school
        }
    }

    pub fn is_koryu(&self) -> bool {
        self.governing_school() == KORYU
    }

    /// Skill domain the school grants.
    pub fn effective_domain(&self) -> &str {
        let governing = self.governing_school();
        if governing == KORYU {
            return self
                .skill_domain
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(DEFAULT_DOMAIN);
        }
        school(governing)
            .map(|s| s.domain)
            .unwrap_or(DEFAULT_DOMAIN)
    }

    pub fn skill_domain(&self) -> Option<&str> {
        self.skill_domain.as_deref()
    }

    /// Opposing school, empty when the school has none.
    pub fn enemy(&self) -> &str {
        &self.enemy
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s.name == name)
    }

    pub fn rank_limits(&self) -> Option<&'static Rank> {
        self.rank.as_deref().and_then(rank)
    }
}

/// Root-input edits on a ninja sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShinobigamiEdit {
    SetAttribute {
        attribute: ShinobiAttribute,
        value: i32,
    },
    /// Sets the upper school and its ryuugi as well.
    SetSchool(String),
    SetUpperSchool(String),
    SetRyuugi(String),
    SetSkillDomain(String),
    /// Removes the skill when held, otherwise appends it.
    ToggleSkill {
        name: String,
        domain: Option<String>,
    },
    SetSkillValue {
        name: String,
        value: i32,
    },
    SetRank(Option<String>),
    SetHp(i32),
    ToggleHencho(String),
    SetSecret(bool),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShinobigamiSystem;

impl ShinobigamiSystem {
    fn set_school(sheet: &mut ShinobigamiSheet, name: String) {
        if name == KORYU {
            sheet.ryuugi.clear();
        } else {
            sheet.ryuugi = school(&name).map(|s| s.ryuugi).unwrap_or_default().to_string();
        }
        sheet.upper_school = name.clone();
        sheet.school = name;
    }
}

impl RuleSystem for ShinobigamiSystem {
    type Sheet = ShinobigamiSheet;
    type Edit = ShinobigamiEdit;

    fn system_id(&self) -> SystemId {
        SystemId::Shinobigami
    }

    fn normalize(&self, raw: &Value) -> ShinobigamiSheet {
        let raw = Raw::new(raw);
        let attrs = raw.object("attributes");
        let mut attributes = ShinobiAttributes::default();
        for attribute in ShinobiAttribute::ALL {
            attributes.set(attribute, attrs.int_or(attribute.key(), 0));
        }
        let ningu = raw.object("ningu");

        let sheet = ShinobigamiSheet {
            attributes,
            skills: raw
                .list("skills")
                .map(|r| ShinobiSkill {
                    name: r.text("name"),
                    value: r.int_or("value", 0),
                    domain: r.text("domain"),
                })
                .collect(),
            school: raw.text("school"),
            upper_school: raw.text("upperSchool"),
            ryuugi: raw.text("ryuugi"),
            skill_domain: raw.opt_text("skillDomain"),
            enemy: String::new(),
            rank: raw.opt_text("rank"),
            hp: raw.int_or("hp", DEFAULT_HP),
            hencho: raw.strings("hencho"),
            ninpo: raw
                .list("ninpo")
                .map(|r| Ninpo {
                    name: r.text("name"),
                    kind: r.text("type"),
                    skill: r.text("skill"),
                    range: r.text("range"),
                    cost: r.text("cost"),
                    effect: r.text("effect"),
                    page: r.text("page"),
                })
                .collect(),
            okugi: raw
                .list("okugi")
                .map(|r| Okugi {
                    name: r.text("name"),
                    skill: r.text("skill"),
                    effect: r.text("effect"),
                    strength: r.text("strength"),
                    weakness: r.text("weakness"),
                    page: r.text("page"),
                    memo: r.text("memo"),
                })
                .collect(),
            emotions: raw
                .list("emotions")
                .map(|r| Emotion {
                    pc_name: r.text("pcName"),
                    emotion: r.text("emotion"),
                })
                .collect(),
            backgrounds: raw
                .list("backgrounds")
                .map(|r| Background {
                    name: r.text("name"),
                    kind: r.text("type"),
                    koseki: r.text("koseki"),
                    effect: r.text("effect"),
                    page: r.text("page"),
                })
                .collect(),
            personas: raw
                .list("personas")
                .map(|r| Persona {
                    disguise: r.text("disguise"),
                    true_name: r.text("trueName"),
                    setting: r.text("setting"),
                })
                .collect(),
            ningu: Ningu {
                heiryomaru: ningu.int_or("heiryomaru", 0),
                jintsumaru: ningu.int_or("jintsumaru", 0),
                tonkofu: ningu.int_or("tonkofu", 0),
            },
            secret_flag: raw.flag("secret_flag"),
            background: raw.text("background"),
            memo: raw.text("memo"),
            kind: raw.text("type"),
            surface_face: raw.text("surfaceFace"),
            shinnen: raw.text("shinnen"),
            koseki: raw.int("koseki"),
        };
        self.recompute(sheet)
    }

    /// Skills unique by name (first wins), hencho unique, hp never negative.
    fn derive_attributes(&self, mut sheet: ShinobigamiSheet) -> ShinobigamiSheet {
        let mut seen = HashSet::new();
        sheet.skills.retain(|s| seen.insert(s.name.clone()));
        let mut seen = HashSet::new();
        sheet.hencho.retain(|h| seen.insert(h.clone()));
        if sheet.upper_school.is_empty() {
            sheet.upper_school = sheet.school.clone();
        }
        sheet.hp = sheet.hp.max(0);
        sheet
    }

    fn derive_stats(&self, mut sheet: ShinobigamiSheet) -> ShinobigamiSheet {
        sheet.enemy = school(sheet.governing_school())
            .map(|s| s.enemy)
            .unwrap_or_default()
            .to_string();
        if !sheet.is_koryu() {
            sheet.skill_domain = None;
        }
        sheet
    }

    fn ledger(&self, sheet: &ShinobigamiSheet) -> SheetLedger {
        let limits = sheet.rank_limits();
        SheetLedger::Slots {
            skills: SlotUsage::new(sheet.skills.len(), limits.map(|r| r.skills)),
            ninpo: SlotUsage::new(sheet.ninpo.len(), limits.map(|r| r.ninpo)),
            okugi: SlotUsage::new(sheet.okugi.len(), limits.map(|r| r.okugi)),
        }
    }

    fn assign(&self, sheet: &mut ShinobigamiSheet, edit: ShinobigamiEdit) -> Result<(), DomainError> {
        match edit {
            ShinobigamiEdit::SetAttribute { attribute, value } => {
                sheet.attributes.set(attribute, value)
            }
            ShinobigamiEdit::SetSchool(name) => Self::set_school(sheet, name),
            ShinobigamiEdit::SetUpperSchool(name) => sheet.upper_school = name,
            ShinobigamiEdit::SetRyuugi(ryuugi) => sheet.ryuugi = ryuugi,
            ShinobigamiEdit::SetSkillDomain(domain) => {
                if !sheet.is_koryu() {
                    return Err(DomainError::validation(format!(
                        "skill domain is chosen only under {}",
                        KORYU
                    )));
                }
                if !DOMAINS.contains(&domain.as_str()) {
                    return Err(DomainError::validation(format!(
                        "unknown skill domain: {}",
                        domain
                    )));
                }
                sheet.skill_domain = Some(domain);
            }
            ShinobigamiEdit::ToggleSkill { name, domain } => {
                if name.trim().is_empty() {
                    return Err(DomainError::validation("skill name is empty"));
                }
                if let Some(index) = sheet.skills.iter().position(|s| s.name == name) {
                    sheet.skills.remove(index);
                } else {
                    let domain = domain
                        .filter(|d| !d.is_empty())
                        .or_else(|| locate_skill(&name).map(|(_, d)| d.to_string()))
                        .unwrap_or_default();
                    sheet.skills.push(ShinobiSkill {
                        name,
                        value: 0,
                        domain,
                    });
                }
            }
            ShinobigamiEdit::SetSkillValue { name, value } => {
                let skill = sheet
                    .skills
                    .iter_mut()
                    .find(|s| s.name == name)
                    .ok_or_else(|| DomainError::not_found("Skill", name.clone()))?;
                skill.value = value;
            }
            ShinobigamiEdit::SetRank(rank_name) => {
                if let Some(name) = rank_name.as_deref() {
                    if rank(name).is_none() {
                        return Err(DomainError::validation(format!("unknown rank: {}", name)));
                    }
                }
                sheet.rank = rank_name;
            }
            ShinobigamiEdit::SetHp(hp) => sheet.hp = hp.max(0),
            ShinobigamiEdit::ToggleHencho(name) => {
                if !HENCHO.contains(&name.as_str()) {
                    return Err(DomainError::validation(format!("unknown hencho: {}", name)));
                }
                if let Some(index) = sheet.hencho.iter().position(|h| *h == name) {
                    sheet.hencho.remove(index);
                } else {
                    sheet.hencho.push(name);
                }
            }
            ShinobigamiEdit::SetSecret(secret) => sheet.secret_flag = secret,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ninja() -> ShinobigamiSheet {
        ShinobigamiSystem.normalize(&json!({
            "school": "鞍馬神流",
            "upperSchool": "鞍馬神流",
            "rank": "中忍",
            "skills": [
                { "name": "刀術", "value": 0, "domain": "体術" },
                { "name": "刀術", "value": 3, "domain": "体術" },
                { "name": "人脈", "domain": "戦術" }
            ],
            "hencho": ["マヒ", "マヒ"],
            "hp": -2
        }))
    }

    #[test]
    fn normalize_defaults() {
        let sheet = ShinobigamiSystem.normalize(&json!({}));
        assert_eq!(sheet.hp(), 6);
        assert!(!sheet.secret_flag);
        assert_eq!(sheet.enemy(), "");
        assert_eq!(sheet.effective_domain(), "体術");
        let json = serde_json::to_value(&sheet).unwrap();
        assert_eq!(json["secret_flag"], false);
        assert_eq!(json["ningu"]["tonkofu"], 0);
    }

    #[test]
    fn normalize_dedupes_and_clamps() {
        let sheet = ninja();
        assert_eq!(sheet.skills.len(), 2);
        assert_eq!(sheet.skills[0].value, 0);
        assert_eq!(sheet.hencho, vec!["マヒ"]);
        assert_eq!(sheet.hp(), 0);
        assert_eq!(sheet.enemy(), "隠忍の血統");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = ninja();
        let twice = ShinobigamiSystem.normalize(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn set_school_fills_upper_school_and_ryuugi() {
        let sheet = ShinobigamiSystem
            .apply(&ninja(), vec![ShinobigamiEdit::SetSchool("比良坂機関".to_string())])
            .unwrap();
        assert_eq!(sheet.upper_school, "比良坂機関");
        assert_eq!(sheet.ryuugi, "日本の国益を守る");
        assert_eq!(sheet.enemy(), "私立御斎学園");
        assert_eq!(sheet.effective_domain(), "謀術");
    }

    #[test]
    fn koryu_keeps_chosen_domain() {
        let sheet = ShinobigamiSystem
            .apply(
                &ninja(),
                vec![
                    ShinobigamiEdit::SetSchool(KORYU.to_string()),
                    ShinobigamiEdit::SetSkillDomain("妖術".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(sheet.ryuugi, "");
        assert_eq!(sheet.enemy(), "");
        assert_eq!(sheet.effective_domain(), "妖術");

        let moved = ShinobigamiSystem
            .apply(&sheet, vec![ShinobigamiEdit::SetSchool("斜歯忍軍".to_string())])
            .unwrap();
        assert_eq!(moved.skill_domain(), None);
        assert_eq!(moved.effective_domain(), "器術");
    }

    #[test]
    fn skill_domain_outside_koryu_is_rejected() {
        let result = ShinobigamiSystem.apply(
            &ninja(),
            vec![ShinobigamiEdit::SetSkillDomain("妖術".to_string())],
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn toggle_skill_removes_or_appends() {
        let sheet = ShinobigamiSystem
            .apply(
                &ninja(),
                vec![
                    ShinobigamiEdit::ToggleSkill {
                        name: "刀術".to_string(),
                        domain: None,
                    },
                    ShinobigamiEdit::ToggleSkill {
                        name: "瞳術".to_string(),
                        domain: None,
                    },
                ],
            )
            .unwrap();
        let names: Vec<&str> = sheet.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["人脈", "瞳術"]);
        assert_eq!(sheet.skills[1].domain, "妖術");
    }

    #[test]
    fn hp_never_negative_and_hencho_toggles() {
        let sheet = ShinobigamiSystem
            .apply(
                &ninja(),
                vec![
                    ShinobigamiEdit::SetHp(-5),
                    ShinobigamiEdit::ToggleHencho("マヒ".to_string()),
                    ShinobigamiEdit::ToggleHencho("呪い".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(sheet.hp(), 0);
        assert_eq!(sheet.hencho, vec!["呪い"]);

        let result =
            ShinobigamiSystem.apply(&sheet, vec![ShinobigamiEdit::ToggleHencho("眠気".to_string())]);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn rank_sets_slot_limits() {
        match ShinobigamiSystem.ledger(&ninja()) {
            SheetLedger::Slots { skills, ninpo, okugi } => {
                assert_eq!(skills, SlotUsage::new(2, Some(6)));
                assert_eq!(ninpo.limit, Some(4));
                assert_eq!(okugi.limit, Some(1));
            }
            other => panic!("unexpected ledger: {:?}", other),
        }

        let result =
            ShinobigamiSystem.apply(&ninja(), vec![ShinobigamiEdit::SetRank(Some("将軍".to_string()))]);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
