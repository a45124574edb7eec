//! Default skill lists and dynamically governed skill bases.

use super::derived::{dodge_base, own_language_base};
use super::{CthulhuAttributes, Edition};
use crate::entities::Skill;

pub const DODGE: &str = "回避";
pub const OWN_LANGUAGE: &str = "母国語";
pub const MELEE: &str = "近接戦闘";
pub const RANGED: &str = "射撃";

const SIXTH_GENERAL: &[(&str, i32)] = &[
    ("言いくるめ", 5),
    ("医学", 5),
    ("運転", 20),
    ("応急手当", 30),
    ("オカルト", 5),
    ("化学", 1),
    ("鍵開け", 1),
    ("隠す", 15),
    ("隠れる", 10),
    ("機械修理", 20),
    ("聞き耳", 25),
    ("クトゥルフ神話", 0),
    ("芸術", 5),
    ("経理", 10),
    ("考古学", 1),
    ("コンピューター", 5),
    ("忍び歩き", 10),
    ("写真術", 10),
    ("重機械操作", 1),
    ("乗馬", 5),
    ("信用", 15),
    ("心理学", 5),
    ("人類学", 1),
    ("水泳", 25),
    ("製作", 5),
    ("精神分析", 1),
    ("生物学", 1),
    ("説得", 15),
    ("操縦", 1),
    ("地質学", 1),
    ("跳躍", 25),
    ("追跡", 10),
    ("電気修理", 10),
    ("電子工学", 1),
    ("天文学", 1),
    ("登攀", 40),
    ("図書館", 25),
    ("ナビゲート", 10),
    ("値切り", 5),
    ("博物学", 10),
    ("物理学", 1),
    ("変装", 1),
    ("法律", 5),
    ("他の言語", 1),
    (OWN_LANGUAGE, 0),
    ("目星", 25),
    ("薬学", 1),
    ("歴史", 5),
];

const SIXTH_COMBAT: &[(&str, i32)] = &[
    (DODGE, 0),
    ("キック", 25),
    ("こぶし/パンチ", 50),
    ("組み付き", 25),
    ("頭突き", 10),
    ("投擲", 25),
    ("マーシャルアーツ", 1),
    ("拳銃", 20),
    ("サブマシンガン", 15),
    ("ショットガン", 30),
    ("マシンガン", 10),
    ("ライフル", 25),
];

const SEVENTH_GENERAL: &[(&str, Option<&str>, i32)] = &[
    ("言いくるめ", None, 5),
    ("医学", None, 1),
    ("運転", None, 20),
    ("応急手当", None, 30),
    ("オカルト", None, 5),
    ("鍵開け", None, 1),
    ("機械修理", None, 10),
    ("聞き耳", None, 20),
    ("クトゥルフ神話", None, 0),
    ("経理", None, 5),
    ("考古学", None, 1),
    ("コンピューター", None, 5),
    ("写真術", None, 10),
    ("重機械操作", None, 1),
    ("乗馬", None, 5),
    ("信用", None, 0),
    ("心理学", None, 10),
    ("人類学", None, 1),
    ("水泳", None, 20),
    ("精神分析", None, 1),
    ("生物学", None, 1),
    ("説得", None, 10),
    ("操縦", None, 1),
    ("地質学", None, 1),
    ("跳躍", None, 20),
    ("追跡", None, 10),
    ("電気修理", None, 10),
    ("電子工学", None, 1),
    ("天文学", None, 1),
    ("登攀", None, 40),
    ("図書館", None, 20),
    ("ナビゲート", None, 10),
    ("変装", None, 5),
    ("法律", None, 5),
    ("他の言語", None, 1),
    (OWN_LANGUAGE, None, 0),
    ("目星", None, 25),
    ("歴史", None, 5),
    ("威圧", None, 15),
    ("隠密", None, 20),
    ("科学", None, 1),
    ("科学", Some("数学"), 10),
    ("鑑定", None, 5),
    ("芸術/製作", None, 5),
    ("サバイバル", None, 10),
    ("自然", None, 10),
    ("手さばき", None, 10),
    ("魅惑", None, 15),
];

const SEVENTH_COMBAT: &[(&str, Option<&str>, i32)] = &[
    (DODGE, None, 0),
    ("投擲", None, 20),
    (MELEE, Some("格闘"), 25),
    (RANGED, Some("拳銃"), 20),
];

/// Specialties of 近接戦闘 and their bases.
pub const MELEE_SPECIALTIES: &[(&str, i32)] = &[
    ("斧", 15),
    ("格闘", 25),
    ("絞殺ひも", 15),
    ("チェーンソー", 10),
    ("刀剣", 20),
    ("フレイル", 10),
    ("むち", 5),
    ("槍", 20),
];

/// Specialties of 射撃 and their bases.
pub const RANGED_SPECIALTIES: &[(&str, i32)] = &[
    ("火炎放射器", 10),
    ("拳銃", 20),
    ("サブマシンガン", 15),
    ("重火器", 10),
    ("マシンガン", 10),
    ("弓", 15),
    ("ライフル/ショットガン", 25),
];

/// Creation-time general skill list.
pub fn default_skills(edition: Edition) -> Vec<Skill> {
    match edition {
        Edition::Sixth => SIXTH_GENERAL
            .iter()
            .map(|(name, base)| Skill::new(*name, *base))
            .collect(),
        Edition::Seventh => from_specialty_table(SEVENTH_GENERAL),
    }
}

/// Creation-time combat skill list.
pub fn default_combat_skills(edition: Edition) -> Vec<Skill> {
    match edition {
        Edition::Sixth => SIXTH_COMBAT
            .iter()
            .map(|(name, base)| Skill::new(*name, *base))
            .collect(),
        Edition::Seventh => from_specialty_table(SEVENTH_COMBAT),
    }
}

fn from_specialty_table(table: &[(&str, Option<&str>, i32)]) -> Vec<Skill> {
    table
        .iter()
        .map(|(name, specialty, base)| {
            let skill = Skill::new(*name, *base);
            match specialty {
                Some(specialty) => skill.with_specialty(*specialty),
                None => skill,
            }
        })
        .collect()
}

/// Base of a built-in skill whose base follows the characteristics or the
/// chosen specialty. `None` leaves the stored base alone.
pub fn governed_base(edition: Edition, skill: &Skill, attrs: &CthulhuAttributes) -> Option<i32> {
    if skill.is_custom {
        return None;
    }
    match (edition, skill.name.as_str()) {
        (_, DODGE) => Some(dodge_base(edition, attrs.dexterity)),
        (_, OWN_LANGUAGE) => Some(own_language_base(edition, attrs.education)),
        (Edition::Seventh, MELEE) => specialty_base(MELEE_SPECIALTIES, skill),
        (Edition::Seventh, RANGED) => specialty_base(RANGED_SPECIALTIES, skill),
        _ => None,
    }
}

fn specialty_base(table: &[(&str, i32)], skill: &Skill) -> Option<i32> {
    let specialty = skill.specialty.as_deref()?;
    table
        .iter()
        .find(|(name, _)| *name == specialty)
        .map(|(_, base)| *base)
}

/// Rewrites governed bases in place; totals follow through `Skill`.
pub fn apply_governed_bases(edition: Edition, skills: &mut [Skill], attrs: &CthulhuAttributes) {
    for skill in skills {
        if let Some(base) = governed_base(edition, skill, attrs) {
            skill.set_base_value(base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_sizes() {
        assert_eq!(default_skills(Edition::Sixth).len(), 48);
        assert_eq!(default_combat_skills(Edition::Sixth).len(), 12);
        assert_eq!(default_skills(Edition::Seventh).len(), 48);
        assert_eq!(default_combat_skills(Edition::Seventh).len(), 4);
    }

    #[test]
    fn seventh_edition_science_rows_differ_by_specialty() {
        let skills = default_skills(Edition::Seventh);
        let labels: Vec<String> = skills
            .iter()
            .filter(|s| s.name == "科学")
            .map(Skill::label)
            .collect();
        assert_eq!(labels, vec!["科学", "科学(数学)"]);
    }

    #[test]
    fn dodge_and_language_follow_characteristics() {
        let attrs = CthulhuAttributes {
            dexterity: 14,
            education: 17,
            ..Default::default()
        };
        let mut skills = default_combat_skills(Edition::Sixth);
        skills.extend(default_skills(Edition::Sixth));
        skills[0].set_points(crate::entities::SkillPoint::Interest, 10);
        apply_governed_bases(Edition::Sixth, &mut skills, &attrs);

        let dodge = skills.iter().find(|s| s.name == DODGE).unwrap();
        assert_eq!(dodge.base_value(), 28);
        assert_eq!(dodge.total(), 38);
        let language = skills.iter().find(|s| s.name == OWN_LANGUAGE).unwrap();
        assert_eq!(language.base_value(), 85);
    }

    #[test]
    fn custom_skill_with_governed_name_keeps_its_base() {
        let attrs = CthulhuAttributes {
            dexterity: 14,
            ..Default::default()
        };
        let mut skills = vec![Skill::custom(DODGE, 3)];
        apply_governed_bases(Edition::Sixth, &mut skills, &attrs);
        assert_eq!(skills[0].base_value(), 3);
    }

    #[test]
    fn melee_base_follows_specialty() {
        let attrs = CthulhuAttributes::default();
        let mut skills = vec![Skill::new(MELEE, 25).with_specialty("刀剣")];
        apply_governed_bases(Edition::Seventh, &mut skills, &attrs);
        assert_eq!(skills[0].base_value(), 20);

        let mut unknown = vec![Skill::new(RANGED, 20).with_specialty("投石器")];
        apply_governed_bases(Edition::Seventh, &mut unknown, &attrs);
        assert_eq!(unknown[0].base_value(), 20);
    }
}
