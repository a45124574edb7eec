//! Static rule tables: races, births, class categories and experience costs.

use super::{Sw25Ability, Sw25Attribute};

pub const SCOUT: &str = "スカウト";
pub const SAGE: &str = "セージ";

const ALL_BIRTHS: &[&str] = &[
    "魔動機師", "魔術師", "軽戦士", "一般人", "傭兵", "神官", "操霊術士", "その他",
];
const SPELLCASTER_BIRTHS: &[&str] = &["魔術師", "軽戦士", "一般人", "神官", "操霊術士", "その他"];
const DWARF_BIRTHS: &[&str] = &["魔動機師", "軽戦士", "一般人", "傭兵", "その他"];
const NIMBLE_BIRTHS: &[&str] = &["軽戦士", "一般人", "傭兵", "その他"];
const NIGHTMARE_BIRTHS: &[&str] = &["魔術師", "軽戦士", "一般人", "傭兵", "その他"];

/// Playable race: ability modifiers and the births it offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceData {
    pub name: &'static str,
    /// 技, 体, 心
    pub modifiers: [i32; 3],
    pub births: &'static [&'static str],
    /// Initial-value dice per attribute as (d6 count, flat bonus).
    pub initials: [(u16, i32); 6],
}

const TWO_D: (u16, i32) = (2, 0);
const ONE_D: (u16, i32) = (1, 0);
const HUMAN_INITIALS: [(u16, i32); 6] = [TWO_D; 6];

pub const RACES: &[RaceData] = &[
    RaceData {
        name: "人間",
        modifiers: [0, 0, 0],
        births: ALL_BIRTHS,
        initials: HUMAN_INITIALS,
    },
    RaceData {
        name: "エルフ",
        modifiers: [1, -1, 1],
        births: SPELLCASTER_BIRTHS,
        initials: [TWO_D, TWO_D, ONE_D, TWO_D, TWO_D, TWO_D],
    },
    RaceData {
        name: "ドワーフ",
        modifiers: [0, 1, -1],
        births: DWARF_BIRTHS,
        initials: [(2, 6), ONE_D, TWO_D, TWO_D, ONE_D, (2, 6)],
    },
    RaceData {
        name: "タビット",
        modifiers: [1, 0, 0],
        births: NIMBLE_BIRTHS,
        initials: [ONE_D, ONE_D, ONE_D, TWO_D, (2, 6), TWO_D],
    },
    RaceData {
        name: "ルーンフォーク",
        modifiers: [0, 0, 1],
        births: SPELLCASTER_BIRTHS,
        initials: [TWO_D, ONE_D, TWO_D, TWO_D, TWO_D, ONE_D],
    },
    RaceData {
        name: "ナイトメア",
        modifiers: [0, 1, 0],
        births: NIGHTMARE_BIRTHS,
        initials: [TWO_D, TWO_D, ONE_D, ONE_D, TWO_D, TWO_D],
    },
    RaceData {
        name: "リカント",
        modifiers: [0, 1, -1],
        births: NIMBLE_BIRTHS,
        initials: [ONE_D, (1, 3), TWO_D, TWO_D, (1, 6), ONE_D],
    },
    RaceData {
        name: "リルドラケン",
        modifiers: [-1, 0, 1],
        births: SPELLCASTER_BIRTHS,
        initials: [ONE_D, TWO_D, TWO_D, (2, 6), ONE_D, TWO_D],
    },
    RaceData {
        name: "グラスランナー",
        modifiers: [1, 1, -1],
        births: NIMBLE_BIRTHS,
        initials: [TWO_D, TWO_D, ONE_D, (2, 6), ONE_D, (2, 6)],
    },
    RaceData {
        name: "メリア",
        modifiers: [0, -1, 1],
        births: SPELLCASTER_BIRTHS,
        initials: [ONE_D, ONE_D, ONE_D, (2, 6), ONE_D, ONE_D],
    },
    RaceData {
        name: "ティエンス",
        modifiers: [0, 0, 0],
        births: ALL_BIRTHS,
        initials: [TWO_D, TWO_D, ONE_D, (1, 3), TWO_D, (2, 3)],
    },
    RaceData {
        name: "レプラカーン",
        modifiers: [1, -1, 1],
        births: SPELLCASTER_BIRTHS,
        initials: [TWO_D, ONE_D, TWO_D, TWO_D, TWO_D, TWO_D],
    },
    RaceData {
        name: "その他",
        modifiers: [0, 0, 0],
        births: ALL_BIRTHS,
        initials: HUMAN_INITIALS,
    },
];

pub fn race(name: &str) -> Option<&'static RaceData> {
    RACES.iter().find(|r| r.name == name)
}

/// Modifier a race applies to an ability; unknown races apply none.
pub fn race_modifier(race_name: Option<&str>, ability: Sw25Ability) -> i32 {
    race_name
        .and_then(race)
        .map(|r| r.modifiers[ability.index()])
        .unwrap_or(0)
}

/// Whether `birth` may be taken by `race_name`. Unknown races allow any birth.
pub fn birth_available(race_name: &str, birth: &str) -> bool {
    match race(race_name) {
        Some(race) => race.births.contains(&birth),
        None => true,
    }
}

/// Initial-value roll for one attribute as an `Nd6+K` formula.
pub fn initial_formula(race_name: Option<&str>, attribute: Sw25Attribute) -> String {
    let initials = race_name
        .and_then(race)
        .map(|r| r.initials)
        .unwrap_or(HUMAN_INITIALS);
    let (count, bonus) = initials[attribute.index()];
    if bonus == 0 {
        format!("{}d6", count)
    } else {
        format!("{}d6+{}", count, bonus)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassCategory {
    Warrior,
    Magic,
    Other,
}

const WARRIOR_CLASSES: &[&str] = &["ファイター", "グラップラー", "フェンサー", "シューター"];
const MAGIC_CLASSES: &[&str] = &[
    "ソーサラー",
    "コンジャラー",
    "プリースト",
    "フェアリーテイマー",
    "マギテック",
];
const OTHER_CLASSES: &[&str] = &[
    SCOUT,
    "レンジャー",
    SAGE,
    "エンハンサー",
    "バード",
    "ライダー",
    "アルケミスト",
];

pub fn class_category(name: &str) -> Option<ClassCategory> {
    if WARRIOR_CLASSES.contains(&name) {
        Some(ClassCategory::Warrior)
    } else if MAGIC_CLASSES.contains(&name) {
        Some(ClassCategory::Magic)
    } else if OTHER_CLASSES.contains(&name) {
        Some(ClassCategory::Other)
    } else {
        None
    }
}

pub fn is_magic_class(name: &str) -> bool {
    class_category(name) == Some(ClassCategory::Magic)
}

/// Classes adding to 命中力.
pub const ACCURACY_CLASSES: &[&str] = WARRIOR_CLASSES;
/// Classes adding to 回避力.
pub const EVASION_CLASSES: &[&str] = &["ファイター", "グラップラー", "フェンサー"];
/// Classes rolling 技巧, 運動 and 観察.
pub const EXPLORATION_CLASSES: &[&str] = &[SCOUT, "レンジャー"];
/// Classes rolling 知識.
pub const KNOWLEDGE_CLASSES: &[&str] = &[SAGE];

/// Classes adding to 追加ダメージ.
pub const EXTRA_DAMAGE_CLASSES: &[&str] = WARRIOR_CLASSES;
/// Every magic-using class adds to 魔力, all keyed off B(知力). Sheets that
/// derived プリースト and フェアリーテイマー 魔力 from B(精神力) will show
/// different values for those two classes after recompute.
pub const MAGIC_POWER_CLASSES: &[&str] = MAGIC_CLASSES;

pub const EXPERIENCE_TABLE_A: [i32; 15] = [
    1000, 1000, 1500, 1500, 2000, 2500, 3000, 4000, 5000, 6000, 7500, 9000, 10500, 12000, 13500,
];
pub const EXPERIENCE_TABLE_B: [i32; 15] = [
    500, 1000, 1000, 1500, 1500, 2000, 2500, 3000, 4000, 5000, 6000, 7500, 9000, 10500, 12000,
];

const TABLE_A_CLASSES: &[&str] = &[
    "ファイター",
    "グラップラー",
    "ソーサラー",
    "コンジャラー",
    "プリースト",
    "フェアリーテイマー",
    "マギテック",
];

/// Cost table for a class; anything not on table A, unknown names included, uses B.
pub fn experience_table(class_name: &str) -> &'static [i32] {
    if TABLE_A_CLASSES.contains(&class_name) {
        &EXPERIENCE_TABLE_A
    } else {
        &EXPERIENCE_TABLE_B
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_race_offers_other_birth() {
        assert_eq!(RACES.len(), 13);
        assert!(RACES.iter().all(|r| r.births.contains(&"その他")));
    }

    #[test]
    fn unknown_race_has_no_modifier() {
        assert_eq!(race_modifier(Some("エルフ"), Sw25Ability::Body), -1);
        assert_eq!(race_modifier(Some("ゴブリン"), Sw25Ability::Body), 0);
        assert_eq!(race_modifier(None, Sw25Ability::Mind), 0);
    }

    #[test]
    fn births_follow_race() {
        assert!(birth_available("ドワーフ", "魔動機師"));
        assert!(!birth_available("ドワーフ", "神官"));
        assert!(!birth_available("タビット", "魔術師"));
        assert!(birth_available("ゴブリン", "神官"));
    }

    #[test]
    fn initial_formulas_per_race() {
        assert_eq!(initial_formula(Some("ドワーフ"), Sw25Attribute::Dexterity), "2d6+6");
        assert_eq!(initial_formula(Some("リカント"), Sw25Attribute::Agility), "1d6+3");
        assert_eq!(initial_formula(Some("ティエンス"), Sw25Attribute::Spirit), "2d6+3");
        assert_eq!(initial_formula(None, Sw25Attribute::Strength), "2d6");
    }

    #[test]
    fn class_tables() {
        assert_eq!(class_category("マギテック"), Some(ClassCategory::Magic));
        assert_eq!(class_category("スカウト"), Some(ClassCategory::Other));
        assert_eq!(class_category("ウォーリーダー"), None);
        assert_eq!(experience_table("プリースト")[0], 1000);
        assert_eq!(experience_table("スカウト")[0], 500);
        assert_eq!(experience_table("ウォーリーダー")[0], 500);
    }
}
