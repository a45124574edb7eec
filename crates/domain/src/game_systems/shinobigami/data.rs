//! Schools, ranks, conditions and the 2-12 skill table.

pub const DEFAULT_DOMAIN: &str = "体術";

/// School whose domain is chosen by the player instead of fixed.
pub const KORYU: &str = "古流流派";

/// Skill table columns, left to right.
pub const DOMAINS: [&str; 6] = ["器術", "体術", "忍術", "謀術", "戦術", "妖術"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct School {
    pub name: &'static str,
    pub domain: &'static str,
    pub ryuugi: &'static str,
    pub enemy: &'static str,
}

pub const SCHOOLS: &[School] = &[
    School {
        name: "斜歯忍軍",
        domain: "器術",
        ryuugi: "他の流派の「奥義の内容」を集める",
        enemy: "鞍馬神流",
    },
    School {
        name: "鞍馬神流",
        domain: "体術",
        ryuugi: "シノビガミの復活を阻止する",
        enemy: "隠忍の血統",
    },
    School {
        name: "ハグレモノ",
        domain: "忍術",
        ryuugi: "誰にも縛られず、自分の意志で戦った",
        enemy: "斜歯忍軍",
    },
    School {
        name: "比良坂機関",
        domain: "謀術",
        ryuugi: "日本の国益を守る",
        enemy: "私立御斎学園",
    },
    School {
        name: "私立御斎学園",
        domain: "戦術",
        ryuugi: "誰かの秘密を探す",
        enemy: "ハグレモノ",
    },
    School {
        name: "隠忍の血統",
        domain: "妖術",
        ryuugi: "シノビガミ復活に関する情報を入手する",
        enemy: "比良坂機関",
    },
];

pub fn school(name: &str) -> Option<&'static School> {
    SCHOOLS.iter().find(|s| s.name == name)
}

/// Rank with its advisory (skills, ninpo, okugi) limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub name: &'static str,
    pub skills: i32,
    pub ninpo: i32,
    pub okugi: i32,
}

pub const RANKS: &[Rank] = &[
    Rank { name: "草", skills: 4, ninpo: 2, okugi: 0 },
    Rank { name: "下忍", skills: 5, ninpo: 3, okugi: 1 },
    Rank { name: "下忍頭", skills: 5, ninpo: 3, okugi: 1 },
    Rank { name: "中忍", skills: 6, ninpo: 4, okugi: 1 },
    Rank { name: "中忍頭", skills: 6, ninpo: 4, okugi: 1 },
    Rank { name: "上忍", skills: 7, ninpo: 5, okugi: 2 },
    Rank { name: "上忍頭", skills: 7, ninpo: 5, okugi: 2 },
    Rank { name: "頭領", skills: 8, ninpo: 6, okugi: 3 },
];

pub fn rank(name: &str) -> Option<&'static Rank> {
    RANKS.iter().find(|r| r.name == name)
}

/// Lasting conditions (変調).
pub const HENCHO: [&str; 6] = ["故障", "マヒ", "重症", "行方不明", "忘却", "呪い"];

/// Rows 2 through 12, columns in [`DOMAINS`] order.
const SKILL_TABLE: [[&str; 6]; 11] = [
    ["絡繰術", "騎乗術", "生存術", "医術", "兵糧術", "異形化"],
    ["火術", "砲術", "潜伏術", "毒術", "鳥獣術", "召喚術"],
    ["水術", "手裏剣術", "遁走術", "罠術", "野戦術", "死霊術"],
    ["針術", "手練", "盗聴術", "調査術", "地の利", "結界術"],
    ["仕込み", "身体操術", "腹話術", "詐術", "意気", "封術"],
    ["衣装術", "歩法", "隠形術", "対人術", "用兵術", "言霊術"],
    ["縄術", "走法", "変装術", "遊芸", "記憶術", "幻術"],
    ["登術", "飛術", "香術", "九ノ一の術", "見敵術", "瞳術"],
    ["拷問術", "骨法術", "分身の術", "傀儡の術", "暗号術", "千里眼の術"],
    ["壊器術", "刀術", "隠蔽術", "流言の術", "伝達術", "憑依術"],
    ["掘削術", "怪力", "第六感", "経済力", "人脈", "呪術"],
];

/// Skill at a table row (2-12) and domain column.
pub fn skill_at(row: i32, domain: &str) -> Option<&'static str> {
    let row = usize::try_from(row.checked_sub(2)?).ok()?;
    let column = DOMAINS.iter().position(|d| *d == domain)?;
    SKILL_TABLE.get(row).map(|cells| cells[column])
}

/// Table position (row, domain) of a skill name.
pub fn locate_skill(name: &str) -> Option<(i32, &'static str)> {
    SKILL_TABLE.iter().zip(2..).find_map(|(cells, row)| {
        cells
            .iter()
            .position(|cell| *cell == name)
            .map(|column| (row, DOMAINS[column]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemies_form_a_cycle() {
        for school in SCHOOLS {
            let enemy = super::school(school.enemy).unwrap();
            assert_ne!(enemy.name, school.name);
        }
    }

    #[test]
    fn skill_table_lookup() {
        assert_eq!(skill_at(2, "器術"), Some("絡繰術"));
        assert_eq!(skill_at(12, "妖術"), Some("呪術"));
        assert_eq!(skill_at(9, "謀術"), Some("九ノ一の術"));
        assert_eq!(skill_at(1, "器術"), None);
        assert_eq!(skill_at(13, "器術"), None);
        assert_eq!(skill_at(5, "心術"), None);
    }

    #[test]
    fn locate_finds_row_and_domain() {
        assert_eq!(locate_skill("刀術"), Some((11, "体術")));
        assert_eq!(locate_skill("人脈"), Some((12, "戦術")));
        assert_eq!(locate_skill("料理"), None);
    }

    #[test]
    fn rank_limits_never_shrink() {
        for pair in RANKS.windows(2) {
            assert!(pair[1].skills >= pair[0].skills);
            assert!(pair[1].ninpo >= pair[0].ninpo);
            assert!(pair[1].okugi >= pair[0].okugi);
        }
    }
}
