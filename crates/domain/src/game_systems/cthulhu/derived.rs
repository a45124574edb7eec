//! Derived characteristics for both editions.
//!
//! 6th edition characteristics are on a 3-18 scale, 7th edition on a
//! percentile scale, so the same names carry different formulas.

use super::Edition;

/// Every derived value except the user-edited currents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedMaxima {
    pub san_max: i32,
    pub hp_max: i32,
    pub mp_max: i32,
    pub idea: i32,
    pub know: i32,
    pub luck: i32,
    pub damage_bonus: String,
    pub build: Option<i32>,
    pub mov: Option<i32>,
}

/// Characteristic values read by the formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Characteristics {
    pub strength: i32,
    pub constitution: i32,
    pub power: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub education: i32,
    pub size: i32,
    pub luck: i32,
    pub age: Option<i32>,
}

pub fn maxima(edition: Edition, c: &Characteristics) -> DerivedMaxima {
    let con_siz = c.constitution.saturating_add(c.size);
    let str_siz = c.strength.saturating_add(c.size);
    match edition {
        Edition::Sixth => DerivedMaxima {
            san_max: c.power.saturating_mul(5),
            // 耐久力 = (CON + SIZ) / 2, rounded up
            hp_max: ceil_div(con_siz, 2),
            mp_max: c.power,
            idea: c.intelligence.saturating_mul(5),
            know: c.education.saturating_mul(5),
            luck: c.power.saturating_mul(5),
            damage_bonus: sixth_damage_bonus(str_siz),
            build: None,
            mov: None,
        },
        Edition::Seventh => {
            let (damage_bonus, build) = seventh_damage_bonus(str_siz);
            DerivedMaxima {
                san_max: c.power,
                hp_max: con_siz.div_euclid(10),
                mp_max: c.power.div_euclid(5),
                idea: c.intelligence,
                know: c.education,
                luck: c.luck,
                damage_bonus,
                build: Some(build),
                mov: Some(move_rate(c.strength, c.dexterity, c.size, c.age)),
            }
        }
    }
}

fn ceil_div(value: i32, divisor: i32) -> i32 {
    let floor = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        floor
    } else {
        floor + 1
    }
}

/// 6th edition damage bonus from STR + SIZ.
pub fn sixth_damage_bonus(str_siz: i32) -> String {
    match str_siz {
        i32::MIN..=1 => "+0".to_string(),
        2..=12 => "-1D6".to_string(),
        13..=16 => "-1D4".to_string(),
        17..=24 => "+0".to_string(),
        25..=32 => "+1D4".to_string(),
        33..=40 => "+1D6".to_string(),
        // 41-56 is +2D6, then one more D6 per 16 points
        total => format!("+{}D6", (total - 41) / 16 + 2),
    }
}

/// 7th edition damage bonus and build from STR + SIZ.
pub fn seventh_damage_bonus(str_siz: i32) -> (String, i32) {
    match str_siz {
        i32::MIN..=1 => ("+0".to_string(), 0),
        2..=64 => ("-2".to_string(), -2),
        65..=84 => ("-1".to_string(), -1),
        85..=124 => ("+0".to_string(), 0),
        125..=164 => ("+1D4".to_string(), 1),
        165..=204 => ("+1D6".to_string(), 2),
        // 205-284 is +2D6 / build 3, then one more D6 and build per 80 points
        total => {
            let dice = (total - 205) / 80 + 2;
            (format!("+{}D6", dice), dice + 1)
        }
    }
}

/// 7th edition movement rate, reduced by age from 40 onwards.
pub fn move_rate(strength: i32, dexterity: i32, size: i32, age: Option<i32>) -> i32 {
    let base = if dexterity < size && strength < size {
        7
    } else if strength > size && dexterity > size {
        9
    } else {
        8
    };
    let age_penalty = match age {
        Some(age) if age >= 80 => 5,
        Some(age) if age >= 40 => (age - 30) / 10,
        _ => 0,
    };
    base - age_penalty
}

/// Base value of 回避 from DEX.
pub fn dodge_base(edition: Edition, dexterity: i32) -> i32 {
    match edition {
        Edition::Sixth => dexterity.saturating_mul(2),
        Edition::Seventh => dexterity.div_euclid(2),
    }
}

/// Base value of 母国語 from EDU.
pub fn own_language_base(edition: Edition, education: i32) -> i32 {
    match edition {
        Edition::Sixth => education.saturating_mul(5),
        Edition::Seventh => education,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investigator() -> Characteristics {
        Characteristics {
            strength: 12,
            constitution: 11,
            power: 13,
            dexterity: 10,
            intelligence: 14,
            education: 16,
            size: 14,
            luck: 0,
            age: None,
        }
    }

    #[test]
    fn sixth_edition_maxima() {
        let m = maxima(Edition::Sixth, &investigator());
        assert_eq!(m.san_max, 65); // POW 13 x 5
        assert_eq!(m.hp_max, 13); // (11 + 14) / 2 = 12.5, rounded up
        assert_eq!(m.mp_max, 13);
        assert_eq!(m.idea, 70);
        assert_eq!(m.know, 80);
        assert_eq!(m.luck, 65);
        assert_eq!(m.damage_bonus, "+1D4"); // STR + SIZ = 26
        assert_eq!(m.build, None);
        assert_eq!(m.mov, None);
    }

    #[test]
    fn seventh_edition_maxima() {
        let c = Characteristics {
            strength: 60,
            constitution: 60,
            power: 65,
            dexterity: 50,
            intelligence: 70,
            education: 80,
            size: 65,
            luck: 45,
            age: Some(25),
        };
        let m = maxima(Edition::Seventh, &c);
        assert_eq!(m.san_max, 65);
        assert_eq!(m.hp_max, 12); // (60 + 65) / 10
        assert_eq!(m.mp_max, 13);
        assert_eq!(m.idea, 70);
        assert_eq!(m.know, 80);
        assert_eq!(m.luck, 45);
        assert_eq!(m.damage_bonus, "+1D4"); // STR + SIZ = 125
        assert_eq!(m.build, Some(1));
        assert_eq!(m.mov, Some(7)); // DEX and STR both below SIZ
    }

    #[test]
    fn sixth_damage_bonus_bands() {
        assert_eq!(sixth_damage_bonus(12), "-1D6");
        assert_eq!(sixth_damage_bonus(13), "-1D4");
        assert_eq!(sixth_damage_bonus(24), "+0");
        assert_eq!(sixth_damage_bonus(33), "+1D6");
        assert_eq!(sixth_damage_bonus(56), "+2D6");
        assert_eq!(sixth_damage_bonus(57), "+3D6");
        assert_eq!(sixth_damage_bonus(88), "+4D6");
        assert_eq!(sixth_damage_bonus(89), "+5D6");
        assert_eq!(sixth_damage_bonus(0), "+0");
    }

    #[test]
    fn seventh_damage_bonus_bands() {
        assert_eq!(seventh_damage_bonus(64), ("-2".to_string(), -2));
        assert_eq!(seventh_damage_bonus(84), ("-1".to_string(), -1));
        assert_eq!(seventh_damage_bonus(124), ("+0".to_string(), 0));
        assert_eq!(seventh_damage_bonus(204), ("+1D6".to_string(), 2));
        assert_eq!(seventh_damage_bonus(284), ("+2D6".to_string(), 3));
        assert_eq!(seventh_damage_bonus(364), ("+3D6".to_string(), 4));
        assert_eq!(seventh_damage_bonus(365), ("+4D6".to_string(), 5));
    }

    #[test]
    fn move_rate_with_age() {
        assert_eq!(move_rate(60, 60, 40, None), 9);
        assert_eq!(move_rate(40, 60, 50, None), 8);
        assert_eq!(move_rate(60, 60, 40, Some(39)), 9);
        assert_eq!(move_rate(60, 60, 40, Some(45)), 8);
        assert_eq!(move_rate(60, 60, 40, Some(72)), 5);
        assert_eq!(move_rate(60, 60, 40, Some(91)), 4);
    }

    #[test]
    fn negative_inputs_stay_defined() {
        let c = Characteristics {
            constitution: -3,
            size: -4,
            power: -7,
            ..Default::default()
        };
        let m = maxima(Edition::Sixth, &c);
        assert_eq!(m.hp_max, -3); // ceil(-3.5)
        let m = maxima(Edition::Seventh, &c);
        assert_eq!(m.hp_max, -1); // floor(-0.7)
        assert_eq!(m.mp_max, -2); // floor(-1.4)
    }

    #[test]
    fn dynamic_skill_bases() {
        assert_eq!(dodge_base(Edition::Sixth, 13), 26);
        assert_eq!(dodge_base(Edition::Seventh, 55), 27);
        assert_eq!(own_language_base(Edition::Sixth, 16), 80);
        assert_eq!(own_language_base(Edition::Seventh, 80), 80);
    }
}
