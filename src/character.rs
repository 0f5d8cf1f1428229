//! Player character: classes and stats.

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_EXP_TO_LEVEL, STARTING_GOLD};

/// The three playable classes, each a fixed trade-off between durability
/// and damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Fighter,
    Tank,
    Berserker,
}

/// Base stat block of a class.
#[derive(Debug, Clone, Copy)]
pub struct ClassStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 3] {
        [
            CharacterClass::Fighter,
            CharacterClass::Tank,
            CharacterClass::Berserker,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Tank => "Tank",
            CharacterClass::Berserker => "Berserker",
        }
    }

    pub fn base_stats(&self) -> ClassStats {
        match self {
            CharacterClass::Fighter => ClassStats {
                hp: 150,
                attack: 20,
                defense: 15,
            },
            CharacterClass::Tank => ClassStats {
                hp: 200,
                attack: 15,
                defense: 25,
            },
            CharacterClass::Berserker => ClassStats {
                hp: 120,
                attack: 30,
                defense: 10,
            },
        }
    }
}

/// The player's fighter. Stats only ever grow; hp stays within
/// `0..=max_hp` and gold never goes negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp: u32,
    pub exp_to_level: u32,
    pub gold: u32,
    /// Purchase counters, for display only. The stat bonuses are already
    /// folded into `attack`/`defense`.
    pub weapon_upgrades: u32,
    pub armor_upgrades: u32,
}

impl Character {
    /// Creates a level-1 character with the class base stats.
    pub fn new(name: String, class: CharacterClass) -> Self {
        let stats = class.base_stats();
        Self {
            name,
            class,
            level: 1,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            exp: 0,
            exp_to_level: BASE_EXP_TO_LEVEL,
            gold: STARTING_GOLD,
            weapon_upgrades: 0,
            armor_upgrades: 0,
        }
    }

    pub fn is_full_health(&self) -> bool {
        self.hp >= self.max_hp
    }

    pub fn restore_full_health(&mut self) {
        self.hp = self.max_hp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_base_stats() {
        let fighter = CharacterClass::Fighter.base_stats();
        assert_eq!((fighter.hp, fighter.attack, fighter.defense), (150, 20, 15));

        let tank = CharacterClass::Tank.base_stats();
        assert_eq!((tank.hp, tank.attack, tank.defense), (200, 15, 25));

        let berserker = CharacterClass::Berserker.base_stats();
        assert_eq!(
            (berserker.hp, berserker.attack, berserker.defense),
            (120, 30, 10)
        );
    }

    #[test]
    fn test_new_character_starts_at_level_one() {
        let character = Character::new("Rocky".to_string(), CharacterClass::Fighter);

        assert_eq!(character.level, 1);
        assert_eq!(character.hp, character.max_hp);
        assert_eq!(character.exp, 0);
        assert_eq!(character.exp_to_level, BASE_EXP_TO_LEVEL);
        assert_eq!(character.gold, STARTING_GOLD);
        assert_eq!(character.weapon_upgrades, 0);
        assert_eq!(character.armor_upgrades, 0);
    }

    #[test]
    fn test_restore_full_health() {
        let mut character = Character::new("Rocky".to_string(), CharacterClass::Tank);
        character.hp = 1;

        assert!(!character.is_full_health());
        character.restore_full_health();
        assert!(character.is_full_health());
        assert_eq!(character.hp, 200);
    }
}
