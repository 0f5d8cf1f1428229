//! Gold-gated upgrades and recovery. Each operation checks, then mutates
//! exactly the fields it names; a refused purchase leaves the character
//! untouched.

use tracing::debug;

use crate::character::Character;
use crate::constants::{
    ARMOR_UPGRADE_COST, ARMOR_UPGRADE_DEFENSE_BONUS, POTION_COST, WEAPON_UPGRADE_ATTACK_BONUS,
    WEAPON_UPGRADE_COST,
};
use crate::error::GameError;

/// Health potion: full restore.
pub fn buy_potion(character: &mut Character) -> Result<(), GameError> {
    if character.gold < POTION_COST {
        return Err(GameError::InsufficientFunds);
    }
    if character.is_full_health() {
        return Err(GameError::AlreadyFull);
    }
    character.gold -= POTION_COST;
    character.restore_full_health();
    debug!(gold = character.gold, "potion bought");
    Ok(())
}

/// Weapon upgrade: permanent attack bonus.
pub fn buy_weapon_upgrade(character: &mut Character) -> Result<(), GameError> {
    if character.gold < WEAPON_UPGRADE_COST {
        return Err(GameError::InsufficientFunds);
    }
    character.gold -= WEAPON_UPGRADE_COST;
    character.attack += WEAPON_UPGRADE_ATTACK_BONUS;
    character.weapon_upgrades += 1;
    debug!(attack = character.attack, "weapon upgraded");
    Ok(())
}

/// Armor upgrade: permanent defense bonus.
pub fn buy_armor_upgrade(character: &mut Character) -> Result<(), GameError> {
    if character.gold < ARMOR_UPGRADE_COST {
        return Err(GameError::InsufficientFunds);
    }
    character.gold -= ARMOR_UPGRADE_COST;
    character.defense += ARMOR_UPGRADE_DEFENSE_BONUS;
    character.armor_upgrades += 1;
    debug!(defense = character.defense, "armor upgraded");
    Ok(())
}

/// Resting at home restores hp for free. Distinct from the in-battle heal
/// and the potion.
pub fn heal_at_home(character: &mut Character) -> Result<(), GameError> {
    if character.is_full_health() {
        return Err(GameError::AlreadyFull);
    }
    character.restore_full_health();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;

    fn fighter_with_gold(gold: u32) -> Character {
        let mut character = Character::new("Rocky".to_string(), CharacterClass::Fighter);
        character.gold = gold;
        character
    }

    #[test]
    fn test_buy_potion_restores_hp() {
        let mut character = fighter_with_gold(60);
        character.hp = 10;

        buy_potion(&mut character).expect("purchase succeeds");

        assert_eq!(character.gold, 10);
        assert_eq!(character.hp, character.max_hp);
    }

    #[test]
    fn test_buy_potion_at_full_health() {
        let mut character = fighter_with_gold(60);

        assert_eq!(buy_potion(&mut character), Err(GameError::AlreadyFull));
        assert_eq!(character.gold, 60);
    }

    #[test]
    fn test_buy_potion_without_gold() {
        let mut character = fighter_with_gold(49);
        character.hp = 10;

        assert_eq!(buy_potion(&mut character), Err(GameError::InsufficientFunds));
        assert_eq!(character.hp, 10);
        assert_eq!(character.gold, 49);
    }

    #[test]
    fn test_buy_weapon_upgrade() {
        let mut character = fighter_with_gold(200);

        buy_weapon_upgrade(&mut character).expect("purchase succeeds");

        assert_eq!(character.gold, 0);
        assert_eq!(character.attack, 25);
        assert_eq!(character.weapon_upgrades, 1);
    }

    #[test]
    fn test_buy_weapon_upgrade_one_gold_short() {
        let mut character = fighter_with_gold(199);

        assert_eq!(
            buy_weapon_upgrade(&mut character),
            Err(GameError::InsufficientFunds)
        );
        assert_eq!(character.attack, 20);
        assert_eq!(character.gold, 199);
        assert_eq!(character.weapon_upgrades, 0);
    }

    #[test]
    fn test_buy_armor_upgrade() {
        let mut character = fighter_with_gold(150);

        buy_armor_upgrade(&mut character).expect("purchase succeeds");

        assert_eq!(character.gold, 0);
        assert_eq!(character.defense, 18);
        assert_eq!(character.armor_upgrades, 1);
    }

    #[test]
    fn test_heal_at_home_is_free() {
        let mut character = fighter_with_gold(0);
        character.hp = 1;

        heal_at_home(&mut character).expect("heal succeeds");

        assert_eq!(character.hp, character.max_hp);
        assert_eq!(character.gold, 0);
    }

    #[test]
    fn test_heal_at_home_at_full_health() {
        let mut character = fighter_with_gold(0);
        assert_eq!(heal_at_home(&mut character), Err(GameError::AlreadyFull));
    }
}
