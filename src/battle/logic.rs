//! Turn resolution and damage math.
//!
//! These functions mutate only the [`BattleSession`]; the character and
//! enemy template are read-only inputs. All randomness flows through the
//! injected `Rng` so battles are reproducible under a seeded generator.

use rand::Rng;

use super::types::{
    ActionReport, Actor, BattleEvent, BattlePhase, BattleSession, EnemyAction, PlayerAction,
    ENEMY_ACTION_POOL,
};
use crate::character::Character;
use crate::constants::{
    BATTLE_HEAL_RATIO, HEAVY_ATTACK_MISS_THRESHOLD, HEAVY_ATTACK_MULTIPLIER, MIN_HIT_DAMAGE,
};
use crate::error::GameError;
use crate::history::FightResult;
use crate::opponents::EnemyTemplate;

/// Damage of a landing basic attack. Never below the floor of 1, however
/// high the defense.
pub fn attack_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(MIN_HIT_DAMAGE)
}

/// Damage of a landing heavy attack: double attack against full defense.
pub fn heavy_attack_damage(attack: u32, defense: u32) -> u32 {
    (attack * HEAVY_ATTACK_MULTIPLIER)
        .saturating_sub(defense)
        .max(MIN_HIT_DAMAGE)
}

/// Rolls whether a heavy attack lands. Draws above the miss threshold hit,
/// so the hit chance is 70%.
pub fn roll_heavy_hit(rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() > HEAVY_ATTACK_MISS_THRESHOLD
}

fn battle_heal_amount(max_hp: u32) -> u32 {
    (max_hp as f64 * BATTLE_HEAL_RATIO) as u32
}

impl BattleSession {
    /// Resolves one player action. Only valid during the player's turn.
    ///
    /// A rejected action (wrong phase, second heal) mutates nothing and
    /// does not pass the turn to the enemy.
    pub fn player_action(
        &mut self,
        character: &Character,
        enemy: &EnemyTemplate,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<ActionReport, GameError> {
        if self.phase != BattlePhase::PlayerTurn {
            return Err(GameError::InvalidAction("not the player's turn"));
        }

        let mut events = Vec::new();
        match action {
            PlayerAction::Attack => {
                let damage = attack_damage(character.attack, enemy.defense);
                self.enemy_hp = self.enemy_hp.saturating_sub(damage);
                events.push(BattleEvent::Attack {
                    actor: Actor::Player,
                    damage,
                    blocked: false,
                });
            }
            PlayerAction::HeavyAttack => {
                if roll_heavy_hit(rng) {
                    let damage = heavy_attack_damage(character.attack, enemy.defense);
                    self.enemy_hp = self.enemy_hp.saturating_sub(damage);
                    events.push(BattleEvent::HeavyAttack {
                        actor: Actor::Player,
                        damage,
                        blocked: false,
                    });
                } else {
                    events.push(BattleEvent::HeavyMiss {
                        actor: Actor::Player,
                    });
                }
            }
            PlayerAction::Defend => {
                self.defending = true;
                events.push(BattleEvent::Defend {
                    actor: Actor::Player,
                });
            }
            PlayerAction::Heal => {
                if self.heal_used {
                    return Err(GameError::InvalidAction("heal already used this battle"));
                }
                let amount = battle_heal_amount(character.max_hp);
                self.player_hp = (self.player_hp + amount).min(character.max_hp);
                self.heal_used = true;
                events.push(BattleEvent::Heal {
                    actor: Actor::Player,
                    amount,
                });
            }
        }

        // A winning blow ends the battle outright; the enemy never acts.
        if self.enemy_hp == 0 {
            self.phase = BattlePhase::Resolved(FightResult::Win);
        } else {
            self.phase = BattlePhase::EnemyTurn;
        }
        Ok(self.report(events))
    }

    /// Resolves the automatic enemy half-turn. Only valid after a player
    /// action that left the battle open.
    pub fn enemy_turn(
        &mut self,
        character: &Character,
        enemy: &EnemyTemplate,
        rng: &mut impl Rng,
    ) -> Result<ActionReport, GameError> {
        if self.phase != BattlePhase::EnemyTurn {
            return Err(GameError::InvalidAction("not the enemy's turn"));
        }

        let mut events = Vec::new();
        let action = ENEMY_ACTION_POOL[rng.gen_range(0..ENEMY_ACTION_POOL.len())];
        match action {
            EnemyAction::Attack => {
                let raw = attack_damage(enemy.attack, character.defense);
                let (damage, blocked) = self.absorb_with_stance(raw);
                self.player_hp = self.player_hp.saturating_sub(damage);
                events.push(BattleEvent::Attack {
                    actor: Actor::Enemy,
                    damage,
                    blocked,
                });
            }
            EnemyAction::Heavy => {
                if roll_heavy_hit(rng) {
                    let raw = heavy_attack_damage(enemy.attack, character.defense);
                    let (damage, blocked) = self.absorb_with_stance(raw);
                    self.player_hp = self.player_hp.saturating_sub(damage);
                    events.push(BattleEvent::HeavyAttack {
                        actor: Actor::Enemy,
                        damage,
                        blocked,
                    });
                } else {
                    // A swing that misses leaves the stance armed.
                    events.push(BattleEvent::HeavyMiss { actor: Actor::Enemy });
                }
            }
        }

        if self.player_hp == 0 {
            self.phase = BattlePhase::Resolved(FightResult::Loss);
        } else {
            self.phase = BattlePhase::PlayerTurn;
        }
        Ok(self.report(events))
    }

    /// Halves (floor) a landing hit if the stance is up, consuming it.
    fn absorb_with_stance(&mut self, raw: u32) -> (u32, bool) {
        if self.defending {
            self.defending = false;
            (raw / 2, true)
        } else {
            (raw, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::types::BattleOutcome;
    use crate::character::CharacterClass;
    use crate::opponents::template_for_tier;
    use rand::rngs::mock::StepRng;

    // StepRng drives both draws a half-turn can make: the first `u64`
    // feeds the enemy action pick, the next the heavy-hit roll (as f64,
    // below the threshold = miss). Zero picks pool index 0 (Attack) and
    // always misses; `3 << 62` (0.75 of the range) picks index 2 (Heavy),
    // survives gen_range's rejection zone, and lands the hit.
    fn always_low() -> StepRng {
        StepRng::new(0, 0)
    }

    fn always_high() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn heavy_picker() -> StepRng {
        StepRng::new(3 << 62, 0)
    }

    fn fighter() -> Character {
        Character::new("Rocky".to_string(), CharacterClass::Fighter)
    }

    fn novice() -> &'static EnemyTemplate {
        template_for_tier(1).expect("tier 1 exists")
    }

    #[test]
    fn test_attack_damage_floor() {
        assert_eq!(attack_damage(20, 8), 12);
        assert_eq!(attack_damage(5, 100), 1);
        assert_eq!(attack_damage(10, 10), 1);
    }

    #[test]
    fn test_heavy_attack_damage() {
        assert_eq!(heavy_attack_damage(20, 8), 32);
        assert_eq!(heavy_attack_damage(1, 100), 1);
    }

    #[test]
    fn test_session_snapshot() {
        let mut character = fighter();
        character.hp = 90;
        let session = BattleSession::start(&character, novice());

        assert_eq!(session.player_hp, 90);
        assert_eq!(session.enemy_hp, 80);
        assert!(!session.heal_used);
        assert!(!session.defending);
        assert_eq!(session.phase, BattlePhase::PlayerTurn);
    }

    #[test]
    fn test_plain_attack_is_deterministic() {
        let character = fighter();
        let enemy = novice();
        let mut session = BattleSession::start(&character, enemy);

        let report = session
            .player_action(&character, enemy, PlayerAction::Attack, &mut always_low())
            .expect("player turn");

        // 20 attack vs 8 defense
        assert_eq!(report.enemy_hp, 68);
        assert_eq!(
            report.events,
            vec![BattleEvent::Attack {
                actor: Actor::Player,
                damage: 12,
                blocked: false
            }]
        );
        assert_eq!(report.outcome, BattleOutcome::InProgress);
        assert_eq!(session.phase, BattlePhase::EnemyTurn);
    }

    #[test]
    fn test_heavy_attack_hit_and_miss() {
        let character = fighter();
        let enemy = novice();

        let mut session = BattleSession::start(&character, enemy);
        let report = session
            .player_action(
                &character,
                enemy,
                PlayerAction::HeavyAttack,
                &mut always_high(),
            )
            .expect("player turn");
        // 40 attack vs 8 defense
        assert_eq!(
            report.events,
            vec![BattleEvent::HeavyAttack {
                actor: Actor::Player,
                damage: 32,
                blocked: false
            }]
        );

        let mut session = BattleSession::start(&character, enemy);
        let report = session
            .player_action(
                &character,
                enemy,
                PlayerAction::HeavyAttack,
                &mut always_low(),
            )
            .expect("player turn");
        assert_eq!(
            report.events,
            vec![BattleEvent::HeavyMiss {
                actor: Actor::Player
            }]
        );
        assert_eq!(report.enemy_hp, 80);
        // A miss still hands the turn over.
        assert_eq!(session.phase, BattlePhase::EnemyTurn);
    }

    #[test]
    fn test_winning_blow_skips_enemy_turn() {
        let character = fighter();
        let enemy = novice();
        let mut session = BattleSession::start(&character, enemy);
        session.enemy_hp = 5;

        let report = session
            .player_action(&character, enemy, PlayerAction::Attack, &mut always_low())
            .expect("player turn");

        assert_eq!(report.outcome, BattleOutcome::Win);
        assert_eq!(session.phase, BattlePhase::Resolved(FightResult::Win));
        assert_eq!(
            session
                .enemy_turn(&character, enemy, &mut always_low())
                .unwrap_err(),
            GameError::InvalidAction("not the enemy's turn")
        );
    }

    #[test]
    fn test_action_rejected_outside_player_turn() {
        let character = fighter();
        let enemy = novice();
        let mut session = BattleSession::start(&character, enemy);

        session
            .player_action(&character, enemy, PlayerAction::Attack, &mut always_low())
            .expect("player turn");

        let err = session
            .player_action(&character, enemy, PlayerAction::Attack, &mut always_low())
            .unwrap_err();
        assert_eq!(err, GameError::InvalidAction("not the player's turn"));
    }

    #[test]
    fn test_defend_halves_next_hit_only() {
        let character = fighter(); // 15 defense
        let enemy = novice(); // 12 attack
        let mut session = BattleSession::start(&character, enemy);

        session
            .player_action(&character, enemy, PlayerAction::Defend, &mut always_low())
            .expect("player turn");
        assert!(session.defending);

        // Enemy picks the plain attack (low draw). Raw damage floors at 1,
        // halved to 0 by the stance.
        let report = session
            .enemy_turn(&character, enemy, &mut always_low())
            .expect("enemy turn");
        assert_eq!(
            report.events,
            vec![BattleEvent::Attack {
                actor: Actor::Enemy,
                damage: 0,
                blocked: true
            }]
        );
        assert!(!session.defending);

        // The following hit is at full strength again.
        session
            .player_action(&character, enemy, PlayerAction::Attack, &mut always_low())
            .expect("player turn");
        let report = session
            .enemy_turn(&character, enemy, &mut always_low())
            .expect("enemy turn");
        assert_eq!(
            report.events,
            vec![BattleEvent::Attack {
                actor: Actor::Enemy,
                damage: 1,
                blocked: false
            }]
        );
    }

    #[test]
    fn test_defend_halving_floors() {
        let character = fighter(); // 15 defense
        let enemy = template_for_tier(3).expect("tier 3 exists"); // 18 attack
        let mut session = BattleSession::start(&character, enemy);

        session
            .player_action(&character, enemy, PlayerAction::Defend, &mut always_low())
            .expect("player turn");
        let report = session
            .enemy_turn(&character, enemy, &mut always_low())
            .expect("enemy turn");

        // Raw 3, halved and floored to 1.
        assert_eq!(
            report.events,
            vec![BattleEvent::Attack {
                actor: Actor::Enemy,
                damage: 1,
                blocked: true
            }]
        );
    }

    #[test]
    fn test_stance_survives_missed_heavy() {
        let character = fighter();
        let enemy = novice();
        let mut session = BattleSession::start(&character, enemy);

        session
            .player_action(&character, enemy, PlayerAction::Defend, &mut always_low())
            .expect("player turn");

        // First draw (3 << 62) picks the heavy swing; the increment wraps
        // the second draw to zero, which makes the roll miss.
        let mut rng = StepRng::new(3 << 62, 1 << 62);
        let report = session
            .enemy_turn(&character, enemy, &mut rng)
            .expect("enemy turn");
        assert_eq!(
            report.events,
            vec![BattleEvent::HeavyMiss { actor: Actor::Enemy }]
        );
        assert!(session.defending);

        // The stance is consumed by the next hit that actually lands.
        session
            .player_action(&character, enemy, PlayerAction::Attack, &mut always_low())
            .expect("player turn");
        let report = session
            .enemy_turn(&character, enemy, &mut always_low())
            .expect("enemy turn");
        assert_eq!(
            report.events,
            vec![BattleEvent::Attack {
                actor: Actor::Enemy,
                damage: 0,
                blocked: true
            }]
        );
        assert!(!session.defending);
    }

    #[test]
    fn test_enemy_heavy_hit() {
        let character = fighter(); // 15 defense
        let enemy = novice(); // 12 attack, heavy = 24 - 15 = 9
        let mut session = BattleSession::start(&character, enemy);

        session
            .player_action(&character, enemy, PlayerAction::Attack, &mut always_low())
            .expect("player turn");
        let report = session
            .enemy_turn(&character, enemy, &mut heavy_picker())
            .expect("enemy turn");

        assert_eq!(
            report.events,
            vec![BattleEvent::HeavyAttack {
                actor: Actor::Enemy,
                damage: 9,
                blocked: false
            }]
        );
        assert_eq!(report.player_hp, 141);
    }

    #[test]
    fn test_heal_once_per_battle() {
        let mut character = fighter();
        character.hp = 50;
        let enemy = novice();
        let mut session = BattleSession::start(&character, enemy);

        let report = session
            .player_action(&character, enemy, PlayerAction::Heal, &mut always_low())
            .expect("player turn");
        // floor(150 * 0.3) = 45
        assert_eq!(
            report.events,
            vec![BattleEvent::Heal {
                actor: Actor::Player,
                amount: 45
            }]
        );
        assert_eq!(report.player_hp, 95);
        assert!(session.heal_used);

        session
            .enemy_turn(&character, enemy, &mut always_low())
            .expect("enemy turn");

        // Second heal is rejected and the turn is not consumed.
        let err = session
            .player_action(&character, enemy, PlayerAction::Heal, &mut always_low())
            .unwrap_err();
        assert_eq!(err, GameError::InvalidAction("heal already used this battle"));
        assert_eq!(session.phase, BattlePhase::PlayerTurn);
    }

    #[test]
    fn test_heal_caps_at_max_hp() {
        let mut character = fighter();
        character.hp = 140;
        let enemy = novice();
        let mut session = BattleSession::start(&character, enemy);

        let report = session
            .player_action(&character, enemy, PlayerAction::Heal, &mut always_low())
            .expect("player turn");

        assert_eq!(report.player_hp, 150);
    }

    #[test]
    fn test_player_death_resolves_loss() {
        let character = fighter();
        let enemy = novice();
        let mut session = BattleSession::start(&character, enemy);
        session
            .player_action(&character, enemy, PlayerAction::Attack, &mut always_low())
            .expect("player turn");
        session.player_hp = 1;

        let report = session
            .enemy_turn(&character, enemy, &mut always_low())
            .expect("enemy turn");

        assert_eq!(report.outcome, BattleOutcome::Loss);
        assert_eq!(session.phase, BattlePhase::Resolved(FightResult::Loss));
    }
}
