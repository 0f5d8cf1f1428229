// Character progression constants
pub const LEVEL_CAP: u32 = 10;
pub const BASE_EXP_TO_LEVEL: u32 = 100;
pub const EXP_CURVE_FACTOR: f64 = 1.5;
pub const LEVEL_UP_HP_BONUS: u32 = 10;
pub const LEVEL_UP_ATTACK_BONUS: u32 = 3;
pub const LEVEL_UP_DEFENSE_BONUS: u32 = 2;
pub const STARTING_GOLD: u32 = 100;

// Battle constants
pub const MIN_HIT_DAMAGE: u32 = 1;
pub const HEAVY_ATTACK_MULTIPLIER: u32 = 2;
pub const HEAVY_ATTACK_MISS_THRESHOLD: f64 = 0.3;
pub const BATTLE_HEAL_RATIO: f64 = 0.3;
pub const DEFEAT_GOLD_LOSS_RATIO: f64 = 0.2;

// Opponent selection window (tiers within +/- this of the character level)
pub const OPPONENT_WINDOW_RADIUS: u32 = 2;

// Shop prices and effects
pub const POTION_COST: u32 = 50;
pub const WEAPON_UPGRADE_COST: u32 = 200;
pub const WEAPON_UPGRADE_ATTACK_BONUS: u32 = 5;
pub const ARMOR_UPGRADE_COST: u32 = 150;
pub const ARMOR_UPGRADE_DEFENSE_BONUS: u32 = 3;

// Fight history
pub const MAX_HISTORY_ENTRIES: usize = 10;

// Turn pacing. The engine resolves half-turns synchronously; these delays
// only gate when the front end requests the next half-turn.
pub const TURN_DELAY_MS: u64 = 800;
pub const VICTORY_SCREEN_DELAY_MS: u64 = 2000;

// Character creation
pub const MAX_NAME_LENGTH: usize = 16;
