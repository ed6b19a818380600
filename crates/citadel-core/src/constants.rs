//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Economy ---

/// Starting gold when neither config nor level overrides it.
pub const INITIAL_MONEY: i64 = 100;

/// Starting base health when neither config nor level overrides it.
pub const INITIAL_HEALTH: i32 = 20;

/// Base health lost per enemy that reaches the end tile.
pub const BREACH_DAMAGE: i32 = 1;

// --- Grid ---

/// Edge length of one grid tile in world units.
pub const TILE_SIZE: f64 = 80.0;

/// Tower range tiers.
pub const RANGE_SHORT: f64 = 120.0;
pub const RANGE_MEDIUM: f64 = 200.0;
pub const RANGE_LONG: f64 = 280.0;

// --- Tower leveling ---

/// Highest tower level. Terminal state of the merge machine.
pub const MAX_TOWER_LEVEL: u8 = 4;

/// LV1 absorptions needed for LV1->2, LV2->3, LV3->4.
pub const MERGE_COST: [u32; 3] = [2, 3, 3];

/// Fallback absorption count for a level outside the table.
pub const MERGE_COST_FALLBACK: u32 = 2;

/// Damage growth per level above 1 (fraction of base damage).
pub const DAMAGE_GROWTH_PER_LEVEL: f64 = 0.6;

/// Attack interval reduction per level above 1 (seconds).
pub const ATTACK_INTERVAL_REDUCTION_PER_LEVEL: f64 = 0.1;

/// Floor for the level-scaled attack interval (seconds).
pub const MIN_ATTACK_INTERVAL: f64 = 0.3;

// --- Buffs ---

/// Duration of a damage/speed buff (seconds).
pub const BUFF_DURATION_SECS: f64 = 5.0;

/// Buff reach as a multiple of the buffing tower's range.
pub const BUFF_RANGE_FACTOR: f64 = 1.5;

// --- Projectiles ---

/// Projectile travel speed (units/s).
pub const PROJECTILE_SPEED: f64 = 800.0;

/// Distance at which a projectile counts as having hit.
pub const PROJECTILE_HIT_DISTANCE: f64 = 10.0;

/// Base radius of splash damage around the hit point.
pub const SPLASH_RADIUS: f64 = 80.0;

/// Base radius of the slow field around the hit point.
pub const SLOW_RADIUS: f64 = 80.0;

/// Duration of an on-hit slow (seconds).
pub const SLOW_DURATION_SECS: f64 = 1.2;

/// Additional slow percent at LV2 and LV3.
pub const SLOW_BONUS_LV2: f64 = 0.07;
pub const SLOW_BONUS_LV3: f64 = 0.15;

/// Slow percent at max level, replacing level scaling.
pub const SLOW_PERCENT_MAX_LEVEL: f64 = 0.5;

/// Search radius for the next chain link (strict).
pub const CHAIN_RADIUS: f64 = 150.0;

/// Damage multiplier applied per chain link.
pub const CHAIN_DECAY: f64 = 0.8;

// --- Enemies ---

/// Distance at which an enemy counts as having reached its waypoint.
pub const WAYPOINT_REACH_DISTANCE: f64 = 5.0;

/// Weight of the distance-to-end term in greedy path construction.
pub const PATH_END_BIAS: f64 = 0.3;

/// HP multiplier tiers by wave band.
pub const HP_MULTIPLIER_EARLY: f64 = 1.0;
pub const HP_MULTIPLIER_MID: f64 = 1.5;
pub const HP_MULTIPLIER_LATE: f64 = 2.5;

/// Last wave of the early and mid HP bands.
pub const HP_BAND_EARLY_END: u32 = 10;
pub const HP_BAND_MID_END: u32 = 20;

/// Boss stats are fixed regardless of wave.
pub const BOSS_HP: u32 = 5000;
pub const BOSS_SPEED: f64 = 25.0;

// --- Waves ---

/// Number of scheduled waves.
pub const TOTAL_WAVES: u32 = 30;

/// Waves hardcoded to the Elite kind.
pub const ELITE_WAVES: [u32; 2] = [15, 25];

/// The boss wave.
pub const BOSS_WAVE: u32 = 30;

/// Enemies in an elite wave.
pub const ELITE_WAVE_COUNT: u32 = 8;

/// Defensive default for a wave missing from the lookup tables.
pub const DEFAULT_WAVE_COUNT: u32 = 35;

/// Countdown before wave 1 (seconds).
pub const PREPARE_TIME_SECS: f64 = 15.0;

/// Pause between clearing a wave and starting the next (seconds).
pub const WAVE_GAP_NORMAL_SECS: f64 = 4.0;
pub const WAVE_GAP_ELITE_SECS: f64 = 5.0;
pub const WAVE_GAP_BOSS_SECS: f64 = 6.0;

/// Estimated wave durations used for the progress readout (seconds).
pub const WAVE_DURATION_NORMAL_SECS: f64 = 25.0;
pub const WAVE_DURATION_ELITE_SECS: f64 = 35.0;
pub const WAVE_DURATION_BOSS_SECS: f64 = 45.0;

/// Spawn interval for an enemy moving at `SPAWN_BASELINE_SPEED` (seconds).
pub const SPAWN_INTERVAL_BASE: f64 = 0.8;
pub const SPAWN_BASELINE_SPEED: f64 = 50.0;
pub const SPAWN_INTERVAL_MIN: f64 = 0.4;
pub const SPAWN_INTERVAL_MAX: f64 = 1.5;

// --- Shop ---

/// Offers shown at once.
pub const SHOP_OFFER_COUNT: usize = 4;

/// Free rerolls per wave.
pub const SHOP_FREE_REFRESHES: u32 = 2;

/// Offer weights by rarity.
pub const RARITY_WEIGHT_WHITE: u32 = 3;
pub const RARITY_WEIGHT_GREEN: u32 = 2;
pub const RARITY_WEIGHT_BLUE: u32 = 1;
