//! Wave schedule and the wave scheduler state machine.
//!
//! The scheduler is pure state: it is told how many enemies are alive and
//! answers with what to spawn. Entity storage stays with the engine.
//!
//! Phases: Preparing -> Spawning -> WaitingForClear -> GapCountdown -> Spawning
//! (next wave) ... -> Finished after wave 30 is cleared.

use serde::Serialize;
use tracing::warn;

use citadel_core::balance::{enemy_archetype, wave_enemy_count, wave_enemy_kind};
use citadel_core::constants::*;
use citadel_core::enums::{EnemyKind, WavePhase};
use citadel_core::state::WaveView;

/// Static definition of one wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveConfig {
    pub wave: u32,
    pub enemy_kind: EnemyKind,
    pub enemy_count: u32,
    /// Seconds between spawns.
    pub spawn_interval: f64,
    pub is_elite: bool,
    pub is_boss: bool,
}

impl WaveConfig {
    /// Pause after this wave is cleared.
    pub fn gap_secs(&self) -> f64 {
        if self.is_boss {
            WAVE_GAP_BOSS_SECS
        } else if self.is_elite {
            WAVE_GAP_ELITE_SECS
        } else {
            WAVE_GAP_NORMAL_SECS
        }
    }

    /// Rough wave length for the progress readout.
    pub fn duration_estimate_secs(&self) -> f64 {
        if self.is_boss {
            WAVE_DURATION_BOSS_SECS
        } else if self.is_elite {
            WAVE_DURATION_ELITE_SECS
        } else {
            WAVE_DURATION_NORMAL_SECS
        }
    }
}

/// Spawn spacing for a kind: slower enemies are spaced further apart.
pub fn spawn_interval_for(kind: EnemyKind) -> f64 {
    let speed = enemy_archetype(kind).speed;
    (SPAWN_INTERVAL_BASE * SPAWN_BASELINE_SPEED / speed).clamp(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX)
}

/// The complete 30-wave schedule.
#[derive(Debug, Clone)]
pub struct WaveSchedule {
    waves: Vec<WaveConfig>,
}

impl Default for WaveSchedule {
    fn default() -> Self {
        Self::build()
    }
}

impl WaveSchedule {
    /// Build every wave in 1..=TOTAL_WAVES.
    pub fn build() -> Self {
        let waves = (1..=TOTAL_WAVES).map(Self::build_wave).collect();
        Self { waves }
    }

    fn build_wave(wave: u32) -> WaveConfig {
        if wave == BOSS_WAVE {
            return WaveConfig {
                wave,
                enemy_kind: EnemyKind::Boss,
                enemy_count: 1,
                spawn_interval: 0.0,
                is_elite: false,
                is_boss: true,
            };
        }
        if ELITE_WAVES.contains(&wave) {
            return WaveConfig {
                wave,
                enemy_kind: EnemyKind::Elite,
                enemy_count: ELITE_WAVE_COUNT,
                spawn_interval: spawn_interval_for(EnemyKind::Elite),
                is_elite: true,
                is_boss: false,
            };
        }

        let (enemy_kind, enemy_count) = match (wave_enemy_kind(wave), wave_enemy_count(wave)) {
            (Some(kind), Some(count)) => (kind, count),
            (kind, count) => {
                warn!(wave, "wave missing from lookup tables, using default");
                (
                    kind.unwrap_or(EnemyKind::Normal),
                    count.unwrap_or(DEFAULT_WAVE_COUNT),
                )
            }
        };

        WaveConfig {
            wave,
            enemy_kind,
            enemy_count,
            spawn_interval: spawn_interval_for(enemy_kind),
            is_elite: false,
            is_boss: false,
        }
    }

    /// Config for `wave`. `None` outside 1..=TOTAL_WAVES.
    pub fn get(&self, wave: u32) -> Option<&WaveConfig> {
        let index = wave.checked_sub(1)? as usize;
        self.waves.get(index)
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaveConfig> {
        self.waves.iter()
    }

    /// Total enemies across all waves.
    pub fn total_enemies(&self) -> u32 {
        self.waves.iter().map(|w| w.enemy_count).sum()
    }
}

/// Result of advancing the scheduler by one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchedulerTick {
    /// Set on the tick a wave begins.
    pub wave_started: Option<WaveConfig>,
    /// Enemy to spawn this tick.
    pub spawn: Option<EnemyKind>,
    /// Set on the tick the final wave is cleared.
    pub finished: bool,
}

/// Wave scheduler state.
#[derive(Debug, Clone)]
pub struct WaveScheduler {
    schedule: WaveSchedule,
    /// 0 while preparing.
    current_wave: u32,
    phase: WavePhase,
    /// Counts down.
    prepare_timer: f64,
    /// Counts up.
    gap_timer: f64,
    /// Counts up; reset on each spawn.
    spawn_timer: f64,
    enemies_left_to_spawn: u32,
    wave_elapsed: f64,
}

impl Default for WaveScheduler {
    fn default() -> Self {
        Self::new(WaveSchedule::build())
    }
}

impl WaveScheduler {
    pub fn new(schedule: WaveSchedule) -> Self {
        Self {
            schedule,
            current_wave: 0,
            phase: WavePhase::Preparing,
            prepare_timer: PREPARE_TIME_SECS,
            gap_timer: 0.0,
            spawn_timer: 0.0,
            enemies_left_to_spawn: 0,
            wave_elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds given the current number of live enemies.
    pub fn tick(&mut self, dt: f64, live_enemies: usize) -> SchedulerTick {
        let mut out = SchedulerTick::default();

        match self.phase {
            WavePhase::Preparing => {
                self.prepare_timer -= dt;
                if self.prepare_timer <= 0.0 {
                    self.prepare_timer = 0.0;
                    out.wave_started = self.start_wave(1);
                }
            }
            WavePhase::Spawning => {
                self.wave_elapsed += dt;
                self.spawn_timer += dt;
                if let Some(config) = self.current_config() {
                    if self.enemies_left_to_spawn > 0 && self.spawn_timer >= config.spawn_interval {
                        out.spawn = Some(config.enemy_kind);
                        self.enemies_left_to_spawn -= 1;
                        self.spawn_timer = 0.0;
                    }
                }
                if self.enemies_left_to_spawn == 0 {
                    self.phase = WavePhase::WaitingForClear;
                }
            }
            WavePhase::WaitingForClear => {
                self.wave_elapsed += dt;
                if live_enemies == 0 {
                    if self.current_wave >= TOTAL_WAVES {
                        self.phase = WavePhase::Finished;
                        out.finished = true;
                    } else {
                        self.phase = WavePhase::GapCountdown;
                        self.gap_timer = 0.0;
                    }
                }
            }
            WavePhase::GapCountdown => {
                self.wave_elapsed += dt;
                if live_enemies > 0 {
                    self.phase = WavePhase::WaitingForClear;
                    self.gap_timer = 0.0;
                } else {
                    self.gap_timer += dt;
                    if self.gap_timer >= self.current_gap() {
                        out.wave_started = self.start_wave(self.current_wave + 1);
                    }
                }
            }
            WavePhase::Finished => {}
        }

        out
    }

    fn start_wave(&mut self, wave: u32) -> Option<WaveConfig> {
        let Some(config) = self.schedule.get(wave).copied() else {
            warn!(wave, "refusing to start unscheduled wave");
            self.phase = WavePhase::Finished;
            return None;
        };
        self.current_wave = wave;
        self.phase = WavePhase::Spawning;
        self.enemies_left_to_spawn = config.enemy_count;
        self.spawn_timer = 0.0;
        self.gap_timer = 0.0;
        self.wave_elapsed = 0.0;
        Some(config)
    }

    fn current_config(&self) -> Option<&WaveConfig> {
        self.schedule.get(self.current_wave)
    }

    fn current_gap(&self) -> f64 {
        self.current_config()
            .map(WaveConfig::gap_secs)
            .unwrap_or(WAVE_GAP_NORMAL_SECS)
    }

    // --- Progress queries ---

    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn schedule(&self) -> &WaveSchedule {
        &self.schedule
    }

    pub fn is_finished(&self) -> bool {
        self.phase == WavePhase::Finished
    }

    pub fn enemies_left_to_spawn(&self) -> u32 {
        self.enemies_left_to_spawn
    }

    /// Seconds left before wave 1. Zero once waves are running.
    pub fn prepare_remaining(&self) -> f64 {
        if self.phase == WavePhase::Preparing {
            self.prepare_timer.max(0.0)
        } else {
            0.0
        }
    }

    /// Seconds until the next wave starts: exact during the gap, estimated while
    /// a wave is running. Zero while preparing and on the last wave.
    pub fn next_wave_remaining(&self) -> f64 {
        if self.phase == WavePhase::Preparing || self.current_wave >= TOTAL_WAVES {
            return 0.0;
        }
        let gap = self.current_gap();
        if self.phase == WavePhase::GapCountdown {
            return (gap - self.gap_timer).max(0.0);
        }
        let estimate = self
            .current_config()
            .map(WaveConfig::duration_estimate_secs)
            .unwrap_or(WAVE_DURATION_NORMAL_SECS);
        let remaining = estimate - self.wave_elapsed;
        if remaining > 0.0 {
            remaining
        } else {
            gap
        }
    }

    /// Whether a wave is spawning or being fought.
    pub fn in_combat(&self) -> bool {
        self.current_wave > 0
            && matches!(
                self.phase,
                WavePhase::Spawning | WavePhase::WaitingForClear
            )
    }

    /// Fraction of the current wave's estimated duration elapsed.
    pub fn progress(&self) -> f64 {
        match self.current_config() {
            Some(config) => (self.wave_elapsed / config.duration_estimate_secs()).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            current_wave: self.current_wave,
            total_waves: self.schedule.len() as u32,
            phase: self.phase,
            prepare_remaining_secs: self.prepare_remaining(),
            next_wave_remaining_secs: self.next_wave_remaining(),
            in_combat: self.in_combat(),
            enemies_left_to_spawn: self.enemies_left_to_spawn,
            progress: self.progress(),
        }
    }
}
