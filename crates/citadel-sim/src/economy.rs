//! Economy context: gold, base health, run outcome flags, end-of-run stats.
//!
//! Owned by the engine and passed by reference to the systems that pay out
//! rewards, charge costs, or apply breaches.

use citadel_core::state::EconomyView;

/// Bookkeeping contract used by systems and merge rules.
pub trait EconomyLedger {
    fn money(&self) -> i64;
    /// Deduct `cost` if affordable. Returns false and leaves money untouched otherwise.
    fn try_spend(&mut self, cost: i64) -> bool;
    /// Credit a kill reward to money and total earned.
    fn credit_reward(&mut self, amount: u32);
    /// Add to the cumulative damage stat.
    fn record_damage(&mut self, amount: u32);
    /// Subtract base health. Returns health left.
    fn breach(&mut self, damage: i32) -> i32;
    fn is_game_over(&self) -> bool;
}

/// The shared counters for one run.
#[derive(Debug, Clone, Default)]
pub struct Economy {
    money: i64,
    base_health: i32,
    game_over: bool,
    victory: bool,
    total_damage: u64,
    total_earned: u64,
}

impl Economy {
    pub fn new(money: i64, base_health: i32) -> Self {
        Self {
            money,
            base_health,
            ..Default::default()
        }
    }

    pub fn base_health(&self) -> i32 {
        self.base_health
    }

    pub fn is_victory(&self) -> bool {
        self.victory
    }

    pub fn total_damage(&self) -> u64 {
        self.total_damage
    }

    pub fn total_earned(&self) -> u64 {
        self.total_earned
    }

    /// Flag the run as won. Ignored once the base has fallen.
    pub fn declare_victory(&mut self) {
        if self.game_over {
            return;
        }
        self.victory = true;
        self.game_over = true;
    }

    pub fn view(&self) -> EconomyView {
        EconomyView {
            money: self.money,
            base_health: self.base_health,
            game_over: self.game_over,
            victory: self.victory,
            total_damage: self.total_damage,
            total_earned: self.total_earned,
        }
    }
}

impl EconomyLedger for Economy {
    fn money(&self) -> i64 {
        self.money
    }

    fn try_spend(&mut self, cost: i64) -> bool {
        if cost < 0 || self.money < cost {
            return false;
        }
        self.money -= cost;
        true
    }

    fn credit_reward(&mut self, amount: u32) {
        self.money += amount as i64;
        self.total_earned += amount as u64;
    }

    fn record_damage(&mut self, amount: u32) {
        self.total_damage += amount as u64;
    }

    fn breach(&mut self, damage: i32) -> i32 {
        self.base_health = (self.base_health - damage).max(0);
        if self.base_health <= 0 {
            self.game_over = true;
        }
        self.base_health
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_requires_funds() {
        let mut eco = Economy::new(50, 20);
        assert!(!eco.try_spend(60));
        assert_eq!(eco.money(), 50);
        assert!(eco.try_spend(50));
        assert_eq!(eco.money(), 0);
    }

    #[test]
    fn test_reward_tracks_total_earned() {
        let mut eco = Economy::new(0, 20);
        eco.credit_reward(3);
        eco.credit_reward(8);
        assert_eq!(eco.money(), 11);
        assert_eq!(eco.total_earned(), 11);
    }

    #[test]
    fn test_breach_flips_game_over_once() {
        let mut eco = Economy::new(0, 2);
        assert_eq!(eco.breach(1), 1);
        assert!(!eco.is_game_over());
        assert_eq!(eco.breach(1), 0);
        assert!(eco.is_game_over());
        assert_eq!(eco.breach(1), 0);
        eco.declare_victory();
        assert!(!eco.is_victory());
    }
}
