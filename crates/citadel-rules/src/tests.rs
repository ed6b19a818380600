#[cfg(test)]
mod tests {
    use citadel_core::balance::{tower_archetype, TowerArchetype};
    use citadel_core::components::{LevelBonus, Mobility, SlowEffect, TowerProgress};
    use citadel_core::constants::*;
    use citadel_core::enums::{EnemyKind, MaxLevelBonus, TowerKind};

    use crate::enemy::{derive_enemy_stats, hp_multiplier};
    use crate::leveling::*;
    use crate::skills::*;
    use crate::slow::{apply_slow, tick_recovery};

    fn archer() -> &'static TowerArchetype {
        tower_archetype(TowerKind::Archer)
    }

    /// Absorb LV1 towers of the same kind until `level` is reached.
    fn level_up_to(archetype: &TowerArchetype, level: u8) -> TowerProgress {
        let mut p = initial_progress(archetype);
        while p.level < level {
            assert!(absorb(archetype, &mut p, archetype.kind, 1).is_success());
        }
        p
    }

    // ---- Enemy stats ----

    #[test]
    fn test_normal_hp_at_wave_22() {
        let stats = derive_enemy_stats(22, EnemyKind::Normal);
        assert_eq!(stats.max_hp, 450);
        assert_eq!(stats.speed, 50.0);
    }

    #[test]
    fn test_wave_one_uses_base_stats() {
        let stats = derive_enemy_stats(1, EnemyKind::Tank);
        assert_eq!(stats.max_hp, 40);
        assert_eq!(stats.kill_reward, 3);
    }

    #[test]
    fn test_hp_multiplier_bands() {
        assert_eq!(hp_multiplier(10), 1.0);
        assert_eq!(hp_multiplier(11), 1.5);
        assert_eq!(hp_multiplier(20), 1.5);
        assert_eq!(hp_multiplier(21), 2.5);
    }

    #[test]
    fn test_elite_reward_scales_every_five_waves() {
        // wave 15: bonus 14, tier 2 -> 8 + 2*2
        assert_eq!(derive_enemy_stats(15, EnemyKind::Elite).kill_reward, 12);
        // wave 25: bonus 24, tier 4 -> 8 + 4*2
        assert_eq!(derive_enemy_stats(25, EnemyKind::Elite).kill_reward, 16);
        // (200 + 14*40) * 1.5
        assert_eq!(derive_enemy_stats(15, EnemyKind::Elite).max_hp, 1140);
    }

    #[test]
    fn test_boss_is_wave_independent() {
        let a = derive_enemy_stats(1, EnemyKind::Boss);
        let b = derive_enemy_stats(30, EnemyKind::Boss);
        assert_eq!(a, b);
        assert_eq!(b.max_hp, BOSS_HP);
        assert_eq!(b.kill_reward, 0);
    }

    #[test]
    fn test_wave_zero_treated_as_wave_one() {
        assert_eq!(
            derive_enemy_stats(0, EnemyKind::Fast).max_hp,
            derive_enemy_stats(1, EnemyKind::Fast).max_hp
        );
    }

    // ---- Merge state machine ----

    #[test]
    fn test_can_absorb_requires_level_one_source() {
        let target = initial_progress(archer());
        assert!(can_absorb(archer(), &target, TowerKind::Archer, 1));
        for other_level in 2..=MAX_TOWER_LEVEL {
            assert!(!can_absorb(archer(), &target, TowerKind::Archer, other_level));
        }
        let lv3 = level_up_to(archer(), 3);
        assert!(!can_absorb(archer(), &lv3, TowerKind::Archer, 2));
        assert!(can_absorb(archer(), &lv3, TowerKind::Archer, 1));
    }

    #[test]
    fn test_can_absorb_requires_same_archetype() {
        let target = initial_progress(archer());
        assert!(!can_absorb(archer(), &target, TowerKind::Mage, 1));
    }

    #[test]
    fn test_cannot_absorb_into_max_level() {
        let max = level_up_to(archer(), MAX_TOWER_LEVEL);
        assert!(!can_absorb(archer(), &max, TowerKind::Archer, 1));
    }

    #[test]
    fn test_level_up_after_exactly_two_absorptions() {
        let mut p = initial_progress(archer());
        assert_eq!(
            absorb(archer(), &mut p, TowerKind::Archer, 1),
            AbsorbOutcome::Progressed { exp: 1 }
        );
        assert_eq!(p.level, 1);
        assert_eq!(
            absorb(archer(), &mut p, TowerKind::Archer, 1),
            AbsorbOutcome::LeveledUp { level: 2 }
        );
        assert_eq!(p.level, 2);
        assert_eq!(p.exp, 0);
    }

    #[test]
    fn test_rejected_absorb_leaves_state_unchanged() {
        let mut p = initial_progress(archer());
        absorb(archer(), &mut p, TowerKind::Archer, 1);
        let before = p;
        assert_eq!(
            absorb(archer(), &mut p, TowerKind::Archer, 2),
            AbsorbOutcome::Rejected
        );
        assert_eq!(p.exp, before.exp);
        assert_eq!(p.level, before.level);
        assert_eq!(p.damage, before.damage);
    }

    #[test]
    fn test_total_absorptions_to_max() {
        let mut p = initial_progress(archer());
        let mut count = 0;
        while p.level < MAX_TOWER_LEVEL {
            absorb(archer(), &mut p, TowerKind::Archer, 1);
            count += 1;
        }
        assert_eq!(count, 2 + 3 + 3);
        assert_eq!(next_level_needed(p.level), 0);
    }

    #[test]
    fn test_stats_scale_with_level() {
        let mage = tower_archetype(TowerKind::Mage);
        let lv2 = stats_for_level(mage, 2);
        assert_eq!(lv2.damage, 16);
        assert!((lv2.attack_interval - 0.9).abs() < 1e-9);
        let lv3 = stats_for_level(mage, 3);
        assert_eq!(lv3.damage, 22);
    }

    #[test]
    fn test_attack_interval_floor() {
        let lv4 = stats_for_level(archer(), 4);
        assert!((lv4.attack_interval - MIN_ATTACK_INTERVAL).abs() < 1e-9);
    }

    #[test]
    fn test_max_level_attack_speed_bonus() {
        let p = level_up_to(archer(), MAX_TOWER_LEVEL);
        assert!((p.attack_interval - MIN_ATTACK_INTERVAL * 0.5).abs() < 1e-9);
        assert!(p.bonus.is_none());
    }

    #[test]
    fn test_max_level_damage_bonus() {
        let guard = tower_archetype(TowerKind::Guard);
        let p = level_up_to(guard, MAX_TOWER_LEVEL);
        // floor(18 * 2.8) = 50, doubled by the +100% bonus
        assert_eq!(p.damage, 100);
    }

    #[test]
    fn test_max_level_records_range_bonus() {
        let cannon = tower_archetype(TowerKind::Cannon);
        let lv3 = level_up_to(cannon, 3);
        assert!(lv3.bonus.is_none());
        let p = level_up_to(cannon, MAX_TOWER_LEVEL);
        assert_eq!(
            p.bonus,
            Some(LevelBonus {
                kind: MaxLevelBonus::SplashRange,
                value: 0.8
            })
        );
    }

    // ---- Slow ----

    fn walker() -> (Mobility, SlowEffect) {
        (
            Mobility {
                original_speed: 50.0,
                current_speed: 50.0,
            },
            SlowEffect::default(),
        )
    }

    #[test]
    fn test_slow_strongest_wins_longest_lasts() {
        let (mut m, mut s) = walker();
        apply_slow(&mut m, &mut s, 0.25, 2.0, 0.0);
        apply_slow(&mut m, &mut s, 0.10, 5.0, 0.0);
        assert_eq!(m.current_speed, 37.0);
        assert!((s.end_time - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_slow_never_stacks_additively() {
        let (mut m, mut s) = walker();
        apply_slow(&mut m, &mut s, 0.25, 2.0, 0.0);
        apply_slow(&mut m, &mut s, 0.25, 2.0, 0.5);
        assert_eq!(m.current_speed, 37.0);
    }

    #[test]
    fn test_stronger_slow_replaces_weaker() {
        let (mut m, mut s) = walker();
        apply_slow(&mut m, &mut s, 0.10, 5.0, 0.0);
        apply_slow(&mut m, &mut s, 0.50, 1.0, 0.0);
        assert_eq!(m.current_speed, 25.0);
        assert!((s.end_time - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_recovery_waits_for_latest_end_time() {
        let (mut m, mut s) = walker();
        apply_slow(&mut m, &mut s, 0.25, 1.2, 0.0);
        apply_slow(&mut m, &mut s, 0.25, 1.2, 1.0);
        // First slow's original expiry has passed; the refreshed one has not.
        assert!(!tick_recovery(&mut m, &mut s, 1.5));
        assert_eq!(m.current_speed, 37.0);
        assert!(tick_recovery(&mut m, &mut s, 2.3));
        assert_eq!(m.current_speed, 50.0);
        assert!(!s.active);
    }

    #[test]
    fn test_slow_after_recovery_starts_fresh() {
        let (mut m, mut s) = walker();
        apply_slow(&mut m, &mut s, 0.50, 1.0, 0.0);
        tick_recovery(&mut m, &mut s, 1.0);
        apply_slow(&mut m, &mut s, 0.10, 1.0, 2.0);
        assert_eq!(m.current_speed, 45.0);
        assert!((s.end_time - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_weaker_slow_at_expiry_replaces_lapsed_slow() {
        let (mut m, mut s) = walker();
        apply_slow(&mut m, &mut s, 0.25, 1.2, 0.0);
        // Lands on the tick the first slow ends, before recovery has run.
        apply_slow(&mut m, &mut s, 0.10, 1.2, 1.2);
        assert_eq!(m.current_speed, 45.0);
        assert!((s.end_time - 2.4).abs() < 1e-9);
        assert!(s.active);
    }

    // ---- Skills ----

    #[test]
    fn test_slow_percent_by_level() {
        assert!((slow_percent_for_level(0.25, 1) - 0.25).abs() < 1e-9);
        assert!((slow_percent_for_level(0.25, 2) - 0.32).abs() < 1e-9);
        assert!((slow_percent_for_level(0.25, 3) - 0.40).abs() < 1e-9);
        assert_eq!(slow_percent_for_level(0.25, 4), SLOW_PERCENT_MAX_LEVEL);
    }

    #[test]
    fn test_chain_damage_decay() {
        let first = first_chain_damage(15);
        let second = next_chain_damage(first);
        assert_eq!((first, second), (12, 9));
    }

    #[test]
    fn test_chain_count_with_bonus() {
        assert_eq!(chain_count(3.0, None), 3);
        let bonus = LevelBonus {
            kind: MaxLevelBonus::ChainCount,
            value: 3.0,
        };
        assert_eq!(chain_count(3.0, Some(bonus)), 6);
        let other = LevelBonus {
            kind: MaxLevelBonus::SlowRange,
            value: 3.0,
        };
        assert_eq!(chain_count(3.0, Some(other)), 3);
    }

    #[test]
    fn test_radius_bonus_only_for_matching_kind() {
        let bonus = Some(LevelBonus {
            kind: MaxLevelBonus::SplashRange,
            value: 0.8,
        });
        assert!(
            (bonus_scaled_radius(SPLASH_RADIUS, bonus, MaxLevelBonus::SplashRange) - 144.0).abs()
                < 1e-9
        );
        assert_eq!(
            bonus_scaled_radius(SLOW_RADIUS, bonus, MaxLevelBonus::SlowRange),
            SLOW_RADIUS
        );
    }

    #[test]
    fn test_buffed_damage_and_interval() {
        assert_eq!(buffed_damage(10, 0.0), 10);
        assert_eq!(buffed_damage(10, 0.25), 12);
        assert!((effective_attack_interval(1.0, 0.5) - 0.5).abs() < 1e-9);
        assert_eq!(scaled_damage(20, 0.5), 10);
    }
}
