#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::balance::*;
    use crate::commands::PlayerCommand;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::{GameEvent, RejectReason};
    use crate::state::GameStateSnapshot;
    use crate::types::{Position, SimTime};

    #[test]
    fn test_enemy_kind_serde() {
        let variants = vec![
            EnemyKind::Normal,
            EnemyKind::Fast,
            EnemyKind::Tank,
            EnemyKind::Elite,
            EnemyKind::Boss,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: EnemyKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_wave_phase_serde() {
        let variants = vec![
            WavePhase::Preparing,
            WavePhase::Spawning,
            WavePhase::WaitingForClear,
            WavePhase::GapCountdown,
            WavePhase::Finished,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: WavePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_player_command_tagged_json() {
        let cmd = PlayerCommand::BuyTower {
            slot: 2,
            row: 3,
            col: 4,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"BuyTower\""));

        let back: PlayerCommand =
            serde_json::from_str(r#"{"type":"MergeTowers","source_id":7,"target_id":2}"#)
                .unwrap();
        assert!(matches!(
            back,
            PlayerCommand::MergeTowers {
                source_id: 7,
                target_id: 2
            }
        ));
    }

    #[test]
    fn test_game_event_tagged_json() {
        let event = GameEvent::CommandRejected {
            reason: RejectReason::TileOccupied,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::MainMenu);
        assert!(back.enemies.is_empty());
    }

    // ---- Balance tables ----

    #[test]
    fn test_one_archetype_per_tower_id() {
        let ids: HashSet<&str> = TOWER_ARCHETYPES.iter().map(|a| a.kind.id()).collect();
        assert_eq!(ids.len(), TOWER_ARCHETYPES.len());
        for kind in TowerKind::ALL {
            assert_eq!(tower_archetype(kind).kind, kind);
            assert_eq!(tower_archetype_by_id(kind.id()).map(|a| a.kind), Some(kind));
        }
        assert!(tower_archetype_by_id("tower_unknown").is_none());
    }

    #[test]
    fn test_enemy_archetype_lookup_matches_kind() {
        for a in ENEMY_ARCHETYPES.iter() {
            assert_eq!(enemy_archetype(a.kind), a);
        }
        assert_eq!(enemy_archetype(EnemyKind::Boss).base_hp, BOSS_HP);
        assert_eq!(enemy_archetype(EnemyKind::Boss).base_reward, 0);
    }

    #[test]
    fn test_merge_cost_table() {
        assert_eq!(merge_cost(1), 2);
        assert_eq!(merge_cost(2), 3);
        assert_eq!(merge_cost(3), 3);
        assert_eq!(merge_cost(MAX_TOWER_LEVEL), 0);
        assert_eq!(merge_cost(0), MERGE_COST_FALLBACK);
    }

    #[test]
    fn test_regular_wave_tables_cover_non_special_waves() {
        for wave in 1..=TOTAL_WAVES {
            let special = ELITE_WAVES.contains(&wave) || wave == BOSS_WAVE;
            assert_eq!(wave_enemy_count(wave).is_some(), !special, "count wave {wave}");
            assert_eq!(wave_enemy_kind(wave).is_some(), !special, "kind wave {wave}");
        }
        assert_eq!(wave_enemy_count(31), None);
        assert_eq!(wave_enemy_kind(0), None);
    }

    #[test]
    fn test_rarity_weights() {
        assert_eq!(rarity_weight(Rarity::White), 3);
        assert_eq!(rarity_weight(Rarity::Green), 2);
        assert_eq!(rarity_weight(Rarity::Blue), 1);
    }

    #[test]
    fn test_tile_codes() {
        for kind in [
            TileKind::Void,
            TileKind::Path,
            TileKind::Empty,
            TileKind::Start,
            TileKind::End,
        ] {
            assert_eq!(TileKind::from_code(kind.code()), kind);
        }
        assert_eq!(TileKind::from_code(9), TileKind::Empty);
    }

    #[test]
    fn test_active_skills() {
        assert!(SkillType::AreaDamage.is_active());
        assert!(SkillType::BuffSpeed.is_active());
        assert!(!SkillType::Chain.is_active());
        assert!(!SkillType::None.is_active());
    }

    // ---- Types ----

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_toward_does_not_overshoot() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, 0.0);
        let mid = a.step_toward(&b, 4.0);
        assert!((mid.x - 4.0).abs() < 1e-9);
        assert_eq!(a.step_toward(&b, 25.0), b);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..TICK_RATE {
            t.advance();
        }
        assert_eq!(t.tick, TICK_RATE as u64);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
    }
}
