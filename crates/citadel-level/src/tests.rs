#[cfg(test)]
mod tests {
    use citadel_core::constants::TILE_SIZE;
    use citadel_core::enums::TileKind;
    use citadel_core::types::Position;

    use crate::grid::{TileCoord, TileGrid};
    use crate::level::{default_level, LevelData, LevelError};
    use crate::path::build_waypoints;

    fn grid(layout: Vec<Vec<u8>>) -> TileGrid {
        TileGrid::from_layout(&layout).unwrap()
    }

    // ---- Grid ----

    #[test]
    fn test_tile_center_projection() {
        let g = grid(vec![vec![2, 2, 2], vec![2, 2, 2]]);
        // 3 cols, 2 rows: x offsets -1,0,1 tiles; y offsets +0.5,-0.5 tiles
        assert_eq!(
            g.tile_center(TileCoord::new(0, 0)),
            Position::new(-TILE_SIZE, TILE_SIZE / 2.0)
        );
        assert_eq!(
            g.tile_center(TileCoord::new(1, 2)),
            Position::new(TILE_SIZE, -TILE_SIZE / 2.0)
        );
    }

    #[test]
    fn test_unknown_codes_decode_as_empty() {
        let g = grid(vec![vec![7, 0]]);
        assert_eq!(g.tile(0, 0), Some(TileKind::Empty));
        assert_eq!(g.tile(0, 1), Some(TileKind::Void));
        assert!(g.is_buildable(0, 0));
        assert!(!g.is_buildable(0, 1));
    }

    #[test]
    fn test_out_of_bounds_tile_is_none() {
        let g = grid(vec![vec![2, 2]]);
        assert_eq!(g.tile(1, 0), None);
        assert_eq!(g.tile(0, 2), None);
        assert!(!g.is_buildable(5, 5));
    }

    #[test]
    fn test_ragged_layout_rejected() {
        let err = TileGrid::from_layout(&[vec![2, 2], vec![2]]).unwrap_err();
        assert!(matches!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_empty_layout_rejected() {
        assert!(matches!(
            TileGrid::from_layout(&[]),
            Err(LevelError::EmptyLayout)
        ));
    }

    #[test]
    fn test_neighbors_clip_to_grid() {
        let g = grid(vec![vec![2, 2], vec![2, 2]]);
        let n: Vec<_> = g.neighbors(TileCoord::new(0, 0)).collect();
        assert_eq!(n.len(), 2);
        assert!(n.contains(&TileCoord::new(1, 0)));
        assert!(n.contains(&TileCoord::new(0, 1)));
    }

    // ---- Path ----

    #[test]
    fn test_straight_path() {
        let g = grid(vec![vec![3, 1, 1, 4]]);
        let wps = build_waypoints(&g);
        assert_eq!(wps.len(), 4);
        for pair in wps.windows(2) {
            assert!(pair[1].x > pair[0].x, "waypoints must advance left to right");
        }
    }

    #[test]
    fn test_path_follows_turns() {
        let g = grid(vec![
            vec![3, 1, 1, 2],
            vec![2, 2, 1, 2],
            vec![4, 1, 1, 2],
        ]);
        let wps = build_waypoints(&g);
        let expected = [
            TileCoord::new(0, 0),
            TileCoord::new(0, 1),
            TileCoord::new(0, 2),
            TileCoord::new(1, 2),
            TileCoord::new(2, 2),
            TileCoord::new(2, 1),
            TileCoord::new(2, 0),
        ];
        assert_eq!(wps.len(), expected.len());
        for (wp, coord) in wps.iter().zip(expected) {
            assert_eq!(*wp, g.tile_center(coord));
        }
    }

    #[test]
    fn test_path_empty_without_endpoints() {
        assert!(build_waypoints(&grid(vec![vec![1, 1, 4]])).is_empty());
        assert!(build_waypoints(&grid(vec![vec![3, 1, 1]])).is_empty());
    }

    #[test]
    fn test_path_ties_prefer_table_order() {
        // Both path tiles are equidistant from start and end.
        let g = grid(vec![vec![2, 1, 2], vec![3, 2, 4], vec![2, 1, 2]]);
        let wps = build_waypoints(&g);
        assert_eq!(wps[1], g.tile_center(TileCoord::new(0, 1)));
        assert_eq!(wps[2], g.tile_center(TileCoord::new(2, 1)));
    }

    // ---- Level data ----

    #[test]
    fn test_default_level_is_valid() {
        let level = default_level();
        let g = level.validate().unwrap();
        let wps = build_waypoints(&g);
        let path_tiles = g.tiles_of_kind(TileKind::Path).count();
        assert_eq!(wps.len(), path_tiles + 2);
        // Consecutive waypoints are adjacent tiles on the serpentine.
        for pair in wps.windows(2) {
            assert!((pair[0].distance_to(&pair[1]) - TILE_SIZE).abs() < 1e-9);
        }
        assert!(level.buildable_count() > 0);
    }

    #[test]
    fn test_level_json_round_trip() {
        let json = r#"{"id":2,"name":"Test","layout":[[3,1,4]],"initial_money":250}"#;
        let level = LevelData::from_json_str(json).unwrap();
        assert_eq!(level.initial_money, Some(250));
        assert_eq!(level.initial_health, None);
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_level_missing_start_and_end() {
        let mut level = default_level();
        level.layout = vec![vec![1, 1, 4]];
        assert!(matches!(level.validate(), Err(LevelError::MissingStart)));
        level.layout = vec![vec![3, 1, 1]];
        assert!(matches!(level.validate(), Err(LevelError::MissingEnd)));
    }

    #[test]
    fn test_bad_json_reports_error() {
        let err = LevelData::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, LevelError::Json(_)));
        assert!(err.to_string().starts_with("invalid level json"));
    }
}
