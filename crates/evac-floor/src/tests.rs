//! Unit tests for evac-floor.
//!
//! All tests use hand-written plans so they run without any plan file.

#[cfg(test)]
mod helpers {
    use crate::{FloorGraph, parse_floor_plan};

    /// Parse and precompute.
    pub fn floor(text: &str) -> FloorGraph {
        let mut f = parse_floor_plan(text).unwrap();
        f.precompute();
        f
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use evac_core::{CellId, Coord};

    use crate::{CellKind, FloorError, FloorGraphBuilder};

    #[test]
    fn all_open_by_default() {
        let g = FloorGraphBuilder::new(2, 3).build();
        assert_eq!(g.cell_count(), 6);
        assert!(g.cells().iter().all(|c| c.kind == CellKind::Open && !c.placeable));
        assert!(!g.is_precomputed());
    }

    #[test]
    fn row_major_ids() {
        let g = FloorGraphBuilder::new(3, 4).build();
        assert_eq!(g.id_of(Coord::new(0, 0)), Some(CellId(0)));
        assert_eq!(g.id_of(Coord::new(1, 2)), Some(CellId(6)));
        assert_eq!(g.id_of(Coord::new(3, 0)), None);
        assert_eq!(g.id_of(Coord::new(0, 4)), None);
        assert_eq!(g.coord_of(CellId(11)), Coord::new(2, 3));
    }

    #[test]
    fn neighbors_sorted_and_in_bounds() {
        let g = FloorGraphBuilder::new(3, 3).build();
        // Centre cell (1,1) = id 4 → up 1, left 3, right 5, down 7.
        assert_eq!(g.neighbors(CellId(4)), &[CellId(1), CellId(3), CellId(5), CellId(7)]);
        // Corner (0,0) → right 1, down 3.
        assert_eq!(g.neighbors(CellId(0)), &[CellId(1), CellId(3)]);
        // Corner (2,2) → up 5, left 7.
        assert_eq!(g.neighbors(CellId(8)), &[CellId(5), CellId(7)]);
    }

    #[test]
    fn walls_stay_in_adjacency() {
        let mut b = FloorGraphBuilder::new(1, 2);
        b.set_kind(Coord::new(0, 1), CellKind::Wall).unwrap();
        let g = b.build();
        assert_eq!(g.neighbors(CellId(0)), &[CellId(1)]);
    }

    #[test]
    fn kind_clears_placeable() {
        let mut b = FloorGraphBuilder::new(1, 1);
        b.set_placeable(Coord::new(0, 0)).unwrap();
        b.set_kind(Coord::new(0, 0), CellKind::Fire).unwrap();
        let g = b.build();
        assert!(!g.cell(CellId(0)).is_placeable());
        assert!(g.cell(CellId(0)).is_fire());
    }

    #[test]
    fn out_of_bounds_rejected() {
        let mut b = FloorGraphBuilder::new(2, 2);
        let err = b.set_kind(Coord::new(2, 0), CellKind::Wall).unwrap_err();
        assert!(matches!(err, FloorError::OutOfBounds { rows: 2, cols: 2, .. }));
    }

    #[test]
    fn filtered_enumerations_ascending() {
        let mut b = FloorGraphBuilder::new(2, 3);
        b.set_kind(Coord::new(1, 2), CellKind::Bottleneck).unwrap();
        b.set_kind(Coord::new(0, 1), CellKind::Bottleneck).unwrap();
        b.set_placeable(Coord::new(1, 0)).unwrap();
        b.set_placeable(Coord::new(0, 0)).unwrap();
        let g = b.build();
        assert_eq!(g.bottleneck_cells(), vec![CellId(1), CellId(5)]);
        assert_eq!(g.placeable_cells(), vec![CellId(0), CellId(3)]);
        assert!(g.fire_cells().is_empty());
        assert!(g.safe_cells().is_empty());
    }
}

// ── Distance precompute ───────────────────────────────────────────────────────

#[cfg(test)]
mod distances {
    use evac_core::CellId;

    use super::helpers::floor;
    use crate::Distance;

    #[test]
    fn corridor_safe_open_fire() {
        // [S][.][F]
        let g = floor("S.F\n");
        let open = g.cell(CellId(1));
        assert_eq!(open.dist_to_safe, Distance(1));
        assert_eq!(open.dist_to_fire, Distance(1));

        let fire = g.cell(CellId(2));
        assert_eq!(fire.dist_to_fire, Distance::ZERO);
        assert_eq!(fire.dist_to_safe, Distance::INFINITE);

        let safe = g.cell(CellId(0));
        assert_eq!(safe.dist_to_safe, Distance::ZERO);
        // The only route to the fire runs through the open cell.
        assert_eq!(safe.dist_to_fire, Distance(2));
        assert!(g.is_precomputed());
    }

    #[test]
    fn walls_are_unreachable() {
        let g = floor("S#F\n");
        let wall = g.cell(CellId(1));
        assert_eq!(wall.dist_to_safe, Distance::INFINITE);
        assert_eq!(wall.dist_to_fire, Distance::INFINITE);
        // Wall separates the two, so neither target reaches the other.
        assert_eq!(g.cell(CellId(0)).dist_to_fire, Distance::INFINITE);
        assert_eq!(g.cell(CellId(2)).dist_to_safe, Distance::INFINITE);
    }

    #[test]
    fn fire_blocks_route_to_safety() {
        // The open cell on the right can only reach S through F.
        let g = floor("S.F.\n");
        assert_eq!(g.cell(CellId(3)).dist_to_safe, Distance::INFINITE);
        assert_eq!(g.cell(CellId(3)).dist_to_fire, Distance(1));
    }

    #[test]
    fn nearest_of_several_targets() {
        let g = floor("\
S....
.....
....S
");
        // (1,2) = id 7: 3 hops to either exit.
        assert_eq!(g.cell(CellId(7)).dist_to_safe, Distance(3));
        // (0,1) = id 1: one hop from the top-left exit.
        assert_eq!(g.cell(CellId(1)).dist_to_safe, Distance(1));
        // (2,3) = id 13: one hop from the bottom-right exit.
        assert_eq!(g.cell(CellId(13)).dist_to_safe, Distance(1));
    }

    #[test]
    fn routes_around_walls() {
        let g = floor("\
P#S
.#.
...
");
        // P(0,0) → (1,0) → (2,0) → (2,1) → (2,2) → (1,2) → S(0,2) = 6 hops.
        assert_eq!(g.cell(CellId(0)).dist_to_safe, Distance(6));
    }

    #[test]
    fn bottlenecks_are_traversable() {
        let g = floor("PBS\n");
        assert_eq!(g.cell(CellId(0)).dist_to_safe, Distance(2));
        assert_eq!(g.cell(CellId(1)).dist_to_safe, Distance(1));
    }

    #[test]
    fn precompute_is_idempotent() {
        let mut g = floor("\
#######
#P..B.S
#.F.#.#
#P....S
#######
");
        let first = g.clone();
        g.precompute();
        assert_eq!(g, first);
    }

    #[test]
    fn distance_display_and_order() {
        assert_eq!(Distance(4).to_string(), "4");
        assert_eq!(Distance::INFINITE.to_string(), "inf");
        assert!(Distance(1_000_000) < Distance::INFINITE);
        assert_eq!(Distance::INFINITE.next(), Distance::INFINITE);
        assert_eq!(Distance(2).hops(), Some(2));
        assert_eq!(Distance::INFINITE.hops(), None);
    }
}

// ── Parser ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod parser {
    use evac_core::{CellId, Coord};

    use crate::{CellKind, FloorError, parse_floor_plan};

    #[test]
    fn every_symbol() {
        let g = parse_floor_plan("#W.F\nSBP \n").unwrap();
        let kinds: Vec<CellKind> = g.cells().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CellKind::Wall, CellKind::Wall, CellKind::Open, CellKind::Fire,
                CellKind::Safe, CellKind::Bottleneck, CellKind::Open, CellKind::Open,
            ]
        );
        assert!(g.cell(CellId(6)).is_placeable());
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 4);
    }

    #[test]
    fn comments_and_trailing_blank_lines() {
        let g = parse_floor_plan("; a comment\nPS\n\n   \n").unwrap();
        assert_eq!(g.rows(), 1);
        assert_eq!(g.cols(), 2);
    }

    #[test]
    fn ragged_rows_padded_with_walls() {
        let g = parse_floor_plan("P..S\nP\n").unwrap();
        assert_eq!(g.cols(), 4);
        for col in 1..4 {
            let id = g.id_of(Coord::new(1, col)).unwrap();
            assert!(g.cell(id).is_wall(), "col {col} should be padded");
        }
    }

    #[test]
    fn unknown_character_reports_position() {
        let err = parse_floor_plan("; header\nP.S\nP?S\n").unwrap_err();
        match err {
            FloorError::Parse { line, col, found } => {
                assert_eq!(line, 3);
                assert_eq!(col, 2);
                assert_eq!(found, '?');
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_plan_rejected() {
        assert!(matches!(parse_floor_plan(""), Err(FloorError::Empty)));
        assert!(matches!(parse_floor_plan("; only a comment\n\n"), Err(FloorError::Empty)));
    }

    #[test]
    fn text_round_trip() {
        let text = "#####\n#P.B#\n#.F.S\n#####\n";
        let g = parse_floor_plan(text).unwrap();
        assert_eq!(g.to_text(), text);
    }

    #[test]
    fn parsed_plan_not_precomputed() {
        let g = parse_floor_plan("PS\n").unwrap();
        assert!(!g.is_precomputed());
    }
}
