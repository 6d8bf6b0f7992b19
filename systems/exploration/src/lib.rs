#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fog-of-war memory: which cells the player has ever seen.

use std::collections::BTreeSet;

use maze_explorer_core::{CellCoord, GamePhase, GridMap};

/// Set of cells revealed so far, ordered for deterministic iteration.
pub type Discovered = BTreeSet<CellCoord>;

/// Adds every in-bounds cell within `radius` of `center` to the set.
///
/// Distances are Euclidean between cell coordinates and the boundary is
/// inclusive. Cells are never removed, so the result is always a superset of
/// the input.
#[must_use]
pub fn reveal(
    mut discovered: Discovered,
    center: CellCoord,
    radius: f32,
    map: &GridMap,
) -> Discovered {
    if !(radius >= 0.0) || !map.contains(center) {
        return discovered;
    }

    let reach = radius.floor().min(u32::MAX as f32) as u32;
    let limit = f64::from(radius) * f64::from(radius);

    let first_column = center.column().saturating_sub(reach);
    let last_column = center
        .column()
        .saturating_add(reach)
        .min(map.width().saturating_sub(1));
    let first_row = center.row().saturating_sub(reach);
    let last_row = center
        .row()
        .saturating_add(reach)
        .min(map.height().saturating_sub(1));

    for row in first_row..=last_row {
        for column in first_column..=last_column {
            let cell = CellCoord::new(column, row);
            if center.distance_squared(cell) as f64 <= limit {
                let _ = discovered.insert(cell);
            }
        }
    }

    discovered
}

/// Reports whether a cell should be drawn for the provided phase.
///
/// The whole maze is visible while the route is demonstrated; afterwards only
/// discovered cells are.
#[must_use]
pub fn is_visible(discovered: &Discovered, cell: CellCoord, phase: GamePhase) -> bool {
    match phase {
        GamePhase::ShowingPath => true,
        GamePhase::Exploring | GamePhase::Completed => discovered.contains(&cell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_explorer_core::CellKind;
    use proptest::prelude::*;

    #[test]
    fn radius_two_reveals_a_disc() {
        let map = GridMap::filled(9, 9, CellKind::Open);
        let discovered = reveal(Discovered::new(), CellCoord::new(4, 4), 2.0, &map);

        assert_eq!(discovered.len(), 13);
        assert!(discovered.contains(&CellCoord::new(4, 2)));
        assert!(discovered.contains(&CellCoord::new(5, 5)));
        assert!(!discovered.contains(&CellCoord::new(6, 6)));
        assert!(!discovered.contains(&CellCoord::new(6, 5)));
    }

    #[test]
    fn radius_two_and_a_half_includes_knight_moves() {
        let map = GridMap::filled(9, 9, CellKind::Open);
        let discovered = reveal(Discovered::new(), CellCoord::new(4, 4), 2.5, &map);

        assert_eq!(discovered.len(), 21);
        assert!(discovered.contains(&CellCoord::new(6, 5)));
        assert!(!discovered.contains(&CellCoord::new(6, 6)));
    }

    #[test]
    fn reveal_clips_to_bounds() {
        let map = GridMap::filled(5, 5, CellKind::Open);
        let discovered = reveal(Discovered::new(), CellCoord::new(0, 0), 1.0, &map);
        let expected: Discovered = [
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(0, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(discovered, expected);
    }

    #[test]
    fn walls_are_revealed_too() {
        let map = GridMap::filled(5, 5, CellKind::Wall);
        let discovered = reveal(Discovered::new(), CellCoord::new(2, 2), 1.0, &map);
        assert_eq!(discovered.len(), 5);
    }

    #[test]
    fn visibility_depends_on_phase() {
        let discovered: Discovered = [CellCoord::new(1, 1)].into_iter().collect();
        let hidden = CellCoord::new(3, 3);

        assert!(is_visible(&discovered, hidden, GamePhase::ShowingPath));
        assert!(!is_visible(&discovered, hidden, GamePhase::Exploring));
        assert!(!is_visible(&discovered, hidden, GamePhase::Completed));
        assert!(is_visible(
            &discovered,
            CellCoord::new(1, 1),
            GamePhase::Exploring
        ));
    }

    proptest! {
        #[test]
        fn discovery_only_grows(
            centers in prop::collection::vec((0u32..12, 0u32..12), 1..20),
            radius in 0.0f32..4.0,
        ) {
            let map = GridMap::filled(12, 12, CellKind::Open);
            let mut discovered = Discovered::new();
            for (column, row) in centers {
                let before = discovered.clone();
                discovered = reveal(discovered, CellCoord::new(column, row), radius, &map);
                prop_assert!(discovered.is_superset(&before));
                prop_assert!(discovered.contains(&CellCoord::new(column, row)));
            }
        }
    }
}
