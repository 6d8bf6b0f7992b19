//! Game phase transition rules.

use maze_explorer_core::{GamePhase, PhaseError};

/// Validates a phase change requested by the engine.
///
/// The only legal transitions are `ShowingPath → Exploring` and
/// `Exploring → Completed`. Resets bypass this check because they rebuild the
/// session rather than advance it.
pub(crate) fn transition(from: GamePhase, to: GamePhase) -> Result<GamePhase, PhaseError> {
    match (from, to) {
        (GamePhase::ShowingPath, GamePhase::Exploring)
        | (GamePhase::Exploring, GamePhase::Completed) => Ok(to),
        _ => Err(PhaseError::InvalidStateTransition { from, to }),
    }
}

/// Reports whether the route demonstration has finished lingering.
///
/// Progress is measured in cells along the route; the demonstration ends once
/// it passes the route length plus the configured overshoot.
pub(crate) fn demonstration_finished(progress: f32, path_cells: usize, overshoot: f32) -> bool {
    progress > path_cells as f32 + overshoot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_allowed() {
        assert_eq!(
            transition(GamePhase::ShowingPath, GamePhase::Exploring),
            Ok(GamePhase::Exploring)
        );
        assert_eq!(
            transition(GamePhase::Exploring, GamePhase::Completed),
            Ok(GamePhase::Completed)
        );
    }

    #[test]
    fn completed_is_terminal() {
        for to in [
            GamePhase::ShowingPath,
            GamePhase::Exploring,
            GamePhase::Completed,
        ] {
            assert_eq!(
                transition(GamePhase::Completed, to),
                Err(PhaseError::InvalidStateTransition {
                    from: GamePhase::Completed,
                    to
                })
            );
        }
    }

    #[test]
    fn phases_cannot_be_skipped_or_reverted() {
        assert!(transition(GamePhase::ShowingPath, GamePhase::Completed).is_err());
        assert!(transition(GamePhase::Exploring, GamePhase::ShowingPath).is_err());
        assert!(transition(GamePhase::Exploring, GamePhase::Exploring).is_err());
    }

    #[test]
    fn demonstration_lingers_past_route_end() {
        assert!(!demonstration_finished(30.0, 12, 20.0));
        assert!(!demonstration_finished(32.0, 12, 20.0));
        assert!(demonstration_finished(32.01, 12, 20.0));
        assert!(demonstration_finished(0.5, 0, 0.0));
    }
}
