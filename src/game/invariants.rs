//! World invariants - sanity checks that detect bugs.
//!
//! After any successful `update`, the grid (the render cache) and the entity
//! indices (the authoritative lists) must agree. These checks should NEVER
//! fail in a correctly implemented world; a violation indicates a bug in the
//! update path, not bad engine input.

use super::grid::Cell;
use super::state::WorldState;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all world invariants.
///
/// Returns the violations found, or empty if every invariant holds.
#[must_use]
pub fn check_invariants(world: &WorldState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = world.grid();

    for (loc, owner) in world.units() {
        if grid.get(loc) != Cell::Unit(owner) {
            violations.push(InvariantViolation {
                message: format!(
                    "unit index has owner {owner} at {loc} but grid holds {:?}",
                    grid.get(loc)
                ),
            });
        }
    }

    for &loc in world.food_locations() {
        if grid.get(loc) != Cell::Food {
            violations.push(InvariantViolation {
                message: format!("food index lists {loc} but grid holds {:?}", grid.get(loc)),
            });
        }
    }

    for (loc, owners) in world.deaths() {
        if owners.is_empty() {
            violations.push(InvariantViolation {
                message: format!("dead index has an empty owner list at {loc}"),
            });
        }
        // the grid tag may have been claimed by food or a unit, never land
        if grid.get(loc) == Cell::Land {
            violations.push(InvariantViolation {
                message: format!("death recorded at {loc} but grid reverted to land"),
            });
        }
    }

    for (loc, cell) in grid.iter() {
        if cell == Cell::Dead && world.dead_at(loc).is_empty() {
            violations.push(InvariantViolation {
                message: format!("grid shows a dead marker at {loc} with no recorded death"),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameParams;

    #[test]
    fn test_invariants_hold_after_updates() {
        let params = GameParams {
            rows: 12,
            cols: 12,
            ..GameParams::default()
        };
        let mut world = WorldState::new(params).unwrap();

        world
            .update("w 0 0\nf 1 1\na 2 2 0\na 3 3 1\nd 4 4 1\nd 1 1 0\nh 5 5 0")
            .unwrap();
        assert!(check_invariants(&world).is_empty());

        world.update("a 2 3 0\nd 2 2 1").unwrap();
        assert!(check_invariants(&world).is_empty());
    }

    #[test]
    fn test_invariants_hold_after_rejected_update() {
        let params = GameParams {
            rows: 12,
            cols: 12,
            ..GameParams::default()
        };
        let mut world = WorldState::new(params).unwrap();

        assert!(world.update("f 1 1\nbogus line\nf 2 2").is_err());
        assert!(check_invariants(&world).is_empty());
    }
}
