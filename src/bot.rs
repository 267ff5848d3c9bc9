//! Decision layer: the bot seam and the placeholder heuristic.

use crate::game::{Direction, WorldState};
use crate::protocol::Order;

/// Milliseconds of turn budget to keep in reserve while issuing orders.
///
/// The `go` acknowledgement must reach the engine before the deadline.
const TIME_MARGIN_MS: i64 = 10;

/// A per-turn decision maker driven by the protocol loop.
///
/// Implementations see the world only through its query surface; the
/// protocol loop serializes whatever orders they return.
pub trait Bot {
    /// Produce this turn's movement orders from the freshly updated world.
    fn do_turn(&mut self, world: &mut WorldState) -> Vec<Order>;
}

/// Baseline heuristic: every unit takes the first passable direction.
///
/// Walks n, e, s, w in order and issues at most one order per unit, skipping
/// units boxed in by water. No pathfinding and no planning; this is the
/// floor the real decision layer replaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scout;

impl Bot for Scout {
    fn do_turn(&mut self, world: &mut WorldState) -> Vec<Order> {
        let mut orders = Vec::new();
        for loc in world.my_units() {
            for direction in Direction::ALL {
                let dest = world.grid().destination(loc, direction);
                if world.grid().passable(dest) {
                    orders.push(Order::new(loc, direction));
                    break;
                }
            }
            if world.time_remaining() < TIME_MARGIN_MS {
                break;
            }
        }
        orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameParams, Loc, WorldState};

    fn world_10x10() -> WorldState {
        let params = GameParams {
            rows: 10,
            cols: 10,
            ..GameParams::default()
        };
        WorldState::new(params).unwrap()
    }

    #[test]
    fn test_scout_moves_north_on_open_ground() {
        let mut world = world_10x10();
        world.update("a 5 5 0").unwrap();

        let orders = Scout.do_turn(&mut world);
        assert_eq!(orders, vec![Order::new(Loc::new(5, 5), Direction::North)]);
    }

    #[test]
    fn test_scout_routes_around_water() {
        let mut world = world_10x10();
        world.update("w 4 5\na 5 5 0").unwrap();

        let orders = Scout.do_turn(&mut world);
        assert_eq!(orders, vec![Order::new(Loc::new(5, 5), Direction::East)]);
    }

    #[test]
    fn test_scout_skips_landlocked_unit() {
        let mut world = world_10x10();
        world
            .update("w 4 5\nw 6 5\nw 5 4\nw 5 6\na 5 5 0")
            .unwrap();

        assert!(Scout.do_turn(&mut world).is_empty());
    }

    #[test]
    fn test_scout_ignores_enemy_units() {
        let mut world = world_10x10();
        world.update("a 5 5 1\na 7 7 2").unwrap();

        assert!(Scout.do_turn(&mut world).is_empty());
    }
}
