//! Output formatting utilities for CLI.

use formic::replay::{ReplaySummary, render_ascii};
use serde::Serialize;

/// JSON-serializable replay summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonReplaySummary {
    /// Turns replayed.
    pub(super) turns_played: u32,
    /// Turns whose report block was rejected.
    pub(super) turns_rejected: u32,
    /// Per-turn order listings.
    pub(super) turns: Vec<JsonTurn>,
    /// Counts in the final world.
    pub(super) final_state: JsonWorldCounts,
}

/// JSON-serializable record of one turn.
#[derive(Debug, Serialize)]
pub(super) struct JsonTurn {
    /// 1-based turn number.
    pub(super) turn: u32,
    /// Reason the turn's report was rejected (null if it applied cleanly).
    pub(super) rejected: Option<String>,
    /// Orders the bot issued.
    pub(super) orders: Vec<JsonOrder>,
}

/// JSON-serializable movement order.
#[derive(Debug, Serialize)]
pub(super) struct JsonOrder {
    /// Row of the ordered unit.
    pub(super) row: u16,
    /// Column of the ordered unit.
    pub(super) col: u16,
    /// Direction letter (n, e, s or w).
    pub(super) direction: char,
}

/// Entity counts for the final world state.
#[derive(Debug, Serialize)]
pub(super) struct JsonWorldCounts {
    /// Our live units.
    pub(super) my_units: usize,
    /// Visible enemy units.
    pub(super) enemy_units: usize,
    /// Visible food.
    pub(super) food: usize,
    /// Our known hills.
    pub(super) my_hills: usize,
    /// Known enemy hills.
    pub(super) enemy_hills: usize,
}

impl JsonReplaySummary {
    /// Create from a replay summary.
    pub(super) fn from_summary(summary: &ReplaySummary) -> Self {
        let turns: Vec<JsonTurn> = summary
            .turns
            .iter()
            .map(|record| JsonTurn {
                turn: record.turn,
                rejected: record.rejected.as_ref().map(ToString::to_string),
                orders: record
                    .orders
                    .iter()
                    .map(|order| JsonOrder {
                        row: order.loc.row,
                        col: order.loc.col,
                        direction: order.direction.letter(),
                    })
                    .collect(),
            })
            .collect();

        #[allow(clippy::cast_possible_truncation)]
        let turns_rejected = turns.iter().filter(|t| t.rejected.is_some()).count() as u32;

        Self {
            turns_played: summary.turns.last().map_or(0, |record| record.turn),
            turns_rejected,
            turns,
            final_state: JsonWorldCounts {
                my_units: summary.world.my_units().len(),
                enemy_units: summary.world.enemy_units().len(),
                food: summary.world.food_locations().len(),
                my_hills: summary.world.my_hills().len(),
                enemy_hills: summary.world.enemy_hills().len(),
            },
        }
    }
}

/// Format a replay summary as human-readable text.
pub(super) fn format_text(summary: &ReplaySummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Replayed {} turn(s)\n", summary.turns.len()));
    for record in &summary.turns {
        match &record.rejected {
            Some(err) => {
                output.push_str(&format!("Turn {}: rejected ({err})\n", record.turn));
            }
            None => {
                output.push_str(&format!(
                    "Turn {}: {} order(s)\n",
                    record.turn,
                    record.orders.len()
                ));
                for order in &record.orders {
                    output.push_str(&format!("  {order}\n"));
                }
            }
        }
    }

    output.push_str("\nFinal world:\n");
    output.push_str(&render_ascii(&summary.world));
    output.push_str(&format!(
        "\nMy units: {}  Enemy units: {}  Food: {}  My hills: {}  Enemy hills: {}\n",
        summary.world.my_units().len(),
        summary.world.enemy_units().len(),
        summary.world.food_locations().len(),
        summary.world.my_hills().len(),
        summary.world.enemy_hills().len(),
    ));

    output
}
