//! ASCII renderer for the world grid.

use std::collections::HashMap;

use crate::game::{Cell, Loc, OwnerId, WorldState};

/// Glyph for a unit owned by the given player.
fn unit_glyph(owner: OwnerId) -> char {
    char::from(b'a' + owner.min(9))
}

/// Glyph for a unit standing on a hill.
fn unit_on_hill_glyph(owner: OwnerId) -> char {
    char::from(b'A' + owner.min(9))
}

/// Glyph for an empty hill owned by the given player.
fn hill_glyph(owner: OwnerId) -> char {
    char::from(b'0' + owner.min(9))
}

/// Render the world as one character per cell, one line per row.
///
/// `%` water, `*` food, `!` dead marker, `.` land, `a`-`j` units by owner,
/// `0`-`9` empty hills by owner, `A`-`J` a unit standing on a hill. Hills
/// are metadata over the grid, so they are overlaid here rather than read
/// from the cell tags.
#[must_use]
pub fn render_ascii(world: &WorldState) -> String {
    let hills: HashMap<Loc, OwnerId> = world.hills().collect();
    let grid = world.grid();

    let rows = usize::from(grid.rows());
    let cols = usize::from(grid.cols());
    let mut output = String::with_capacity(rows * (cols + 1));

    for (loc, cell) in grid.iter() {
        let glyph = match (cell, hills.get(&loc)) {
            (Cell::Unit(owner), Some(_)) => unit_on_hill_glyph(owner),
            (Cell::Unit(owner), None) => unit_glyph(owner),
            (_, Some(&owner)) => hill_glyph(owner),
            (Cell::Water, None) => '%',
            (Cell::Food, None) => '*',
            (Cell::Dead, None) => '!',
            (Cell::Land, None) => '.',
        };
        output.push(glyph);
        if usize::from(loc.col) == cols - 1 {
            output.push('\n');
        }
    }

    output
}
