#![no_main]

//! Multi-turn session fuzzer.
//!
//! Builds grammatically valid report blocks (at most one terrain/food/unit
//! report per cell, deaths and hills anywhere) and runs a world through the
//! whole session, checking after every turn that the grid and the entity
//! indices still agree.

use std::collections::HashSet;
use std::fmt::Write;

use arbitrary::Arbitrary;
use formic::game::check_invariants;
use formic::{GameParams, Loc, WorldState};
use libfuzzer_sys::fuzz_target;

const SIZE: u16 = 24;

/// A fuzzer-generated report line.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzReport {
    Water { row: u8, col: u8 },
    Food { row: u8, col: u8 },
    Unit { row: u8, col: u8, owner: u8 },
    Dead { row: u8, col: u8, owner: u8 },
    Hill { row: u8, col: u8, owner: u8 },
}

/// Structured input: one report list per turn.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    turns: Vec<Vec<FuzzReport>>,
}

fn cell(row: u8, col: u8) -> Loc {
    Loc::new(u16::from(row) % SIZE, u16::from(col) % SIZE)
}

/// Serialize one turn, dropping conflicting re-reports of the same cell.
///
/// A real engine reports each cell's terrain/food/unit at most once per
/// turn; deaths may share a cell with anything (that is the precedence edge
/// case) and hills are metadata.
fn render_block(reports: &[FuzzReport]) -> String {
    let mut claimed: HashSet<Loc> = HashSet::new();
    let mut block = String::new();

    for &report in reports {
        match report {
            FuzzReport::Water { row, col } => {
                let loc = cell(row, col);
                if claimed.insert(loc) {
                    writeln!(block, "w {} {}", loc.row, loc.col).unwrap();
                }
            }
            FuzzReport::Food { row, col } => {
                let loc = cell(row, col);
                if claimed.insert(loc) {
                    writeln!(block, "f {} {}", loc.row, loc.col).unwrap();
                }
            }
            FuzzReport::Unit { row, col, owner } => {
                let loc = cell(row, col);
                if claimed.insert(loc) {
                    writeln!(block, "a {} {} {}", loc.row, loc.col, owner).unwrap();
                }
            }
            FuzzReport::Dead { row, col, owner } => {
                let loc = cell(row, col);
                writeln!(block, "d {} {} {}", loc.row, loc.col, owner).unwrap();
            }
            FuzzReport::Hill { row, col, owner } => {
                let loc = cell(row, col);
                writeln!(block, "h {} {} {}", loc.row, loc.col, owner).unwrap();
            }
        }
    }
    block
}

fuzz_target!(|input: SessionInput| {
    let params = GameParams {
        rows: SIZE,
        cols: SIZE,
        view_radius2: 8,
        ..GameParams::default()
    };
    let Some(mut world) = WorldState::new(params) else {
        return;
    };

    for reports in &input.turns {
        let block = render_block(reports);
        world
            .update(&block)
            .expect("well-formed block must be accepted");

        let violations = check_invariants(&world);
        assert!(violations.is_empty(), "{violations:?}");

        let _ = world.is_visible(Loc::new(0, 0));
    }
});
