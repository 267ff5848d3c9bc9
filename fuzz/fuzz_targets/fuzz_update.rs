#![no_main]

//! Turn report parser fuzzer.
//!
//! Throws arbitrary line soup at `WorldState::update`. The update may be
//! accepted or rejected, but it must never panic, and the query surface must
//! stay usable afterwards.

use formic::{GameParams, Loc, WorldState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let params = GameParams {
        rows: 32,
        cols: 32,
        view_radius2: 10,
        ..GameParams::default()
    };
    let Some(mut world) = WorldState::new(params) else {
        return;
    };

    let _ = world.update(text);

    // queries stay total whether or not the block was rejected
    let _ = world.my_units();
    let _ = world.enemy_units();
    let _ = world.my_hills();
    let _ = world.enemy_hills();
    let _ = world.food_locations();
    let _ = world.time_remaining();
    let _ = world.is_visible(Loc::new(31, 31));
});
