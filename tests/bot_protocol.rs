//! End-to-end protocol loop tests over in-memory channels.
//!
//! These drive `run_bot` with a scripted engine session and assert on the
//! exact bytes the agent would write back to the engine.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use formic::protocol::ProtocolError;
use formic::{Scout, run_bot};

/// Run a full session and return (engine output, diagnostics) as strings.
fn drive(session: &str) -> (String, String) {
    let mut output = Vec::new();
    let mut diag = Vec::new();
    run_bot(&mut Scout, session.as_bytes(), &mut output, &mut diag).unwrap();
    (
        String::from_utf8(output).unwrap(),
        String::from_utf8(diag).unwrap(),
    )
}

#[test]
fn test_full_session_emits_orders_and_acks() {
    let session = "turn 0\nrows 10\ncols 10\nviewradius2 2\nready\n\
        turn 1\na 5 5 0\ngo\n\
        turn 2\ngo\n\
        end\n";

    let (output, diag) = drive(session);
    // ready ack, turn 1 order + ack, turn 2 ack (no units left in view)
    assert_eq!(output, "go\no 5 5 n\ngo\ngo\n");
    assert!(diag.is_empty());
}

#[test]
fn test_orders_route_around_water() {
    let session = "rows 10\ncols 10\nready\n\
        w 4 5\nw 5 4\na 5 5 0\ngo\n\
        end\n";

    let (output, _) = drive(session);
    assert_eq!(output, "go\no 5 5 e\ngo\n");
}

#[test]
fn test_malformed_turn_keeps_agent_alive() {
    let session = "rows 10\ncols 10\nready\n\
        a 5 5 0\nbogus line here\ngo\n\
        a 5 5 0\ngo\n\
        end\n";

    let (output, diag) = drive(session);
    // the bad turn costs its orders but still gets its ack
    assert_eq!(output, "go\ngo\no 5 5 n\ngo\n");
    assert!(diag.contains("turn report rejected"));
}

#[test]
fn test_stream_without_end_marker_still_finishes() {
    let session = "rows 10\ncols 10\nready\na 5 5 0\ngo\n";
    let (output, _) = drive(session);
    assert_eq!(output, "go\no 5 5 n\ngo\n");
}

#[test]
fn test_truncated_setup_is_an_error() {
    let mut output = Vec::new();
    let mut diag = Vec::new();
    let result = run_bot(&mut Scout, "rows 10\n".as_bytes(), &mut output, &mut diag);
    assert!(matches!(result, Err(ProtocolError::TruncatedSetup)));
}

#[test]
fn test_zero_dimension_grid_is_an_error() {
    let mut output = Vec::new();
    let mut diag = Vec::new();
    let result = run_bot(
        &mut Scout,
        "rows 0\ncols 10\nready\n".as_bytes(),
        &mut output,
        &mut diag,
    );
    assert!(matches!(result, Err(ProtocolError::EmptyGrid)));
}
