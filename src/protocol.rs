//! Line framing between the engine and the agent.
//!
//! The engine speaks a line-oriented text protocol: a pre-game parameter
//! block terminated by `ready`, then one report block per turn terminated by
//! `go`, and finally `end`. The agent answers every `go` with zero or more
//! order lines and its own `go`. This module owns that framing; the world
//! model owns the report grammar inside a block.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::bot::Bot;
use crate::error::ParseError;
use crate::game::{Direction, GameParams, Loc, WorldState};

/// A movement order for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    /// Current location of the unit to move.
    pub loc: Loc,
    /// Step to take.
    pub direction: Direction,
}

impl Order {
    /// Create a new order.
    #[must_use]
    pub const fn new(loc: Loc, direction: Direction) -> Self {
        Self { loc, direction }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o {} {} {}", self.loc.row, self.loc.col, self.direction)
    }
}

/// Failures that terminate the protocol loop.
#[derive(Debug)]
pub enum ProtocolError {
    /// The engine channel failed.
    Io(io::Error),
    /// The stream ended before the setup block completed.
    TruncatedSetup,
    /// A setup parameter value failed to parse.
    Setup(ParseError),
    /// The engine announced a grid with a zero dimension.
    EmptyGrid,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Io(err) => write!(f, "engine channel failed: {err}"),
            ProtocolError::TruncatedSetup => {
                write!(f, "stream ended before the setup block completed")
            }
            ProtocolError::Setup(err) => write!(f, "invalid setup block: {err}"),
            ProtocolError::EmptyGrid => write!(f, "engine announced a grid with a zero dimension"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Io(err) => Some(err),
            ProtocolError::Setup(err) => Some(err),
            ProtocolError::TruncatedSetup | ProtocolError::EmptyGrid => None,
        }
    }
}

impl From<io::Error> for ProtocolError {
    fn from(err: io::Error) -> Self {
        ProtocolError::Io(err)
    }
}

/// One frame of per-turn engine input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInput {
    /// A report block terminated by `go`; holds only report lines.
    Block(String),
    /// The engine announced the end of the game.
    End,
}

/// Read the pre-game parameter block, up to and including `ready`.
///
/// Returns `None` if the stream ends first.
///
/// # Errors
///
/// Returns an error when reading from the channel fails.
pub fn read_setup<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut block = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("ready") {
            return Ok(Some(block));
        }
        block.push_str(trimmed);
        block.push('\n');
    }
}

/// Read the next turn frame, up to and including its `go`.
///
/// `turn N` header lines and blank lines are dropped; the returned block
/// holds only report lines. Returns `None` at end of stream (an incomplete
/// trailing block is discarded).
///
/// # Errors
///
/// Returns an error when reading from the channel fails.
pub fn read_turn<R: BufRead>(input: &mut R) -> io::Result<Option<TurnInput>> {
    let mut block = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("go") {
            return Ok(Some(TurnInput::Block(block)));
        }
        if trimmed.eq_ignore_ascii_case("end") {
            return Ok(Some(TurnInput::End));
        }
        if trimmed
            .split_whitespace()
            .next()
            .is_some_and(|tag| tag.eq_ignore_ascii_case("turn"))
        {
            continue;
        }
        block.push_str(trimmed);
        block.push('\n');
    }
}

/// Drive a bot over the engine protocol until `end` or end of stream.
///
/// `input`/`output` are the engine channel; `diag` receives human-readable
/// failure reports (stderr in the binary — stdout belongs to the engine).
/// The loop answers every `go`, including for a turn whose report was
/// rejected: a malformed turn costs its orders, not the game, so recovery
/// stays the protocol layer's call.
///
/// # Errors
///
/// Returns an error for channel failures or an unusable setup block.
/// Malformed turn reports are reported to `diag` and survived.
pub fn run_bot<B, R, W, D>(
    bot: &mut B,
    mut input: R,
    mut output: W,
    mut diag: D,
) -> Result<(), ProtocolError>
where
    B: Bot,
    R: BufRead,
    W: Write,
    D: Write,
{
    let setup = read_setup(&mut input)?.ok_or(ProtocolError::TruncatedSetup)?;
    let params = GameParams::parse_setup(setup.lines()).map_err(ProtocolError::Setup)?;
    let mut world = WorldState::new(params).ok_or(ProtocolError::EmptyGrid)?;

    writeln!(output, "go")?;
    output.flush()?;

    while let Some(frame) = read_turn(&mut input)? {
        let block = match frame {
            TurnInput::End => break,
            TurnInput::Block(block) => block,
        };
        match world.update(&block) {
            Ok(()) => {
                for order in bot.do_turn(&mut world) {
                    writeln!(output, "{order}")?;
                }
            }
            Err(err) => {
                writeln!(diag, "turn report rejected: {err}")?;
            }
        }
        writeln!(output, "go")?;
        output.flush()?;
    }
    Ok(())
}
