//! Offline replay of recorded engine sessions.
//!
//! The agent is deterministic given the engine's input stream, so a replay
//! needs only that stream: capture it once with `play --record`, then feed
//! it back through the same bot to reproduce every order and the final
//! world. No state deltas are saved.

mod render;

pub use render::render_ascii;

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::bot::Bot;
use crate::error::{ParseError, UpdateError};
use crate::game::{GameParams, WorldState};
use crate::protocol::{Order, TurnInput, read_setup, read_turn};

/// A captured engine→agent input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    /// Raw protocol text, exactly as the engine sent it.
    pub input: String,
}

impl Recording {
    /// Create a recording from raw protocol text.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self { input }
    }

    /// Load a recording from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail or the capture is not UTF-8.
    pub fn load(path: &Path) -> io::Result<Self> {
        let input = fs::read_to_string(path)?;
        Ok(Self { input })
    }

    /// Save the recording to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, &self.input)
    }

    /// Re-run a bot over the recorded stream.
    ///
    /// Stops after `up_to` turns when given. A turn whose report block the
    /// live agent rejected replays the same way: the turn is kept in the
    /// summary, flagged, with no orders.
    ///
    /// # Errors
    ///
    /// Returns an error when the capture has no usable setup block.
    pub fn replay<B: Bot>(
        &self,
        bot: &mut B,
        up_to: Option<u32>,
    ) -> Result<ReplaySummary, ReplayError> {
        let mut input = self.input.as_bytes();
        let setup = read_setup(&mut input)
            .map_err(ReplayError::Io)?
            .ok_or(ReplayError::TruncatedSetup)?;
        let params = GameParams::parse_setup(setup.lines()).map_err(ReplayError::Setup)?;
        let mut world = WorldState::new(params).ok_or(ReplayError::EmptyGrid)?;

        let mut turns = Vec::new();
        let mut turn = 0u32;
        while let Some(frame) = read_turn(&mut input).map_err(ReplayError::Io)? {
            let block = match frame {
                TurnInput::End => break,
                TurnInput::Block(block) => block,
            };
            turn += 1;
            let record = match world.update(&block) {
                Ok(()) => TurnRecord {
                    turn,
                    orders: bot.do_turn(&mut world),
                    rejected: None,
                },
                Err(err) => TurnRecord {
                    turn,
                    orders: Vec::new(),
                    rejected: Some(err),
                },
            };
            turns.push(record);
            if up_to.is_some_and(|limit| turn >= limit) {
                break;
            }
        }

        Ok(ReplaySummary { turns, world })
    }
}

/// What the agent did on one replayed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    /// 1-based turn number.
    pub turn: u32,
    /// Orders the bot issued.
    pub orders: Vec<Order>,
    /// Why the turn's report block was rejected, if it was.
    pub rejected: Option<UpdateError>,
}

/// Result of replaying a recording.
#[derive(Debug)]
pub struct ReplaySummary {
    /// Per-turn records in order.
    pub turns: Vec<TurnRecord>,
    /// The world as of the last replayed turn.
    pub world: WorldState,
}

/// Error type for replay operations.
#[derive(Debug)]
pub enum ReplayError {
    /// Reading the capture failed.
    Io(io::Error),
    /// The capture ends before the setup block completes.
    TruncatedSetup,
    /// A setup parameter value failed to parse.
    Setup(ParseError),
    /// The capture announces a grid with a zero dimension.
    EmptyGrid,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(err) => write!(f, "failed to read capture: {err}"),
            ReplayError::TruncatedSetup => {
                write!(f, "capture ends before the setup block completes")
            }
            ReplayError::Setup(err) => write!(f, "invalid setup block: {err}"),
            ReplayError::EmptyGrid => write!(f, "capture announces a grid with a zero dimension"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io(err) => Some(err),
            ReplayError::Setup(err) => Some(err),
            ReplayError::TruncatedSetup | ReplayError::EmptyGrid => None,
        }
    }
}

/// Reader adapter that copies every byte it yields into a sink.
///
/// `play --record` wraps the engine channel in one of these so the capture
/// is byte-exact, including lines the framing layer drops.
#[derive(Debug)]
pub struct TeeReader<R, W> {
    inner: R,
    sink: W,
}

impl<R: Read, W: Write> TeeReader<R, W> {
    /// Wrap a reader so everything read is also written to `sink`.
    pub const fn new(inner: R, sink: W) -> Self {
        Self { inner, sink }
    }
}

impl<R: Read, W: Write> Read for TeeReader<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.sink.write_all(&buf[..n])?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::Scout;
    use crate::game::{Direction, Loc};
    use std::io::BufReader;

    const SESSION: &str = "turn 0\nrows 10\ncols 10\nviewradius2 2\nready\n\
        turn 1\na 5 5 0\ngo\n\
        turn 2\na 4 5 0\nw 3 5\ngo\n\
        end\n";

    #[test]
    fn test_replay_reproduces_orders() {
        let recording = Recording::new(SESSION.to_string());
        let summary = recording.replay(&mut Scout, None).unwrap();

        assert_eq!(summary.turns.len(), 2);
        assert_eq!(
            summary.turns[0].orders,
            vec![Order::new(Loc::new(5, 5), Direction::North)]
        );
        // water north of the unit forces the second choice
        assert_eq!(
            summary.turns[1].orders,
            vec![Order::new(Loc::new(4, 5), Direction::East)]
        );
        assert_eq!(summary.world.my_units(), vec![Loc::new(4, 5)]);
    }

    #[test]
    fn test_replay_stops_at_turn_limit() {
        let recording = Recording::new(SESSION.to_string());
        let summary = recording.replay(&mut Scout, Some(1)).unwrap();
        assert_eq!(summary.turns.len(), 1);
        assert_eq!(summary.world.my_units(), vec![Loc::new(5, 5)]);
    }

    #[test]
    fn test_replay_keeps_rejected_turns() {
        let recording =
            Recording::new("rows 10\ncols 10\nready\nbogus 1 2\ngo\na 1 1 0\ngo\n".to_string());
        let summary = recording.replay(&mut Scout, None).unwrap();

        assert_eq!(summary.turns.len(), 2);
        assert!(summary.turns[0].rejected.is_some());
        assert!(summary.turns[0].orders.is_empty());
        assert!(summary.turns[1].rejected.is_none());
    }

    #[test]
    fn test_replay_without_setup_fails() {
        let recording = Recording::new("a 1 1 0\ngo\n".to_string());
        assert!(matches!(
            Recording::replay(&recording, &mut Scout, None),
            Err(ReplayError::TruncatedSetup)
        ));
    }

    #[test]
    fn test_recording_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.cap");

        let recording = Recording::new(SESSION.to_string());
        recording.save(&path).unwrap();
        assert_eq!(Recording::load(&path).unwrap(), recording);
    }

    #[test]
    fn test_tee_reader_captures_stream() {
        let mut capture = Vec::new();
        let mut reader = BufReader::new(TeeReader::new(SESSION.as_bytes(), &mut capture));

        let mut consumed = String::new();
        reader.read_to_string(&mut consumed).unwrap();
        drop(reader);

        assert_eq!(consumed, SESSION);
        assert_eq!(capture, SESSION.as_bytes());
    }
}
