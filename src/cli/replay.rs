//! Replay command implementation.

use super::output::{JsonReplaySummary, format_text};
use super::{CliError, ReplayFormat};
use formic::bot::Scout;
use formic::replay::Recording;
use std::path::Path;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be read or replayed.
pub(crate) fn execute(
    recording: &Path,
    format: ReplayFormat,
    turns: Option<u32>,
) -> Result<(), CliError> {
    let capture = Recording::load(recording)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", recording.display())))?;

    let mut bot = Scout;
    let summary = capture.replay(&mut bot, turns)?;

    match format {
        ReplayFormat::Text => {
            print!("{}", format_text(&summary));
        }
        ReplayFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonReplaySummary::from_summary(&summary))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}
