//! Play command implementation.

use super::CliError;
use formic::bot::Scout;
use formic::protocol::run_bot;
use formic::replay::TeeReader;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Execute the play command: speak the engine protocol on stdin/stdout.
///
/// With `record`, every byte the engine sends is also captured to the given
/// file for later `replay`.
///
/// # Errors
///
/// Returns an error if the engine channel breaks, the setup block is
/// unusable, or the capture file cannot be created.
pub(crate) fn execute(record: Option<PathBuf>) -> Result<(), CliError> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let stderr = io::stderr().lock();
    let mut bot = Scout;

    match record {
        Some(path) => {
            let capture = File::create(&path)
                .map_err(|e| CliError::new(format!("Failed to create {}: {e}", path.display())))?;
            let input = BufReader::new(TeeReader::new(stdin, capture));
            run_bot(&mut bot, input, stdout, stderr)?;
        }
        None => run_bot(&mut bot, stdin, stdout, stderr)?,
    }
    Ok(())
}
