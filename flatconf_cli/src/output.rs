//! Rendering command results.

use std::io::{self, Write};

use serde_json::Value;

use crate::error::{CliError, Result};

/// Write `value` as JSON followed by a newline.
///
/// # Errors
///
/// Returns [`CliError::Encode`] when serialisation fails and
/// [`CliError::Output`] when the writer rejects the bytes.
pub fn write_json<W: Write>(mut out: W, value: &Value, pretty: bool) -> Result<()> {
    let encoded = if pretty {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
    .map_err(CliError::Encode)?;
    out.write_all(&encoded).map_err(CliError::Output)?;
    out.write_all(b"\n").map_err(CliError::Output)?;
    out.flush().map_err(CliError::Output)
}

/// Write `value` to standard output.
///
/// # Errors
///
/// See [`write_json`].
pub fn print_json(value: &Value, pretty: bool) -> Result<()> {
    write_json(io::stdout().lock(), value, pretty)
}
