//! JSON output writer.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Writes rows as a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {"author": "Alice", "content": "Hello", ...},
///   {"author": "", "is_event": true, ...}
/// ]
/// ```
pub fn write_json<T: Serialize, W: Write>(rows: &[T], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

/// Converts rows to a pretty-printed JSON array string.
pub fn to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
