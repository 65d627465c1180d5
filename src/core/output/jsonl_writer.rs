//! JSON Lines output writer.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Writes rows as JSON Lines: one compact object per line.
///
/// Best for streaming consumers and RAG ingestion, since each line can be
/// processed on its own.
pub fn write_jsonl<T: Serialize, W: Write>(rows: &[T], mut writer: W) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Converts rows to a JSON Lines string.
pub fn to_jsonl<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_jsonl(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
