//! CSV output writer.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Writes rows as CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Header: the row type's field names, written before the first row
/// - `None` fields: empty cells
/// - Timestamps: RFC 3339
pub fn write_csv<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts rows to a CSV string. Empty input gives an empty string.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
