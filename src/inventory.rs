//! Persisting crawl results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::Record;

/// Write `records` to `path` as a pretty-printed JSON array.
///
/// Non-ASCII names are written as UTF-8, not escaped.
pub fn write_inventory<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
