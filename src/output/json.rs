//! JSON output
//!
//! Serializes the whole [`KeywordTable`], corpus statistics included.

use std::io::{self, Write};

use super::TableWriter;
use crate::types::KeywordTable;

/// Writes the keyword table as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl TableWriter for JsonWriter {
    fn write_table(&self, table: &KeywordTable, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, table)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}
