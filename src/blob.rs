use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::err::{DumpError, Result};
use crate::layout::BlobLayout;
use crate::lut_dump::{TableSummary, dump_table_kind};
use crate::settings::DumpSettings;

/// Reads a whole blob into memory.
pub fn read_blob(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| DumpError::FailedToOpenFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Dumps every table of `layout` from `buf`, in order, into one report.
///
/// Stops at the first table that fails.
pub fn dump_blob<W: Write>(
    buf: &[u8],
    layout: &BlobLayout,
    settings: &DumpSettings,
    out: &mut W,
) -> Result<Vec<TableSummary>> {
    let mut summaries = Vec::with_capacity(layout.tables.len());
    for table in &layout.tables {
        let summary = dump_table_kind(buf, table, layout.load_address, settings, out)?;
        info!(
            "{}: dumped `{}` ({} entries, 0x{:08X}..0x{:08X})",
            layout.name, summary.title, summary.entries, summary.start_offset, summary.end_offset
        );
        summaries.push(summary);
    }
    out.flush()?;
    Ok(summaries)
}
