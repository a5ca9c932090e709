use std::io::Write;

use log::{debug, trace};

use crate::entries::{
    EntitySymbolListEntry, EntryKind, EntryStats, EventSubFileListEntry, LevelEntry, LutEntry,
    SpecListEntry, StringTable,
};
use crate::err::Result;
use crate::layout::TableLayout;
use crate::settings::DumpSettings;
use crate::utils::ByteCursor;

const BANNER_RULE: &str = "============================================================";
const HEADER_RULE: &str =
    "--------------------------------------------------------------------------------------";
const STATS_RULE: &str = "------------";

/// What a successful table dump went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub title: String,
    pub entries: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Dumps one table of `E` records from `buf` to `out`.
///
/// Every entry is decoded, rendered with its file offset and fed to a fresh statistics set, which
/// is written after the last entry. The first decode or string error aborts the table; lines
/// already written to `out` are left there.
pub fn dump_table<E: LutEntry, W: Write>(
    buf: &[u8],
    table: &TableLayout,
    load_address: u32,
    settings: &DumpSettings,
    out: &mut W,
) -> Result<TableSummary> {
    dump_table_inner::<E, W>(buf, table, load_address, settings, out)
        .map_err(|e| e.in_table(&table.title))
}

fn dump_table_inner<E: LutEntry, W: Write>(
    buf: &[u8],
    table: &TableLayout,
    load_address: u32,
    settings: &DumpSettings,
    out: &mut W,
) -> Result<TableSummary> {
    debug!(
        "Dumping `{}`: {} entries of {} bytes at 0x{:08X}",
        table.title,
        table.entry_count,
        E::SIZE,
        table.start_offset
    );

    write_table_header(out, &table.title, E::HEADER)?;

    let strings = StringTable::new(buf, load_address, settings.get_ansi_codec());
    let mut stats = E::Stats::default();
    let mut cursor = ByteCursor::with_pos(buf, table.start_offset)?;

    for index in 0..table.entry_count {
        let offset = table.start_offset + index * E::SIZE;
        let entry = E::read(&mut cursor)?;
        debug_assert_eq!(cursor.pos(), offset + E::SIZE);
        trace!("0x{:08X}: {:?}", offset, entry);

        let line = entry.render_line(&strings)?;
        writeln!(out, "0x{:08X} {}", offset, line)?;
        stats.log(&entry);
    }

    write!(out, "\nStats:\n{}\n{}\n", STATS_RULE, stats.report())?;

    Ok(TableSummary {
        title: table.title.clone(),
        entries: table.entry_count,
        start_offset: table.start_offset,
        end_offset: cursor.pos(),
    })
}

fn write_table_header<W: Write>(out: &mut W, title: &str, header: &str) -> Result<()> {
    write!(
        out,
        "{rule}\n{title}\n{rule}\n\nOffset       {header}\n{HEADER_RULE}\n",
        rule = BANNER_RULE,
    )?;
    Ok(())
}

/// Dumps a table whose layout is only known at runtime.
pub fn dump_table_kind<W: Write>(
    buf: &[u8],
    table: &TableLayout,
    load_address: u32,
    settings: &DumpSettings,
    out: &mut W,
) -> Result<TableSummary> {
    match table.kind {
        EntryKind::Level => dump_table::<LevelEntry, W>(buf, table, load_address, settings, out),
        EntryKind::SpecList => {
            dump_table::<SpecListEntry, W>(buf, table, load_address, settings, out)
        }
        EntryKind::EventSubFileList => {
            dump_table::<EventSubFileListEntry, W>(buf, table, load_address, settings, out)
        }
        EntryKind::EntitySymbolList => {
            dump_table::<EntitySymbolListEntry, W>(buf, table, load_address, settings, out)
        }
    }
}
