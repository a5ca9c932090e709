//! Where the known lookup tables live.
//!
//! These are fixed locations in two specific binaries; nothing here is discovered from the data.

use crate::entries::EntryKind;

/// Load address of `arm9.bin`.
pub const ARM9_LOAD_ADDRESS: u32 = 0x0200_0000;
/// Load address of `overlay_0011.bin`.
pub const OVERLAY_0011_LOAD_ADDRESS: u32 = 0x022D_C240;

/// One table: what it's called, what its records look like and where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub title: String,
    pub kind: EntryKind,
    pub start_offset: usize,
    pub entry_count: usize,
}

impl TableLayout {
    pub fn new(
        title: impl Into<String>,
        kind: EntryKind,
        start_offset: usize,
        entry_count: usize,
    ) -> Self {
        TableLayout {
            title: title.into(),
            kind,
            start_offset,
            entry_count,
        }
    }

    /// One past the last byte of the table, or `None` if that does not fit in a `usize`.
    pub fn end_offset(&self) -> Option<usize> {
        self.entry_count
            .checked_mul(self.kind.size())
            .and_then(|len| len.checked_add(self.start_offset))
    }
}

/// A binary and the tables dumped from it, in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLayout {
    pub name: &'static str,
    pub default_input: &'static str,
    pub report_name: &'static str,
    pub load_address: u32,
    pub tables: Vec<TableLayout>,
}

impl BlobLayout {
    pub fn builtin() -> Vec<BlobLayout> {
        vec![arm9(), overlay_0011()]
    }

    pub fn by_name(name: &str) -> Option<BlobLayout> {
        Self::builtin().into_iter().find(|blob| blob.name == name)
    }
}

pub fn arm9() -> BlobLayout {
    BlobLayout {
        name: "arm9",
        default_input: "arm9.bin",
        report_name: "arm9.txt",
        load_address: ARM9_LOAD_ADDRESS,
        tables: vec![
            // Strings start at 0xA6910.
            TableLayout::new(
                "Entity Symbol List Table",
                EntryKind::EntitySymbolList,
                0xA7FF0,
                386,
            ),
            // Strings start at 0xA46EC.
            TableLayout::new("Event List Table", EntryKind::Level, 0xA5490, 431),
        ],
    }
}

pub fn overlay_0011() -> BlobLayout {
    BlobLayout {
        name: "overlay_0011",
        default_input: "overlay_0011.bin",
        report_name: "overlay_0011.txt",
        load_address: OVERLAY_0011_LOAD_ADDRESS,
        tables: vec![
            // Strings start at 0x41C00. Some entries are null.
            TableLayout::new(
                "Event Sub File List Table",
                EntryKind::EventSubFileList,
                0x42C14,
                555,
            ),
            // Strings start at 0x3D8AC.
            TableLayout::new("Special List Table", EntryKind::SpecList, 0x405E8, 701),
        ],
    }
}
