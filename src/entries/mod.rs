//! Fixed-size record layouts found in the ROM lookup tables.
//!
//! Every layout implements [`LutEntry`], and the table driver is generic over it, so the layout
//! is chosen statically at the call site. [`EntryKind`] names the same closed set at runtime for
//! configuration and the CLI.

use std::fmt;
use std::str::FromStr;

use encoding::EncodingRef;

use crate::err::Result;
use crate::stats::{FieldStats, Sample};
use crate::utils::{ByteCursor, read_c_string};

mod entity_symbol;
mod event_sub_file;
mod level;
mod spec_list;

pub use self::entity_symbol::{EntitySymbolListEntry, EntitySymbolListStats};
pub use self::event_sub_file::{EventSubFileListEntry, EventSubFileListStats};
pub use self::level::{LevelEntry, LevelEntryStats};
pub use self::spec_list::{SpecListEntry, SpecListStats};

/// Rendered in place of a string when the pointer field is zero.
pub const NULL_STRING: &str = "NULL";

/// One fixed-size record of a lookup table.
pub trait LutEntry: Sized + fmt::Debug {
    /// Width of one record in bytes. `read` consumes exactly this many.
    const SIZE: usize;
    /// Column titles matching [`LutEntry::columns`].
    const HEADER: &'static str;

    type Stats: EntryStats<Self>;

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self>;

    /// Raw value of the field pointing into the string table.
    fn string_pointer(&self) -> u32;

    /// The numeric fields, formatted in declaration order.
    fn columns(&self) -> String;

    /// `-> <columns>, "<symbol>"`
    fn render_line(&self, strings: &StringTable<'_>) -> Result<String> {
        let symbol = strings.resolve(self.string_pointer())?;
        Ok(format!("-> {}, \"{}\"", self.columns(), symbol))
    }
}

/// Per-layout set of field statistics, one tracker per numeric field.
pub trait EntryStats<E>: Default {
    fn log(&mut self, entry: &E);

    /// One block per tracked field, in the layout's field order.
    fn report(&self) -> String;
}

pub(crate) fn push_stats_block<T: Sample>(out: &mut String, label: &str, stats: &FieldStats<T>) {
    out.push_str(label);
    out.push_str(&stats.report());
    out.push('\n');
}

/// Resolves string pointers stored in a blob back into the blob itself.
///
/// Pointers are absolute addresses in the running program; subtracting the blob's load address
/// gives the file offset.
#[derive(Clone, Copy)]
pub struct StringTable<'a> {
    buf: &'a [u8],
    load_address: u32,
    codec: EncodingRef,
}

impl<'a> StringTable<'a> {
    pub fn new(buf: &'a [u8], load_address: u32, codec: EncodingRef) -> Self {
        StringTable {
            buf,
            load_address,
            codec,
        }
    }

    /// File offset of `ptr`. Pointers below the load address wrap around and end up past the
    /// end of any realistic blob.
    pub fn offset_of(&self, ptr: u32) -> usize {
        ptr.wrapping_sub(self.load_address) as usize
    }

    pub fn resolve(&self, ptr: u32) -> Result<String> {
        if ptr == 0 {
            return Ok(NULL_STRING.to_owned());
        }
        read_c_string(self.buf, self.offset_of(ptr), self.codec)
    }
}

/// The closed set of record layouts, for choosing one at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Level,
    SpecList,
    EventSubFileList,
    EntitySymbolList,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Level,
        EntryKind::SpecList,
        EntryKind::EventSubFileList,
        EntryKind::EntitySymbolList,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntryKind::Level => "level",
            EntryKind::SpecList => "spec-list",
            EntryKind::EventSubFileList => "event-sub-file-list",
            EntryKind::EntitySymbolList => "entity-symbol-list",
        }
    }

    pub fn size(self) -> usize {
        match self {
            EntryKind::Level => LevelEntry::SIZE,
            EntryKind::SpecList => SpecListEntry::SIZE,
            EntryKind::EventSubFileList => EventSubFileListEntry::SIZE,
            EntryKind::EntitySymbolList => EntitySymbolListEntry::SIZE,
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            EntryKind::Level => LevelEntry::HEADER,
            EntryKind::SpecList => SpecListEntry::HEADER,
            EntryKind::EventSubFileList => EventSubFileListEntry::HEADER,
            EntryKind::EntitySymbolList => EntitySymbolListEntry::HEADER,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EntryKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown entry kind `{}`, expected one of: {}",
                    s,
                    EntryKind::ALL.map(EntryKind::name).join(", ")
                )
            })
    }
}
