use crate::entries::{EntryStats, LutEntry, push_stats_block};
use crate::err::Result;
use crate::stats::FieldStats;
use crate::utils::ByteCursor;

/// Single entry in the event sub-file list of `overlay_0011.bin`. Some entries are null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventSubFileListEntry {
    pub unk1: i16,
    pub unk2: i16,
    pub ptr_string: u32,
    pub unk3: u32,
}

impl LutEntry for EventSubFileListEntry {
    const SIZE: usize = 12;
    const HEADER: &'static str = "Unk1   Unk2   Unk3      Symbol ";

    type Stats = EventSubFileListStats;

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(EventSubFileListEntry {
            unk1: cursor.le("event_sub_file.unk1")?,
            unk2: cursor.le("event_sub_file.unk2")?,
            ptr_string: cursor.le("event_sub_file.ptr_string")?,
            unk3: cursor.le("event_sub_file.unk3")?,
        })
    }

    fn string_pointer(&self) -> u32 {
        self.ptr_string
    }

    fn columns(&self) -> String {
        format!("{:>5}, {:>5}, {:>8}", self.unk1, self.unk2, self.unk3)
    }
}

#[derive(Debug, Default)]
pub struct EventSubFileListStats {
    pub unk1: FieldStats<i16>,
    pub unk2: FieldStats<i16>,
    pub unk3: FieldStats<u32>,
}

impl EntryStats<EventSubFileListEntry> for EventSubFileListStats {
    fn log(&mut self, entry: &EventSubFileListEntry) {
        self.unk1.process(entry.unk1);
        self.unk2.process(entry.unk2);
        self.unk3.process(entry.unk3);
    }

    fn report(&self) -> String {
        let mut out = String::new();
        push_stats_block(&mut out, "unk1 :", &self.unk1);
        push_stats_block(&mut out, "unk2 :", &self.unk2);
        push_stats_block(&mut out, "unk3 :", &self.unk3);
        out
    }
}
