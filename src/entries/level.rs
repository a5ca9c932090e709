use crate::entries::{EntryStats, LutEntry, push_stats_block};
use crate::err::Result;
use crate::stats::FieldStats;
use crate::utils::ByteCursor;

/// Single entry in the event (level) list of `arm9.bin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelEntry {
    pub ptr_string: u32,
    pub unk1: i16,
    pub unk2: i16,
    // Looks like an id, hence the `SomeId` column.
    pub unk3: i16,
    pub unk4: i16,
}

impl LutEntry for LevelEntry {
    const SIZE: usize = 12;
    const HEADER: &'static str = "Unk1   unk2   SomeId Unk4   Symbol ";

    type Stats = LevelEntryStats;

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(LevelEntry {
            ptr_string: cursor.le("level.ptr_string")?,
            unk1: cursor.le("level.unk1")?,
            unk2: cursor.le("level.unk2")?,
            unk3: cursor.le("level.unk3")?,
            unk4: cursor.le("level.unk4")?,
        })
    }

    fn string_pointer(&self) -> u32 {
        self.ptr_string
    }

    fn columns(&self) -> String {
        format!(
            "{:>5}, {:>5}, {:>5}, {:>5}",
            self.unk1, self.unk2, self.unk3, self.unk4
        )
    }
}

#[derive(Debug, Default)]
pub struct LevelEntryStats {
    pub unk1: FieldStats<i16>,
    pub unk2: FieldStats<i16>,
    pub unk3: FieldStats<i16>,
    pub unk4: FieldStats<i16>,
}

impl EntryStats<LevelEntry> for LevelEntryStats {
    fn log(&mut self, entry: &LevelEntry) {
        self.unk1.process(entry.unk1);
        self.unk2.process(entry.unk2);
        self.unk3.process(entry.unk3);
        self.unk4.process(entry.unk4);
    }

    fn report(&self) -> String {
        let mut out = String::new();
        push_stats_block(&mut out, "unk1   :", &self.unk1);
        push_stats_block(&mut out, "unk2   :", &self.unk2);
        push_stats_block(&mut out, "SomeId :", &self.unk3);
        push_stats_block(&mut out, "unk4   :", &self.unk4);
        out
    }
}
