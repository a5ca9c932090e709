use crate::entries::{EntryStats, LutEntry, push_stats_block};
use crate::err::Result;
use crate::stats::FieldStats;
use crate::utils::ByteCursor;

/// Single entry in the special list of `overlay_0011.bin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecListEntry {
    pub id: i16,
    pub unk2: i16,
    pub ptr_string: u32,
}

impl LutEntry for SpecListEntry {
    const SIZE: usize = 8;
    const HEADER: &'static str = "Id     Unk2   Symbol ";

    type Stats = SpecListStats;

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(SpecListEntry {
            id: cursor.le("spec_list.id")?,
            unk2: cursor.le("spec_list.unk2")?,
            ptr_string: cursor.le("spec_list.ptr_string")?,
        })
    }

    fn string_pointer(&self) -> u32 {
        self.ptr_string
    }

    fn columns(&self) -> String {
        format!("{:>5}, {:>5}", self.id, self.unk2)
    }
}

#[derive(Debug, Default)]
pub struct SpecListStats {
    pub id: FieldStats<i16>,
    pub unk2: FieldStats<i16>,
}

impl EntryStats<SpecListEntry> for SpecListStats {
    fn log(&mut self, entry: &SpecListEntry) {
        self.id.process(entry.id);
        self.unk2.process(entry.unk2);
    }

    fn report(&self) -> String {
        let mut out = String::new();
        push_stats_block(&mut out, "Id   :", &self.id);
        push_stats_block(&mut out, "unk2 :", &self.unk2);
        out
    }
}
