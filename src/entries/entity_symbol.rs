use crate::entries::{EntryStats, LutEntry, push_stats_block};
use crate::err::Result;
use crate::stats::FieldStats;
use crate::utils::ByteCursor;

/// Single entry in the entity symbol list of `arm9.bin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntitySymbolListEntry {
    pub entity_type: i16,
    pub entity_id: i16,
    pub ptr_string: u32,
    // Rendered as hex, these look like flags.
    pub unk3: u16,
    pub unk4: u16,
}

impl LutEntry for EntitySymbolListEntry {
    const SIZE: usize = 12;
    const HEADER: &'static str = "Type   Entity Id Unk3   Unk4   Symbol ";

    type Stats = EntitySymbolListStats;

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(EntitySymbolListEntry {
            entity_type: cursor.le("entity_symbol.type")?,
            entity_id: cursor.le("entity_symbol.entity_id")?,
            ptr_string: cursor.le("entity_symbol.ptr_string")?,
            unk3: cursor.le("entity_symbol.unk3")?,
            unk4: cursor.le("entity_symbol.unk4")?,
        })
    }

    fn string_pointer(&self) -> u32 {
        self.ptr_string
    }

    fn columns(&self) -> String {
        format!(
            "{:>5}, {:>9}, 0x{:04X}, 0x{:04X}",
            self.entity_type, self.entity_id, self.unk3, self.unk4
        )
    }
}

#[derive(Debug, Default)]
pub struct EntitySymbolListStats {
    pub entity_type: FieldStats<i16>,
    pub entity_id: FieldStats<i16>,
    pub unk3: FieldStats<u16>,
    pub unk4: FieldStats<u16>,
}

impl EntryStats<EntitySymbolListEntry> for EntitySymbolListStats {
    fn log(&mut self, entry: &EntitySymbolListEntry) {
        self.entity_type.process(entry.entity_type);
        self.entity_id.process(entry.entity_id);
        self.unk3.process(entry.unk3);
        self.unk4.process(entry.unk4);
    }

    fn report(&self) -> String {
        let mut out = String::new();
        push_stats_block(&mut out, "Type      :", &self.entity_type);
        push_stats_block(&mut out, "Entity ID :", &self.entity_id);
        push_stats_block(&mut out, "unk3      :", &self.unk3);
        push_stats_block(&mut out, "unk4      :", &self.unk4);
        out
    }
}
