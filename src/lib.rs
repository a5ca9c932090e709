pub mod blob;
pub mod entries;
pub mod err;
pub mod layout;
pub mod lut_dump;
pub mod settings;
pub mod stats;
pub mod utils;

pub use blob::{dump_blob, read_blob};
pub use entries::{EntryKind, LutEntry, StringTable};
pub use err::{DumpError, Result};
pub use layout::{BlobLayout, TableLayout};
pub use lut_dump::{TableSummary, dump_table, dump_table_kind};
pub use settings::DumpSettings;
pub use stats::FieldStats;

#[cfg(test)]
pub fn ensure_env_logger_initialized() {
    use std::io::Write;
    use std::sync::Once;

    static LOGGER_INIT: Once = Once::new();

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .init();
    });
}
