use std::fmt;

use encoding::EncodingRef;
use encoding::all::ISO_8859_1;

/// Options shared by every table dump of a run.
#[derive(Clone)]
pub struct DumpSettings {
    num_threads: usize,
    ansi_codec: EncodingRef,
}

impl fmt::Debug for DumpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DumpSettings")
            .field("num_threads", &self.num_threads)
            .field("ansi_codec", &self.ansi_codec.name())
            .finish()
    }
}

impl Default for DumpSettings {
    fn default() -> Self {
        DumpSettings {
            num_threads: 0,
            ansi_codec: ISO_8859_1,
        }
    }
}

impl PartialEq for DumpSettings {
    fn eq(&self, other: &Self) -> bool {
        self.num_threads == other.num_threads && self.ansi_codec.name() == other.ansi_codec.name()
    }
}

impl DumpSettings {
    pub fn new() -> Self {
        DumpSettings::default()
    }

    /// Sets the number of worker threads used to process independent blobs.
    /// `0` will let rayon decide, `1` processes them sequentially.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = if cfg!(feature = "multithreading") {
            num_threads
        } else {
            1
        };
        self
    }

    /// Sets the single-byte codec used to decode strings stored in the blob.
    pub fn ansi_codec(mut self, ansi_codec: EncodingRef) -> Self {
        self.ansi_codec = ansi_codec;
        self
    }

    pub fn get_num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn get_ansi_codec(&self) -> EncodingRef {
        self.ansi_codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding::all::WINDOWS_1252;

    #[test]
    fn test_builder_overrides_defaults() {
        let settings = DumpSettings::new().ansi_codec(WINDOWS_1252).num_threads(1);

        assert_eq!(settings.get_ansi_codec().name(), "windows-1252");
        assert_eq!(settings.get_num_threads(), 1);
        assert_ne!(settings, DumpSettings::default());
    }

    #[test]
    fn test_default_codec_accepts_every_byte() {
        let settings = DumpSettings::default();
        let all_bytes: Vec<u8> = (1u8..=255).collect();

        assert!(
            settings
                .get_ansi_codec()
                .decode(&all_bytes, encoding::DecoderTrap::Strict)
                .is_ok()
        );
    }
}
