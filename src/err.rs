use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DumpError>;

#[derive(Debug, Error)]
pub enum DumpError {
    /// Errors related to decoding
    #[error("buffer too small for {what} at offset {offset} (need {need} bytes, have {have})")]
    Truncated {
        what: &'static str,
        offset: u64,
        need: usize,
        have: usize,
    },

    #[error("string at offset {offset} ran past the end of the buffer (len={len})")]
    UnterminatedString { offset: u64, len: usize },

    #[error("failed to decode string (used encoding scheme {encoding_used}), caused by: {inner_message}")]
    AnsiDecode {
        encoding_used: &'static str,
        inner_message: String,
    },

    #[error("failed to dump table `{title}`, caused by:\n\t {source}")]
    FailedToDumpTable {
        title: String,
        #[source]
        source: Box<DumpError>,
    },

    /// Errors related to the filesystem
    #[error("failed to open file {}: {source}", path.display())]
    FailedToOpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("an I/O error has occurred: {0}")]
    Io(#[from] io::Error),
}

impl DumpError {
    pub(crate) fn truncated(what: &'static str, offset: usize, need: usize, len: usize) -> Self {
        DumpError::Truncated {
            what,
            offset: offset as u64,
            need,
            have: len.saturating_sub(offset),
        }
    }

    /// Wraps `self` with the title of the table that was being dumped.
    pub(crate) fn in_table(self, title: &str) -> Self {
        DumpError::FailedToDumpTable {
            title: title.to_owned(),
            source: Box::new(self),
        }
    }

    /// Walks through table context wrappers and returns the underlying decode error.
    pub fn root_cause(&self) -> &DumpError {
        match self {
            DumpError::FailedToDumpTable { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
