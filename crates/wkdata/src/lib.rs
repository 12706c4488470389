//! Types for the level files written by the wk scrapers.
//!
//! Each file is a JSON object from a level number to the items introduced on that level.

pub mod dataset;
pub mod kanji;
pub mod level_file;
pub mod radicals;
pub mod vocabulary;

pub use dataset::Dataset;
pub use kanji::KanjiEntry;
pub use level_file::LevelFile;
pub use radicals::{Glyph, RadicalEntry};
pub use vocabulary::VocabularyEntry;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to open '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize '{}'", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid level key '{0}'")]
    InvalidLevelKey(String),
    #[error("level {0} is outside of the valid range")]
    LevelOutOfRange(i32),
    #[error("level {0} appears more than once")]
    DuplicateLevel(i32),
}
