//! The complete set of level files.

use crate::{DataError, KanjiEntry, LevelFile, RadicalEntry, VocabularyEntry};
use std::{collections::BTreeSet, path::Path};

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub radicals: LevelFile<RadicalEntry>,
    pub kanji: LevelFile<KanjiEntry>,
    pub vocabulary: LevelFile<VocabularyEntry>,
}

impl Dataset {
    pub fn open(radicals: &Path, kanji: &Path, vocabulary: &Path) -> Result<Self, DataError> {
        let radicals = LevelFile::open(radicals)?;
        let kanji = LevelFile::open(kanji)?;
        let vocabulary = LevelFile::open(vocabulary)?;
        tracing::info!(
            "Opened {} radicals, {} kanji and {} vocabulary",
            radicals.len(),
            kanji.len(),
            vocabulary.len()
        );
        Ok(Self {
            radicals,
            kanji,
            vocabulary,
        })
    }

    /// Every level that has at least one item in any of the files.
    pub fn levels(&self) -> BTreeSet<i32> {
        let radicals = self.radicals.levels().map(|(l, _)| l);
        let kanji = self.kanji.levels().map(|(l, _)| l);
        let vocabulary = self.vocabulary.levels().map(|(l, _)| l);
        radicals.chain(kanji).chain(vocabulary).collect()
    }
}
