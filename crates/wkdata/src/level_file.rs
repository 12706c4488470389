//! Parses the level-keyed layout shared by all of the data files.

use crate::DataError;
use serde::de::DeserializeOwned;
use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Items grouped by level, iterated in ascending level order.
#[derive(Debug, Clone)]
pub struct LevelFile<T> {
    levels: BTreeMap<i32, Vec<T>>,
}

impl<T> Default for LevelFile<T> {
    fn default() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }
}

impl<T: DeserializeOwned> LevelFile<T> {
    pub fn open(path: &Path) -> Result<Self, DataError> {
        tracing::info!("Opening {}", path.display());
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_owned(),
            source,
        })?;
        let raw = read_raw(BufReader::new(file)).map_err(|source| DataError::Json {
            path: path.to_owned(),
            source,
        })?;
        Self::from_raw(raw)
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw = serde_json::from_str(json).map_err(|source| DataError::Json {
            path: "<string>".into(),
            source,
        })?;
        Self::from_raw(raw)
    }
}

fn read_raw<R: Read, T: DeserializeOwned>(
    reader: R,
) -> Result<HashMap<String, Vec<T>>, serde_json::Error> {
    serde_json::from_reader(reader)
}

impl<T> LevelFile<T> {
    /// Validates the level keys of a deserialized file.
    pub fn from_raw(raw: HashMap<String, Vec<T>>) -> Result<Self, DataError> {
        let mut levels = BTreeMap::new();
        for (key, items) in raw {
            let level = key
                .trim()
                .parse::<i32>()
                .map_err(|_| DataError::InvalidLevelKey(key.clone()))?;
            if !wk_core::is_valid_level(level) {
                return Err(DataError::LevelOutOfRange(level));
            }
            if levels.insert(level, items).is_some() {
                return Err(DataError::DuplicateLevel(level));
            }
        }
        Ok(Self { levels })
    }

    /// Returns an iterator over the levels and their items in ascending level order.
    pub fn levels(&self) -> impl Iterator<Item = (i32, &[T])> {
        self.levels
            .iter()
            .map(|(level, items)| (*level, items.as_slice()))
    }

    /// Total number of items across all levels.
    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn orders_levels_numerically() {
        let file = LevelFile::<u32>::from_json(r#"{"10": [3], "2": [1, 2], "1": []}"#).unwrap();
        let levels = file.levels().collect::<Vec<_>>();
        assert_eq!(levels, [(1, &[][..]), (2, &[1, 2][..]), (10, &[3][..])]);
        assert_eq!(file.len(), 3);
    }

    #[test]
    fn rejects_invalid_levels() {
        let err = LevelFile::<u32>::from_json(r#"{"one": [1]}"#).unwrap_err();
        assert!(matches!(err, DataError::InvalidLevelKey(key) if key == "one"));

        let err = LevelFile::<u32>::from_json(r#"{"61": [1]}"#).unwrap_err();
        assert!(matches!(err, DataError::LevelOutOfRange(61)));

        let err = LevelFile::<u32>::from_json(r#"{"0": []}"#).unwrap_err();
        assert!(matches!(err, DataError::LevelOutOfRange(0)));
    }

    #[test]
    fn rejects_repeated_level() {
        let err = LevelFile::<u32>::from_json(r#"{"1": [1, 2], "01": [3]}"#).unwrap_err();
        assert!(matches!(err, DataError::DuplicateLevel(1)));

        let err = LevelFile::<u32>::from_json(r#"{" 2": [], "2": [1]}"#).unwrap_err();
        assert!(matches!(err, DataError::DuplicateLevel(2)));
    }

    #[test]
    fn reports_path_of_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = LevelFile::<u32>::open(&path).unwrap_err();
        assert!(matches!(&err, DataError::Io { path: p, .. } if p == &path));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        let err = LevelFile::<u32>::open(&path).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }
}
