//! Kanji entries.

use serde::{Deserialize, Serialize};
use wk_core::{MnemonicType, ReadingType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub character: String,
    pub meaning: String,
    #[serde(default)]
    pub readings: Readings,
    /// English names of the radicals the kanji is made of.
    #[serde(default)]
    pub radical_combination: Vec<String>,
    #[serde(default)]
    pub mnemonics: Mnemonics,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readings {
    #[serde(default, rename = "on'yomi")]
    pub onyomi: Vec<String>,
    #[serde(default, rename = "kun'yomi")]
    pub kunyomi: Vec<String>,
    #[serde(default)]
    pub nanori: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mnemonics {
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub reading: String,
}

impl KanjiEntry {
    /// Returns the readings in on, kun, nanori order.
    /// Blank readings and the "None" placeholder are skipped.
    pub fn readings(&self) -> impl Iterator<Item = (ReadingType, &str)> {
        let Readings {
            onyomi,
            kunyomi,
            nanori,
        } = &self.readings;
        typed_readings(ReadingType::On, onyomi)
            .chain(typed_readings(ReadingType::Kun, kunyomi))
            .chain(typed_readings(ReadingType::Nanori, nanori))
    }

    /// Returns the non-empty mnemonics.
    pub fn mnemonics(&self) -> impl Iterator<Item = (MnemonicType, &str)> {
        [
            (MnemonicType::Meaning, self.mnemonics.meaning.trim()),
            (MnemonicType::Reading, self.mnemonics.reading.trim()),
        ]
        .into_iter()
        .filter(|(_, m)| !m.is_empty())
    }
}

fn typed_readings(
    reading_type: ReadingType,
    readings: &[String],
) -> impl Iterator<Item = (ReadingType, &str)> {
    readings
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case("none"))
        .map(move |r| (reading_type, r))
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry() -> KanjiEntry {
        serde_json::from_str(
            r#"{
                "character": "人",
                "url": "https://www.wanikani.com/kanji/人",
                "meaning": "Person",
                "readings": {
                    "on'yomi": ["じん", "にん"],
                    "kun'yomi": ["ひと"],
                    "nanori": ["None"]
                },
                "radical_combination": ["Person"],
                "mnemonics": {
                    "meaning": "A <radical>person</radical> stands.",
                    "reading": ""
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn orders_readings_by_type() {
        let entry = entry();
        let readings = entry.readings().collect::<Vec<_>>();
        assert_eq!(
            readings,
            [
                (ReadingType::On, "じん"),
                (ReadingType::On, "にん"),
                (ReadingType::Kun, "ひと"),
            ]
        );
    }

    #[test]
    fn skips_empty_mnemonics() {
        let entry = entry();
        let mnemonic_types = entry.mnemonics().map(|(mt, _)| mt).collect::<Vec<_>>();
        assert_eq!(mnemonic_types, [MnemonicType::Meaning]);
    }

    #[test]
    fn tolerates_missing_sections() {
        let entry: KanjiEntry =
            serde_json::from_str(r#"{"character": "一", "meaning": "One"}"#).unwrap();
        assert_eq!(entry.readings().count(), 0);
        assert!(entry.radical_combination.is_empty());
    }
}
