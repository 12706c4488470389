//! wk core types and functions.

use std::{fmt, str::FromStr};

/// An unrecognised value for one of the enumerated columns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// The category of a kanji reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReadingType {
    On,
    Kun,
    Nanori,
}

impl ReadingType {
    /// All reading types in display order.
    pub const ALL: [ReadingType; 3] = [ReadingType::On, ReadingType::Kun, ReadingType::Nanori];

    /// The value stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Kun => "kun",
            Self::Nanori => "nanori",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::On => "On'yomi",
            Self::Kun => "Kun'yomi",
            Self::Nanori => "Nanori",
        }
    }
}

impl FromStr for ReadingType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "kun" => Ok(Self::Kun),
            "nanori" => Ok(Self::Nanori),
            other => Err(ParseEnumError {
                kind: "reading type",
                value: other.to_string(),
            }),
        }
    }
}

/// What a kanji mnemonic helps to remember.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MnemonicType {
    Meaning,
    Reading,
}

impl MnemonicType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meaning => "meaning",
            Self::Reading => "reading",
        }
    }
}

impl FromStr for MnemonicType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meaning" => Ok(Self::Meaning),
            "reading" => Ok(Self::Reading),
            other => Err(ParseEnumError {
                kind: "mnemonic type",
                value: other.to_string(),
            }),
        }
    }
}

/// What a vocabulary explanation explains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExplanationType {
    Meaning,
    Reading,
}

impl ExplanationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meaning => "meaning",
            Self::Reading => "reading",
        }
    }
}

impl FromStr for ExplanationType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meaning" => Ok(Self::Meaning),
            "reading" => Ok(Self::Reading),
            other => Err(ParseEnumError {
                kind: "explanation type",
                value: other.to_string(),
            }),
        }
    }
}

macro_rules! impl_display {
    ($($t:ty),*) => {
        $(
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(ReadingType, MnemonicType, ExplanationType);

/// The lowest curriculum level.
pub const MIN_LEVEL: i32 = 1;
/// The highest curriculum level.
pub const MAX_LEVEL: i32 = 60;

pub fn is_valid_level(level: i32) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

fn is_kanji(c: char) -> bool {
    // Unicode CJK Unified Ideographs
    (0x4E00..0x9FBF).contains(&(c as u32))
}

/// Returns the kanji in a word in order of appearance.
pub fn kanji_from_word(word: &str) -> impl Iterator<Item = &str> {
    word.char_indices()
        .filter(|(_, c)| crate::is_kanji(*c))
        .map(|(i, c)| &word[i..i + c.len_utf8()])
}

/// Checks that the text is written entirely in hiragana or katakana.
pub fn is_kana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(wana_kana::utils::is_char_kana)
}

/// Converts katakana in a reading to hiragana so that both scripts compare equal.
pub fn to_hiragana(text: &str) -> String {
    use wana_kana::ConvertJapanese;
    text.trim().to_hiragana()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn recognises_kanji() {
        assert!(!is_kanji('k'));
        assert!(!is_kanji('え'));
        assert!(is_kanji('考'));
    }

    #[test]
    fn finds_kanji_in_word() {
        let kanji = kanji_from_word("お母さん大好き").collect::<Vec<_>>();
        assert_eq!(kanji, ["母", "大", "好"]);
        assert_eq!(kanji_from_word("ひらがな").count(), 0);
    }

    #[test]
    fn parses_reading_types() {
        for reading_type in ReadingType::ALL {
            assert_eq!(reading_type.as_str().parse::<ReadingType>(), Ok(reading_type));
        }
        let err = "onyomi".parse::<ReadingType>().unwrap_err();
        assert_eq!(err.value, "onyomi");
        assert_eq!(err.to_string(), "invalid reading type 'onyomi'");
    }

    #[test]
    fn parses_mnemonic_and_explanation_types() {
        assert_eq!("meaning".parse::<MnemonicType>(), Ok(MnemonicType::Meaning));
        assert_eq!("reading".parse::<ExplanationType>(), Ok(ExplanationType::Reading));
        assert!("Meaning".parse::<MnemonicType>().is_err());
        assert!("".parse::<ExplanationType>().is_err());
    }

    #[test]
    fn recognises_kana() {
        assert!(is_kana("じんこう"));
        assert!(is_kana("ジンコウ"));
        assert!(is_kana("ラーメン"));
        assert!(!is_kana("jinkou"));
        assert!(!is_kana("人口"));
        assert!(!is_kana(""));
    }

    #[test]
    fn normalises_katakana() {
        assert_eq!(to_hiragana("カタカナ"), "かたかな");
        assert_eq!(to_hiragana(" ひと "), "ひと");
    }

    #[test]
    fn validates_levels() {
        assert!(is_valid_level(1));
        assert!(is_valid_level(60));
        assert!(!is_valid_level(0));
        assert!(!is_valid_level(61));
    }
}
