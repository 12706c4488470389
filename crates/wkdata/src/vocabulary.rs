//! Vocabulary entries.

use serde::{Deserialize, Serialize};
use wk_core::ExplanationType;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub character: String,
    /// The meaning listed on the level page, used when the item page had no primary meaning.
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub primary_meaning: String,
    #[serde(default)]
    pub alternative_meanings: Vec<String>,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub meaning_explanation: String,
    #[serde(default)]
    pub reading_explanation: String,
    #[serde(default)]
    pub kanji_composition: Vec<CompositionKanji>,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionKanji {
    pub kanji: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub url: String,
}

impl VocabularyEntry {
    pub fn primary_meaning(&self) -> &str {
        let primary = self.primary_meaning.trim();
        if primary.is_empty() {
            self.meaning.trim()
        } else {
            primary
        }
    }

    /// Alternative meanings with blanks and repeats of the primary meaning removed.
    pub fn alternative_meanings(&self) -> impl Iterator<Item = &str> {
        let primary = self.primary_meaning();
        let mut seen = Vec::new();
        self.alternative_meanings
            .iter()
            .map(|m| m.trim())
            .filter(move |m| {
                if m.is_empty() || m.eq_ignore_ascii_case(primary) || seen.contains(m) {
                    false
                } else {
                    seen.push(*m);
                    true
                }
            })
    }

    /// Returns the non-empty explanations.
    pub fn explanations(&self) -> impl Iterator<Item = (ExplanationType, &str)> {
        [
            (ExplanationType::Meaning, self.meaning_explanation.trim()),
            (ExplanationType::Reading, self.reading_explanation.trim()),
        ]
        .into_iter()
        .filter(|(_, e)| !e.is_empty())
    }

    /// The kanji the word is made of.
    /// Falls back to the kanji in the word itself if the composition was not scraped.
    pub fn composition_kanji(&self) -> Vec<&str> {
        let composition = self
            .kanji_composition
            .iter()
            .map(|ck| ck.kanji.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>();
        if composition.is_empty() {
            wk_core::kanji_from_word(&self.character).collect()
        } else {
            composition
        }
    }
}
