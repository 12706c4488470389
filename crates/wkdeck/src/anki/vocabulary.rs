//! Vocabulary Anki cards.

use super::{collapsible, front, Card, CardKind};
use crate::html::escape;

const VOCAB_COLOR: &str = "#228B22";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyCard {
    pub level: i32,
    pub character: String,
    pub primary_meaning: String,
    pub alternative_meanings: Vec<String>,
    pub reading: String,
    pub meaning_explanation: Option<String>,
    pub reading_explanation: Option<String>,
}

impl VocabularyCard {
    /// Creates the meaning card and the reading card.
    pub fn into_cards(self, tag_prefix: &str) -> [Card; 2] {
        let character = escape(&self.character);

        let meanings = std::iter::once(&self.primary_meaning)
            .chain(&self.alternative_meanings)
            .map(|m| escape(m))
            .collect::<Vec<_>>()
            .join(", ");
        let meanings = format!(r#"<span style="font-size: 16px;">{meanings}</span>"#);
        let meaning_back = match self.meaning_explanation.as_deref().filter(|e| !e.is_empty()) {
            Some(explanation) => format!(
                "{meanings}<br><br>{}",
                collapsible("Show Meaning Explanation", None, explanation)
            ),
            None => meanings,
        };

        let reading = format!(
            r#"<span style="font-size: 16px;">{}</span>"#,
            escape(&self.reading)
        );
        let reading_back = match self.reading_explanation.as_deref().filter(|e| !e.is_empty()) {
            Some(explanation) => format!(
                "{reading}<br><br>{}",
                collapsible("Show Reading Explanation", None, explanation)
            ),
            None => reading,
        };

        [
            Card::new(
                self.level,
                CardKind::VocabMeaning,
                front("Vocab", self.level, VOCAB_COLOR, &character, Some("Meaning")),
                meaning_back,
                tag_prefix,
            ),
            Card::new(
                self.level,
                CardKind::VocabReading,
                front("Vocab", self.level, VOCAB_COLOR, &character, Some("Reading")),
                reading_back,
                tag_prefix,
            ),
        ]
    }
}
