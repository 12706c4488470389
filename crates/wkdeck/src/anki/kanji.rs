//! Kanji Anki cards.

use super::{collapsible, front, Card, CardKind};
use crate::html::escape;
use wk_core::ReadingType;

const KANJI_COLOR: &str = "#FF8C00";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiCard {
    pub level: i32,
    pub character: String,
    pub meaning: String,
    pub readings: Vec<(ReadingType, String)>,
    pub meaning_mnemonic: Option<String>,
    pub reading_mnemonic: Option<String>,
}

impl KanjiCard {
    /// Creates the meaning card and the reading card.
    pub fn into_cards(self, tag_prefix: &str) -> [Card; 2] {
        let character = escape(&self.character);

        // meaning
        let meaning_front = front("Kanji", self.level, KANJI_COLOR, &character, Some("Meaning"));
        let meaning = format!(
            r#"<span style="font-size: 16px;">{}</span>"#,
            escape(&self.meaning)
        );
        let meaning_back = match non_empty(&self.meaning_mnemonic) {
            Some(mnemonic) => format!(
                "{meaning}<br><br>{}",
                collapsible("Show Meaning Mnemonic", None, mnemonic)
            ),
            None => meaning,
        };

        // reading
        let reading_front = front("Kanji", self.level, KANJI_COLOR, &character, Some("Reading"));
        let readings = format!(
            r#"<div style="font-size: 16px;">{}</div>"#,
            reading_lines(&self.readings)
        );
        let reading_back = match non_empty(&self.reading_mnemonic) {
            Some(mnemonic) => format!(
                "{readings}<br>{}",
                collapsible("Show Reading Mnemonic", None, mnemonic)
            ),
            None => readings,
        };

        [
            Card::new(
                self.level,
                CardKind::KanjiMeaning,
                meaning_front,
                meaning_back,
                tag_prefix,
            ),
            Card::new(
                self.level,
                CardKind::KanjiReading,
                reading_front,
                reading_back,
                tag_prefix,
            ),
        ]
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.trim().is_empty())
}

// (tag background, tag text, label)
fn colors(reading_type: ReadingType) -> (&'static str, &'static str, &'static str) {
    match reading_type {
        ReadingType::On => ("rgba(74, 144, 226, 0.2)", "#2C5AA0", "#4A90E2"),
        ReadingType::Kun => ("rgba(80, 200, 120, 0.2)", "#2E7D46", "#50C878"),
        ReadingType::Nanori => ("rgba(155, 89, 182, 0.2)", "#6A1B9A", "#9B59B6"),
    }
}

/// One line per reading type that has readings, each reading shown as a coloured tag.
fn reading_lines(readings: &[(ReadingType, String)]) -> String {
    let mut lines = String::new();
    for reading_type in ReadingType::ALL {
        let (background, text, label) = colors(reading_type);
        let tags = readings
            .iter()
            .filter(|(rt, _)| *rt == reading_type)
            .map(|(_, reading)| {
                format!(
                    r#"<span style="display: inline-block; padding: 3px 8px; margin: 2px; background: {background}; color: {text}; border-radius: 3px; font-size: 14px;">{}</span>"#,
                    escape(reading)
                )
            })
            .collect::<String>();
        if !tags.is_empty() {
            lines.push_str(&format!(
                r#"<div style="margin-bottom: 6px;"><span style="font-size: 12px; font-weight: bold; color: {label};">{}:</span> {tags}</div>"#,
                reading_type.label()
            ));
        }
    }
    lines
}
