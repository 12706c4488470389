//! Functionality for creating Anki decks.
//!
//! Decks are written as Anki's plain text import format: semicolon-separated
//! `front;back;tags` rows with HTML enabled.

mod kanji;
mod radical;
mod vocabulary;

pub use self::{
    kanji::KanjiCard,
    radical::{RadicalCard, RadicalGlyph},
    vocabulary::VocabularyCard,
};
use std::{
    fmt,
    io::{self, Write},
};

pub const DEFAULT_TAG_PREFIX: &str = "wanikani";

/// The kinds of cards in a deck, in the order they are introduced on a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardKind {
    Radical,
    KanjiMeaning,
    KanjiReading,
    VocabMeaning,
    VocabReading,
}

impl CardKind {
    pub const ALL: [CardKind; 5] = [
        CardKind::Radical,
        CardKind::KanjiMeaning,
        CardKind::KanjiReading,
        CardKind::VocabMeaning,
        CardKind::VocabReading,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Radical => "radical",
            Self::KanjiMeaning => "kanji-meaning",
            Self::KanjiReading => "kanji-reading",
            Self::VocabMeaning => "vocab-meaning",
            Self::VocabReading => "vocab-reading",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single note in the import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub level: i32,
    pub kind: CardKind,
    pub front: String,
    pub back: String,
    pub tags: String,
}

impl Card {
    fn new(level: i32, kind: CardKind, front: String, back: String, tag_prefix: &str) -> Self {
        let tags = format!("{tag_prefix} {kind} level-{level}");
        Self {
            level,
            kind,
            front,
            back,
            tags,
        }
    }
}

/// An ordered collection of cards.
#[derive(Debug, Clone)]
pub struct Deck {
    tag_prefix: String,
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_PREFIX)
    }
}

impl Deck {
    pub fn new(tag_prefix: impl Into<String>) -> Self {
        Self {
            tag_prefix: tag_prefix.into(),
            cards: Vec::new(),
        }
    }

    pub fn push_radical(&mut self, radical: RadicalCard) {
        let card = radical.into_card(&self.tag_prefix);
        self.cards.push(card);
    }

    /// Adds the meaning card of the kanji immediately followed by its reading card.
    pub fn push_kanji(&mut self, kanji: KanjiCard) {
        let [meaning, reading] = kanji.into_cards(&self.tag_prefix);
        self.cards.push(meaning);
        self.cards.push(reading);
    }

    /// Adds the meaning card of the word immediately followed by its reading card.
    pub fn push_vocabulary(&mut self, vocabulary: VocabularyCard) {
        let [meaning, reading] = vocabulary.into_cards(&self.tag_prefix);
        self.cards.push(meaning);
        self.cards.push(reading);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|c| c.kind == kind).count()
    }

    /// Writes the deck in Anki's text import format.
    pub fn write_csv<W: Write>(&self, writer: W) -> io::Result<()> {
        write_csv(writer, &self.cards)
    }
}

const SEPARATOR: char = ';';
const LINE_END: &str = "\r\n";

/// Writes the cards with the header lines Anki uses to detect the separator and HTML fields.
pub fn write_csv<W: Write>(mut writer: W, cards: &[Card]) -> io::Result<()> {
    tracing::debug!("Writing {} cards", cards.len());
    write_row(&mut writer, ["#separator:Semicolon", "", ""])?;
    write_row(&mut writer, ["#html:true", "", ""])?;
    for card in cards {
        write_row(&mut writer, [card.front.as_str(), card.back.as_str(), card.tags.as_str()])?;
    }
    writer.flush()
}

fn write_row<W: Write>(writer: &mut W, fields: [&str; 3]) -> io::Result<()> {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            write!(writer, "{SEPARATOR}")?;
        }
        write_field(writer, field)?;
    }
    writer.write_all(LINE_END.as_bytes())
}

// fields are only quoted when they contain a character with a special meaning
fn write_field<W: Write>(writer: &mut W, field: &str) -> io::Result<()> {
    let needs_quotes = field.contains([SEPARATOR, '"', '\r', '\n']);
    if needs_quotes {
        write!(writer, "\"{}\"", field.replace('"', "\"\""))
    } else {
        writer.write_all(field.as_bytes())
    }
}

// the styling shared by every collapsible mnemonic section
const HIGHLIGHT_STYLE: &str = "<style>\
.radical-highlight { color: #87CEEB; font-weight: bold; } \
.kanji-highlight { color: #FFB347; font-weight: bold; } \
.reading-highlight { color: #98FB98; font-weight: bold; } \
.vocabulary-highlight { color: #FFB6C1; font-weight: bold; }\
</style>";

/// Wraps a mnemonic in a collapsed `<details>` block labeled with `summary`.
fn collapsible(summary: &str, image: Option<&str>, mnemonic: &str) -> String {
    let image = image
        .map(|src| {
            format!(
                r#"<img src="{}" style="max-width: 100%; margin: 10px 0; display: block;">"#,
                crate::html::escape(src)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<details><summary style="cursor: pointer; color: #666; font-size: 12px;">📖 {summary}</summary><div style="background-color: #2d2d2d; font-size: 8px; color: #fff; line-height: 1.4;">{HIGHLIGHT_STYLE}{image}{mnemonic}</div></details>"#
    )
}

/// The item type and level line above the character, and an optional prompt below it.
fn front(label: &str, level: i32, color: &str, display: &str, prompt: Option<&str>) -> String {
    let prompt = prompt
        .map(|p| format!(r#"<div style="font-size: 10px; color: #666;">{p}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<div style="font-size: 10px; color: #666;">{label} - Level {level}</div><div style="font-size: 24px; color: {color}; text-align: center; margin: 15px 0;">{display}</div>{prompt}"#
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn card(front: &str, back: &str) -> Card {
        Card::new(1, CardKind::Radical, front.to_string(), back.to_string(), "wanikani")
    }

    fn csv(cards: &[Card]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, cards).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_rows() {
        assert_eq!(csv(&[]), "#separator:Semicolon;;\r\n#html:true;;\r\n");
    }

    #[test]
    fn quotes_only_when_needed() {
        let output = csv(&[card("一", r#"<span style="font-size: 16px;">Ground</span>"#)]);
        let row = output.lines().nth(2).unwrap();
        assert_eq!(
            row,
            r#"一;"<span style=""font-size: 16px;"">Ground</span>";wanikani radical level-1"#
        );

        let output = csv(&[card("a\nb", "plain")]);
        assert!(output.ends_with("\"a\nb\";plain;wanikani radical level-1\r\n"));
    }

    #[test]
    fn tags_cards_by_kind_and_level() {
        let card = Card::new(
            12,
            CardKind::VocabReading,
            String::new(),
            String::new(),
            "custom",
        );
        assert_eq!(card.tags, "custom vocab-reading level-12");
    }

    #[test]
    fn interleaves_meaning_and_reading_cards() {
        let mut deck = Deck::default();
        deck.push_radical(RadicalCard {
            level: 1,
            glyph: RadicalGlyph::Character("大".to_string()),
            meaning: "Big".to_string(),
            mnemonic: None,
            mnemonic_image: None,
        });
        deck.push_kanji(KanjiCard {
            level: 1,
            character: "大".to_string(),
            meaning: "Big".to_string(),
            readings: vec![],
            meaning_mnemonic: None,
            reading_mnemonic: None,
        });
        deck.push_vocabulary(VocabularyCard {
            level: 1,
            character: "大きい".to_string(),
            primary_meaning: "Big".to_string(),
            alternative_meanings: vec![],
            reading: "おおきい".to_string(),
            meaning_explanation: None,
            reading_explanation: None,
        });
        let kinds = deck.cards().iter().map(|c| c.kind).collect::<Vec<_>>();
        assert_eq!(kinds, CardKind::ALL);
        assert_eq!(deck.len(), 5);
        assert_eq!(deck.count(CardKind::KanjiReading), 1);
    }

    #[test]
    fn collapses_mnemonics() {
        let section = collapsible("Show Mnemonic", Some("https://img/x.png"), "text");
        assert!(section.starts_with("<details><summary"));
        assert!(section.contains("📖 Show Mnemonic</summary>"));
        assert!(section.contains(r#"<img src="https://img/x.png""#));
        assert!(section.ends_with("text</div></details>"));
    }
}
