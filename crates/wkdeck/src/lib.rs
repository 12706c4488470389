//! Turns radicals, kanji and vocabulary into Anki cards.

pub mod anki;
pub mod html;

pub use anki::{Card, CardKind, Deck, KanjiCard, RadicalCard, RadicalGlyph, VocabularyCard};
