//! Radical Anki cards.

use super::{collapsible, front, Card, CardKind};
use crate::html::escape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadicalGlyph {
    Character(String),
    /// Radicals with no Unicode character are shown as an image.
    Image(String),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadicalCard {
    pub level: i32,
    pub glyph: RadicalGlyph,
    pub meaning: String,
    pub mnemonic: Option<String>,
    pub mnemonic_image: Option<String>,
}

impl RadicalCard {
    pub fn into_card(self, tag_prefix: &str) -> Card {
        let display = match &self.glyph {
            RadicalGlyph::Character(c) => escape(c),
            // the images are black line art, inverted to show up on dark backgrounds
            RadicalGlyph::Image(src) => format!(
                r#"<img src="{}" style="filter: brightness(0) invert(1) sepia(1) hue-rotate(200deg) saturate(2);">"#,
                escape(src)
            ),
            RadicalGlyph::None => String::new(),
        };
        let front = front("Radical", self.level, "#1E90FF", &display, None);

        let meaning = format!(
            r#"<span style="font-size: 16px;">{}</span>"#,
            escape(&self.meaning)
        );
        let back = match self.mnemonic.as_deref().filter(|m| !m.is_empty()) {
            Some(mnemonic) => {
                let mnemonic =
                    collapsible("Show Mnemonic", self.mnemonic_image.as_deref(), mnemonic);
                format!("{meaning}<br><br>{mnemonic}")
            }
            None => meaning,
        };

        Card::new(self.level, CardKind::Radical, front, back, tag_prefix)
    }
}
