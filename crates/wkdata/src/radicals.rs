//! Radical entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadicalEntry {
    /// Either the radical itself or, for radicals with no Unicode character, an image URL.
    pub character: String,
    pub meaning: String,
    #[serde(default)]
    pub mnemonic: String,
    #[serde(default)]
    pub mnemonic_image: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// How a radical is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph<'a> {
    Character(&'a str),
    Image(&'a str),
    None,
}

impl RadicalEntry {
    pub fn glyph(&self) -> Glyph<'_> {
        let character = self.character.trim();
        if character.is_empty() {
            Glyph::None
        } else if character.starts_with("http") {
            Glyph::Image(character)
        } else {
            Glyph::Character(character)
        }
    }

    pub fn mnemonic_image(&self) -> Option<&str> {
        Some(self.mnemonic_image.trim()).filter(|i| !i.is_empty())
    }
}
