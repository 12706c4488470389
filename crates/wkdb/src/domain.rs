//! Operations on the dataset stored in the database.

pub mod decks;
pub mod kanji;
pub mod load;
pub mod radicals;
pub mod vocabulary;

use diesel::prelude::*;
use std::collections::BTreeSet;

/// Row counts of every table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub radicals: i64,
    pub kanji: i64,
    pub kanji_readings: i64,
    pub kanji_mnemonics: i64,
    pub kanji_radicals: i64,
    pub vocabulary: i64,
    pub vocab_alternative_meanings: i64,
    pub vocab_explanations: i64,
    pub vocab_kanji_composition: i64,
    /// Every level with at least one radical, kanji or word.
    pub levels: BTreeSet<i32>,
}

pub fn stats(conn: &mut SqliteConnection) -> eyre::Result<Stats> {
    use crate::schema::{
        kanji as k, kanji_mnemonics as km, kanji_radicals as kr, kanji_readings as kre,
        radicals as r, vocab_alternative_meanings as vam, vocab_explanations as ve,
        vocab_kanji_composition as vkc, vocabulary as v,
    };

    let mut levels = BTreeSet::new();
    levels.extend(r::table.select(r::level).distinct().load::<i32>(conn)?);
    levels.extend(k::table.select(k::level).distinct().load::<i32>(conn)?);
    levels.extend(v::table.select(v::level).distinct().load::<i32>(conn)?);

    Ok(Stats {
        radicals: r::table.count().get_result(conn)?,
        kanji: k::table.count().get_result(conn)?,
        kanji_readings: kre::table.count().get_result(conn)?,
        kanji_mnemonics: km::table.count().get_result(conn)?,
        kanji_radicals: kr::table.count().get_result(conn)?,
        vocabulary: v::table.count().get_result(conn)?,
        vocab_alternative_meanings: vam::table.count().get_result(conn)?,
        vocab_explanations: ve::table.count().get_result(conn)?,
        vocab_kanji_composition: vkc::table.count().get_result(conn)?,
        levels,
    })
}

/// A small dataset shaped like the scraper output.
#[cfg(test)]
pub(crate) fn test_dataset() -> wkdata::Dataset {
    use wkdata::LevelFile;

    let radicals = LevelFile::from_json(
        r#"{
            "1": [
                {"character": "一", "meaning": "Ground", "mnemonic": "The <radical-highlight>ground</radical-highlight> is flat.", "type": "radical"},
                {"character": "口", "meaning": "Mouth", "mnemonic": "An open <radical-highlight>mouth</radical-highlight>.", "type": "radical"},
                {"character": "https://files.example.com/stick.svg", "meaning": "Stick", "mnemonic": "A <radical-highlight>stick</radical-highlight>.", "mnemonic_image": "https://files.example.com/stick-mnemonic.png", "type": "radical"}
            ],
            "2": [
                {"character": "大", "meaning": "Big", "mnemonic": "A <radical-highlight>big</radical-highlight> man.", "type": "radical"},
                {"character": "人", "meaning": "Person", "mnemonic": "A <radical-highlight>person</radical-highlight>.", "type": "radical"}
            ]
        }"#,
    )
    .unwrap();
    let kanji = LevelFile::from_json(
        r#"{
            "1": [
                {
                    "character": "一",
                    "meaning": "One",
                    "readings": {"on'yomi": ["いち", "いつ"], "kun'yomi": ["ひと"], "nanori": ["None"]},
                    "radical_combination": ["Ground"],
                    "mnemonics": {"meaning": "One line of <radical-highlight>ground</radical-highlight>.", "reading": "<reading-highlight>いち</reading-highlight>"}
                },
                {
                    "character": "口",
                    "meaning": "Mouth",
                    "readings": {"on'yomi": ["こう", "く"], "kun'yomi": ["くち"]},
                    "radical_combination": ["mouth", "Mouth"],
                    "mnemonics": {"meaning": "A <kanji-highlight>mouth</kanji-highlight>.", "reading": ""}
                }
            ],
            "2": [
                {
                    "character": "人",
                    "meaning": "Person",
                    "readings": {"on'yomi": ["じん", "にん"], "kun'yomi": ["ひと"]},
                    "radical_combination": ["Person"],
                    "mnemonics": {"meaning": "A <kanji-highlight>person</kanji-highlight>.", "reading": "<reading-highlight>じん</reading-highlight>"}
                },
                {
                    "character": "大",
                    "meaning": "Big",
                    "readings": {"on'yomi": ["だい", "たい"], "kun'yomi": ["おお"]},
                    "radical_combination": ["Big", "Giant"],
                    "mnemonics": {"meaning": "A <kanji-highlight>big</kanji-highlight> person.", "reading": ""}
                }
            ]
        }"#,
    )
    .unwrap();
    let vocabulary = LevelFile::from_json(
        r#"{
            "1": [
                {
                    "character": "一",
                    "primary_meaning": "One",
                    "reading": "いち",
                    "meaning_explanation": "Same as the <kanji-highlight>kanji</kanji-highlight>.",
                    "kanji_composition": [{"kanji": "一", "reading": "いち", "meaning": "One"}]
                },
                {
                    "character": "一つ",
                    "meaning": "One Thing",
                    "reading": "ひとつ"
                }
            ],
            "2": [
                {
                    "character": "人口",
                    "primary_meaning": "Population",
                    "alternative_meanings": ["population", "Number Of People"],
                    "reading": "じんこう",
                    "reading_explanation": "The <reading-highlight>on'yomi</reading-highlight> readings."
                },
                {
                    "character": "入口",
                    "primary_meaning": "Entrance",
                    "reading": "いりぐち"
                }
            ]
        }"#,
    )
    .unwrap();
    wkdata::Dataset {
        radicals,
        kanji,
        vocabulary,
    }
}
