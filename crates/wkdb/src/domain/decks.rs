//! Builds Anki decks from the stored dataset.

use crate::{
    domain::{kanji::Kanji, radicals::Radical, vocabulary::Vocabulary},
    utils::{
        database::{ExplanationType, MnemonicType, ReadingType},
        diesel::SQLITE_MAX_PARAMS,
    },
};
use diesel::prelude::*;
use eyre::WrapErr;
use itertools::Itertools;
use std::collections::BTreeSet;
use wkdeck::{
    anki::DEFAULT_TAG_PREFIX, Deck, KanjiCard, RadicalCard, RadicalGlyph, VocabularyCard,
};

#[derive(Debug, Clone)]
pub struct DeckOptions {
    /// Only include the given level.
    pub level: Option<i32>,
    pub tag_prefix: String,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            level: None,
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
        }
    }
}

/// Generates the deck level by level: radicals first, then kanji, then vocabulary.
/// Items within a level keep the order they were loaded in.
pub fn gen_deck(conn: &mut SqliteConnection, options: &DeckOptions) -> eyre::Result<Deck> {
    tracing::info!("Fetching radicals");
    let radicals = get_radicals(conn, options.level).wrap_err("Failed to get radicals")?;
    tracing::info!("Fetching kanji");
    let kanji = get_kanji_cards(conn, options.level).wrap_err("Failed to get kanji")?;
    tracing::info!("Fetching vocabulary");
    let vocabulary =
        get_vocabulary_cards(conn, options.level).wrap_err("Failed to get vocabulary")?;

    let levels = radicals
        .iter()
        .map(|r| r.level)
        .chain(kanji.iter().map(|k| k.level))
        .chain(vocabulary.iter().map(|v| v.level))
        .collect::<BTreeSet<_>>();
    let mut radicals_by_level = radicals.into_iter().into_group_map_by(|r| r.level);
    let mut kanji_by_level = kanji.into_iter().into_group_map_by(|k| k.level);
    let mut vocabulary_by_level = vocabulary.into_iter().into_group_map_by(|v| v.level);

    tracing::info!("Creating deck");
    let mut deck = Deck::new(options.tag_prefix.as_str());
    for level in levels {
        for radical in radicals_by_level.remove(&level).unwrap_or_default() {
            deck.push_radical(radical);
        }
        for kanji in kanji_by_level.remove(&level).unwrap_or_default() {
            deck.push_kanji(kanji);
        }
        for vocabulary in vocabulary_by_level.remove(&level).unwrap_or_default() {
            deck.push_vocabulary(vocabulary);
        }
    }
    tracing::info!("Created deck with {} cards", deck.len());
    Ok(deck)
}

fn get_radicals(
    conn: &mut SqliteConnection,
    level: Option<i32>,
) -> eyre::Result<Vec<RadicalCard>> {
    use crate::schema::radicals as r;

    let radicals: Vec<Radical> = match level {
        Some(level) => r::table
            .filter(r::level.eq(level))
            .order_by(r::id)
            .select(Radical::as_select())
            .load(conn)?,
        None => r::table
            .order_by(r::id)
            .select(Radical::as_select())
            .load(conn)?,
    };
    let cards = radicals.into_iter().map(radical_card_from_query).collect();
    Ok(cards)
}

fn radical_card_from_query(radical: Radical) -> RadicalCard {
    let glyph = match (radical.character, radical.character_image) {
        (Some(character), _) => RadicalGlyph::Character(character),
        (None, Some(image)) => RadicalGlyph::Image(image),
        (None, None) => RadicalGlyph::None,
    };
    RadicalCard {
        level: radical.level,
        glyph,
        meaning: radical.meaning,
        mnemonic: Some(radical.mnemonic).filter(|m| !m.is_empty()),
        mnemonic_image: radical.mnemonic_image,
    }
}

fn get_kanji_cards(
    conn: &mut SqliteConnection,
    level: Option<i32>,
) -> eyre::Result<Vec<KanjiCard>> {
    use crate::schema::{kanji as k, kanji_mnemonics as km, kanji_readings as kre};

    let kanji: Vec<Kanji> = match level {
        Some(level) => k::table
            .filter(k::level.eq(level))
            .order_by(k::id)
            .select(Kanji::as_select())
            .load(conn)?,
        None => k::table
            .order_by(k::id)
            .select(Kanji::as_select())
            .load(conn)?,
    };
    let kanji_ids = kanji.iter().map(|k| k.id).collect::<Vec<_>>();

    let mut readings = Vec::new();
    let mut mnemonics = Vec::new();
    for ids in kanji_ids.chunks(SQLITE_MAX_PARAMS) {
        readings.extend(
            kre::table
                .filter(kre::kanji_id.eq_any(ids))
                .order_by(kre::id)
                .select((kre::kanji_id, kre::reading_type, kre::reading_text))
                .load::<(i32, ReadingType, String)>(conn)?,
        );
        mnemonics.extend(
            km::table
                .filter(km::kanji_id.eq_any(ids))
                .order_by(km::id)
                .select((km::kanji_id, km::mnemonic_type, km::content))
                .load::<(i32, MnemonicType, String)>(conn)?,
        );
    }
    let mut readings_by_kanji = readings
        .into_iter()
        .map(|(kanji_id, reading_type, reading)| {
            (kanji_id, (wk_core::ReadingType::from(reading_type), reading))
        })
        .into_group_map();
    let mut mnemonics_by_kanji = mnemonics
        .into_iter()
        .map(|(kanji_id, mnemonic_type, content)| (kanji_id, (mnemonic_type, content)))
        .into_group_map();

    let cards = kanji
        .into_iter()
        .map(|kanji| {
            let mut meaning_mnemonic = None;
            let mut reading_mnemonic = None;
            let kanji_mnemonics = mnemonics_by_kanji.remove(&kanji.id).unwrap_or_default();
            for (mnemonic_type, content) in kanji_mnemonics {
                match mnemonic_type {
                    MnemonicType::Meaning => meaning_mnemonic = Some(content),
                    MnemonicType::Reading => reading_mnemonic = Some(content),
                }
            }
            KanjiCard {
                level: kanji.level,
                readings: readings_by_kanji.remove(&kanji.id).unwrap_or_default(),
                character: kanji.character,
                meaning: kanji.meaning,
                meaning_mnemonic,
                reading_mnemonic,
            }
        })
        .collect();
    Ok(cards)
}

fn get_vocabulary_cards(
    conn: &mut SqliteConnection,
    level: Option<i32>,
) -> eyre::Result<Vec<VocabularyCard>> {
    use crate::schema::{
        vocab_alternative_meanings as vam, vocab_explanations as ve, vocabulary as v,
    };

    let vocabulary: Vec<Vocabulary> = match level {
        Some(level) => v::table
            .filter(v::level.eq(level))
            .order_by(v::id)
            .select(Vocabulary::as_select())
            .load(conn)?,
        None => v::table
            .order_by(v::id)
            .select(Vocabulary::as_select())
            .load(conn)?,
    };
    let vocab_ids = vocabulary.iter().map(|v| v.id).collect::<Vec<_>>();

    let mut alternative_meanings = Vec::new();
    let mut explanations = Vec::new();
    for ids in vocab_ids.chunks(SQLITE_MAX_PARAMS) {
        alternative_meanings.extend(
            vam::table
                .filter(vam::vocab_id.eq_any(ids))
                .order_by(vam::id)
                .select((vam::vocab_id, vam::meaning_text))
                .load::<(i32, String)>(conn)?,
        );
        explanations.extend(
            ve::table
                .filter(ve::vocab_id.eq_any(ids))
                .order_by(ve::id)
                .select((ve::vocab_id, ve::explanation_type, ve::content))
                .load::<(i32, ExplanationType, String)>(conn)?,
        );
    }
    let mut alternative_meanings_by_vocab = alternative_meanings.into_iter().into_group_map();
    let mut explanations_by_vocab = explanations
        .into_iter()
        .map(|(vocab_id, explanation_type, content)| (vocab_id, (explanation_type, content)))
        .into_group_map();

    let cards = vocabulary
        .into_iter()
        .map(|word| {
            let mut meaning_explanation = None;
            let mut reading_explanation = None;
            let word_explanations = explanations_by_vocab.remove(&word.id).unwrap_or_default();
            for (explanation_type, content) in word_explanations {
                match explanation_type {
                    ExplanationType::Meaning => meaning_explanation = Some(content),
                    ExplanationType::Reading => reading_explanation = Some(content),
                }
            }
            VocabularyCard {
                level: word.level,
                alternative_meanings: alternative_meanings_by_vocab
                    .remove(&word.id)
                    .unwrap_or_default(),
                character: word.character,
                primary_meaning: word.primary_meaning,
                reading: word.reading,
                meaning_explanation,
                reading_explanation,
            }
        })
        .collect();
    Ok(cards)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        domain::{load::load_dataset, test_dataset},
        utils::database::test_connection,
    };
    use wkdeck::CardKind;

    #[test]
    fn orders_cards_by_level_and_kind() {
        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();

        let deck = gen_deck(&mut conn, &DeckOptions::default()).unwrap();
        let cards = deck
            .cards()
            .iter()
            .map(|c| (c.level, c.kind))
            .collect::<Vec<_>>();
        use CardKind::*;
        assert_eq!(
            cards,
            [
                // level 1: 3 radicals, 2 kanji, 2 words
                (1, Radical),
                (1, Radical),
                (1, Radical),
                (1, KanjiMeaning),
                (1, KanjiReading),
                (1, KanjiMeaning),
                (1, KanjiReading),
                (1, VocabMeaning),
                (1, VocabReading),
                (1, VocabMeaning),
                (1, VocabReading),
                // level 2: 2 radicals, 2 kanji, 2 words
                (2, Radical),
                (2, Radical),
                (2, KanjiMeaning),
                (2, KanjiReading),
                (2, KanjiMeaning),
                (2, KanjiReading),
                (2, VocabMeaning),
                (2, VocabReading),
                (2, VocabMeaning),
                (2, VocabReading),
            ]
        );
        assert!(deck.cards()[0].front.contains(">一</div>"));
        let stick = &deck.cards()[2];
        assert!(stick
            .front
            .contains(r#"<img src="https://files.example.com/stick.svg""#));
        assert!(stick
            .back
            .contains("https://files.example.com/stick-mnemonic.png"));
        assert_eq!(deck.cards()[3].tags, "wanikani kanji-meaning level-1");
    }

    #[test]
    fn generates_single_level() {
        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();

        let options = DeckOptions {
            level: Some(2),
            tag_prefix: "wk".to_string(),
        };
        let deck = gen_deck(&mut conn, &options).unwrap();
        assert_eq!(deck.len(), 10);
        assert!(deck.cards().iter().all(|c| c.level == 2));
        assert_eq!(deck.cards()[0].tags, "wk radical level-2");

        // kanji readings and vocabulary alternatives made it onto the cards
        let kanji_reading = &deck.cards()[3];
        assert_eq!(kanji_reading.kind, CardKind::KanjiReading);
        assert!(kanji_reading.back.contains("じん"));
        assert!(kanji_reading.back.contains("Kun'yomi:"));
        let vocab_meaning = &deck.cards()[6];
        assert!(vocab_meaning.back.contains("Population, Number Of People"));

        let options = DeckOptions {
            level: Some(30),
            ..Default::default()
        };
        assert!(gen_deck(&mut conn, &options).unwrap().is_empty());
    }

    #[test]
    fn writes_deck_as_csv() {
        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();
        let deck = gen_deck(&mut conn, &DeckOptions::default()).unwrap();

        let mut csv = Vec::new();
        deck.write_csv(&mut csv).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        let rows = csv.split("\r\n").filter(|r| !r.is_empty()).count();
        assert_eq!(rows, 2 + deck.len());
    }
}
