//! Loads the level files into the database.

use crate::utils::{
    database::{ExplanationType, MnemonicType, ReadingType},
    diesel::{eq, SqliteChunks},
};
use diesel::prelude::*;
use eyre::WrapErr;
use itertools::Itertools;
use std::collections::HashMap;
use wkdata::{Dataset, Glyph};

/// The number of rows written to each table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub radicals: usize,
    pub kanji: usize,
    pub kanji_readings: usize,
    pub kanji_mnemonics: usize,
    pub kanji_radicals: usize,
    pub vocabulary: usize,
    pub vocab_alternative_meanings: usize,
    pub vocab_explanations: usize,
    pub vocab_kanji_composition: usize,
    /// Radical names and composition kanji that matched nothing in the dataset.
    pub unresolved: usize,
}

/// Replaces the stored dataset with the given one.
///
/// Everything happens in a single transaction, so on error the previous data is left untouched.
pub fn load_dataset(conn: &mut SqliteConnection, dataset: &Dataset) -> eyre::Result<LoadSummary> {
    let summary = conn.transaction(|conn| {
        tracing::info!("Starting transaction");
        clear(conn).wrap_err("Failed to clear existing data")?;

        let mut summary = LoadSummary::default();
        let radical_ids =
            insert_radicals(conn, dataset, &mut summary).wrap_err("Failed to insert radicals")?;
        let kanji_ids = insert_kanji(conn, dataset, &radical_ids, &mut summary)
            .wrap_err("Failed to insert kanji")?;
        insert_vocabulary(conn, dataset, &kanji_ids, &mut summary)
            .wrap_err("Failed to insert vocabulary")?;
        eyre::Ok(summary)
    })?;
    tracing::info!("Finished transaction");
    Ok(summary)
}

fn clear(conn: &mut SqliteConnection) -> eyre::Result<()> {
    use crate::schema::{kanji as k, radicals as r, vocabulary as v};

    // every other table cascades from these
    diesel::delete(v::table).execute(conn)?;
    diesel::delete(k::table).execute(conn)?;
    diesel::delete(r::table).execute(conn)?;
    Ok(())
}

/// Radical ids by meaning, for resolving the radical names of kanji.
#[derive(Debug, Default)]
struct RadicalIds {
    exact: HashMap<String, i32>,
    folded: HashMap<String, Vec<i32>>,
}

impl RadicalIds {
    fn insert(&mut self, meaning: &str, id: i32) {
        self.exact.insert(meaning.to_string(), id);
        self.folded
            .entry(meaning.to_lowercase())
            .or_default()
            .push(id);
    }

    /// Matches the exact meaning first and falls back to a case-insensitive match
    /// only when it names a single radical.
    fn resolve(&self, name: &str) -> Result<i32, &'static str> {
        if let Some(id) = self.exact.get(name) {
            return Ok(*id);
        }
        match self.folded.get(&name.to_lowercase()).map(Vec::as_slice) {
            Some([id]) => Ok(*id),
            Some(_) => Err("Ambiguous"),
            None => Err("Unknown"),
        }
    }
}

fn insert_radicals(
    conn: &mut SqliteConnection,
    dataset: &Dataset,
    summary: &mut LoadSummary,
) -> eyre::Result<RadicalIds> {
    use crate::schema::radicals as r;

    tracing::info!("Inserting radicals");
    let mut radical_ids = RadicalIds::default();
    for (level, radicals) in dataset.radicals.levels() {
        for radical in radicals {
            let (character, character_image) = match radical.glyph() {
                Glyph::Character(c) => (Some(c), None),
                Glyph::Image(src) => (None, Some(src)),
                Glyph::None => (None, None),
            };
            let meaning = radical.meaning.trim();
            let mnemonic = radical.mnemonic.trim();
            let mnemonic_image = radical.mnemonic_image();

            let id = diesel::insert_into(r::table)
                .values(eq!(
                    r,
                    character,
                    character_image,
                    meaning,
                    mnemonic,
                    mnemonic_image,
                    level
                ))
                .returning(r::id)
                .get_result::<i32>(conn)
                .wrap_err_with(|| format!("Failed to insert radical '{meaning}'"))?;
            radical_ids.insert(meaning, id);
            summary.radicals += 1;
        }
    }
    Ok(radical_ids)
}

/// Returns a map from kanji character to kanji id.
fn insert_kanji(
    conn: &mut SqliteConnection,
    dataset: &Dataset,
    radical_ids: &RadicalIds,
    summary: &mut LoadSummary,
) -> eyre::Result<HashMap<String, i32>> {
    use crate::schema::{
        kanji as k, kanji_mnemonics as km, kanji_radicals as kr, kanji_readings as kre,
    };

    tracing::info!("Inserting kanji");
    let mut kanji_ids = HashMap::new();
    let mut new_readings = Vec::new();
    let mut new_mnemonics = Vec::new();
    let mut new_kanji_radicals = Vec::new();
    for (level, kanji) in dataset.kanji.levels() {
        for kanji in kanji {
            let character = kanji.character.trim();
            let meaning = kanji.meaning.trim();
            let kanji_id = diesel::insert_into(k::table)
                .values(eq!(k, character, meaning, level))
                .returning(k::id)
                .get_result::<i32>(conn)
                .wrap_err_with(|| format!("Failed to insert kanji {character}"))?;
            kanji_ids.insert(character.to_string(), kanji_id);
            summary.kanji += 1;

            new_readings.extend(
                kanji
                    .readings()
                    .unique()
                    .map(|(rt, reading)| (kanji_id, ReadingType::from(rt), reading)),
            );
            new_mnemonics.extend(
                kanji
                    .mnemonics()
                    .map(|(mt, content)| (kanji_id, MnemonicType::from(mt), content)),
            );

            let radicals = kanji
                .radical_combination
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .filter_map(|name| match radical_ids.resolve(name) {
                    Ok(radical_id) => Some(radical_id),
                    Err(problem) => {
                        tracing::warn!("{problem} radical '{name}' in kanji {character}");
                        summary.unresolved += 1;
                        None
                    }
                })
                .unique()
                .map(|radical_id| (kanji_id, radical_id))
                .collect::<Vec<_>>();
            new_kanji_radicals.extend(radicals);
        }
    }

    tracing::info!("Inserting {} kanji readings", new_readings.len());
    for chunk in new_readings.sqlite_chunks() {
        let values = chunk
            .iter()
            .map(|&(kanji_id, reading_type, reading_text)| {
                eq!(kre, kanji_id, reading_type, reading_text)
            })
            .collect::<Vec<_>>();
        summary.kanji_readings += diesel::insert_into(kre::table)
            .values(values)
            .execute(conn)?;
    }

    tracing::info!("Inserting {} kanji mnemonics", new_mnemonics.len());
    for chunk in new_mnemonics.sqlite_chunks() {
        let values = chunk
            .iter()
            .map(|&(kanji_id, mnemonic_type, content)| eq!(km, kanji_id, mnemonic_type, content))
            .collect::<Vec<_>>();
        summary.kanji_mnemonics += diesel::insert_into(km::table)
            .values(values)
            .execute(conn)?;
    }

    tracing::info!("Inserting {} kanji radicals", new_kanji_radicals.len());
    for chunk in new_kanji_radicals.sqlite_chunks() {
        let values = chunk
            .iter()
            .map(|&(kanji_id, radical_id)| eq!(kr, kanji_id, radical_id))
            .collect::<Vec<_>>();
        summary.kanji_radicals += diesel::insert_into(kr::table)
            .values(values)
            .execute(conn)?;
    }

    Ok(kanji_ids)
}

fn insert_vocabulary(
    conn: &mut SqliteConnection,
    dataset: &Dataset,
    kanji_ids: &HashMap<String, i32>,
    summary: &mut LoadSummary,
) -> eyre::Result<()> {
    use crate::schema::{
        vocab_alternative_meanings as vam, vocab_explanations as ve,
        vocab_kanji_composition as vkc, vocabulary as v,
    };

    tracing::info!("Inserting vocabulary");
    let mut new_alternative_meanings = Vec::new();
    let mut new_explanations = Vec::new();
    let mut new_compositions = Vec::new();
    for (level, vocabulary) in dataset.vocabulary.levels() {
        for word in vocabulary {
            let character = word.character.trim();
            let primary_meaning = word.primary_meaning();
            let reading = word.reading.trim();
            let vocab_id = diesel::insert_into(v::table)
                .values(eq!(v, character, primary_meaning, reading, level))
                .returning(v::id)
                .get_result::<i32>(conn)
                .wrap_err_with(|| format!("Failed to insert vocabulary {character}"))?;
            summary.vocabulary += 1;

            new_alternative_meanings.extend(
                word.alternative_meanings()
                    .map(|meaning_text| (vocab_id, meaning_text)),
            );
            new_explanations.extend(
                word.explanations()
                    .map(|(et, content)| (vocab_id, ExplanationType::from(et), content)),
            );

            let composition = word
                .composition_kanji()
                .into_iter()
                .filter_map(|kanji| match kanji_ids.get(kanji) {
                    Some(kanji_id) => Some(*kanji_id),
                    None => {
                        tracing::warn!("Unknown kanji {kanji} in vocabulary {character}");
                        summary.unresolved += 1;
                        None
                    }
                })
                .unique()
                .map(|kanji_id| (vocab_id, kanji_id))
                .collect::<Vec<_>>();
            new_compositions.extend(composition);
        }
    }

    tracing::info!(
        "Inserting {} alternative meanings",
        new_alternative_meanings.len()
    );
    for chunk in new_alternative_meanings.sqlite_chunks() {
        let values = chunk
            .iter()
            .map(|&(vocab_id, meaning_text)| eq!(vam, vocab_id, meaning_text))
            .collect::<Vec<_>>();
        summary.vocab_alternative_meanings += diesel::insert_into(vam::table)
            .values(values)
            .execute(conn)?;
    }

    tracing::info!("Inserting {} explanations", new_explanations.len());
    for chunk in new_explanations.sqlite_chunks() {
        let values = chunk
            .iter()
            .map(|&(vocab_id, explanation_type, content)| {
                eq!(ve, vocab_id, explanation_type, content)
            })
            .collect::<Vec<_>>();
        summary.vocab_explanations += diesel::insert_into(ve::table)
            .values(values)
            .execute(conn)?;
    }

    tracing::info!("Inserting {} compositions", new_compositions.len());
    for chunk in new_compositions.sqlite_chunks() {
        let values = chunk
            .iter()
            .map(|&(vocab_id, kanji_id)| eq!(vkc, vocab_id, kanji_id))
            .collect::<Vec<_>>();
        summary.vocab_kanji_composition += diesel::insert_into(vkc::table)
            .values(values)
            .execute(conn)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{domain::test_dataset, utils::database::test_connection};

    #[test]
    fn loads_dataset() {
        let mut conn = test_connection();
        let summary = load_dataset(&mut conn, &test_dataset()).unwrap();
        assert_eq!(
            summary,
            LoadSummary {
                radicals: 5,
                kanji: 4,
                kanji_readings: 12,
                kanji_mnemonics: 6,
                kanji_radicals: 4,
                vocabulary: 4,
                vocab_alternative_meanings: 1,
                vocab_explanations: 2,
                vocab_kanji_composition: 5,
                // the "Giant" radical and the 入 kanji
                unresolved: 2,
            }
        );
    }

    #[test]
    fn stores_image_radicals() {
        use crate::schema::radicals as r;

        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();
        let (character, character_image, mnemonic_image) = r::table
            .filter(r::meaning.eq("Stick"))
            .select((r::character, r::character_image, r::mnemonic_image))
            .get_result::<(Option<String>, Option<String>, Option<String>)>(&mut conn)
            .unwrap();
        assert_eq!(character, None);
        assert_eq!(
            character_image.as_deref(),
            Some("https://files.example.com/stick.svg")
        );
        assert_eq!(
            mnemonic_image.as_deref(),
            Some("https://files.example.com/stick-mnemonic.png")
        );
    }

    #[test]
    fn resolves_radical_names_case_insensitively() {
        use crate::schema::{kanji as k, kanji_radicals as kr, radicals as r};

        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();
        let radicals = kr::table
            .inner_join(k::table.on(k::id.eq(kr::kanji_id)))
            .inner_join(r::table.on(r::id.eq(kr::radical_id)))
            .filter(k::character.eq("口"))
            .select(r::meaning)
            .load::<String>(&mut conn)
            .unwrap();
        assert_eq!(radicals, ["Mouth"]);
    }

    #[test]
    fn prefers_exact_radical_meaning() {
        use crate::schema::{kanji as k, kanji_radicals as kr, radicals as r};

        let mut conn = test_connection();
        let mut dataset = test_dataset();
        dataset.radicals = wkdata::LevelFile::from_json(
            r#"{"1": [
                {"character": "丨", "meaning": "Stick"},
                {"character": "亅", "meaning": "stick"},
                {"character": "一", "meaning": "Ground"}
            ]}"#,
        )
        .unwrap();
        dataset.kanji = wkdata::LevelFile::from_json(
            r#"{"1": [
                {"character": "一", "meaning": "One", "radical_combination": ["Stick", "ground"]},
                {"character": "二", "meaning": "Two", "radical_combination": ["STICK"]}
            ]}"#,
        )
        .unwrap();
        dataset.vocabulary = wkdata::LevelFile::default();
        let summary = load_dataset(&mut conn, &dataset).unwrap();
        // "STICK" could be either radical
        assert_eq!(summary.unresolved, 1);
        assert_eq!(summary.kanji_radicals, 2);

        let linked = kr::table
            .inner_join(k::table.on(k::id.eq(kr::kanji_id)))
            .inner_join(r::table.on(r::id.eq(kr::radical_id)))
            .order_by((k::id, r::id))
            .select((k::character, r::meaning))
            .load::<(String, String)>(&mut conn)
            .unwrap();
        assert_eq!(
            linked,
            [
                ("一".to_string(), "Stick".to_string()),
                ("一".to_string(), "Ground".to_string()),
            ]
        );
    }

    #[test]
    fn reloading_replaces_data() {
        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();
        let summary = load_dataset(&mut conn, &test_dataset()).unwrap();
        assert_eq!(summary.radicals, 5);
        let stats = crate::domain::stats(&mut conn).unwrap();
        assert_eq!(stats.radicals, 5);
        assert_eq!(stats.kanji_readings, 12);
    }

    #[test]
    fn rolls_back_on_constraint_violation() {
        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();

        let mut dataset = test_dataset();
        dataset.radicals = wkdata::LevelFile::from_json(
            r#"{"1": [
                {"character": "一", "meaning": "Ground"},
                {"character": "二", "meaning": "Ground"}
            ]}"#,
        )
        .unwrap();
        let err = load_dataset(&mut conn, &dataset).unwrap_err();
        assert!(format!("{err:?}").contains("Failed to insert radicals"));

        // the previous load is still there
        let stats = crate::domain::stats(&mut conn).unwrap();
        assert_eq!(stats.radicals, 5);
        assert_eq!(stats.vocabulary, 4);
    }
}
