//! Vocabulary queries.

use crate::{
    domain::kanji::Kanji,
    utils::{database::ExplanationType, diesel::query},
};
use diesel::prelude::*;
use eyre::WrapErr;

query! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Vocabulary {
        pub id: i32 = vocabulary::id,
        pub character: String = vocabulary::character,
        pub primary_meaning: String = vocabulary::primary_meaning,
        pub reading: String = vocabulary::reading,
        pub level: i32 = vocabulary::level,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyDetails {
    pub vocabulary: Vocabulary,
    pub alternative_meanings: Vec<String>,
    pub explanations: Vec<(wk_core::ExplanationType, String)>,
    /// The kanji the word is made of.
    pub kanji: Vec<Kanji>,
}

pub fn get_vocabulary(
    conn: &mut SqliteConnection,
    character: &str,
) -> eyre::Result<Option<VocabularyDetails>> {
    use crate::schema::{
        kanji as k, vocab_alternative_meanings as vam, vocab_explanations as ve,
        vocab_kanji_composition as vkc, vocabulary as v,
    };

    let vocabulary = v::table
        .filter(v::character.eq(character))
        .select(Vocabulary::as_select())
        .get_result(conn)
        .optional()
        .wrap_err_with(|| format!("Failed to get vocabulary {character}"))?;
    let Some(vocabulary) = vocabulary else {
        return Ok(None);
    };

    let alternative_meanings = vam::table
        .filter(vam::vocab_id.eq(vocabulary.id))
        .order_by(vam::id)
        .select(vam::meaning_text)
        .load::<String>(conn)?;

    let explanations: Vec<(wk_core::ExplanationType, String)> = ve::table
        .filter(ve::vocab_id.eq(vocabulary.id))
        .order_by(ve::id)
        .select((ve::explanation_type, ve::content))
        .load::<(ExplanationType, String)>(conn)?
        .into_iter()
        .map(|(et, content)| (et.into(), content))
        .collect();

    let kanji = vkc::table
        .filter(vkc::vocab_id.eq(vocabulary.id))
        .inner_join(k::table.on(k::id.eq(vkc::kanji_id)))
        .order_by(k::id)
        .select(Kanji::as_select())
        .load(conn)?;

    Ok(Some(VocabularyDetails {
        vocabulary,
        alternative_meanings,
        explanations,
        kanji,
    }))
}

/// Finds the words with the given reading. Katakana matches hiragana, anything that isn't kana matches nothing.
pub fn find_vocabulary_by_reading(
    conn: &mut SqliteConnection,
    reading: &str,
) -> eyre::Result<Vec<Vocabulary>> {
    use crate::schema::vocabulary as v;

    let reading = reading.trim();
    if !wk_core::is_kana(reading) {
        tracing::debug!("'{reading}' is not a kana reading");
        return Ok(Vec::new());
    }
    let reading = wk_core::to_hiragana(reading);
    let vocabulary = v::table
        .order_by(v::id)
        .select(Vocabulary::as_select())
        .load(conn)
        .wrap_err("Failed to load vocabulary")?
        .into_iter()
        .filter(|v| wk_core::to_hiragana(&v.reading) == reading)
        .collect();
    Ok(vocabulary)
}

/// Deletes the word along with its alternative meanings, explanations and kanji junction rows.
pub fn delete_vocabulary(conn: &mut SqliteConnection, character: &str) -> eyre::Result<bool> {
    use crate::schema::vocabulary as v;

    let deleted = diesel::delete(v::table.filter(v::character.eq(character)))
        .execute(conn)
        .wrap_err_with(|| format!("Failed to delete vocabulary {character}"))?;
    Ok(deleted > 0)
}
