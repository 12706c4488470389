//! Kanji queries.

use crate::{
    domain::{radicals::Radical, vocabulary::Vocabulary},
    utils::{
        database::{MnemonicType, ReadingType},
        diesel::query,
    },
};
use diesel::prelude::*;
use eyre::WrapErr;
use std::collections::BTreeMap;

query! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Kanji {
        pub id: i32 = kanji::id,
        pub character: String = kanji::character,
        pub meaning: String = kanji::meaning,
        pub level: i32 = kanji::level,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiDetails {
    pub kanji: Kanji,
    /// Readings grouped by type, in on, kun, nanori order.
    pub readings: BTreeMap<wk_core::ReadingType, Vec<String>>,
    pub mnemonics: Vec<(wk_core::MnemonicType, String)>,
    pub radicals: Vec<Radical>,
    /// The vocabulary the kanji appears in.
    pub vocabulary: Vec<Vocabulary>,
}

pub fn get_kanji(
    conn: &mut SqliteConnection,
    character: &str,
) -> eyre::Result<Option<KanjiDetails>> {
    use crate::schema::{
        kanji as k, kanji_mnemonics as km, kanji_radicals as kr, kanji_readings as kre,
        radicals as r, vocab_kanji_composition as vkc, vocabulary as v,
    };

    let kanji = k::table
        .filter(k::character.eq(character))
        .select(Kanji::as_select())
        .get_result(conn)
        .optional()
        .wrap_err_with(|| format!("Failed to get kanji {character}"))?;
    let Some(kanji) = kanji else {
        return Ok(None);
    };

    let mut readings = BTreeMap::new();
    let reading_rows = kre::table
        .filter(kre::kanji_id.eq(kanji.id))
        .order_by(kre::id)
        .select((kre::reading_type, kre::reading_text))
        .load::<(ReadingType, String)>(conn)?;
    for (reading_type, reading) in reading_rows {
        readings
            .entry(wk_core::ReadingType::from(reading_type))
            .or_insert_with(Vec::new)
            .push(reading);
    }

    let mnemonics: Vec<(wk_core::MnemonicType, String)> = km::table
        .filter(km::kanji_id.eq(kanji.id))
        .order_by(km::id)
        .select((km::mnemonic_type, km::content))
        .load::<(MnemonicType, String)>(conn)?
        .into_iter()
        .map(|(mt, content)| (mt.into(), content))
        .collect();

    let radicals = kr::table
        .filter(kr::kanji_id.eq(kanji.id))
        .inner_join(r::table.on(r::id.eq(kr::radical_id)))
        .order_by(r::id)
        .select(Radical::as_select())
        .load(conn)?;

    let vocabulary = vkc::table
        .filter(vkc::kanji_id.eq(kanji.id))
        .inner_join(v::table.on(v::id.eq(vkc::vocab_id)))
        .order_by(v::id)
        .select(Vocabulary::as_select())
        .load(conn)?;

    Ok(Some(KanjiDetails {
        kanji,
        readings,
        mnemonics,
        radicals,
        vocabulary,
    }))
}

/// Deletes the kanji along with its readings, mnemonics and junction rows.
pub fn delete_kanji(conn: &mut SqliteConnection, character: &str) -> eyre::Result<bool> {
    use crate::schema::kanji as k;

    let deleted = diesel::delete(k::table.filter(k::character.eq(character)))
        .execute(conn)
        .wrap_err_with(|| format!("Failed to delete kanji {character}"))?;
    Ok(deleted > 0)
}
