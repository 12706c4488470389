//! Radical queries.

use crate::{domain::kanji::Kanji, utils::diesel::query};
use diesel::prelude::*;
use eyre::WrapErr;

query! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Radical {
        pub id: i32 = radicals::id,
        pub character: Option<String> = radicals::character,
        pub character_image: Option<String> = radicals::character_image,
        pub meaning: String = radicals::meaning,
        pub mnemonic: String = radicals::mnemonic,
        pub mnemonic_image: Option<String> = radicals::mnemonic_image,
        pub level: i32 = radicals::level,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadicalDetails {
    pub radical: Radical,
    /// The kanji the radical is a part of.
    pub kanji: Vec<Kanji>,
}

pub fn get_radical(
    conn: &mut SqliteConnection,
    meaning: &str,
) -> eyre::Result<Option<RadicalDetails>> {
    use crate::schema::{kanji as k, kanji_radicals as kr, radicals as r};

    let radical = r::table
        .filter(r::meaning.eq(meaning))
        .select(Radical::as_select())
        .get_result(conn)
        .optional()
        .wrap_err_with(|| format!("Failed to get radical '{meaning}'"))?;
    let Some(radical) = radical else {
        return Ok(None);
    };

    let kanji = kr::table
        .filter(kr::radical_id.eq(radical.id))
        .inner_join(k::table.on(k::id.eq(kr::kanji_id)))
        .order_by(k::id)
        .select(Kanji::as_select())
        .load(conn)?;
    Ok(Some(RadicalDetails { radical, kanji }))
}

/// Deletes the radical along with its kanji junction rows.
pub fn delete_radical(conn: &mut SqliteConnection, meaning: &str) -> eyre::Result<bool> {
    use crate::schema::radicals as r;

    let deleted = diesel::delete(r::table.filter(r::meaning.eq(meaning)))
        .execute(conn)
        .wrap_err_with(|| format!("Failed to delete radical '{meaning}'"))?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        domain::{load::load_dataset, test_dataset},
        schema::{kanji_radicals as kr, radicals as r},
        utils::database::test_connection,
    };
    use diesel::result::{DatabaseErrorKind, Error};

    #[test]
    fn gets_radical_with_kanji() {
        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();

        let details = get_radical(&mut conn, "Person").unwrap().unwrap();
        assert_eq!(details.radical.character.as_deref(), Some("人"));
        assert_eq!(details.radical.level, 2);
        let kanji = details.kanji.iter().map(|k| k.character.as_str()).collect::<Vec<_>>();
        assert_eq!(kanji, ["人"]);

        let details = get_radical(&mut conn, "Stick").unwrap().unwrap();
        assert!(details.kanji.is_empty());
        assert!(get_radical(&mut conn, "Nothing").unwrap().is_none());
    }

    #[test]
    fn rejects_duplicate_meaning() {
        let mut conn = test_connection();
        diesel::insert_into(r::table)
            .values((r::meaning.eq("Ground"), r::mnemonic.eq(""), r::level.eq(1)))
            .execute(&mut conn)
            .unwrap();
        let err = diesel::insert_into(r::table)
            .values((
                r::character.eq("一"),
                r::meaning.eq("Ground"),
                r::mnemonic.eq(""),
                r::level.eq(2),
            ))
            .execute(&mut conn)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
        ));
    }

    #[test]
    fn allows_radical_without_character_or_image() {
        let mut conn = test_connection();
        diesel::insert_into(r::table)
            .values((
                r::character.eq(None::<&str>),
                r::character_image.eq(None::<&str>),
                r::meaning.eq("Gun"),
                r::mnemonic.eq(""),
                r::level.eq(3),
            ))
            .execute(&mut conn)
            .unwrap();
        let details = get_radical(&mut conn, "Gun").unwrap().unwrap();
        assert_eq!(details.radical.character, None);
        assert_eq!(details.radical.character_image, None);

        // the meaning is still required
        let err =
            diesel::sql_query("INSERT INTO radicals (meaning, mnemonic, level) VALUES (NULL, '', 3)")
                .execute(&mut conn)
                .unwrap_err();
        assert!(matches!(err, Error::DatabaseError(..)));
    }

    #[test]
    fn rejects_level_out_of_range() {
        let mut conn = test_connection();
        let err = diesel::insert_into(r::table)
            .values((r::meaning.eq("Ground"), r::mnemonic.eq(""), r::level.eq(61)))
            .execute(&mut conn)
            .unwrap_err();
        assert!(matches!(err, Error::DatabaseError(..)));
    }

    #[test]
    fn deletes_radical_with_junction_rows() {
        let mut conn = test_connection();
        load_dataset(&mut conn, &test_dataset()).unwrap();
        let junction_rows = kr::table.count().get_result::<i64>(&mut conn).unwrap();

        assert!(delete_radical(&mut conn, "Ground").unwrap());
        assert!(!delete_radical(&mut conn, "Ground").unwrap());
        assert!(get_radical(&mut conn, "Ground").unwrap().is_none());
        let remaining = kr::table.count().get_result::<i64>(&mut conn).unwrap();
        assert_eq!(remaining, junction_rows - 1);
        // the kanji itself stays
        let stats = crate::domain::stats(&mut conn).unwrap();
        assert_eq!(stats.kanji, 4);
    }
}
