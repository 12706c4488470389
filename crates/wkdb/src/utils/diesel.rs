//! Generic utilities for working with diesel.

pub use crate::{diesel_enum, eq, query};
use std::slice::Chunks;

/// The default upper bound for bound parameters in a single SQLite statement.
pub const SQLITE_MAX_PARAMS: usize = 32766;

/// Implements a Rust enum for a text column whose values are restricted by a check constraint.
#[macro_export]
macro_rules! diesel_enum {
    (
        $(#[ $attr:meta ])*
        $t:ident {
            $($variant:ident: $l:literal),* $(,)?
        }
    ) => {
        $(#[ $attr ])*
        #[derive(Debug, ::diesel::AsExpression, ::diesel::FromSqlRow)]
        #[diesel(sql_type = ::diesel::sql_types::Text)]
        pub enum $t {
            $($variant),*
        }

        impl $t {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $l,)*
                }
            }
        }

        impl ::diesel::serialize::ToSql<::diesel::sql_types::Text, ::diesel::sqlite::Sqlite> for $t {
            fn to_sql<'b>(
                &'b self,
                out: &mut ::diesel::serialize::Output<'b, '_, ::diesel::sqlite::Sqlite>,
            ) -> ::diesel::serialize::Result {
                <str as ::diesel::serialize::ToSql<::diesel::sql_types::Text, ::diesel::sqlite::Sqlite>>::to_sql(
                    self.as_str(),
                    out,
                )
            }
        }

        impl ::diesel::deserialize::FromSql<::diesel::sql_types::Text, ::diesel::sqlite::Sqlite> for $t {
            fn from_sql(
                bytes: <::diesel::sqlite::Sqlite as ::diesel::backend::Backend>::RawValue<'_>,
            ) -> ::diesel::deserialize::Result<Self> {
                let variant_name = <String as ::diesel::deserialize::FromSql<
                    ::diesel::sql_types::Text,
                    ::diesel::sqlite::Sqlite,
                >>::from_sql(bytes)?;
                match variant_name.as_str() {
                    $($l => Ok(Self::$variant),)*
                    other => Err(format!("Invalid data from database: {other}").into()),
                }
            }
        }
    };
}

/// Helper macro for making queries.
///
/// eq!(table, column_1, column_2)
/// =
/// (table::column_1.eq(column_1), table::column_2.eq(column_2))
///
/// eq!(table_1::column_1, table_2::column_2)
/// =
/// (table_1::column_1.eq(column_1), table_2::column_2.eq(column_2))
#[macro_export]
macro_rules! eq {
    ($t:ident, $c: ident $(,)?) => {
        $t::$c.eq($c)
    };
    ($t:ident, $($c: ident),* $(,)?) => {
        ( $($t::$c.eq($c)),* )
    };
    ($t:ident :: $c: ident) => {
        $t::$c.eq($c)
    };
    ($($t:ident :: $c: ident),* $(,)?) => {
        ( $($t::$c.eq($c)),* )
    };
}

/// Helper macro for implementing Queryable and Selectable and ensures the implementations match.
///
/// ```ignore
/// query! {
///     #[derive(Debug)]
///     pub struct KanjiSmall {
///         pub id: i32 = kanji::id,
///         pub character: String = kanji::character,
///     }
/// }
/// ```
#[macro_export]
macro_rules! query {
    (
        $(#[ $attr:meta ])*
        $v:vis $kw:ident $name:ident {
            $(
                $fv:vis $field:ident: $t:ty = $table:ident :: $column:ident
            ),* $(,)?
        }
    ) => {
        $(#[ $attr ])*
        #[derive(::diesel::Queryable)]
        #[diesel(check_for_backend(::diesel::sqlite::Sqlite))]
        $v $kw $name {
            $($fv $field: $t),*
        }

        impl<DB: ::diesel::backend::Backend> ::diesel::Selectable<DB> for $name {
            type SelectExpression = ($( $crate::schema::$table::$column, )*);

            fn construct_selection() -> Self::SelectExpression {
                ($( $crate::schema::$table::$column, )*)
            }
        }
    };
}

/// Splits batch inserts so that each statement stays under the parameter limit.
pub trait SqliteChunks<T> {
    fn sqlite_chunks(&self) -> Chunks<'_, T>;
}

macro_rules! impl_sqlite_chunks {
    (
        $lit:literal, $($ty:ident),*
    ) => {
        impl<$($ty),*,> SqliteChunks<($($ty),*,)> for Vec<($($ty),*,)> {
            fn sqlite_chunks(&self) -> Chunks<'_, ($($ty),*,)> {
                self.chunks(SQLITE_MAX_PARAMS / $lit)
            }
        }
    };
}

impl_sqlite_chunks!(2, A, B);
impl_sqlite_chunks!(3, A, B, C);
impl_sqlite_chunks!(4, A, B, C, D);
impl_sqlite_chunks!(5, A, B, C, D, E);
