//! Connecting to the database and the Rust types for its enumerated columns.

use crate::utils::diesel::diesel_enum;
use diesel::{connection::SimpleConnection, prelude::*};
use eyre::WrapErr;

/// The DDL for every table and index, safe to apply more than once.
pub const SCHEMA: &str = include_str!("../../sql/schema.sql");

/// Opens a connection with foreign key enforcement turned on.
pub fn establish(database_url: &str) -> eyre::Result<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)
        .wrap_err_with(|| format!("Failed to connect to the database at {database_url}"))?;
    // SQLite only enforces foreign keys (and their cascades) when asked to, per connection
    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .wrap_err("Failed to enable foreign keys")?;
    Ok(conn)
}

/// Creates the tables and indexes that don't exist yet.
pub fn init_schema(conn: &mut SqliteConnection) -> eyre::Result<()> {
    tracing::info!("Initializing schema");
    conn.batch_execute(SCHEMA)
        .wrap_err("Failed to initialize schema")?;
    Ok(())
}

diesel_enum!(
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    ReadingType {
        On: "on",
        Kun: "kun",
        Nanori: "nanori",
    }
);

impl From<wk_core::ReadingType> for ReadingType {
    fn from(value: wk_core::ReadingType) -> Self {
        match value {
            wk_core::ReadingType::On => Self::On,
            wk_core::ReadingType::Kun => Self::Kun,
            wk_core::ReadingType::Nanori => Self::Nanori,
        }
    }
}

impl From<ReadingType> for wk_core::ReadingType {
    fn from(value: ReadingType) -> Self {
        match value {
            ReadingType::On => Self::On,
            ReadingType::Kun => Self::Kun,
            ReadingType::Nanori => Self::Nanori,
        }
    }
}

diesel_enum!(
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    MnemonicType {
        Meaning: "meaning",
        Reading: "reading",
    }
);

impl From<wk_core::MnemonicType> for MnemonicType {
    fn from(value: wk_core::MnemonicType) -> Self {
        match value {
            wk_core::MnemonicType::Meaning => Self::Meaning,
            wk_core::MnemonicType::Reading => Self::Reading,
        }
    }
}

impl From<MnemonicType> for wk_core::MnemonicType {
    fn from(value: MnemonicType) -> Self {
        match value {
            MnemonicType::Meaning => Self::Meaning,
            MnemonicType::Reading => Self::Reading,
        }
    }
}

diesel_enum!(
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    ExplanationType {
        Meaning: "meaning",
        Reading: "reading",
    }
);

impl From<wk_core::ExplanationType> for ExplanationType {
    fn from(value: wk_core::ExplanationType) -> Self {
        match value {
            wk_core::ExplanationType::Meaning => Self::Meaning,
            wk_core::ExplanationType::Reading => Self::Reading,
        }
    }
}

impl From<ExplanationType> for wk_core::ExplanationType {
    fn from(value: ExplanationType) -> Self {
        match value {
            ExplanationType::Meaning => Self::Meaning,
            ExplanationType::Reading => Self::Reading,
        }
    }
}

/// An empty in-memory database with the schema applied.
#[cfg(test)]
pub fn test_connection() -> SqliteConnection {
    let mut conn = establish(":memory:").unwrap();
    init_schema(&mut conn).unwrap();
    conn
}
