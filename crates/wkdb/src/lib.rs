//! Stores the wk dataset in SQLite and builds Anki decks out of it.

pub mod domain;
pub mod schema;
pub mod utils;

pub use utils::database::{establish, init_schema};
