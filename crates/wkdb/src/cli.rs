use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// The SQLite database to use, a file path or ":memory:".
    #[arg(short, long, env = "DATABASE_URL")]
    pub database: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Creates the tables.
    Init,
    /// Replaces the stored dataset with the contents of the level files.
    Load {
        /// The path to the radicals level file.
        #[arg(short, long)]
        radicals: PathBuf,
        /// The path to the kanji level file.
        #[arg(short, long)]
        kanji: PathBuf,
        /// The path to the vocabulary level file.
        #[arg(short, long)]
        vocabulary: PathBuf,
    },
    /// Writes an Anki import file.
    Deck {
        /// The path to the output file.
        #[arg(short, long)]
        output: PathBuf,
        /// Only include the given level.
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=60))]
        level: Option<i32>,
        /// The first tag of every card.
        #[arg(short, long, default_value = wkdeck::anki::DEFAULT_TAG_PREFIX)]
        tag_prefix: String,
    },
    /// Prints an item.
    Show {
        #[command(subcommand)]
        item: Item,
    },
    /// Lists the vocabulary with the given reading.
    Reading { reading: String },
    /// Deletes an item and everything that depends on it.
    Delete {
        #[command(subcommand)]
        item: Item,
    },
    /// Prints the number of rows in each table.
    Stats,
}

#[derive(Subcommand)]
pub enum Item {
    /// A radical, by meaning.
    Radical { meaning: String },
    /// A kanji, by character.
    Kanji { character: String },
    /// A word, by characters.
    Vocab { character: String },
}
