//! Command line interface for the wk database.

mod cli;

use clap::Parser;
use cli::{Cli, Command, Item};
use diesel::SqliteConnection;
use eyre::WrapErr;
use std::{fs::File, io::BufWriter, path::Path};
use wkdb::domain::{
    self,
    decks::{self, DeckOptions},
    kanji, load, radicals, vocabulary,
};
use wkdata::Dataset;
use wkdeck::{html::plain_text, CardKind};

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut conn = wkdb::establish(&cli.database)?;
    match cli.command {
        Command::Init => {
            wkdb::init_schema(&mut conn)?;
        }
        Command::Load {
            radicals,
            kanji,
            vocabulary,
        } => {
            wkdb::init_schema(&mut conn)?;
            load_files(&mut conn, &radicals, &kanji, &vocabulary)?;
        }
        Command::Deck {
            output,
            level,
            tag_prefix,
        } => {
            let options = DeckOptions { level, tag_prefix };
            write_deck(&mut conn, &options, &output)?;
        }
        Command::Show { item } => show(&mut conn, item)?,
        Command::Reading { reading } => {
            let found = vocabulary::find_vocabulary_by_reading(&mut conn, &reading)?;
            if found.is_empty() {
                println!("No vocabulary with the reading {reading}");
            }
            for word in found {
                println!(
                    "{} ({}) {} [level {}]",
                    word.character, word.reading, word.primary_meaning, word.level
                );
            }
        }
        Command::Delete { item } => {
            let (deleted, name) = match &item {
                Item::Radical { meaning } => {
                    (radicals::delete_radical(&mut conn, meaning)?, meaning)
                }
                Item::Kanji { character } => {
                    (kanji::delete_kanji(&mut conn, character)?, character)
                }
                Item::Vocab { character } => {
                    (vocabulary::delete_vocabulary(&mut conn, character)?, character)
                }
            };
            if deleted {
                tracing::info!("Deleted {name}");
            } else {
                tracing::warn!("Nothing to delete for {name}");
            }
        }
        Command::Stats => {
            let stats = domain::stats(&mut conn)?;
            println!("radicals: {}", stats.radicals);
            println!("kanji: {}", stats.kanji);
            println!("kanji readings: {}", stats.kanji_readings);
            println!("kanji mnemonics: {}", stats.kanji_mnemonics);
            println!("kanji radicals: {}", stats.kanji_radicals);
            println!("vocabulary: {}", stats.vocabulary);
            println!("alternative meanings: {}", stats.vocab_alternative_meanings);
            println!("explanations: {}", stats.vocab_explanations);
            println!("compositions: {}", stats.vocab_kanji_composition);
            let levels = stats.levels.iter().map(|l| l.to_string()).collect::<Vec<_>>();
            println!("levels: {}", levels.join(", "));
        }
    }

    Ok(())
}

fn load_files(
    conn: &mut SqliteConnection,
    radicals_path: &Path,
    kanji_path: &Path,
    vocabulary_path: &Path,
) -> eyre::Result<()> {
    tracing::info!("Opening files");
    let dataset = Dataset::open(radicals_path, kanji_path, vocabulary_path)
        .wrap_err("Failed to open level files")?;
    let levels = dataset.levels();
    if let (Some(first), Some(last)) = (levels.first(), levels.last()) {
        tracing::info!("Loading {} levels ({first} to {last})", levels.len());
    }
    let summary = load::load_dataset(conn, &dataset).wrap_err("Failed to load dataset")?;
    if summary.unresolved > 0 {
        tracing::warn!("{} references could not be resolved", summary.unresolved);
    }
    println!("{summary:#?}");
    Ok(())
}

fn write_deck(
    conn: &mut SqliteConnection,
    options: &DeckOptions,
    output: &Path,
) -> eyre::Result<()> {
    let deck = decks::gen_deck(conn, options)?;
    tracing::info!("Writing {}", output.display());
    let file = File::create(output)
        .wrap_err_with(|| format!("Failed to create {}", output.display()))?;
    deck.write_csv(BufWriter::new(file))
        .wrap_err("Failed to write deck")?;
    println!("Wrote {} cards to {}", deck.len(), output.display());
    for kind in CardKind::ALL {
        println!("{kind}: {}", deck.count(kind));
    }
    Ok(())
}

fn show(conn: &mut SqliteConnection, item: Item) -> eyre::Result<()> {
    match item {
        Item::Radical { meaning } => {
            let Some(details) = radicals::get_radical(conn, &meaning)? else {
                println!("No radical with the meaning {meaning}");
                return Ok(());
            };
            let radical = details.radical;
            let glyph = radical
                .character
                .or(radical.character_image)
                .unwrap_or_default();
            println!("{} {glyph} [level {}]", radical.meaning, radical.level);
            println!("{}", plain_text(&radical.mnemonic));
            let kanji = details.kanji.iter().map(|k| k.character.as_str()).collect::<Vec<_>>();
            println!("kanji: {}", kanji.join(" "));
        }
        Item::Kanji { character } => {
            let Some(details) = kanji::get_kanji(conn, &character)? else {
                println!("No kanji {character}");
                return Ok(());
            };
            let k = details.kanji;
            println!("{} {} [level {}]", k.character, k.meaning, k.level);
            for (reading_type, readings) in &details.readings {
                println!("{}: {}", reading_type.label(), readings.join(", "));
            }
            for (mnemonic_type, content) in &details.mnemonics {
                println!("{mnemonic_type} mnemonic: {}", plain_text(content));
            }
            let radicals = details
                .radicals
                .iter()
                .map(|r| r.meaning.as_str())
                .collect::<Vec<_>>();
            println!("radicals: {}", radicals.join(", "));
            let vocabulary = details
                .vocabulary
                .iter()
                .map(|v| v.character.as_str())
                .collect::<Vec<_>>();
            println!("vocabulary: {}", vocabulary.join(" "));
        }
        Item::Vocab { character } => {
            let Some(details) = vocabulary::get_vocabulary(conn, &character)? else {
                println!("No vocabulary {character}");
                return Ok(());
            };
            let v = details.vocabulary;
            println!("{} ({}) [level {}]", v.character, v.reading, v.level);
            let meanings = std::iter::once(v.primary_meaning.as_str())
                .chain(details.alternative_meanings.iter().map(String::as_str))
                .collect::<Vec<_>>();
            println!("meanings: {}", meanings.join(", "));
            for (explanation_type, content) in &details.explanations {
                println!("{explanation_type} explanation: {}", plain_text(content));
            }
            let kanji = details.kanji.iter().map(|k| k.character.as_str()).collect::<Vec<_>>();
            println!("kanji: {}", kanji.join(" "));
        }
    }
    Ok(())
}
