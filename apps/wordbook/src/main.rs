use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{group_rhymes, view, DatamuseClient, WordLookup};
use shared::{domain::parse_records, group_by, Selector};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod session;

use config::{apply_cli_overrides, load_settings, Settings};
use session::{Session, HELP};

#[derive(Parser, Debug)]
#[command(name = "wordbook", about = "Look up rhymes and similar words")]
struct Cli {
    /// Config file (defaults to ./wordbook.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Word service base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Maximum results per lookup; 0 removes the limit.
    #[arg(long, global = true)]
    max: Option<u32>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Words that rhyme with WORD, grouped by syllable count.
    Rhyme {
        word: String,
        #[arg(long)]
        json: bool,
    },
    /// Words with a meaning similar to WORD.
    Similar {
        word: String,
        #[arg(long)]
        json: bool,
    },
    /// Group a JSON array of records (from FILE or stdin) by a field.
    Group {
        #[arg(long)]
        by: String,
        file: Option<PathBuf>,
        /// Print sections instead of JSON.
        #[arg(long)]
        text: bool,
    },
    /// Interactive session with a saved-word list (the default).
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    apply_cli_overrides(&mut settings, cli.base_url, cli.max);

    match cli.command.unwrap_or(Command::Session) {
        Command::Rhyme { word, json } => {
            let client = word_client(&settings)?;
            let records = client.rhymes(&word).await.map_err(|error| {
                error!(%word, %error, "rhyme lookup failed");
                error
            })?;
            let grouped = group_rhymes(records);
            if json {
                println!("{}", serde_json::to_string_pretty(&grouped)?);
            } else {
                println!("{}", view::render_rhymes(&word, &grouped).text);
            }
        }
        Command::Similar { word, json } => {
            let client = word_client(&settings)?;
            let records = client.similar(&word).await.map_err(|error| {
                error!(%word, %error, "similar-meaning lookup failed");
                error
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!("{}", view::render_similar(&word, &records).text);
            }
        }
        Command::Session => {
            eprintln!("{HELP}");
            let client = word_client(&settings)?;
            let mut session =
                Session::new(client, io::stdout(), settings.saved_delimiter.clone());
            session
                .run(BufReader::new(tokio::io::stdin()))
                .await
                .context("session i/o failed")?;
            if !session.saved().is_empty() {
                eprintln!(
                    "{}",
                    view::render_saved(session.saved(), &settings.saved_delimiter)
                );
            }
        }
        Command::Group { by, file, text } => group_records(&by, file, text)?,
    }

    Ok(())
}

fn word_client(settings: &Settings) -> Result<DatamuseClient> {
    let client = DatamuseClient::new(&settings.lookup_config())
        .context("failed to set up word service client")?;
    info!(base_url = client.base_url(), "word service ready");
    Ok(client)
}

fn group_records(field: &str, file: Option<PathBuf>, text: bool) -> Result<()> {
    let raw = match &file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read records from '{}'", path.display()))?,
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read records from stdin")?;
            raw
        }
    };

    let records = parse_records(&raw).context("invalid record list")?;
    let grouped = group_by(records, Selector::field(field));
    info!(
        field,
        groups = grouped.len(),
        records = grouped.record_count(),
        "grouped records"
    );

    if text {
        println!("{}", view::render_groups(&grouped));
    } else {
        println!("{}", serde_json::to_string_pretty(&grouped)?);
    }
    Ok(())
}
