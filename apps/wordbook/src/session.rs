//! Interactive lookup session driven by one command per input line.

use std::io::{self, Write};

use client_core::{
    group_rhymes,
    view::{self, Rendered},
    SavedWords, WordLookup,
};
use shared::protocol::QueryKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info};

pub const HELP: &str = "\
commands:
  rhyme <word>     words that rhyme with <word> (a bare word does the same)
  similar <word>   words with a similar meaning
  save <n|word>    save item <n> of the last list, or a literal word
  saved            show saved words
  clear            forget saved words
  quit             leave the session

a bare command name runs that command; use 'rhyme <word>' to look it up";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Lookup { kind: QueryKind, word: String },
    SaveItem(usize),
    SaveWord(String),
    ShowSaved,
    ClearSaved,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match (head.to_ascii_lowercase().as_str(), rest) {
            ("rhyme" | "r", word) if !word.is_empty() => Self::Lookup {
                kind: QueryKind::Rhymes,
                word: word.to_string(),
            },
            ("similar" | "s", word) if !word.is_empty() => Self::Lookup {
                kind: QueryKind::Similar,
                word: word.to_string(),
            },
            ("save", arg) if !arg.is_empty() => match arg.parse::<usize>() {
                Ok(number) => Self::SaveItem(number),
                Err(_) => Self::SaveWord(arg.to_string()),
            },
            ("saved", "") => Self::ShowSaved,
            ("clear", "") => Self::ClearSaved,
            ("help" | "?", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            ("rhyme" | "r" | "similar" | "s" | "save", _) => {
                Self::Unknown(format!("'{head}' needs an argument"))
            }
            (_, "") => Self::Lookup {
                kind: QueryKind::Rhymes,
                word: head.to_string(),
            },
            _ => Self::Unknown(format!("unrecognised command '{line}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<L, W> {
    lookup: L,
    out: W,
    saved: SavedWords,
    last_list: Rendered,
    delimiter: String,
}

impl<L: WordLookup, W: Write> Session<L, W> {
    pub fn new(lookup: L, out: W, delimiter: impl Into<String>) -> Self {
        Self {
            lookup,
            out,
            saved: SavedWords::new(),
            last_list: Rendered::default(),
            delimiter: delimiter.into(),
        }
    }

    pub fn saved(&self) -> &SavedWords {
        &self.saved
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if self.handle(SessionCommand::parse(&line)).await? == Flow::Quit {
                break;
            }
        }
        info!(saved = self.saved.len(), "session finished");
        Ok(())
    }

    pub async fn handle(&mut self, command: SessionCommand) -> io::Result<Flow> {
        debug!(?command, "session command");
        match command {
            SessionCommand::Lookup { kind, word } => self.run_lookup(kind, &word).await?,
            SessionCommand::SaveItem(number) => match self.last_list.item(number) {
                Some(word) => {
                    let word = word.to_string();
                    self.save(word)?;
                }
                None => writeln!(self.out, "no item {number} in the last list")?,
            },
            SessionCommand::SaveWord(word) => self.save(word)?,
            SessionCommand::ShowSaved => self.print_saved()?,
            SessionCommand::ClearSaved => {
                self.saved.clear();
                self.print_saved()?;
            }
            SessionCommand::Help => writeln!(self.out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Quit),
            SessionCommand::Empty => {}
            SessionCommand::Unknown(reason) => {
                writeln!(self.out, "{reason}; type 'help' for commands")?
            }
        }
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    async fn run_lookup(&mut self, kind: QueryKind, word: &str) -> io::Result<()> {
        writeln!(self.out, "{}", view::render_loading())?;
        self.out.flush()?;

        // Failures only reach the log; the previous list stays saveable.
        let records = match self.lookup.lookup(kind, word).await {
            Ok(records) => records,
            Err(error) => {
                error!(?kind, word, %error, "word lookup failed");
                return Ok(());
            }
        };

        let rendered = match kind {
            QueryKind::Rhymes => view::render_rhymes(word, &group_rhymes(records)),
            QueryKind::Similar => view::render_similar(word, &records),
        };
        writeln!(self.out, "{}", rendered.text)?;
        self.last_list = rendered;
        Ok(())
    }

    fn save(&mut self, word: String) -> io::Result<()> {
        self.saved.add(word);
        self.print_saved()
    }

    fn print_saved(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", view::render_saved(&self.saved, &self.delimiter))
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
