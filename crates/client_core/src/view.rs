//! Text presentation of lookup results and saved words.
//!
//! Renderers take finished results and never fetch anything themselves.

use serde_json::Value;
use shared::{domain::GroupKey, protocol::WordRecord, Grouped};

use crate::SavedWords;

pub const LOADING: &str = "...loading";
pub const NO_RESULTS: &str = "(no results)";

/// Rendered text plus the words behind its numbered items, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub items: Vec<String>,
}

impl Rendered {
    /// Word shown as item `number` (1-based).
    pub fn item(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.items.get(idx))
            .map(String::as_str)
    }
}

struct ListBuilder {
    lines: Vec<String>,
    items: Vec<String>,
}

impl ListBuilder {
    fn new(heading: String) -> Self {
        Self {
            lines: vec![heading],
            items: Vec::new(),
        }
    }

    fn line(&mut self, line: String) {
        self.lines.push(line);
    }

    fn item(&mut self, word: &str) {
        self.items.push(word.to_string());
        self.lines.push(format!("  {}. {word}", self.items.len()));
    }

    fn finish(mut self) -> Rendered {
        if self.items.is_empty() {
            self.lines.push(NO_RESULTS.to_string());
        }
        Rendered {
            text: self.lines.join("\n"),
            items: self.items,
        }
    }
}

pub fn render_loading() -> &'static str {
    LOADING
}

/// Heading for one syllable-count section.
pub fn syllable_label(key: &GroupKey) -> String {
    match key {
        GroupKey::Missing | GroupKey::Null => "Unknown syllables:".to_string(),
        GroupKey::Number(n) if *n == 1.0 => "1 syllable:".to_string(),
        other => format!("{other} syllables:"),
    }
}

pub fn render_rhymes(word: &str, groups: &Grouped<GroupKey, WordRecord>) -> Rendered {
    let mut list = ListBuilder::new(format!("Words that rhyme with {word}:"));
    for (key, records) in groups.iter() {
        list.line(syllable_label(key));
        for record in records {
            list.item(&record.word);
        }
    }
    list.finish()
}

pub fn render_similar(word: &str, records: &[WordRecord]) -> Rendered {
    let mut list = ListBuilder::new(format!("Words with a meaning similar to {word}:"));
    for record in records {
        list.item(&record.word);
    }
    list.finish()
}

/// One section per key, one compact JSON line per record.
pub fn render_groups(groups: &Grouped<GroupKey, Value>) -> String {
    if groups.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut lines = Vec::with_capacity(groups.len() + groups.record_count());
    for (key, records) in groups.iter() {
        lines.push(format!("{key}:"));
        lines.extend(records.iter().map(|record| format!("  - {record}")));
    }
    lines.join("\n")
}

pub fn render_saved(saved: &SavedWords, delimiter: &str) -> String {
    if saved.is_empty() {
        "Saved words: (none)".to_string()
    } else {
        format!("Saved words: {}", saved.display(delimiter))
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
