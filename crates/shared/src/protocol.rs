use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{domain::GroupKey, grouping::Fields};

/// The two query kinds the word service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Rhymes,
    Similar,
}

impl QueryKind {
    /// Query-string parameter carrying the looked-up word.
    pub fn param(self) -> &'static str {
        match self {
            Self::Rhymes => "rel_rhy",
            Self::Similar => "ml",
        }
    }
}

/// One entry of a `/words` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_syllables: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defs: Vec<String>,
}

impl WordRecord {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            score: None,
            num_syllables: None,
            tags: Vec::new(),
            defs: Vec::new(),
        }
    }

    pub fn with_syllables(mut self, num_syllables: u32) -> Self {
        self.num_syllables = Some(num_syllables);
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Field names follow the wire format (`numSyllables`, not `num_syllables`).
impl Fields<GroupKey> for WordRecord {
    fn field(&self, name: &str) -> GroupKey {
        match name {
            "word" => GroupKey::from(self.word.as_str()),
            "score" => self.score.map_or(GroupKey::Missing, GroupKey::from),
            "numSyllables" => self.num_syllables.map_or(GroupKey::Missing, GroupKey::from),
            "tags" if !self.tags.is_empty() => GroupKey::from(&Value::from(self.tags.clone())),
            "defs" if !self.defs.is_empty() => GroupKey::from(&Value::from(self.defs.clone())),
            _ => GroupKey::Missing,
        }
    }
}
