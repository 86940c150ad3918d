use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

use crate::model::token::SessionToken;

const AMOUNT_KEY: &str = "amount";
const TOKEN_KEY: &str = "token";

//
// ─── FILTER VALUES ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {raw}")]
pub struct DifficultyParseError {
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(DifficultyParseError { raw: s.to_string() }),
        }
    }
}

/// Answer format of a question, sent as the `type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple",
            Self::TrueFalse => "boolean",
        }
    }
}

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

/// Parameters for one batch of questions.
///
/// `amount` and `token` have dedicated fields; every other query parameter is
/// an entry in `filters`. Filter entries named `amount` or `token` are never
/// sent, so they cannot shadow the dedicated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    amount: NonZeroU32,
    token: Option<SessionToken>,
    filters: BTreeMap<String, String>,
}

impl QuestionRequest {
    #[must_use]
    pub fn new(amount: NonZeroU32) -> Self {
        Self {
            amount,
            token: None,
            filters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<SessionToken>) -> Self {
        self.token = token;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_filters<K, V>(mut self, filters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in filters {
            self.filters.insert(key.into(), value.into());
        }
        self
    }

    #[must_use]
    pub fn with_kind(self, kind: QuestionKind) -> Self {
        self.with_filter("type", kind.as_str())
    }

    #[must_use]
    pub fn with_category(self, category: u32) -> Self {
        self.with_filter("category", category.to_string())
    }

    #[must_use]
    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        self.with_filter("difficulty", difficulty.as_str())
    }

    #[must_use]
    pub fn amount(&self) -> NonZeroU32 {
        self.amount
    }

    #[must_use]
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Query parameters in request order: amount, token (when present), then filters by key.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        pairs.push((AMOUNT_KEY.to_string(), self.amount.to_string()));
        if let Some(token) = &self.token {
            pairs.push((TOKEN_KEY.to_string(), token.as_str().to_string()));
        }
        pairs.extend(
            self.filters
                .iter()
                .filter(|(key, _)| key.as_str() != AMOUNT_KEY && key.as_str() != TOKEN_KEY)
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        pairs
    }
}
