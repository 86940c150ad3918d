pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

const BASE_URL_VAR: &str = "TRIVIA_BASE_URL";

/// Where the trivia service lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriviaConfig {
    pub base_url: String,
}

impl TriviaConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `TRIVIA_BASE_URL` through `lookup`, falling back to the public Open Trivia DB.
    ///
    /// Blank values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
