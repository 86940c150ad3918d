//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use quiz_core::Page;
use quiz_core::model::QuestionError;

/// Errors emitted while talking to the trivia service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriviaApiError {
    #[error("trivia service returned HTTP status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia service rejected the request (response_code {code}: {reason})")]
    ResponseCode { code: u8, reason: &'static str },
    #[error("no session token is available")]
    TokenUnavailable,
    #[error("invalid trivia service url: {0}")]
    Url(#[from] url::ParseError),
    #[error("malformed question: {0}")]
    Question(#[from] QuestionError),
    #[error("connection error: {0}")]
    Connection(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// User intent a transition was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Start,
    SubmitAnswer,
    Advance,
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start a quiz",
            Self::SubmitAnswer => "submit an answer",
            Self::Advance => "advance",
        })
    }
}

/// Errors emitted by `QuizController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("session token has not been obtained yet")]
    NotReady,
    #[error("a question fetch is already in flight")]
    FetchInFlight,
    #[error("no question fetch is in flight")]
    NoFetchInFlight,
    #[error("trivia service returned no questions")]
    EmptyQuestionSet,
    #[error("cannot {action} on the {page} page")]
    InvalidTransition { page: Page, action: QuizAction },
    #[error(transparent)]
    Api(#[from] TriviaApiError),
}
