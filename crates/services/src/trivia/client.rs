use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use quiz_core::model::{QuestionRequest, SessionToken};

use crate::error::TriviaApiError;
use crate::trivia::config::TriviaConfig;

/// Remote trivia backend.
///
/// Implementations return raw service records; normalization into domain
/// questions happens in the repository.
#[async_trait]
pub trait TriviaApi: Send + Sync {
    async fn request_token(&self) -> Result<SessionToken, TriviaApiError>;

    async fn fetch_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<RawQuestion>, TriviaApiError>;
}

/// Question record as served by `api.php`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    pub incorrect_answers: Vec<String>,
    pub correct_answer: String,
}

impl RawQuestion {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        incorrect_answers: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            incorrect_answers: incorrect_answers.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    response_code: u8,
    results: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    response_code: u8,
    token: String,
}

/// Human-readable meaning of the service's `response_code` field.
#[must_use]
pub fn response_code_reason(code: u8) -> &'static str {
    match code {
        0 => "success",
        1 => "not enough questions for the query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token has returned every question",
        5 => "rate limited",
        _ => "unknown response code",
    }
}

fn check_response_code(code: u8) -> Result<(), TriviaApiError> {
    if code == 0 {
        return Ok(());
    }
    Err(TriviaApiError::ResponseCode {
        code,
        reason: response_code_reason(code),
    })
}

/// `TriviaApi` over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpTriviaApi {
    client: Client,
    config: TriviaConfig,
}

impl HttpTriviaApi {
    #[must_use]
    pub fn new(config: TriviaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// `<base>/api.php` with the request's query parameters.
    ///
    /// # Errors
    ///
    /// Returns `TriviaApiError::Url` when the configured base url is invalid.
    pub fn questions_url(&self, request: &QuestionRequest) -> Result<Url, TriviaApiError> {
        let mut url = self.endpoint("api.php")?;
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        Ok(url)
    }

    /// `<base>/api_token.php?command=request`.
    ///
    /// # Errors
    ///
    /// Returns `TriviaApiError::Url` when the configured base url is invalid.
    pub fn token_url(&self) -> Result<Url, TriviaApiError> {
        let mut url = self.endpoint("api_token.php")?;
        url.query_pairs_mut().append_pair("command", "request");
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, TriviaApiError> {
        let base = self.config.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, TriviaApiError> {
        tracing::debug!(%url, "trivia request");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TriviaApiError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TriviaApi for HttpTriviaApi {
    async fn request_token(&self) -> Result<SessionToken, TriviaApiError> {
        let body: TokenResponse = self.get_json(self.token_url()?).await?;
        check_response_code(body.response_code)?;
        Ok(SessionToken::new(body.token))
    }

    async fn fetch_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<RawQuestion>, TriviaApiError> {
        let body: QuestionsResponse = self.get_json(self.questions_url(request)?).await?;
        check_response_code(body.response_code)?;
        Ok(body.results)
    }
}
