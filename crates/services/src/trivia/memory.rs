use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quiz_core::model::{QuestionRequest, SessionToken};

use crate::error::TriviaApiError;
use crate::trivia::client::{RawQuestion, TriviaApi, response_code_reason};

#[derive(Default)]
struct Inner {
    token: Option<SessionToken>,
    questions: Vec<RawQuestion>,
    fail_questions: bool,
    token_requests: usize,
    question_requests: Vec<QuestionRequest>,
}

/// In-process `TriviaApi` serving a fixed question pool.
///
/// Records every request so callers can assert on traffic.
#[derive(Clone, Default)]
pub struct InMemoryTriviaApi {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTriviaApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token handed out by `request_token`. Without one, token requests fail.
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.inner.lock() {
            guard.token = Some(SessionToken::new(token));
        }
        self
    }

    #[must_use]
    pub fn with_questions(self, questions: Vec<RawQuestion>) -> Self {
        self.set_questions(questions);
        self
    }

    pub fn set_questions(&self, questions: Vec<RawQuestion>) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.questions = questions;
        }
    }

    /// Make question requests fail as if the service had no results.
    pub fn fail_question_requests(&self, fail: bool) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.fail_questions = fail;
        }
    }

    #[must_use]
    pub fn token_requests(&self) -> usize {
        self.inner.lock().map_or(0, |guard| guard.token_requests)
    }

    #[must_use]
    pub fn question_requests(&self) -> Vec<QuestionRequest> {
        self.inner
            .lock()
            .map(|guard| guard.question_requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TriviaApi for InMemoryTriviaApi {
    async fn request_token(&self) -> Result<SessionToken, TriviaApiError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| TriviaApiError::Connection(e.to_string()))?;
        guard.token_requests += 1;
        guard.token.clone().ok_or(TriviaApiError::TokenUnavailable)
    }

    async fn fetch_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<RawQuestion>, TriviaApiError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| TriviaApiError::Connection(e.to_string()))?;
        guard.question_requests.push(request.clone());

        if guard.fail_questions {
            return Err(TriviaApiError::ResponseCode {
                code: 1,
                reason: response_code_reason(1),
            });
        }

        let amount = usize::try_from(request.amount().get()).unwrap_or(usize::MAX);
        Ok(guard.questions.iter().take(amount).cloned().collect())
    }
}
