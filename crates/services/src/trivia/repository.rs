use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionError, QuestionRequest};

use crate::error::TriviaApiError;
use crate::trivia::client::{RawQuestion, TriviaApi};

/// Normalize a service record: incorrect answers in received order, correct answer last.
///
/// # Errors
///
/// Returns `QuestionError` when the record does not describe a valid question.
pub fn create_question(raw: RawQuestion) -> Result<Question, QuestionError> {
    Question::new(raw.question, raw.incorrect_answers, raw.correct_answer)
}

/// Detached fetch handle.
///
/// Fetches and normalizes a batch without touching any question set, so the
/// network await can happen outside the owner of the set.
#[derive(Clone)]
pub struct QuestionFetcher {
    api: Arc<dyn TriviaApi>,
    shuffle_answers: bool,
}

impl QuestionFetcher {
    #[must_use]
    pub fn new(api: Arc<dyn TriviaApi>) -> Self {
        Self {
            api,
            shuffle_answers: false,
        }
    }

    #[must_use]
    pub fn with_shuffle_answers(mut self, shuffle_answers: bool) -> Self {
        self.shuffle_answers = shuffle_answers;
        self
    }

    /// Fetch one batch.
    ///
    /// # Errors
    ///
    /// Returns `TriviaApiError` for transport failures and for records that
    /// fail normalization. A single bad record fails the whole batch.
    pub async fn fetch(&self, request: &QuestionRequest) -> Result<Vec<Question>, TriviaApiError> {
        let raw = self.api.fetch_questions(request).await.inspect_err(|err| {
            tracing::warn!(error = %err, amount = request.amount().get(), "question fetch failed");
        })?;

        let mut questions = raw
            .into_iter()
            .map(create_question)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| tracing::warn!(error = %err, "malformed question in response"))?;

        if self.shuffle_answers {
            let mut rng = rng();
            questions = questions
                .into_iter()
                .map(|question| question.with_answers_reordered(|answers| answers.shuffle(&mut rng)))
                .collect();
        }

        tracing::debug!(count = questions.len(), "questions fetched");
        Ok(questions)
    }
}

/// Owns the current question set.
///
/// The set is only ever replaced as a whole, after a fetch has fully succeeded.
#[derive(Clone)]
pub struct QuestionRepository {
    fetcher: QuestionFetcher,
    questions: Vec<Question>,
}

impl QuestionRepository {
    #[must_use]
    pub fn new(api: Arc<dyn TriviaApi>) -> Self {
        Self {
            fetcher: QuestionFetcher::new(api),
            questions: Vec::new(),
        }
    }

    /// Opt into shuffling answers of newly fetched questions. Off by default.
    #[must_use]
    pub fn with_shuffle_answers(mut self, shuffle_answers: bool) -> Self {
        self.fetcher = self.fetcher.with_shuffle_answers(shuffle_answers);
        self
    }

    #[must_use]
    pub fn fetcher(&self) -> QuestionFetcher {
        self.fetcher.clone()
    }

    /// Fetch a batch and make it the current set.
    ///
    /// # Errors
    ///
    /// Returns `TriviaApiError` on failure; the current set is left unchanged.
    pub async fn fetch(&mut self, request: &QuestionRequest) -> Result<&[Question], TriviaApiError> {
        let questions = self.fetcher.fetch(request).await?;
        self.replace_all(questions);
        Ok(&self.questions)
    }

    pub fn replace_all(&mut self, questions: Vec<Question>) {
        self.questions = questions;
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
