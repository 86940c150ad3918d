use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question needs at least one incorrect answer")]
    NoIncorrectAnswers,

    #[error("correct answer is also listed as incorrect: {answer}")]
    AmbiguousAnswer { answer: String },

    #[error("incorrect answer is listed twice: {answer}")]
    DuplicateAnswer { answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice trivia question.
///
/// `answers` always holds every incorrect answer in the order they were
/// received, followed by the correct answer. Exactly one entry equals
/// `correct_answer`, and no two entries are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: Vec<String>,
    correct_answer: String,
}

impl Question {
    /// Builds a question from its text and answer lists.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, when there are no
    /// incorrect answers, when an incorrect answer repeats, or when the
    /// correct answer also appears among the incorrect ones.
    pub fn new(
        text: impl Into<String>,
        incorrect_answers: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_answer = correct_answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if incorrect_answers.is_empty() {
            return Err(QuestionError::NoIncorrectAnswers);
        }
        if let Some(answer) = incorrect_answers
            .iter()
            .enumerate()
            .find_map(|(index, answer)| incorrect_answers[..index].contains(answer).then_some(answer))
        {
            return Err(QuestionError::DuplicateAnswer {
                answer: answer.clone(),
            });
        }
        if incorrect_answers.contains(&correct_answer) {
            return Err(QuestionError::AmbiguousAnswer {
                answer: correct_answer,
            });
        }

        let mut answers = incorrect_answers;
        answers.push(correct_answer.clone());

        Ok(Self {
            text,
            answers,
            correct_answer,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Whether `selected` matches the correct answer. An absent selection is never correct.
    #[must_use]
    pub fn is_correct(&self, selected: Option<&str>) -> bool {
        selected == Some(self.correct_answer.as_str())
    }

    /// Returns a copy with the answers reordered by `reorder`.
    ///
    /// The permutation must keep the same entries, so the question stays valid.
    #[must_use]
    pub fn with_answers_reordered(mut self, reorder: impl FnOnce(&mut [String])) -> Self {
        reorder(&mut self.answers);
        self
    }
}
