use std::fmt;

use crate::model::{Question, SessionToken};

/// Coarse UI mode of the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Intro,
    Question,
    Answer,
    Outro,
}

impl Page {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Outro => "outro",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-based position within the current question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Message shown after a question has been answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_answer: String },
}

impl Feedback {
    #[must_use]
    pub fn for_answer(question: &Question, selected: Option<&str>) -> Self {
        if question.is_correct(selected) {
            Self::Correct
        } else {
            Self::Incorrect {
                correct_answer: question.correct_answer().to_string(),
            }
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct => f.write_str("You got it!"),
            Self::Incorrect { correct_answer } => {
                write!(f, "Too bad! The correct answer was: {correct_answer}")
            }
        }
    }
}

/// In-memory quiz session.
///
/// `current_question_index` is `None` only while on `Page::Intro`. Answers are
/// stored in question order, one per answered question; a missing selection
/// is kept as `None`. The session token survives `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    page: Page,
    current_question_index: Option<usize>,
    user_answers: Vec<Option<String>>,
    feedback: Option<Feedback>,
    session_token: Option<SessionToken>,
}

impl QuizState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn current_question_index(&self) -> Option<usize> {
        self.current_question_index
    }

    #[must_use]
    pub fn user_answers(&self) -> &[Option<String>] {
        &self.user_answers
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn session_token(&self) -> Option<&SessionToken> {
        self.session_token.as_ref()
    }

    pub fn set_session_token(&mut self, token: SessionToken) {
        self.session_token = Some(token);
    }

    /// Back to the intro page with no answers. The session token is kept.
    pub fn reset(&mut self) {
        self.page = Page::Intro;
        self.current_question_index = None;
        self.user_answers.clear();
        self.feedback = None;
    }

    /// Show the question at `index`.
    pub fn show_question(&mut self, index: usize) {
        self.page = Page::Question;
        self.current_question_index = Some(index);
    }

    /// Store the answer for the current question and switch to the feedback page.
    pub fn record_answer(&mut self, selected: Option<String>, feedback: Feedback) {
        self.user_answers.push(selected);
        self.feedback = Some(feedback);
        self.page = Page::Answer;
    }

    pub fn finish(&mut self) {
        self.page = Page::Outro;
    }

    /// Number of answers matching the question at the same position.
    ///
    /// Unanswered questions never count, and answers without a matching
    /// question are ignored.
    #[must_use]
    pub fn score(&self, questions: &[Question]) -> usize {
        self.user_answers
            .iter()
            .zip(questions)
            .filter(|(answer, question)| question.is_correct(answer.as_deref()))
            .count()
    }

    /// Returns `None` on the intro page, where there is no current question.
    #[must_use]
    pub fn progress(&self, total: usize) -> Option<Progress> {
        if self.page == Page::Intro {
            return None;
        }
        self.current_question_index.map(|index| Progress {
            current: index + 1,
            total,
        })
    }

    #[must_use]
    pub fn current_question<'a>(&self, questions: &'a [Question]) -> Option<&'a Question> {
        self.current_question_index
            .and_then(|index| questions.get(index))
    }

    #[must_use]
    pub fn is_last_question(&self, total: usize) -> bool {
        self.current_question_index
            .is_some_and(|index| index + 1 >= total)
    }
}
