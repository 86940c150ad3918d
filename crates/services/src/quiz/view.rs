use quiz_core::model::Question;
use quiz_core::{Page, Progress, QuizState};

/// Score and position shown next to every region except the intro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBar {
    pub score: usize,
    pub progress: Progress,
}

/// The one visible top-level region and the data projected into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Intro {
        start_enabled: bool,
    },
    Question {
        text: String,
        answers: Vec<String>,
    },
    Feedback {
        message: String,
        correct: bool,
    },
    Outro {
        score: usize,
        total: usize,
        start_enabled: bool,
    },
}

/// Presentation-agnostic projection of the quiz.
///
/// Carries no markup; the UI decides how each region looks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizView {
    pub status: Option<StatusBar>,
    pub region: Option<Region>,
}

impl QuizView {
    /// Every region hidden.
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Project the state and the current question set into a view.
///
/// Starts from a fully hidden view, adds the status bar whenever there is a
/// current question position, then shows the single region for the page.
/// Pages that need a question which cannot be resolved show nothing.
#[must_use]
pub fn render(state: &QuizState, questions: &[Question], start_enabled: bool) -> QuizView {
    let mut view = QuizView::hidden();

    view.status = state
        .progress(questions.len())
        .map(|progress| StatusBar {
            score: state.score(questions),
            progress,
        });

    view.region = match state.page() {
        Page::Intro => Some(Region::Intro { start_enabled }),
        Page::Question => state
            .current_question(questions)
            .map(|question| Region::Question {
                text: question.text().to_string(),
                answers: question.answers().to_vec(),
            }),
        Page::Answer => state.feedback().map(|feedback| Region::Feedback {
            message: feedback.to_string(),
            correct: feedback.is_correct(),
        }),
        Page::Outro => Some(Region::Outro {
            score: state.score(questions),
            total: questions.len(),
            start_enabled,
        }),
    };

    view
}
