use std::num::NonZeroU32;

use services::{QuizView, Region, StatusBar};

use crate::vm::html::sanitize_html;

/// Question counts offered on the intro and outro pages.
pub const AMOUNT_CHOICES: [u32; 4] = [5, 10, 15, 20];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start(NonZeroU32),
    SetAmount(NonZeroU32),
    Select(String),
    Submit,
    Advance,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerChoiceVm {
    /// Raw answer, sent back on submit.
    pub value: String,
    pub label_html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionVm {
    Intro {
        start_enabled: bool,
    },
    Question {
        text_html: String,
        choices: Vec<AnswerChoiceVm>,
    },
    Feedback {
        message_html: String,
        correct: bool,
    },
    Outro {
        summary: String,
        start_enabled: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizVm {
    pub score_label: Option<String>,
    pub progress_label: Option<String>,
    pub region: Option<RegionVm>,
}

impl QuizVm {
    #[must_use]
    pub fn region_class(&self) -> &'static str {
        match self.region {
            Some(RegionVm::Intro { .. }) => "js-intro",
            Some(RegionVm::Question { .. }) => "js-question",
            Some(RegionVm::Feedback { .. }) => "js-question-feedback",
            Some(RegionVm::Outro { .. }) => "js-outro",
            None => "js-empty",
        }
    }
}

/// Question counts to offer when `current` is the amount a start would request.
///
/// `current` is always present, in sorted position, so the picker never shows
/// a different count from the one that gets sent.
#[must_use]
pub fn amount_choices(current: u32) -> Vec<u32> {
    let mut choices = AMOUNT_CHOICES.to_vec();
    if let Err(position) = choices.binary_search(&current) {
        choices.insert(position, current);
    }
    choices
}

#[must_use]
pub fn score_label(score: usize) -> String {
    format!("Score: {score}")
}

#[must_use]
pub fn progress_label(status: &StatusBar) -> String {
    format!(
        "Question {} of {}",
        status.progress.current, status.progress.total
    )
}

#[must_use]
pub fn map_quiz_view(view: &QuizView) -> QuizVm {
    let region = view.region.as_ref().map(|region| match region {
        Region::Intro { start_enabled } => RegionVm::Intro {
            start_enabled: *start_enabled,
        },
        Region::Question { text, answers } => RegionVm::Question {
            text_html: sanitize_html(text),
            choices: answers
                .iter()
                .map(|answer| AnswerChoiceVm {
                    value: answer.clone(),
                    label_html: sanitize_html(answer),
                })
                .collect(),
        },
        Region::Feedback { message, correct } => RegionVm::Feedback {
            message_html: sanitize_html(message),
            correct: *correct,
        },
        Region::Outro {
            score,
            total,
            start_enabled,
        } => RegionVm::Outro {
            summary: format!("You scored {score} out of {total}."),
            start_enabled: *start_enabled,
        },
    });

    QuizVm {
        score_label: view.status.as_ref().map(|status| score_label(status.score)),
        progress_label: view.status.as_ref().map(progress_label),
        region,
    }
}
