mod html;
mod quiz_vm;

pub use html::sanitize_html;
pub use quiz_vm::{
    AMOUNT_CHOICES, AnswerChoiceVm, QuizIntent, QuizVm, RegionVm, amount_choices, map_quiz_view,
    progress_label, score_label,
};
