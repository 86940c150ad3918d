#![forbid(unsafe_code)]

pub mod model;
pub mod state;

pub use state::{Feedback, Page, Progress, QuizState};
