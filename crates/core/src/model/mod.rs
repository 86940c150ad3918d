mod question;
mod request;
mod token;

pub use question::{Question, QuestionError};
pub use request::{Difficulty, DifficultyParseError, QuestionKind, QuestionRequest};
pub use token::SessionToken;
