#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod trivia;

pub use error::{QuizAction, QuizError, TriviaApiError};
pub use quiz::{QuizController, QuizOptions, QuizView, Region, StatusBar};
pub use trivia::{
    HttpTriviaApi, InMemoryTriviaApi, QuestionFetcher, QuestionRepository, RawQuestion,
    SessionTokenProvider, TriviaApi, TriviaConfig, create_question,
};
