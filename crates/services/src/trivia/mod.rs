mod client;
mod config;
mod memory;
mod repository;
mod token;

pub use client::{HttpTriviaApi, RawQuestion, TriviaApi, response_code_reason};
pub use config::TriviaConfig;
pub use memory::InMemoryTriviaApi;
pub use repository::{QuestionFetcher, QuestionRepository, create_question};
pub use token::SessionTokenProvider;
