mod controller;
pub mod view;

pub use controller::{QuizController, QuizOptions};
pub use view::{QuizView, Region, StatusBar};
