use std::num::NonZeroU32;
use std::sync::Arc;

use services::{QuizController, QuizOptions, TriviaApi};

pub trait UiApp: Send + Sync {
    fn trivia_api(&self) -> Arc<dyn TriviaApi>;
    fn quiz_options(&self) -> QuizOptions;
    fn default_amount(&self) -> NonZeroU32;
}

#[derive(Clone)]
pub struct AppContext {
    api: Arc<dyn TriviaApi>,
    options: QuizOptions,
    default_amount: NonZeroU32,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            api: app.trivia_api(),
            options: app.quiz_options(),
            default_amount: app.default_amount(),
        }
    }

    #[must_use]
    pub fn default_amount(&self) -> NonZeroU32 {
        self.default_amount
    }

    /// Fresh controller for one application load.
    #[must_use]
    pub fn new_controller(&self) -> QuizController {
        QuizController::new(Arc::clone(&self.api)).with_options(self.options.clone())
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
