use std::num::NonZeroU32;
use std::sync::Arc;

use quiz_core::model::{Difficulty, Question, QuestionKind, QuestionRequest};
use quiz_core::{Feedback, Page, Progress, QuizState};

use crate::error::{QuizAction, QuizError, TriviaApiError};
use crate::quiz::view::{self, QuizView};
use crate::trivia::{QuestionFetcher, QuestionRepository, SessionTokenProvider, TriviaApi};

/// Filters applied to every quiz started by a controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizOptions {
    pub category: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub shuffle_answers: bool,
}

impl QuizOptions {
    fn request(&self, amount: NonZeroU32) -> QuestionRequest {
        let mut request = QuestionRequest::new(amount).with_kind(QuestionKind::MultipleChoice);
        if let Some(category) = self.category {
            request = request.with_category(category);
        }
        if let Some(difficulty) = self.difficulty {
            request = request.with_difficulty(difficulty);
        }
        request
    }
}

/// Drives the quiz through `intro -> question -> answer -> ... -> outro`.
///
/// Every successful transition returns the freshly rendered view. Rejected
/// transitions leave the state untouched.
pub struct QuizController {
    tokens: SessionTokenProvider,
    questions: QuestionRepository,
    state: QuizState,
    options: QuizOptions,
    fetch_in_flight: bool,
}

impl QuizController {
    #[must_use]
    pub fn new(api: Arc<dyn TriviaApi>) -> Self {
        Self {
            tokens: SessionTokenProvider::new(Arc::clone(&api)),
            questions: QuestionRepository::new(api),
            state: QuizState::new(),
            options: QuizOptions::default(),
            fetch_in_flight: false,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: QuizOptions) -> Self {
        self.questions = self.questions.with_shuffle_answers(options.shuffle_answers);
        self.options = options;
        self
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        self.questions.questions()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.state.score(self.questions.questions())
    }

    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.state.progress(self.questions.len())
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.state.current_question(self.questions.questions())
    }

    #[must_use]
    pub fn is_fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    /// A quiz can start once a token is known, from the intro or outro, with no fetch pending.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.state.session_token().is_some()
            && !self.fetch_in_flight
            && matches!(self.state.page(), Page::Intro | Page::Outro)
    }

    #[must_use]
    pub fn view(&self) -> QuizView {
        view::render(&self.state, self.questions.questions(), self.can_start())
    }

    #[must_use]
    pub fn fetcher(&self) -> QuestionFetcher {
        self.questions.fetcher()
    }

    /// Obtain the session token. Run once at application start.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Api` when no token could be obtained; starting stays disabled.
    pub async fn prepare(&mut self) -> Result<QuizView, QuizError> {
        let token = self.tokens.ensure_token().await?;
        self.state.set_session_token(token);
        Ok(self.view())
    }

    /// Mark a fetch as in flight and return the request to send.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::FetchInFlight` while another start is pending,
    /// `QuizError::InvalidTransition` mid-quiz and `QuizError::NotReady`
    /// before a token was obtained.
    pub fn begin_start(&mut self, amount: NonZeroU32) -> Result<QuestionRequest, QuizError> {
        if self.fetch_in_flight {
            return Err(QuizError::FetchInFlight);
        }
        self.expect_page(&[Page::Intro, Page::Outro], QuizAction::Start)?;
        let token = self
            .state
            .session_token()
            .cloned()
            .ok_or(QuizError::NotReady)?;

        self.fetch_in_flight = true;
        tracing::debug!(amount = amount.get(), "starting quiz");
        Ok(self.options.request(amount).with_token(Some(token)))
    }

    /// Finish a start with the fetch result.
    ///
    /// On success the question set is replaced, the state is reset and the
    /// first question is shown.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoFetchInFlight` without a matching `begin_start`,
    /// `QuizError::Api` for a failed fetch and `QuizError::EmptyQuestionSet`
    /// when the service returned nothing. The state is unchanged in every case.
    pub fn complete_start(
        &mut self,
        fetched: Result<Vec<Question>, TriviaApiError>,
    ) -> Result<QuizView, QuizError> {
        if !self.fetch_in_flight {
            return Err(QuizError::NoFetchInFlight);
        }
        self.fetch_in_flight = false;

        let questions = fetched?;
        if questions.is_empty() {
            tracing::warn!("trivia service returned an empty question set");
            return Err(QuizError::EmptyQuestionSet);
        }

        tracing::info!(count = questions.len(), "quiz started");
        self.questions.replace_all(questions);
        self.state.reset();
        self.state.show_question(0);
        Ok(self.view())
    }

    /// Fetch a question set of `amount` multiple-choice questions and show the first one.
    ///
    /// # Errors
    ///
    /// See `begin_start` and `complete_start`.
    pub async fn start(&mut self, amount: NonZeroU32) -> Result<QuizView, QuizError> {
        let request = self.begin_start(amount)?;
        let fetched = self.questions.fetcher().fetch(&request).await;
        self.complete_start(fetched)
    }

    /// Record the selected answer for the current question and show feedback.
    ///
    /// `None` means nothing was selected; it is recorded and graded as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless a question is showing.
    pub fn submit_answer(&mut self, selected: Option<&str>) -> Result<QuizView, QuizError> {
        self.expect_page(&[Page::Question], QuizAction::SubmitAnswer)?;
        let question = self
            .state
            .current_question(self.questions.questions())
            .ok_or(QuizError::InvalidTransition {
                page: self.state.page(),
                action: QuizAction::SubmitAnswer,
            })?;

        let feedback = Feedback::for_answer(question, selected);
        tracing::info!(
            index = ?self.state.current_question_index(),
            correct = feedback.is_correct(),
            "answer submitted"
        );
        self.state.record_answer(selected.map(str::to_owned), feedback);
        Ok(self.view())
    }

    /// Move to the next question, or to the outro after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless feedback is showing.
    pub fn advance(&mut self) -> Result<QuizView, QuizError> {
        self.expect_page(&[Page::Answer], QuizAction::Advance)?;
        let total = self.questions.len();

        match self.state.current_question_index() {
            Some(index) if !self.state.is_last_question(total) => {
                self.state.show_question(index + 1);
            }
            _ => {
                tracing::info!(score = self.score(), total, "quiz finished");
                self.state.finish();
            }
        }
        Ok(self.view())
    }

    fn expect_page(&self, allowed: &[Page], action: QuizAction) -> Result<(), QuizError> {
        let page = self.state.page();
        if allowed.contains(&page) {
            return Ok(());
        }
        tracing::debug!(%page, %action, "rejected transition");
        Err(QuizError::InvalidTransition { page, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::view::Region;
    use crate::trivia::{InMemoryTriviaApi, RawQuestion};

    fn amount(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn pool() -> Vec<RawQuestion> {
        vec![
            RawQuestion::new("Capital of France?", ["Lyon", "Nice", "Lille"], "Paris"),
            RawQuestion::new("2 + 2?", ["3", "5", "22"], "4"),
            RawQuestion::new("Largest planet?", ["Mars", "Venus", "Earth"], "Jupiter"),
        ]
    }

    async fn ready_controller() -> (QuizController, InMemoryTriviaApi) {
        let api = InMemoryTriviaApi::new().with_token("tok").with_questions(pool());
        let mut controller = QuizController::new(Arc::new(api.clone()));
        controller.prepare().await.unwrap();
        (controller, api)
    }

    #[tokio::test]
    async fn start_requires_a_token() {
        let api = InMemoryTriviaApi::new().with_questions(pool());
        let mut controller = QuizController::new(Arc::new(api.clone()));

        assert!(controller.prepare().await.is_err());
        assert!(!controller.can_start());
        let err = controller.start(amount(3)).await.unwrap_err();

        assert!(matches!(err, QuizError::NotReady));
        assert!(api.question_requests().is_empty());
        assert_eq!(
            controller.view().region,
            Some(Region::Intro { start_enabled: false })
        );
    }

    #[tokio::test]
    async fn start_sends_token_and_multiple_choice_filter() {
        let api = InMemoryTriviaApi::new().with_token("tok").with_questions(pool());
        let options = QuizOptions {
            category: Some(9),
            difficulty: Some(Difficulty::Easy),
            shuffle_answers: false,
        };
        let mut controller = QuizController::new(Arc::new(api.clone())).with_options(options);
        controller.prepare().await.unwrap();

        controller.start(amount(3)).await.unwrap();

        let sent = api.question_requests();
        assert_eq!(sent.len(), 1);
        let pairs = sent[0].query_pairs();
        assert!(pairs.contains(&("token".into(), "tok".into())));
        assert!(pairs.contains(&("type".into(), "multiple".into())));
        assert!(pairs.contains(&("category".into(), "9".into())));
        assert!(pairs.contains(&("difficulty".into(), "easy".into())));
    }

    #[tokio::test]
    async fn overlapping_start_is_rejected_while_in_flight() {
        let (mut controller, _api) = ready_controller().await;

        let request = controller.begin_start(amount(3)).unwrap();
        assert!(controller.is_fetch_in_flight());
        assert!(!controller.can_start());
        assert!(matches!(
            controller.begin_start(amount(3)),
            Err(QuizError::FetchInFlight)
        ));

        let fetched = controller.fetcher().fetch(&request).await;
        controller.complete_start(fetched).unwrap();

        assert!(!controller.is_fetch_in_flight());
        assert_eq!(controller.state().page(), Page::Question);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_state_on_intro() {
        let (mut controller, api) = ready_controller().await;
        api.fail_question_requests(true);

        let err = controller.start(amount(3)).await.unwrap_err();

        assert!(matches!(err, QuizError::Api(_)));
        assert_eq!(controller.state().page(), Page::Intro);
        assert_eq!(controller.state().current_question_index(), None);
        assert!(controller.can_start());
    }

    #[tokio::test]
    async fn empty_question_set_is_rejected() {
        let (mut controller, api) = ready_controller().await;
        api.set_questions(Vec::new());

        let err = controller.start(amount(3)).await.unwrap_err();

        assert!(matches!(err, QuizError::EmptyQuestionSet));
        assert_eq!(controller.state().page(), Page::Intro);
    }

    #[tokio::test]
    async fn complete_without_begin_is_rejected() {
        let (mut controller, _api) = ready_controller().await;
        let err = controller.complete_start(Ok(Vec::new())).unwrap_err();
        assert!(matches!(err, QuizError::NoFetchInFlight));
    }

    #[tokio::test]
    async fn progress_tracks_advances() {
        let (mut controller, _api) = ready_controller().await;
        controller.start(amount(3)).await.unwrap();
        assert_eq!(controller.progress(), Some(Progress { current: 1, total: 3 }));

        controller.submit_answer(Some("Paris")).unwrap();
        controller.advance().unwrap();

        assert_eq!(controller.progress(), Some(Progress { current: 2, total: 3 }));
    }

    #[tokio::test]
    async fn full_quiz_scenario() {
        let (mut controller, _api) = ready_controller().await;

        controller.start(amount(3)).await.unwrap();
        assert_eq!(controller.state().page(), Page::Question);
        assert_eq!(controller.state().current_question_index(), Some(0));

        let view = controller.submit_answer(Some("Paris")).unwrap();
        assert_eq!(
            view.region,
            Some(Region::Feedback {
                message: "You got it!".into(),
                correct: true,
            })
        );
        assert_eq!(controller.state().page(), Page::Answer);
        assert_eq!(controller.state().user_answers(), [Some("Paris".to_string())]);

        controller.advance().unwrap();
        assert_eq!(controller.state().page(), Page::Question);
        assert_eq!(controller.state().current_question_index(), Some(1));

        controller.submit_answer(Some("Wrong")).unwrap();
        let feedback = controller.state().feedback().unwrap().to_string();
        assert!(feedback.contains('4'), "unexpected feedback {feedback}");
        assert_eq!(
            controller.state().user_answers(),
            [Some("Paris".to_string()), Some("Wrong".to_string())]
        );

        controller.advance().unwrap();
        controller.submit_answer(None).unwrap();
        let view = controller.advance().unwrap();

        assert_eq!(controller.state().page(), Page::Outro);
        assert_eq!(controller.score(), 1);
        assert_eq!(
            view.region,
            Some(Region::Outro {
                score: 1,
                total: 3,
                start_enabled: true,
            })
        );
    }

    #[tokio::test]
    async fn restart_resets_previous_answers() {
        let (mut controller, _api) = ready_controller().await;
        controller.start(amount(1)).await.unwrap();
        controller.submit_answer(Some("Paris")).unwrap();
        controller.advance().unwrap();
        assert_eq!(controller.state().page(), Page::Outro);

        controller.start(amount(2)).await.unwrap();

        assert_eq!(controller.state().page(), Page::Question);
        assert_eq!(controller.state().current_question_index(), Some(0));
        assert!(controller.state().user_answers().is_empty());
        assert!(controller.state().feedback().is_none());
        assert_eq!(controller.score(), 0);
        assert!(controller.state().session_token().is_some());
    }

    #[tokio::test]
    async fn out_of_order_transitions_are_rejected() {
        let (mut controller, _api) = ready_controller().await;

        assert!(matches!(
            controller.submit_answer(Some("Paris")),
            Err(QuizError::InvalidTransition {
                page: Page::Intro,
                action: QuizAction::SubmitAnswer,
            })
        ));
        assert!(matches!(
            controller.advance(),
            Err(QuizError::InvalidTransition { page: Page::Intro, .. })
        ));

        controller.start(amount(3)).await.unwrap();
        assert!(matches!(
            controller.advance(),
            Err(QuizError::InvalidTransition { page: Page::Question, .. })
        ));
        assert!(matches!(
            controller.start(amount(3)).await,
            Err(QuizError::InvalidTransition { page: Page::Question, .. })
        ));

        controller.submit_answer(Some("Lyon")).unwrap();
        assert!(matches!(
            controller.submit_answer(Some("Paris")),
            Err(QuizError::InvalidTransition { page: Page::Answer, .. })
        ));
        assert_eq!(controller.state().user_answers().len(), 1);
    }

    #[tokio::test]
    async fn prepare_twice_requests_one_token() {
        let (mut controller, api) = ready_controller().await;
        controller.prepare().await.unwrap();
        assert_eq!(api.token_requests(), 1);
    }
}
