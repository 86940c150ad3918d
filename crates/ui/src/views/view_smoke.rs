use std::num::NonZeroU32;

use services::InMemoryTriviaApi;

use super::test_harness::{
    amount_option, question_pool, setup_quiz_harness, setup_quiz_harness_with_amount,
};
use crate::vm::QuizIntent;

fn two() -> NonZeroU32 {
    NonZeroU32::new(2).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn start_enables_once_token_is_held() {
    let mut harness = setup_quiz_harness(
        InMemoryTriviaApi::new()
            .with_token("tok")
            .with_questions(question_pool()),
    );
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("js-intro"), "missing intro in {html}");
    assert!(!html.contains("is-disabled"), "start still disabled in {html}");
    assert!(!html.contains("js-quiz-status"), "status shown on intro in {html}");
    assert_eq!(harness.api.token_requests(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn start_stays_disabled_without_token() {
    let mut harness = setup_quiz_harness(InMemoryTriviaApi::new().with_questions(question_pool()));
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Start(two()));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("js-intro"), "left intro in {html}");
    assert!(html.contains("js-start is-disabled"), "start enabled in {html}");
    assert!(harness.api.question_requests().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_runs_from_intro_to_outro() {
    let mut harness = setup_quiz_harness(
        InMemoryTriviaApi::new()
            .with_token("tok")
            .with_questions(question_pool()),
    );
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Start(two()));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("js-question"), "missing question in {html}");
    assert!(html.contains("Which planet is known as the Red Planet?"), "missing text in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");

    harness.dispatch(QuizIntent::Select("Mars".into()));
    harness.dispatch(QuizIntent::Submit);
    let html = harness.render();
    assert!(html.contains("js-question-feedback"), "missing feedback in {html}");
    assert!(html.contains("You got it!"), "missing praise in {html}");
    assert!(html.contains("Score: 1"), "score not updated in {html}");

    harness.dispatch(QuizIntent::Advance);
    harness.dispatch(QuizIntent::Select("Ag".into()));
    harness.dispatch(QuizIntent::Submit);
    let html = harness.render();
    assert!(
        html.contains("Too bad! The correct answer was: Au"),
        "missing correction in {html}"
    );

    harness.dispatch(QuizIntent::Advance);
    let html = harness.render();
    assert!(html.contains("js-outro"), "missing outro in {html}");
    assert!(html.contains("You scored 1 out of 2."), "missing summary in {html}");

    let requests = harness.api.question_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].token().map(|token| token.as_str()), Some("tok"));
}

#[tokio::test(flavor = "current_thread")]
async fn submit_without_selection_counts_as_wrong() {
    let mut harness = setup_quiz_harness(
        InMemoryTriviaApi::new()
            .with_token("tok")
            .with_questions(question_pool()),
    );
    harness.rebuild();
    harness.settle().await;
    harness.dispatch(QuizIntent::Start(two()));
    harness.settle().await;

    harness.dispatch(QuizIntent::Submit);

    let html = harness.render();
    assert!(
        html.contains("Too bad! The correct answer was: Mars"),
        "missing correction in {html}"
    );
    assert!(html.contains("Score: 0"), "score changed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unlisted_default_amount_is_offered_selected_and_requested() {
    let seven = NonZeroU32::new(7).unwrap();
    let mut harness = setup_quiz_harness_with_amount(
        InMemoryTriviaApi::new()
            .with_token("tok")
            .with_questions(question_pool()),
        seven,
    );
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    let option = amount_option(&html, 7).unwrap_or_else(|| panic!("no option 7 in {html}"));
    assert!(option.contains("selected"), "7 not selected in {html}");
    assert!(!option.contains("false"), "7 not selected in {html}");
    for listed in [5, 10, 15, 20] {
        let other = amount_option(&html, listed).unwrap_or_else(|| panic!("no option {listed}"));
        assert!(
            !other.contains("selected") || other.contains("false"),
            "{listed} also selected in {html}"
        );
    }

    harness.dispatch(QuizIntent::Start(seven));
    harness.settle().await;

    let requests = harness.api.question_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount(), seven);
}

#[tokio::test(flavor = "current_thread")]
async fn picking_an_amount_moves_the_selection() {
    let mut harness = setup_quiz_harness(
        InMemoryTriviaApi::new()
            .with_token("tok")
            .with_questions(question_pool()),
    );
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::SetAmount(NonZeroU32::new(15).unwrap()));

    let html = harness.render();
    let option = amount_option(&html, 15).unwrap_or_else(|| panic!("no option 15 in {html}"));
    assert!(option.contains("selected") && !option.contains("false"), "15 not selected in {html}");
}
