use std::num::NonZeroU32;

use dioxus::prelude::*;

use services::{QuizController, QuizError, QuizView};

use crate::context::AppContext;
use crate::vm::{AnswerChoiceVm, QuizIntent, RegionVm, amount_choices, map_quiz_view};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let default_amount = ctx.default_amount().get();
    let controller = use_signal(|| Some(ctx.new_controller()));
    let view = use_signal(|| {
        controller
            .peek()
            .as_ref()
            .map(QuizController::view)
            .unwrap_or_default()
    });
    let selected = use_signal(|| None::<String>);
    let amount = use_signal(|| default_amount);

    use_future(move || async move {
        prepare_quiz(controller, view).await;
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut selected = selected;
        let mut amount = amount;

        match intent {
            QuizIntent::SetAmount(value) => amount.set(value.get()),
            QuizIntent::Select(value) => selected.set(Some(value)),
            QuizIntent::Start(value) => {
                spawn(start_quiz(controller, view, selected, value));
            }
            QuizIntent::Submit => {
                let choice = selected.peek().clone();
                apply_transition(controller, view, |quiz| {
                    quiz.submit_answer(choice.as_deref())
                });
            }
            QuizIntent::Advance => {
                if apply_transition(controller, view, QuizController::advance) {
                    selected.set(None);
                }
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let vm = map_quiz_view(&view.read());
    let region_class = vm.region_class();
    let selected_value = selected();
    let amount_value = amount();

    rsx! {
        div { class: "page quiz-page",
            if vm.score_label.is_some() || vm.progress_label.is_some() {
                div { class: "quiz-status js-quiz-status",
                    if let Some(label) = vm.score_label.clone() {
                        span { class: "js-score", "{label}" }
                    }
                    if let Some(label) = vm.progress_label.clone() {
                        span { class: "js-progress", "{label}" }
                    }
                }
            }
            div { class: "quiz-region {region_class}",
                match vm.region.clone() {
                    Some(RegionVm::Intro { start_enabled }) => rsx! {
                        h1 { "Trivia Quiz" }
                        p { "Test your knowledge with questions from the Open Trivia Database." }
                        StartControls { start_enabled, amount: amount_value, on_intent: dispatch_intent }
                    },
                    Some(RegionVm::Question { text_html, choices }) => rsx! {
                        QuestionRegion {
                            text_html,
                            choices,
                            selected: selected_value.clone(),
                            on_intent: dispatch_intent,
                        }
                    },
                    Some(RegionVm::Feedback { message_html, correct }) => rsx! {
                        FeedbackRegion { message_html, correct, on_intent: dispatch_intent }
                    },
                    Some(RegionVm::Outro { summary, start_enabled }) => rsx! {
                        h2 { "All done!" }
                        p { class: "quiz-summary", "{summary}" }
                        StartControls { start_enabled, amount: amount_value, on_intent: dispatch_intent }
                    },
                    None => rsx! {},
                }
            }
        }
    }
}

#[component]
fn StartControls(start_enabled: bool, amount: u32, on_intent: EventHandler<QuizIntent>) -> Element {
    let choices = amount_choices(amount);
    let button_class = if start_enabled {
        "js-start"
    } else {
        "js-start is-disabled"
    };

    rsx! {
        div { class: "start-controls",
            label { r#for: "js-question-quantity", "How many questions?" }
            select {
                id: "js-question-quantity",
                onchange: move |evt: FormEvent| {
                    if let Some(value) = evt.value().parse::<u32>().ok().and_then(NonZeroU32::new) {
                        on_intent.call(QuizIntent::SetAmount(value));
                    }
                },
                for choice in choices {
                    option { key: "{choice}", value: "{choice}", selected: choice == amount, "{choice}" }
                }
            }
            button {
                class: "{button_class}",
                r#type: "button",
                disabled: !start_enabled,
                onclick: move |_| {
                    if let Some(value) = NonZeroU32::new(amount) {
                        on_intent.call(QuizIntent::Start(value));
                    }
                },
                "Start Quiz"
            }
        }
    }
}

#[component]
fn QuestionRegion(
    text_html: String,
    choices: Vec<AnswerChoiceVm>,
    selected: Option<String>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        fieldset { class: "question",
            legend { class: "question-text", dangerous_inner_html: "{text_html}" }
            ul { class: "answers",
                for (index, choice) in choices.iter().enumerate() {
                    AnswerItem {
                        key: "{index}",
                        choice: choice.clone(),
                        checked: selected.as_deref() == Some(choice.value.as_str()),
                        on_intent,
                    }
                }
            }
            button {
                class: "js-submit",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Submit),
                "Submit"
            }
        }
    }
}

#[component]
fn AnswerItem(choice: AnswerChoiceVm, checked: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let value = choice.value.clone();

    rsx! {
        li { class: "answer-item",
            label {
                input {
                    r#type: "radio",
                    name: "answers",
                    value: "{choice.value}",
                    checked: checked,
                    onchange: move |_| on_intent.call(QuizIntent::Select(value.clone())),
                }
                span { class: "answer-text", dangerous_inner_html: "{choice.label_html}" }
            }
        }
    }
}

#[component]
fn FeedbackRegion(message_html: String, correct: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let tone = if correct {
        "feedback--correct"
    } else {
        "feedback--incorrect"
    };

    rsx! {
        p { class: "feedback {tone}", dangerous_inner_html: "{message_html}" }
        button {
            class: "continue js-continue",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::Advance),
            "Continue"
        }
    }
}

/// Obtain the session token while the controller is out of its signal.
///
/// Intents arriving meanwhile find no controller and are dropped.
async fn prepare_quiz(
    mut controller: Signal<Option<QuizController>>,
    mut view: Signal<QuizView>,
) {
    let taken = controller.write().take();
    let Some(mut quiz) = taken else {
        return;
    };

    if let Err(err) = quiz.prepare().await {
        tracing::warn!(error = %err, "quiz unavailable");
    }

    view.set(quiz.view());
    controller.set(Some(quiz));
}

/// Run a start with the network await outside of any signal borrow.
async fn start_quiz(
    mut controller: Signal<Option<QuizController>>,
    mut view: Signal<QuizView>,
    mut selected: Signal<Option<String>>,
    amount: NonZeroU32,
) {
    let begun = {
        let mut guard = controller.write();
        let Some(quiz) = guard.as_mut() else {
            return;
        };
        match quiz.begin_start(amount) {
            Ok(request) => {
                view.set(quiz.view());
                Some((request, quiz.fetcher()))
            }
            Err(err) => {
                tracing::debug!(error = %err, "start ignored");
                None
            }
        }
    };
    let Some((request, fetcher)) = begun else {
        return;
    };

    let fetched = fetcher.fetch(&request).await;

    let mut guard = controller.write();
    let Some(quiz) = guard.as_mut() else {
        return;
    };
    match quiz.complete_start(fetched) {
        Ok(next) => {
            selected.set(None);
            view.set(next);
        }
        Err(err) => {
            tracing::warn!(error = %err, "quiz did not start");
            view.set(quiz.view());
        }
    }
}

fn apply_transition(
    mut controller: Signal<Option<QuizController>>,
    mut view: Signal<QuizView>,
    transition: impl FnOnce(&mut QuizController) -> Result<QuizView, QuizError>,
) -> bool {
    let mut guard = controller.write();
    let Some(quiz) = guard.as_mut() else {
        return false;
    };
    match transition(quiz) {
        Ok(next) => {
            view.set(next);
            true
        }
        Err(err) => {
            tracing::debug!(error = %err, "transition rejected");
            false
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
