use std::num::NonZeroU32;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{InMemoryTriviaApi, QuizOptions, RawQuestion, TriviaApi};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizScreen;
use crate::views::quiz::QuizTestHandles;
use crate::vm::QuizIntent;

#[derive(Clone)]
struct TestApp {
    api: InMemoryTriviaApi,
    default_amount: NonZeroU32,
}

impl UiApp for TestApp {
    fn trivia_api(&self) -> Arc<dyn TriviaApi> {
        Arc::new(self.api.clone())
    }

    fn quiz_options(&self) -> QuizOptions {
        QuizOptions::default()
    }

    fn default_amount(&self) -> NonZeroU32 {
        self.default_amount
    }
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizScreenHarness(props: QuizHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizScreen {} }
}

pub struct QuizHarness {
    pub dom: VirtualDom,
    pub api: InMemoryTriviaApi,
    handles: QuizTestHandles,
}

impl QuizHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned tasks run to completion against the in-memory service.
    pub async fn settle(&mut self) {
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

/// The `<option>` tag of the quantity picker carrying `value`, if rendered.
pub fn amount_option<'a>(html: &'a str, value: u32) -> Option<&'a str> {
    let needle = format!("value=\"{value}\"");
    let at = html.find(&needle)?;
    let start = html[..at].rfind("<option")?;
    let end = at + html[at..].find('>')?;
    Some(&html[start..=end])
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn question_pool() -> Vec<RawQuestion> {
    vec![
        RawQuestion::new(
            "Which planet is known as the Red Planet?",
            ["Venus", "Jupiter", "Saturn"],
            "Mars",
        ),
        RawQuestion::new(
            "What is the chemical symbol for gold?",
            ["Ag", "Gd", "Go"],
            "Au",
        ),
    ]
}

pub fn setup_quiz_harness(api: InMemoryTriviaApi) -> QuizHarness {
    setup_quiz_harness_with_amount(api, NonZeroU32::new(10).expect("ten is non-zero"))
}

pub fn setup_quiz_harness_with_amount(
    api: InMemoryTriviaApi,
    default_amount: NonZeroU32,
) -> QuizHarness {
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizScreenHarness,
        QuizHarnessProps {
            app: Arc::new(TestApp {
                api: api.clone(),
                default_amount,
            }),
            handles: handles.clone(),
        },
    );

    QuizHarness { dom, api, handles }
}
