use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use mockall::mock;
use tokio::sync::oneshot;

use quill::config::SearchConfig;
use quill::error::AppError;
use quill::models::search::SearchResultItem;
use quill::navigation::{NavigationRequest, Navigator};
use quill::search::client::SearchGateway;
use quill::search::coordinator::{PanelSnapshot, SearchCoordinator};
use quill::search::debounce::{Scheduler, TaskHandle};

mock! {
    pub Gateway {}

    #[async_trait(?Send)]
    impl SearchGateway for Gateway {
        async fn search_posts(&self, query: &str) -> Result<Vec<SearchResultItem>, AppError>;
    }
}

/// [`Scheduler`] on a tokio `LocalSet`. Pair with `start_paused = true` so
/// timers advance deterministically.
#[derive(Default)]
pub struct TokioScheduler {
    next_id: Cell<u64>,
    timers: Rc<RefCell<HashMap<u64, tokio::task::AbortHandle>>>,
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let timers = Rc::clone(&self.timers);
        let join = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            timers.borrow_mut().remove(&id);
            task();
        });
        self.timers.borrow_mut().insert(id, join.abort_handle());
        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) {
        if let Some(timer) = self.timers.borrow_mut().remove(&handle.0) {
            timer.abort();
        }
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(future);
    }
}

/// Gateway whose calls stay pending until the test resolves them, in any
/// order it likes.
#[derive(Default)]
pub struct ScriptedGateway {
    calls: RefCell<Vec<String>>,
    pending: RefCell<Vec<(String, oneshot::Sender<Result<Vec<SearchResultItem>, AppError>>)>>,
}

impl ScriptedGateway {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Complete the oldest pending call for `query`.
    pub fn resolve(&self, query: &str, outcome: Result<Vec<SearchResultItem>, AppError>) {
        let mut pending = self.pending.borrow_mut();
        let idx = pending
            .iter()
            .position(|(q, _)| q == query)
            .unwrap_or_else(|| panic!("no pending call for {query:?}"));
        let (_, tx) = pending.remove(idx);
        let _ = tx.send(outcome);
    }
}

#[async_trait(?Send)]
impl SearchGateway for ScriptedGateway {
    async fn search_posts(&self, query: &str) -> Result<Vec<SearchResultItem>, AppError> {
        let (tx, rx) = oneshot::channel();
        self.calls.borrow_mut().push(query.to_string());
        self.pending.borrow_mut().push((query.to_string(), tx));
        rx.await
            .unwrap_or_else(|_| Err(AppError::Network("request dropped".into())))
    }
}

/// Records navigation requests instead of routing.
#[derive(Default)]
pub struct RecordingNavigator {
    requests: RefCell<Vec<NavigationRequest>>,
}

impl RecordingNavigator {
    pub fn requests(&self) -> Vec<NavigationRequest> {
        self.requests.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        self.requests.borrow_mut().push(request);
    }
}

/// A coordinator wired to test doubles, plus every snapshot it rendered.
pub struct Harness {
    pub coordinator: SearchCoordinator,
    pub navigator: Rc<RecordingNavigator>,
    pub renders: Rc<RefCell<Vec<PanelSnapshot>>>,
}

impl Harness {
    pub fn new(gateway: Rc<dyn SearchGateway>) -> Self {
        let navigator = Rc::new(RecordingNavigator::default());
        let coordinator = SearchCoordinator::new(
            SearchConfig::default(),
            gateway,
            Rc::new(TokioScheduler::default()),
            navigator.clone(),
        );

        let renders = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&renders);
        coordinator.subscribe(move |s| sink.borrow_mut().push(s.clone()));

        Self {
            coordinator,
            navigator,
            renders,
        }
    }

    /// Feed keystrokes one character apart, `gap` between each.
    pub async fn type_text(&self, text: &str, gap: Duration) {
        let mut typed = String::new();
        for c in text.chars() {
            typed.push(c);
            self.coordinator.on_query_change(typed.as_str());
            tokio::time::sleep(gap).await;
        }
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        self.coordinator.snapshot()
    }
}

/// Wait past the 300 ms quiet interval.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(350)).await;
}

/// Let spawned tasks run without crossing any debounce deadline.
pub async fn flush() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

pub fn item(id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        id: id.to_string(),
        title: title.to_string(),
        author_name: "ayse".to_string(),
        thumbnail_url: None,
    }
}
