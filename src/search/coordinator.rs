use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::SearchConfig;
use crate::models::search::SearchResultItem;
use crate::navigation::Navigator;
use crate::search::client::SearchGateway;
use crate::search::debounce::{Debouncer, Scheduler};
use crate::search::state::{SearchEffect, SearchEvent, SearchPhase, SearchSession};

/// What the suggestion panel needs to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSnapshot {
    pub query: String,
    pub phase: SearchPhase,
    pub items: Vec<SearchResultItem>,
    pub visible: bool,
}

impl PanelSnapshot {
    fn of(session: &SearchSession) -> Self {
        Self {
            query: session.query().to_string(),
            phase: session.phase(),
            items: session.results().to_vec(),
            visible: session.visible(),
        }
    }
}

type Listener = Box<dyn Fn(&PanelSnapshot)>;

struct Inner {
    session: RefCell<SearchSession>,
    debouncer: Debouncer,
    scheduler: Rc<dyn Scheduler>,
    gateway: Rc<dyn SearchGateway>,
    navigator: Rc<dyn Navigator>,
    listener: RefCell<Option<Listener>>,
}

/// Drives a [`SearchSession`]: feeds it UI events, runs the effects it asks
/// for (timers, lookups, navigation) and reports every change to the panel.
///
/// Cloning is cheap and yields a handle to the same search box.
#[derive(Clone)]
pub struct SearchCoordinator {
    inner: Rc<Inner>,
}

impl SearchCoordinator {
    pub fn new(
        config: SearchConfig,
        gateway: Rc<dyn SearchGateway>,
        scheduler: Rc<dyn Scheduler>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                session: RefCell::new(SearchSession::new(config)),
                debouncer: Debouncer::new(Rc::clone(&scheduler)),
                scheduler,
                gateway,
                navigator,
                listener: RefCell::new(None),
            }),
        }
    }

    /// Register the render callback. It is invoked after every event.
    pub fn subscribe(&self, listener: impl Fn(&PanelSnapshot) + 'static) {
        *self.inner.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot::of(&self.inner.session.borrow())
    }

    pub fn on_query_change(&self, text: impl Into<String>) {
        self.dispatch(SearchEvent::QueryChanged(text.into()));
    }

    pub fn on_submit(&self) {
        self.dispatch(SearchEvent::Submitted);
    }

    pub fn on_focus(&self) {
        self.dispatch(SearchEvent::Focused);
    }

    pub fn on_dismiss(&self) {
        self.dispatch(SearchEvent::Dismissed);
    }

    pub fn on_select(&self, id: impl Into<String>) {
        self.dispatch(SearchEvent::SuggestionSelected { id: id.into() });
    }

    fn dispatch(&self, event: SearchEvent) {
        Inner::dispatch(&self.inner, event);
    }
}

impl Inner {
    fn dispatch(this: &Rc<Inner>, event: SearchEvent) {
        let (effects, snapshot) = {
            let mut session = this.session.borrow_mut();
            let effects = session.apply(event);
            (effects, PanelSnapshot::of(&session))
        };

        for effect in effects {
            Inner::run(this, effect);
        }

        if let Some(listener) = this.listener.borrow().as_ref() {
            listener(&snapshot);
        }
    }

    fn run(this: &Rc<Inner>, effect: SearchEffect) {
        match effect {
            SearchEffect::ScheduleDebounce { ticket, delay } => {
                let weak = Rc::downgrade(this);
                this.debouncer.restart(
                    delay,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.debouncer.fired();
                            Inner::dispatch(&inner, SearchEvent::DebounceElapsed { ticket });
                        }
                    }),
                );
            }
            SearchEffect::CancelDebounce => this.debouncer.cancel(),
            SearchEffect::Fetch { request, query } => {
                tracing::debug!(?request, %query, "Dispatching live search");
                let gateway = Rc::clone(&this.gateway);
                let weak: Weak<Inner> = Rc::downgrade(this);
                this.scheduler.spawn(Box::pin(async move {
                    let outcome = gateway.search_posts(&query).await;
                    if let Some(inner) = weak.upgrade() {
                        Inner::dispatch(&inner, SearchEvent::ResultsArrived { request, outcome });
                    }
                }));
            }
            SearchEffect::Navigate(request) => this.navigator.navigate(request),
        }
    }
}
