use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsCast;

use crate::api::client::SessionGateway;
use crate::components::suggestion_panel::SuggestionPanel;
use crate::config::ClientConfig;
use crate::navigation::RouterNavigator;
use crate::search::coordinator::SearchCoordinator;
use crate::search::debounce::BrowserScheduler;
use crate::search::panel::PanelContent;
use crate::session::SessionContext;

/// Navigation-bar search box with live suggestions.
///
/// All decisions live in [`SearchCoordinator`]; this component only forwards
/// DOM events to it and mirrors its snapshots into a signal.
#[component]
pub fn SearchBar() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let coordinator = SearchCoordinator::new(
        config.search,
        Rc::new(SessionGateway::new(config.api_base_url.clone(), session)),
        Rc::new(BrowserScheduler::new()),
        Rc::new(RouterNavigator::new(move |path: &str| {
            navigate(path, Default::default())
        })),
    );

    let snapshot = RwSignal::new(coordinator.snapshot());
    coordinator.subscribe(move |s| snapshot.set(s.clone()));
    let coordinator = StoredValue::new_local(coordinator);

    let container = NodeRef::<leptos::html::Div>::new();

    // Clicks anywhere outside the input and dropdown close the panel.
    let outside_click = window_event_listener(leptos::ev::click, move |ev| {
        let inside = match (container.get_untracked(), ev.target()) {
            (Some(el), Some(target)) => target
                .dyn_ref::<web_sys::Node>()
                .is_some_and(|node| el.contains(Some(node))),
            _ => false,
        };
        if !inside {
            coordinator.with_value(|c| c.on_dismiss());
        }
    });
    on_cleanup(move || outside_click.remove());

    let content = Signal::derive(move || snapshot.with(|s| PanelContent::new(&s.items, s.visible)));
    let on_select = Callback::new(move |id: String| {
        coordinator.with_value(|c| c.on_select(id));
    });

    view! {
        <div class="search-container" node_ref=container>
            <form on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                coordinator.with_value(|c| c.on_submit());
            }>
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search..."
                    prop:value=move || snapshot.with(|s| s.query.clone())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        coordinator.with_value(|c| c.on_query_change(text));
                    }
                    on:focus=move |_| coordinator.with_value(|c| c.on_focus())
                />
            </form>
            <SuggestionPanel content=content on_select=on_select />
        </div>
    }
}
