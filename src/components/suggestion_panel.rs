use leptos::prelude::*;

use crate::search::panel::{PanelContent, SuggestionLink, NO_RESULTS_MESSAGE};

/// Dropdown under the search box. Stateless: renders whatever
/// [`PanelContent`] it is given and reports clicked suggestions.
#[component]
pub fn SuggestionPanel(
    #[prop(into)] content: Signal<PanelContent>,
    on_select: Callback<String>,
) -> impl IntoView {
    move || match content.get() {
        PanelContent::Hidden => None,
        PanelContent::NoResults => Some(
            view! {
                <div class="search-panel">
                    <p class="search-empty">{NO_RESULTS_MESSAGE}</p>
                </div>
            }
            .into_any(),
        ),
        PanelContent::Suggestions(links) => Some(
            view! {
                <div class="search-panel">
                    <ul>
                        {links
                            .into_iter()
                            .map(|link| view! { <SuggestionRow link=link on_select=on_select /> })
                            .collect_view()}
                    </ul>
                </div>
            }
            .into_any(),
        ),
    }
}

#[component]
fn SuggestionRow(link: SuggestionLink, on_select: Callback<String>) -> impl IntoView {
    let id = link.id.clone();

    view! {
        <li class="search-row">
            <a
                href=link.href
                on:click=move |ev: leptos::ev::MouseEvent| {
                    // The coordinator performs the navigation itself.
                    ev.prevent_default();
                    on_select.run(id.clone());
                }
            >
                {link.thumbnail_url.map(|src| view! { <img src=src class="search-thumb" /> })}
                <div>
                    <div class="search-title">{link.title}</div>
                    <div class="search-author">{link.author_name}</div>
                </div>
            </a>
        </li>
    }
}
