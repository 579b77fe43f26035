use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::app::use_api_client;
use crate::components::post_card::PostCard;

/// Full search results for `?q=`. Always queries the backend itself and
/// never reuses what the live panel fetched.
#[component]
pub fn SearchResultsPage() -> impl IntoView {
    let query = use_query_map();
    let q = Memo::new(move |_| query.read().get("q").unwrap_or_default());

    let api = use_api_client();
    let results = LocalResource::new(move || {
        let api = api.clone();
        let q = q.get();
        async move {
            if q.is_empty() {
                return Ok(Vec::new());
            }
            api.search(&q).await
        }
    });

    view! {
        <div class="search-results-page">
            <h1>"Search results for \"" {move || q.get()} "\""</h1>
            <Suspense fallback=|| view! { <p>"Searching..."</p> }>
                {move || results.get().map(|res| match res {
                    Ok(posts) if posts.is_empty() => view! {
                        <p class="empty">"Sorry, no posts matched your search."</p>
                    }.into_any(),
                    Ok(posts) => view! {
                        <div class="post-grid">
                            {posts.into_iter().map(|post| view! { <PostCard post=post /> }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => {
                        tracing::error!(query = %q.get_untracked(), "Search failed: {e}");
                        view! { <p class="empty">"Sorry, no posts matched your search."</p> }.into_any()
                    }
                })}
            </Suspense>
        </div>
    }
}
