use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::app::use_api_client;
use crate::components::post_card::PostCard;
use crate::navigation::category_path;

/// Landing page: category chips and the latest posts, optionally filtered
/// by `?category=`.
#[component]
pub fn HomePage() -> impl IntoView {
    let query = use_query_map();
    let selected = Memo::new(move |_| query.read().get("category"));

    let api = use_api_client();
    let categories = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.list_categories().await }
        }
    });
    let posts = LocalResource::new(move || {
        let api = api.clone();
        let category = selected.get();
        async move { api.list_posts(category.as_deref()).await }
    });

    let chip_class = move |active: bool| if active { "chip chip-active" } else { "chip" };

    view! {
        <div class="home">
            <h1>"Welcome to the blog"</h1>
            <div class="category-bar">
                <a href="/" class=move || chip_class(selected.get().is_none())>"All"</a>
                {move || categories.get().map(|res| match res {
                    Ok(list) => list
                        .into_iter()
                        .map(|cat| {
                            let id = cat.id.clone();
                            view! {
                                <a
                                    href=category_path(&cat.id)
                                    class=move || chip_class(selected.get().as_deref() == Some(id.as_str()))
                                >
                                    {cat.name}
                                </a>
                            }
                        })
                        .collect_view()
                        .into_any(),
                    Err(e) => {
                        tracing::warn!("Failed to load categories: {e}");
                        view! { <span class="muted">"Categories unavailable"</span> }.into_any()
                    }
                })}
            </div>
            <Suspense fallback=|| view! { <p>"Loading posts..."</p> }>
                {move || posts.get().map(|res| match res {
                    Ok(list) if list.is_empty() => {
                        let message = if selected.get().is_some() {
                            "No posts in this category yet."
                        } else {
                            "No posts yet."
                        };
                        view! { <p class="empty">{message}</p> }.into_any()
                    }
                    Ok(list) => view! {
                        <div class="post-grid">
                            {list.into_iter().map(|post| view! { <PostCard post=post /> }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => view! {
                        <p class="error">"Failed to load posts: " {e.to_string()}</p>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
