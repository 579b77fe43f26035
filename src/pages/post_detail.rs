use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::use_api_client;
use crate::models::post::Comment;
use crate::navigation::category_path;

#[component]
pub fn PostDetailPage() -> impl IntoView {
    let params = use_params_map();
    let id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let api = use_api_client();
    let post = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            let id = id.get();
            async move { api.get_post(&id).await }
        }
    });
    let comments = LocalResource::new(move || {
        let api = api.clone();
        let id = id.get();
        async move { api.list_comments(&id).await }
    });

    view! {
        <Suspense fallback=|| view! { <p>"Loading post..."</p> }>
            {move || post.get().map(|res| match res {
                Ok(post) => view! {
                    <article class="post-detail">
                        {post.cover_image.map(|src| view! { <img src=src class="post-detail-cover" /> })}
                        <div class="post-categories">
                            {post.categories.into_iter().map(|cat| view! {
                                <a href=category_path(&cat.id) class="chip">{cat.name}</a>
                            }).collect_view()}
                        </div>
                        <h1>{post.title}</h1>
                        <p class="post-meta">
                            <span>{post.author.username}</span>
                            " · "
                            <span>{post.created_at.format("%d.%m.%Y").to_string()}</span>
                        </p>
                        <div class="post-content">{post.content}</div>
                    </article>
                }.into_any(),
                Err(e) => view! {
                    <p class="error">"Post could not be loaded: " {e.to_string()}</p>
                }.into_any(),
            })}
        </Suspense>
        <section class="comments">
            <h2>"Comments"</h2>
            <Suspense fallback=|| view! { <p>"Loading comments..."</p> }>
                {move || comments.get().map(|res| match res {
                    Ok(list) if list.is_empty() => view! {
                        <p class="empty">"No comments yet."</p>
                    }.into_any(),
                    Ok(list) => view! {
                        <ul>{list.into_iter().map(|c| view! { <CommentRow comment=c /> }).collect_view()}</ul>
                    }.into_any(),
                    Err(e) => {
                        tracing::warn!("Failed to load comments: {e}");
                        view! { <p class="muted">"Comments are unavailable."</p> }.into_any()
                    }
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn CommentRow(comment: Comment) -> impl IntoView {
    view! {
        <li class="comment">
            <div class="comment-author">
                {comment.author.username}
                <span class="muted">{comment.created_at.format("%d.%m.%Y %H:%M").to_string()}</span>
            </div>
            <p>{comment.text}</p>
        </li>
    }
}
