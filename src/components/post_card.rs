use leptos::prelude::*;

use crate::models::post::Post;
use crate::navigation::{category_path, post_path};

/// Card for a post in the home and search result grids.
#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let href = post_path(&post.id);
    let date = post.display_date();
    let author = post.author.clone();
    let cover = match post.cover_image {
        Some(src) => view! { <img src=src alt=post.title.clone() class="post-cover" /> }.into_any(),
        None => view! { <div class="post-cover post-cover-empty">"No image"</div> }.into_any(),
    };
    let avatar = match author.profile_image.clone() {
        Some(src) => view! { <img src=src class="avatar" /> }.into_any(),
        None => view! { <span class="avatar avatar-empty">{author.initial()}</span> }.into_any(),
    };

    view! {
        <div class="post-card">
            {cover}
            <div class="post-body">
                <div class="post-categories">
                    {post
                        .categories
                        .into_iter()
                        .map(|cat| view! { <a href=category_path(&cat.id) class="chip">{cat.name}</a> })
                        .collect_view()}
                </div>
                <h2 class="post-title">
                    <a href=href>{post.title}</a>
                </h2>
                <p class="post-excerpt">{post.content}</p>
                <div class="post-meta">
                    <span class="post-author">
                        {avatar}
                        {author.username}
                    </span>
                    <span>{date}</span>
                </div>
            </div>
        </div>
    }
}
