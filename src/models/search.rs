use serde::{Deserialize, Serialize};

use crate::models::post::Post;

/// Minimal projection of a post, used only by the live suggestion panel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub thumbnail_url: Option<String>,
}

impl From<Post> for SearchResultItem {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author_name: post.author.username,
            thumbnail_url: post.cover_image,
        }
    }
}
