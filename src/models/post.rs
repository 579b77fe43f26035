use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blocked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Uppercased first letter of the username, used when there is no avatar.
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A full post record as served by `GET /posts/{id}` and the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub author: User,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Creation date in the day-first format the site uses.
    pub fn display_date(&self) -> String {
        self.created_at.format("%d.%m.%Y").to_string()
    }
}

/// Envelope returned by `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub author: User,
    pub post: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_JSON: &str = r#"{
        "_id": "p1",
        "title": "Learning Rust",
        "content": "Ownership first.",
        "author": { "_id": "u1", "username": "ayse", "role": "admin" },
        "categories": [{ "_id": "c1", "name": "Rust" }],
        "createdAt": "2024-03-05T10:00:00.000Z",
        "updatedAt": "2024-03-06T10:00:00.000Z"
    }"#;

    #[test]
    fn test_post_deserializes_backend_shape() {
        let post: Post = serde_json::from_str(POST_JSON).unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.author.username, "ayse");
        assert!(post.author.is_admin());
        assert_eq!(post.cover_image, None);
        assert_eq!(post.categories[0].name, "Rust");
        assert_eq!(post.display_date(), "05.03.2024");
    }

    #[test]
    fn test_user_defaults() {
        let user: User = serde_json::from_str(r#"{ "_id": "u2", "username": "mehmet" }"#).unwrap();
        assert!(!user.is_admin());
        assert_eq!(user.initial(), "M");
        assert_eq!(user.role, None);
    }

    #[test]
    fn test_posts_page_missing_list() {
        let page: PostsPage = serde_json::from_str("{}").unwrap();
        assert!(page.posts.is_empty());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::User.to_string(), "user");
    }
}
