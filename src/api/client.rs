use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::errors::error_from_status;
use crate::error::AppError;
use crate::models::post::{Category, Comment, Post, PostsPage, User};
use crate::models::search::SearchResultItem;
use crate::search::client::SearchGateway;
use crate::session::SessionContext;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of a successful `POST /users/login`: the user record plus its token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: User,
}

/// Thin client over the blog REST backend.
///
/// Holds the bearer token of the current session, if any; rebuild it with
/// [`ApiClient::with_token`] when the session changes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn search_url(&self, query: &str) -> String {
        self.url(&format!("/posts/search?q={}", urlencoding::encode(query)))
    }

    pub fn posts_url(&self, category: Option<&str>) -> String {
        match category {
            Some(id) => self.url(&format!("/posts?category={}", urlencoding::encode(id))),
            None => self.url("/posts"),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, AppError> {
        let response = self.authorize(self.http.get(&url)).send().await?;
        Self::decode(&url, response).await
    }

    async fn decode<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = error_from_status(status.as_u16(), &body);
            tracing::warn!(%url, "API request failed: {err}");
            return Err(err);
        }
        Ok(response.json::<T>().await?)
    }

    /// `GET /posts/search?q=`: full posts matching the query.
    pub async fn search(&self, query: &str) -> Result<Vec<Post>, AppError> {
        self.get_json(self.search_url(query)).await
    }

    /// `GET /posts`, optionally narrowed to one category.
    pub async fn list_posts(&self, category: Option<&str>) -> Result<Vec<Post>, AppError> {
        let page: PostsPage = self.get_json(self.posts_url(category)).await?;
        Ok(page.posts)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, AppError> {
        self.get_json(self.url(&format!("/posts/{}", urlencoding::encode(id))))
            .await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.get_json(self.url("/categories")).await
    }

    pub async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        self.get_json(self.url(&format!(
            "/posts/{}/comments",
            urlencoding::encode(post_id)
        )))
        .await
    }

    /// `POST /users/login`. The caller turns the response into a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let url = self.url("/users/login");
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        Self::decode(&url, response).await
    }
}

#[async_trait(?Send)]
impl SearchGateway for ApiClient {
    async fn search_posts(&self, query: &str) -> Result<Vec<SearchResultItem>, AppError> {
        let posts = self.search(query).await?;
        Ok(posts.into_iter().map(SearchResultItem::from).collect())
    }
}

/// Search gateway that picks up the current session's token on every call,
/// so lookups made after login are authorized without remounting anything.
///
/// One HTTP client is shared by every lookup; only the token is per call.
pub struct SessionGateway {
    client: ApiClient,
    session: SessionContext,
}

impl SessionGateway {
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            client: ApiClient::new(base_url),
            session,
        }
    }
}

#[async_trait(?Send)]
impl SearchGateway for SessionGateway {
    async fn search_posts(&self, query: &str) -> Result<Vec<SearchResultItem>, AppError> {
        self.client
            .clone()
            .with_token(self.session.token())
            .search_posts(query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("https://api.example.com/api/");
        assert_eq!(client.base_url(), "https://api.example.com/api");
        assert_eq!(client.url("/categories"), "https://api.example.com/api/categories");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = ApiClient::new("http://localhost:5000/api");
        assert_eq!(
            client.search_url("c# & rust"),
            "http://localhost:5000/api/posts/search?q=c%23%20%26%20rust"
        );
    }

    #[test]
    fn test_posts_url_with_category() {
        let client = ApiClient::new("http://localhost:5000/api");
        assert_eq!(client.posts_url(None), "http://localhost:5000/api/posts");
        assert_eq!(
            client.posts_url(Some("65ab")),
            "http://localhost:5000/api/posts?category=65ab"
        );
    }

    #[test]
    fn test_login_response_flattens_user() {
        let json = r#"{
            "_id": "u1",
            "username": "ayse",
            "email": "ayse@example.com",
            "role": "admin",
            "token": "jwt-token"
        }"#;
        let login: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(login.token, "jwt-token");
        assert_eq!(login.user.username, "ayse");
        assert!(login.user.is_admin());
    }
}
