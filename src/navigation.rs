/// A navigation the search box asks its host to perform.
///
/// The search core never touches the router itself; it only emits these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Full results view for the literal query text.
    SearchResults { query: String },
    /// Detail view of a single post.
    PostDetail { id: String },
}

impl NavigationRequest {
    /// The in-app path for this request.
    ///
    /// The query is percent-encoded only as far as URL transport requires;
    /// the results view decodes it back to the verbatim text.
    pub fn path(&self) -> String {
        match self {
            NavigationRequest::SearchResults { query } => {
                format!("/search?q={}", urlencoding::encode(query))
            }
            NavigationRequest::PostDetail { id } => post_path(id),
        }
    }
}

pub fn post_path(id: &str) -> String {
    format!("/posts/{}", urlencoding::encode(id))
}

pub fn category_path(id: &str) -> String {
    format!("/?category={}", urlencoding::encode(id))
}

/// Something able to fulfil navigation requests (normally the router).
pub trait Navigator {
    fn navigate(&self, request: NavigationRequest);
}

/// [`Navigator`] that hands the request's path to a router callback,
/// typically the one returned by `use_navigate`.
pub struct RouterNavigator<F> {
    go: F,
}

impl<F: Fn(&str)> RouterNavigator<F> {
    pub fn new(go: F) -> Self {
        Self { go }
    }
}

impl<F: Fn(&str)> Navigator for RouterNavigator<F> {
    fn navigate(&self, request: NavigationRequest) {
        tracing::debug!(?request, "Navigation requested");
        (self.go)(&request.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_path_encodes_query() {
        let req = NavigationRequest::SearchResults {
            query: "rust & wasm".to_string(),
        };
        assert_eq!(req.path(), "/search?q=rust%20%26%20wasm");
    }

    #[test]
    fn test_search_results_path_keeps_whitespace() {
        let req = NavigationRequest::SearchResults {
            query: " test ".to_string(),
        };
        assert_eq!(req.path(), "/search?q=%20test%20");
    }

    #[test]
    fn test_post_detail_path() {
        let req = NavigationRequest::PostDetail {
            id: "65f0c2".to_string(),
        };
        assert_eq!(req.path(), "/posts/65f0c2");
    }

    #[test]
    fn test_post_path_encodes_id() {
        assert_eq!(post_path("a/b c"), "/posts/a%2Fb%20c");
        assert_eq!(
            NavigationRequest::PostDetail { id: "a/b".to_string() }.path(),
            "/posts/a%2Fb"
        );
    }

    #[test]
    fn test_router_navigator_uses_path() {
        let seen = std::cell::RefCell::new(Vec::new());
        let navigator = RouterNavigator::new(|path: &str| seen.borrow_mut().push(path.to_string()));
        navigator.navigate(NavigationRequest::PostDetail { id: "7".to_string() });
        navigator.navigate(NavigationRequest::SearchResults { query: "go".to_string() });
        assert_eq!(*seen.borrow(), vec!["/posts/7", "/search?q=go"]);
    }

    #[test]
    fn test_category_path() {
        assert_eq!(category_path("c1"), "/?category=c1");
    }
}
