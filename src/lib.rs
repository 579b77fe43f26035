pub mod app;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod models {
    pub mod post;
    pub mod search;
}
pub mod api {
    pub mod client;
    pub mod errors;
}
pub mod search {
    pub mod client;
    pub mod coordinator;
    pub mod debounce;
    pub mod panel;
    pub mod state;
}
pub mod components {
    pub mod post_card;
    pub mod search_bar;
    pub mod suggestion_panel;
}
pub mod pages {
    pub mod home;
    pub mod login;
    pub mod post_detail;
    pub mod search_results;
}
