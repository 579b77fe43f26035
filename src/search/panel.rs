use crate::models::search::SearchResultItem;
use crate::navigation::post_path;

/// Literal message shown when a lookup matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results.";

/// One navigable row of the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionLink {
    pub id: String,
    pub href: String,
    pub title: String,
    pub author_name: String,
    pub thumbnail_url: Option<String>,
}

/// What the live suggestion panel should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Hidden,
    NoResults,
    Suggestions(Vec<SuggestionLink>),
}

impl PanelContent {
    pub fn new(items: &[SearchResultItem], visible: bool) -> Self {
        if !visible {
            return PanelContent::Hidden;
        }
        if items.is_empty() {
            return PanelContent::NoResults;
        }
        PanelContent::Suggestions(
            items
                .iter()
                .map(|item| SuggestionLink {
                    id: item.id.clone(),
                    href: post_path(&item.id),
                    title: item.title.clone(),
                    author_name: item.author_name.clone(),
                    thumbnail_url: item.thumbnail_url.clone(),
                })
                .collect(),
        )
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, PanelContent::Hidden)
    }
}
