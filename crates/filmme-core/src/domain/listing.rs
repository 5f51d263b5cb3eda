use super::{Category, PageRequest};

/// Sort order of a post listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostOrdering {
    /// Newest first.
    #[default]
    Latest,
    /// Most viewed first.
    Popular,
    /// Most liked first.
    MostLiked,
}

impl PostOrdering {
    /// Read the `ordering` query parameter. Unrecognised values fall back to
    /// newest first.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some("popular") => PostOrdering::Popular,
            Some("like") => PostOrdering::MostLiked,
            _ => PostOrdering::Latest,
        }
    }
}

/// A filtered, ordered, paginated post listing.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub category: Category,
    pub ordering: PostOrdering,
    /// Case-insensitive title substring. Never blank.
    pub search: Option<String>,
    pub page: PageRequest,
}

impl PostQuery {
    pub fn new(
        category: Category,
        ordering: PostOrdering,
        search: Option<&str>,
        page: PageRequest,
    ) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            category,
            ordering,
            search,
            page,
        }
    }

    /// Whether a title satisfies the search term.
    pub fn matches_title(&self, title: &str) -> bool {
        match &self.search {
            Some(term) => title.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }
}
