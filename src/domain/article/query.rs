// src/domain/article/query.rs
//! Explicit query specifications handed to the article store.
use crate::domain::article::value_objects::ArticleId;
use crate::domain::tag::TagSlug;

/// Which lifecycle states a read may observe. There is no implicit default:
/// every store call names the view it reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Published,
    IncludeDrafts,
}

impl Visibility {
    pub fn admits(self, published: bool) -> bool {
        match self {
            Visibility::Published => published,
            Visibility::IncludeDrafts => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleOrdering {
    /// `publish` descending, then id descending.
    #[default]
    NewestFirst,
    /// `publish` ascending, then id ascending.
    OldestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub visibility: Visibility,
    pub tag: Option<TagSlug>,
    pub exclude: Option<ArticleId>,
    pub ordering: ArticleOrdering,
    pub window: Option<Window>,
}

impl ArticleQuery {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            tag: None,
            exclude: None,
            ordering: ArticleOrdering::NewestFirst,
            window: None,
        }
    }

    pub fn published() -> Self {
        Self::new(Visibility::Published)
    }

    pub fn with_tag(mut self, tag: Option<TagSlug>) -> Self {
        self.tag = tag;
        self
    }

    pub fn excluding(mut self, id: ArticleId) -> Self {
        self.exclude = Some(id);
        self
    }

    pub fn ordered(mut self, ordering: ArticleOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn window(mut self, offset: u64, limit: u64) -> Self {
        self.window = Some(Window { offset, limit });
        self
    }

    /// Same filters without ordering/window, for counting.
    pub fn unwindowed(&self) -> Self {
        Self {
            window: None,
            ..self.clone()
        }
    }
}
