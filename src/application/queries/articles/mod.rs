mod detail;
mod list;
mod related;
mod search;
mod service;
mod stats;

pub use detail::GetArticleDetailQuery;
pub use list::ListArticlesQuery;
pub use related::RelatedArticlesQuery;
pub use search::SearchArticlesQuery;
pub use service::{ArticleQueryService, ArticleQuerySettings};
pub use stats::BlogStatsQuery;
