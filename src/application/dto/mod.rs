pub mod articles;
pub mod comments;
pub mod pagination;
pub mod search;
pub mod serde_time;
pub mod share;
pub mod stats;

pub use articles::{ArticleDetailDto, ArticleDto, AuthorDto, TagDto};
pub use comments::CommentDto;
pub use pagination::Page;
pub use search::{SearchHitDto, SearchResultsDto};
pub use share::ShareReceiptDto;
pub use stats::{BlogStatsDto, CommentedArticleDto};
