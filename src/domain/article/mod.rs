pub mod entity;
pub mod query;
pub mod related;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{Article, ArticleStatusUpdate, NewArticle};
pub use query::{ArticleOrdering, ArticleQuery, Visibility, Window};
pub use related::{RelatedContentRanker, TagOverlap};
pub use repository::{ArticleReadRepository, ArticleWriteRepository, CommentedArticle};
pub use value_objects::{
    ArticleBody, ArticleId, ArticleSlug, ArticleStatus, ArticleTitle, PublishDate,
};
