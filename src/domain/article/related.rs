// src/domain/article/related.rs
use crate::domain::article::{Article, ArticleId, ArticleReadRepository, Visibility};
use crate::domain::tag::TagId;
use crate::domain::errors::DomainResult;
use std::sync::Arc;

pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// A candidate article and how many tags it shares with the source article.
#[derive(Debug, Clone)]
pub struct TagOverlap {
    pub article: Article,
    pub shared_tags: u32,
}

/// Computes overlaps for stores that hold articles in memory.
pub fn collect_overlaps<'a>(
    exclude: ArticleId,
    tags: &[TagId],
    pool: impl IntoIterator<Item = &'a Article>,
    visibility: Visibility,
) -> Vec<TagOverlap> {
    pool.into_iter()
        .filter(|candidate| candidate.id != exclude)
        .filter(|candidate| visibility.admits(candidate.is_published()))
        .filter_map(|candidate| {
            let shared = u32::try_from(candidate.tags.count_shared(tags)).unwrap_or(u32::MAX);
            (shared > 0).then(|| TagOverlap {
                article: candidate.clone(),
                shared_tags: shared,
            })
        })
        .collect()
}

/// Orders candidates by shared-tag count, then newest `publish`, then id,
/// and keeps at most `limit`. Candidates that are the source itself, not
/// published, or share no tag are discarded.
pub fn rank_related(source: &Article, mut candidates: Vec<TagOverlap>, limit: usize) -> Vec<Article> {
    candidates.retain(|candidate| {
        candidate.shared_tags > 0
            && candidate.article.id != source.id
            && candidate.article.is_published()
    });
    candidates.sort_by(|a, b| {
        b.shared_tags
            .cmp(&a.shared_tags)
            .then_with(|| b.article.publish_at.cmp(&a.article.publish_at))
            .then_with(|| b.article.id.cmp(&a.article.id))
    });
    candidates.truncate(limit);
    candidates.into_iter().map(|c| c.article).collect()
}

/// Finds Published articles sharing tags with a given article.
pub struct RelatedContentRanker {
    store: Arc<dyn ArticleReadRepository>,
}

impl RelatedContentRanker {
    pub fn new(store: Arc<dyn ArticleReadRepository>) -> Self {
        Self { store }
    }

    pub async fn related(&self, article: &Article, limit: usize) -> DomainResult<Vec<Article>> {
        if article.tags.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let candidates = self
            .store
            .tag_overlaps(article.id, &article.tags.ids(), Visibility::Published)
            .await?;
        let related = rank_related(article, candidates, limit);
        tracing::debug!(article_id = %article.id, related = related.len(), "related articles ranked");
        Ok(related)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{ArticleBody, ArticleId, ArticleSlug, ArticleStatus, ArticleTitle};
    use crate::domain::author::{Author, AuthorId};
    use crate::domain::tag::{Tag, TagId, TagName, TagSet, TagSlug};
    use chrono::{Duration, TimeZone, Utc};

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id: TagId::new(id).unwrap(),
            name: TagName::new(name).unwrap(),
            slug: TagSlug::new(name).unwrap(),
        }
    }

    fn article(id: i64, day: i64, status: ArticleStatus, tags: Vec<Tag>) -> Article {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(day);
        Article {
            id: ArticleId::new(id).unwrap(),
            title: ArticleTitle::new(format!("article {id}")).unwrap(),
            slug: ArticleSlug::new(format!("article-{id}")).unwrap(),
            body: ArticleBody::new("body").unwrap(),
            status,
            author: Author {
                id: AuthorId::new(1).unwrap(),
                username: "admin".into(),
            },
            publish_at: at,
            created_at: at,
            updated_at: at,
            tags: TagSet::new(tags),
        }
    }

    fn ids(articles: &[Article]) -> Vec<i64> {
        articles.iter().map(|a| a.id.0).collect()
    }

    #[test]
    fn more_shared_tags_rank_first() {
        let python = tag(1, "python");
        let django = tag(2, "django");
        let a = article(1, 0, ArticleStatus::Published, vec![python.clone(), django.clone()]);
        let b = article(2, 5, ArticleStatus::Published, vec![python.clone()]);
        let c = article(3, 1, ArticleStatus::Published, vec![django, python]);

        let overlaps = collect_overlaps(a.id, &a.tags.ids(), [&a, &b, &c], Visibility::Published);
        assert_eq!(ids(&rank_related(&a, overlaps, 4)), vec![3, 2]);
    }

    #[test]
    fn equal_overlap_prefers_recent() {
        let rust = tag(1, "rust");
        let a = article(1, 0, ArticleStatus::Published, vec![rust.clone()]);
        let old = article(2, 1, ArticleStatus::Published, vec![rust.clone()]);
        let new = article(3, 9, ArticleStatus::Published, vec![rust.clone()]);
        let newer_same_day = article(4, 9, ArticleStatus::Published, vec![rust]);

        let overlaps = collect_overlaps(
            a.id,
            &a.tags.ids(),
            [&old, &new, &newer_same_day],
            Visibility::Published,
        );
        assert_eq!(ids(&rank_related(&a, overlaps, 4)), vec![4, 3, 2]);
    }

    #[test]
    fn drafts_self_and_disjoint_are_excluded() {
        let rust = tag(1, "rust");
        let go = tag(2, "go");
        let a = article(1, 0, ArticleStatus::Published, vec![rust.clone()]);
        let draft = article(2, 1, ArticleStatus::Draft, vec![rust.clone()]);
        let disjoint = article(3, 1, ArticleStatus::Published, vec![go]);
        let overlaps = collect_overlaps(
            a.id,
            &a.tags.ids(),
            [&a, &draft, &disjoint],
            Visibility::IncludeDrafts,
        );
        assert_eq!(overlaps.len(), 1);
        assert!(rank_related(&a, overlaps, 4).is_empty());
    }

    #[test]
    fn truncates_to_limit() {
        let rust = tag(1, "rust");
        let a = article(1, 0, ArticleStatus::Published, vec![rust.clone()]);
        let pool: Vec<Article> = (2..10)
            .map(|id| article(id, id, ArticleStatus::Published, vec![rust.clone()]))
            .collect();
        let overlaps = collect_overlaps(a.id, &a.tags.ids(), &pool, Visibility::Published);
        let related = rank_related(&a, overlaps, 4);
        assert_eq!(ids(&related), vec![9, 8, 7, 6]);
    }
}
