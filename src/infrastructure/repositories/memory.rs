// src/infrastructure/repositories/memory.rs
//! Process-local store implementing every repository port. Text ranking uses
//! the domain analyzer and `ts_rank` scorer instead of SQL.
use crate::domain::article::{
    Article, ArticleId, ArticleOrdering, ArticleQuery, ArticleReadRepository, ArticleSlug,
    ArticleStatusUpdate, ArticleWriteRepository, CommentedArticle, NewArticle, PublishDate,
    TagOverlap, Visibility, related::collect_overlaps,
};
use crate::domain::author::{Author, AuthorDirectory, AuthorId};
use crate::domain::comment::{Comment, CommentId, CommentRepository, NewComment};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::search::{
    Analyzer, ScoredArticle, TextSearch, TitleSimilaritySearch, WeightedDocument, trigram,
};
use crate::domain::tag::{Tag, TagId, TagName, TagRepository, TagSet, TagSlug};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i64, Author>,
    articles: BTreeMap<i64, Article>,
    tags: BTreeMap<i64, Tag>,
    comments: BTreeMap<i64, Comment>,
    next_author_id: i64,
    next_article_id: i64,
    next_tag_id: i64,
    next_comment_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl Tables {
    fn visible(&self, visibility: Visibility) -> impl Iterator<Item = &Article> {
        self.articles
            .values()
            .filter(move |article| visibility.admits(article.is_published()))
    }

    fn matching<'a>(&'a self, query: &'a ArticleQuery) -> impl Iterator<Item = &'a Article> {
        self.visible(query.visibility)
            .filter(move |article| query.exclude != Some(article.id))
            .filter(move |article| {
                query
                    .tag
                    .as_ref()
                    .is_none_or(|slug| article.tags.contains_slug(slug))
            })
    }

    fn slug_taken(&self, date: PublishDate, slug: &ArticleSlug) -> bool {
        self.articles
            .values()
            .any(|article| article.publish_date() == date.date() && &article.slug == slug)
    }

    fn tag_for(&mut self, name: &TagName, slug: &TagSlug) -> DomainResult<Tag> {
        if let Some(existing) = self.tags.values().find(|tag| &tag.slug == slug) {
            return Ok(existing.clone());
        }
        let id = next_id(&mut self.next_tag_id);
        let tag = Tag {
            id: TagId::new(id)?,
            name: name.clone(),
            slug: slug.clone(),
        };
        self.tags.insert(id, tag.clone());
        Ok(tag)
    }
}

fn newest_first(a: &Article, b: &Article) -> std::cmp::Ordering {
    b.publish_at.cmp(&a.publish_at).then_with(|| b.id.cmp(&a.id))
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorDirectory for InMemoryStore {
    async fn ensure(&self, username: &str) -> DomainResult<Author> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation("username cannot be empty".into()));
        }

        let mut tables = self.tables.write().await;
        if let Some(author) = tables.authors.values().find(|a| a.username == username) {
            return Ok(author.clone());
        }
        let id = next_id(&mut tables.next_author_id);
        let author = Author {
            id: AuthorId::new(id)?,
            username: username.to_string(),
        };
        tables.authors.insert(id, author.clone());
        Ok(author)
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut tables = self.tables.write().await;

        let author = tables
            .authors
            .get(&i64::from(article.author_id))
            .cloned()
            .ok_or_else(|| DomainError::NotFound("author not found".into()))?;
        let date = PublishDate::from(article.publish_at.date_naive());
        if tables.slug_taken(date, &article.slug) {
            return Err(DomainError::Conflict(
                "an article with this slug is already published that day".into(),
            ));
        }

        let mut tags = Vec::with_capacity(article.tags.len());
        for new_tag in &article.tags {
            tags.push(tables.tag_for(&new_tag.name, &new_tag.slug)?);
        }

        let id = next_id(&mut tables.next_article_id);
        let stored = Article {
            id: ArticleId::new(id)?,
            title: article.title,
            slug: article.slug,
            body: article.body,
            status: article.status,
            author,
            publish_at: article.publish_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
            tags: TagSet::new(tags),
        };
        tables.articles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_status(&self, update: ArticleStatusUpdate) -> DomainResult<Article> {
        let mut tables = self.tables.write().await;
        let article = tables
            .articles
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if article.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "article update conflict, please retry".into(),
            ));
        }
        article.status = update.status;
        article.updated_at = update.updated_at;
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        if tables.articles.remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }
        tables.comments.retain(|_, comment| comment.article_id != id);
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: ArticleId,
        visibility: Visibility,
    ) -> DomainResult<Option<Article>> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .get(&i64::from(id))
            .filter(|article| visibility.admits(article.is_published()))
            .cloned())
    }

    async fn find_by_date_and_slug(
        &self,
        date: PublishDate,
        slug: &ArticleSlug,
        visibility: Visibility,
    ) -> DomainResult<Option<Article>> {
        let tables = self.tables.read().await;
        Ok(tables
            .visible(visibility)
            .find(|article| article.publish_date() == date.date() && &article.slug == slug)
            .cloned())
    }

    async fn count(&self, query: &ArticleQuery) -> DomainResult<u64> {
        let tables = self.tables.read().await;
        Ok(u64::try_from(tables.matching(query).count()).unwrap_or(u64::MAX))
    }

    async fn list(&self, query: &ArticleQuery) -> DomainResult<Vec<Article>> {
        let tables = self.tables.read().await;
        let mut articles: Vec<Article> = tables.matching(query).cloned().collect();
        articles.sort_by(newest_first);
        if query.ordering == ArticleOrdering::OldestFirst {
            articles.reverse();
        }

        let Some(window) = query.window else {
            return Ok(articles);
        };
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        Ok(articles.into_iter().skip(offset).take(limit).collect())
    }

    async fn rank_text(&self, search: &TextSearch) -> DomainResult<Vec<ScoredArticle>> {
        let analyzer = Analyzer::new(search.language);
        let tables = self.tables.read().await;
        Ok(tables
            .visible(search.visibility)
            .filter_map(|article| {
                let document = WeightedDocument::for_article(
                    &analyzer,
                    article.title.as_str(),
                    article.body.as_str(),
                    search.weights,
                );
                if !document.matches(&search.lexemes) {
                    return None;
                }
                let rank = document.rank(&search.lexemes);
                (rank >= search.min_rank).then(|| ScoredArticle::new(article.clone(), rank))
            })
            .collect())
    }

    async fn rank_title_similarity(
        &self,
        search: &TitleSimilaritySearch,
    ) -> DomainResult<Vec<ScoredArticle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .visible(search.visibility)
            .filter_map(|article| {
                let score = trigram::similarity(&search.query, article.title.as_str());
                (score >= search.min_similarity)
                    .then(|| ScoredArticle::new(article.clone(), score))
            })
            .collect())
    }

    async fn tag_overlaps(
        &self,
        exclude: ArticleId,
        tags: &[TagId],
        visibility: Visibility,
    ) -> DomainResult<Vec<TagOverlap>> {
        let tables = self.tables.read().await;
        Ok(collect_overlaps(
            exclude,
            tags,
            tables.articles.values(),
            visibility,
        ))
    }

    async fn most_commented(
        &self,
        visibility: Visibility,
        limit: u64,
    ) -> DomainResult<Vec<CommentedArticle>> {
        let tables = self.tables.read().await;
        let mut counts: HashMap<ArticleId, u64> = HashMap::new();
        for comment in tables.comments.values() {
            *counts.entry(comment.article_id).or_default() += 1;
        }

        let mut ranked: Vec<CommentedArticle> = tables
            .visible(visibility)
            .map(|article| CommentedArticle {
                article: article.clone(),
                comments: counts.get(&article.id).copied().unwrap_or_default(),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.comments
                .cmp(&a.comments)
                .then_with(|| newest_first(&a.article, &b.article))
        });
        ranked.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(ranked)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let mut tables = self.tables.write().await;
        if !tables.articles.contains_key(&i64::from(comment.article_id)) {
            return Err(DomainError::NotFound("article not found".into()));
        }
        let id = next_id(&mut tables.next_comment_id);
        let stored = Comment {
            id: CommentId::new(id)?,
            article_id: comment.article_id,
            name: comment.name,
            email: comment.email,
            body: comment.body,
            active: comment.active,
            created_at: comment.created_at,
            updated_at: comment.created_at,
        };
        tables.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_active(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|comment| comment.article_id == article_id && comment.active)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| i64::from(a.id).cmp(&i64::from(b.id)))
        });
        Ok(comments)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &TagSlug) -> DomainResult<Option<Tag>> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|tag| &tag.slug == slug).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{ArticleBody, ArticleStatus, ArticleTitle};
    use crate::domain::comment::{CommentBody, CommenterName};
    use crate::domain::contact::EmailAddress;
    use crate::domain::search::{SearchWeights, TextLanguage};
    use crate::domain::tag::NewTag;
    use chrono::{Duration, TimeZone, Utc};

    async fn seed(
        store: &InMemoryStore,
        title: &str,
        status: ArticleStatus,
        days: i64,
        tags: &[&str],
    ) -> Article {
        let author = store.ensure("admin").await.unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(days);
        ArticleWriteRepository::insert(
            store,
            NewArticle {
                title: ArticleTitle::new(title).unwrap(),
                slug: ArticleSlug::new(slug::slugify(title)).unwrap(),
                body: ArticleBody::new("contenido de prueba").unwrap(),
                status,
                author_id: author.id,
                publish_at: at,
                created_at: at,
                updated_at: at,
                tags: tags
                    .iter()
                    .map(|t| NewTag {
                        name: TagName::new(*t).unwrap(),
                        slug: TagSlug::new(*t).unwrap(),
                    })
                    .collect(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn tags_are_shared_by_slug() {
        let store = InMemoryStore::new();
        let a = seed(&store, "uno", ArticleStatus::Published, 0, &["rust", "web"]).await;
        let b = seed(&store, "dos", ArticleStatus::Published, 1, &["web"]).await;
        let web_a = a.tags.iter().find(|t| t.slug.as_str() == "web").unwrap();
        let web_b = b.tags.iter().next().unwrap();
        assert_eq!(web_a.id, web_b.id);
    }

    #[tokio::test]
    async fn slug_is_unique_per_day() {
        let store = InMemoryStore::new();
        seed(&store, "repetido", ArticleStatus::Published, 0, &[]).await;
        let author = store.ensure("admin").await.unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
        let err = ArticleWriteRepository::insert(
            &store,
            NewArticle {
                title: ArticleTitle::new("repetido").unwrap(),
                slug: ArticleSlug::new("repetido").unwrap(),
                body: ArticleBody::new("x").unwrap(),
                status: ArticleStatus::Draft,
                author_id: author.id,
                publish_at: at,
                created_at: at,
                updated_at: at,
                tags: Vec::new(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn listing_filters_by_visibility_and_tag() {
        let store = InMemoryStore::new();
        seed(&store, "publicado", ArticleStatus::Published, 0, &["rust"]).await;
        seed(&store, "borrador", ArticleStatus::Draft, 1, &["rust"]).await;
        seed(&store, "otro", ArticleStatus::Published, 2, &["web"]).await;

        let rust = TagSlug::new("rust").unwrap();
        let published = ArticleQuery::published().with_tag(Some(rust.clone()));
        assert_eq!(store.count(&published).await.unwrap(), 1);
        let all = ArticleQuery::new(Visibility::IncludeDrafts).with_tag(Some(rust));
        assert_eq!(store.count(&all).await.unwrap(), 2);

        let newest = store.list(&ArticleQuery::published().window(0, 1)).await.unwrap();
        assert_eq!(newest[0].title.as_str(), "otro");
        let oldest = store
            .list(&ArticleQuery::published().ordered(ArticleOrdering::OldestFirst))
            .await
            .unwrap();
        assert_eq!(oldest[0].title.as_str(), "publicado");
    }

    #[tokio::test]
    async fn delete_cascades_to_comments() {
        let store = InMemoryStore::new();
        let article = seed(&store, "con comentarios", ArticleStatus::Published, 0, &[]).await;
        CommentRepository::insert(
            &store,
            NewComment {
                article_id: article.id,
                name: CommenterName::new("Ana").unwrap(),
                email: EmailAddress::new("ana@example.com").unwrap(),
                body: CommentBody::new("hola").unwrap(),
                active: true,
                created_at: article.created_at,
            },
        )
        .await
        .unwrap();

        ArticleWriteRepository::delete(&store, article.id).await.unwrap();
        assert!(store.list_active(article.id).await.unwrap().is_empty());
        assert!(store.tables.read().await.comments.is_empty());
    }

    #[tokio::test]
    async fn text_rank_skips_drafts_and_non_matches() {
        let store = InMemoryStore::new();
        seed(&store, "Django web", ArticleStatus::Published, 0, &[]).await;
        seed(&store, "Django borrador", ArticleStatus::Draft, 1, &[]).await;
        seed(&store, "Recetas", ArticleStatus::Published, 2, &[]).await;

        let analyzer = Analyzer::new(TextLanguage::Spanish);
        let hits = store
            .rank_text(&TextSearch {
                query: "django".into(),
                lexemes: analyzer.query_lexemes("django"),
                language: TextLanguage::Spanish,
                weights: SearchWeights::default(),
                min_rank: 0.0,
                visibility: Visibility::Published,
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].article.title.as_str(), "Django web");
    }
}
