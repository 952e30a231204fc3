// src/infrastructure/repositories/postgres_article.rs
use super::{map_sqlx, postgres_tag::TagRow};
use crate::domain::article::{
    Article, ArticleBody, ArticleId, ArticleOrdering, ArticleQuery, ArticleReadRepository,
    ArticleSlug, ArticleStatus, ArticleStatusUpdate, ArticleTitle, ArticleWriteRepository,
    CommentedArticle, NewArticle, PublishDate, TagOverlap, Visibility,
};
use crate::domain::author::{Author, AuthorId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::search::{ScoredArticle, TextLanguage, TextSearch, TitleSimilaritySearch};
use crate::domain::tag::{Tag, TagId, TagSet};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

const ARTICLE_COLUMNS: &str = "a.id, a.title, a.slug, a.body, a.status, a.author_id, \
     u.username AS author_username, a.publish_at, a.created_at, a.updated_at";
const ARTICLE_FROM: &str = " FROM articles a JOIN users u ON u.id = a.author_id";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    body: String,
    status: String,
    author_id: i64,
    author_username: String,
    publish_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ScoredRow {
    #[sqlx(flatten)]
    article: ArticleRow,
    rank: f64,
}

#[derive(Debug, FromRow)]
struct OverlapRow {
    #[sqlx(flatten)]
    article: ArticleRow,
    shared_tags: i64,
}

#[derive(Debug, FromRow)]
struct CommentCountRow {
    #[sqlx(flatten)]
    article: ArticleRow,
    comments: i64,
}

#[derive(Debug, FromRow)]
struct ArticleTagRow {
    article_id: i64,
    #[sqlx(flatten)]
    tag: TagRow,
}

impl ArticleRow {
    fn into_article(self, tags: Vec<Tag>) -> DomainResult<Article> {
        Ok(Article {
            id: ArticleId::new(self.id)?,
            title: ArticleTitle::new(self.title)?,
            slug: ArticleSlug::new(self.slug)?,
            body: ArticleBody::new(self.body)?,
            status: self.status.parse::<ArticleStatus>()?,
            author: Author {
                id: AuthorId::new(self.author_id)?,
                username: self.author_username,
            },
            publish_at: self.publish_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags: TagSet::new(tags),
        })
    }
}

/// Attaches tags to each row with a single extra query, preserving row order.
async fn hydrate<T>(
    pool: &PgPool,
    rows: Vec<(ArticleRow, T)>,
) -> DomainResult<Vec<(Article, T)>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|(row, _)| row.id).collect();
    let tag_rows = sqlx::query_as::<_, ArticleTagRow>(
        "SELECT at.article_id, t.id, t.name, t.slug
         FROM article_tags at JOIN tags t ON t.id = at.tag_id
         WHERE at.article_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(map_sqlx)?;

    let mut tags_by_article: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in tag_rows {
        tags_by_article
            .entry(row.article_id)
            .or_default()
            .push(Tag::try_from(row.tag)?);
    }

    rows.into_iter()
        .map(|(row, extra)| {
            let tags = tags_by_article.remove(&row.id).unwrap_or_default();
            Ok((row.into_article(tags)?, extra))
        })
        .collect()
}

async fn hydrate_plain(pool: &PgPool, rows: Vec<ArticleRow>) -> DomainResult<Vec<Article>> {
    let rows = rows.into_iter().map(|row| (row, ())).collect();
    Ok(hydrate(pool, rows)
        .await?
        .into_iter()
        .map(|(article, ())| article)
        .collect())
}

async fn fetch_by_id(
    pool: &PgPool,
    id: ArticleId,
    visibility: Visibility,
) -> DomainResult<Option<Article>> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
    builder.push(ARTICLE_COLUMNS).push(ARTICLE_FROM);
    builder.push(" WHERE a.id = ").push_bind(i64::from(id));
    push_visibility(&mut builder, visibility);

    let row = builder
        .build_query_as::<ArticleRow>()
        .fetch_optional(pool)
        .await
        .map_err(map_sqlx)?;

    Ok(hydrate_plain(pool, row.into_iter().collect())
        .await?
        .into_iter()
        .next())
}

/// Appends the status predicate; callers have already opened a WHERE clause.
fn push_visibility(builder: &mut QueryBuilder<'_, Postgres>, visibility: Visibility) {
    if visibility == Visibility::Published {
        builder.push(" AND a.status = 'published'");
    }
}

fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a ArticleQuery) {
    builder.push(" WHERE TRUE");
    push_visibility(builder, query.visibility);

    if let Some(tag) = &query.tag {
        builder.push(
            " AND EXISTS (SELECT 1 FROM article_tags at JOIN tags t ON t.id = at.tag_id \
             WHERE at.article_id = a.id AND t.slug = ",
        );
        builder.push_bind(tag.as_str());
        builder.push(")");
    }

    if let Some(exclude) = query.exclude {
        builder.push(" AND a.id <> ").push_bind(i64::from(exclude));
    }
}

fn push_ordering(builder: &mut QueryBuilder<'_, Postgres>, ordering: ArticleOrdering) {
    match ordering {
        ArticleOrdering::NewestFirst => builder.push(" ORDER BY a.publish_at DESC, a.id DESC"),
        ArticleOrdering::OldestFirst => builder.push(" ORDER BY a.publish_at ASC, a.id ASC"),
    };
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `setweight(title, A) || setweight(body, B)` under a literal text search
/// config, so the planner can match the expression index.
fn push_document(builder: &mut QueryBuilder<'_, Postgres>, language: TextLanguage) {
    let config = language.regconfig();
    builder.push(format_args!(
        "(setweight(to_tsvector('{config}'::regconfig, a.title), 'A') || \
         setweight(to_tsvector('{config}'::regconfig, a.body), 'B'))"
    ));
}

/// One `plainto_tsquery` per word, OR-ed together. Words split on the same
/// non-alphanumeric boundaries as [`crate::domain::search::Analyzer`].
fn push_any_lexeme_query<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    language: TextLanguage,
    text: &'a str,
) {
    let config = language.regconfig();
    let mut words = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .peekable();
    if words.peek().is_none() {
        builder.push("''::tsquery");
        return;
    }

    builder.push("(");
    for (index, word) in words.enumerate() {
        if index > 0 {
            builder.push(" || ");
        }
        builder.push(format_args!("plainto_tsquery('{config}'::regconfig, "));
        builder.push_bind(word);
        builder.push(")");
    }
    builder.push(")");
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            body,
            status,
            author_id,
            publish_at,
            created_at,
            updated_at,
            tags,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO articles (title, slug, body, status, author_id, publish_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(body.as_str())
        .bind(status.as_str())
        .bind(i64::from(author_id))
        .bind(publish_at)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        for tag in &tags {
            let tag_id: i64 = sqlx::query_scalar(
                "INSERT INTO tags (name, slug) VALUES ($1, $2)
                 ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
                 RETURNING id",
            )
            .bind(tag.name.as_str())
            .bind(tag.slug.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

            sqlx::query(
                "INSERT INTO article_tags (article_id, tag_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;

        let id = ArticleId::new(id)?;
        fetch_by_id(&self.pool, id, Visibility::IncludeDrafts)
            .await?
            .ok_or_else(|| DomainError::Persistence("inserted article vanished".into()))
    }

    async fn update_status(&self, update: ArticleStatusUpdate) -> DomainResult<Article> {
        let ArticleStatusUpdate {
            id,
            status,
            original_updated_at,
            updated_at,
        } = update;

        let updated = sqlx::query_scalar::<_, i64>(
            "UPDATE articles SET status = $1, updated_at = $2
             WHERE id = $3 AND updated_at = $4
             RETURNING id",
        )
        .bind(status.as_str())
        .bind(updated_at)
        .bind(i64::from(id))
        .bind(original_updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if updated.is_none() {
            return Err(DomainError::Conflict(
                "article update conflict, please retry".into(),
            ));
        }

        fetch_by_id(&self.pool, id, Visibility::IncludeDrafts)
            .await?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(
        &self,
        id: ArticleId,
        visibility: Visibility,
    ) -> DomainResult<Option<Article>> {
        fetch_by_id(&self.pool, id, visibility).await
    }

    async fn find_by_date_and_slug(
        &self,
        date: PublishDate,
        slug: &ArticleSlug,
        visibility: Visibility,
    ) -> DomainResult<Option<Article>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS).push(ARTICLE_FROM);
        builder.push(" WHERE a.publish_date = ").push_bind(date.date());
        builder.push(" AND a.slug = ").push_bind(slug.as_str());
        push_visibility(&mut builder, visibility);

        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(hydrate_plain(&self.pool, row.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    async fn count(&self, query: &ArticleQuery) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(1)");
        builder.push(ARTICLE_FROM);
        push_filters(&mut builder, query);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map(|count| u64::try_from(count).unwrap_or_default())
            .map_err(map_sqlx)
    }

    async fn list(&self, query: &ArticleQuery) -> DomainResult<Vec<Article>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS).push(ARTICLE_FROM);
        push_filters(&mut builder, query);
        push_ordering(&mut builder, query.ordering);
        if let Some(window) = query.window {
            builder.push(" LIMIT ").push_bind(to_i64(window.limit));
            builder.push(" OFFSET ").push_bind(to_i64(window.offset));
        }

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        hydrate_plain(&self.pool, rows).await
    }

    async fn rank_text(&self, search: &TextSearch) -> DomainResult<Vec<ScoredArticle>> {
        let language = search.language;
        let weights = search.weights.as_ts_rank_array().to_vec();

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM (SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(", ts_rank(").push_bind(weights).push("::float4[], ");
        push_document(&mut builder, language);
        builder.push(", ");
        push_any_lexeme_query(&mut builder, language, &search.query);
        builder.push(")::float8 AS rank");
        builder.push(ARTICLE_FROM);
        builder.push(" WHERE ");
        push_document(&mut builder, language);
        builder.push(" @@ ");
        push_any_lexeme_query(&mut builder, language, &search.query);
        push_visibility(&mut builder, search.visibility);
        builder.push(") ranked WHERE rank >= ").push_bind(search.min_rank);
        builder.push(" ORDER BY rank DESC, publish_at DESC, id DESC");

        let rows = builder
            .build_query_as::<ScoredRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let rows = rows.into_iter().map(|row| (row.article, row.rank)).collect();
        Ok(hydrate(&self.pool, rows)
            .await?
            .into_iter()
            .map(|(article, rank)| ScoredArticle::new(article, rank))
            .collect())
    }

    async fn rank_title_similarity(
        &self,
        search: &TitleSimilaritySearch,
    ) -> DomainResult<Vec<ScoredArticle>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM (SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(", similarity(a.title, ").push_bind(search.query.as_str()).push(")::float8 AS rank");
        builder.push(ARTICLE_FROM);
        builder.push(" WHERE TRUE");
        push_visibility(&mut builder, search.visibility);
        builder.push(") ranked WHERE rank >= ").push_bind(search.min_similarity);
        builder.push(" ORDER BY rank DESC, publish_at DESC, id DESC");

        let rows = builder
            .build_query_as::<ScoredRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let rows = rows.into_iter().map(|row| (row.article, row.rank)).collect();
        Ok(hydrate(&self.pool, rows)
            .await?
            .into_iter()
            .map(|(article, rank)| ScoredArticle::new(article, rank))
            .collect())
    }

    async fn tag_overlaps(
        &self,
        exclude: ArticleId,
        tags: &[TagId],
        visibility: Visibility,
    ) -> DomainResult<Vec<TagOverlap>> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        let tag_ids: Vec<i64> = tags.iter().map(|id| i64::from(*id)).collect();

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(", COUNT(at.tag_id) AS shared_tags");
        builder.push(ARTICLE_FROM);
        builder.push(" JOIN article_tags at ON at.article_id = a.id");
        builder.push(" WHERE at.tag_id = ANY(").push_bind(tag_ids).push(")");
        builder.push(" AND a.id <> ").push_bind(i64::from(exclude));
        push_visibility(&mut builder, visibility);
        builder.push(" GROUP BY a.id, u.username");

        let rows = builder
            .build_query_as::<OverlapRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let rows = rows
            .into_iter()
            .map(|row| (row.article, row.shared_tags))
            .collect();
        Ok(hydrate(&self.pool, rows)
            .await?
            .into_iter()
            .map(|(article, shared)| TagOverlap {
                article,
                shared_tags: u32::try_from(shared).unwrap_or(u32::MAX),
            })
            .collect())
    }

    async fn most_commented(
        &self,
        visibility: Visibility,
        limit: u64,
    ) -> DomainResult<Vec<CommentedArticle>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(", COUNT(c.id) AS comments");
        builder.push(ARTICLE_FROM);
        builder.push(" LEFT JOIN comments c ON c.article_id = a.id");
        builder.push(" WHERE TRUE");
        push_visibility(&mut builder, visibility);
        builder.push(" GROUP BY a.id, u.username");
        builder.push(" ORDER BY comments DESC, a.publish_at DESC, a.id DESC");
        builder.push(" LIMIT ").push_bind(to_i64(limit));

        let rows = builder
            .build_query_as::<CommentCountRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let rows = rows
            .into_iter()
            .map(|row| (row.article, row.comments))
            .collect();
        Ok(hydrate(&self.pool, rows)
            .await?
            .into_iter()
            .map(|(article, comments)| CommentedArticle {
                article,
                comments: u64::try_from(comments).unwrap_or_default(),
            })
            .collect())
    }
}
