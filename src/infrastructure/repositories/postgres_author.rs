// src/infrastructure/repositories/postgres_author.rs
use super::map_sqlx;
use crate::domain::author::{Author, AuthorDirectory, AuthorId};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresAuthorDirectory {
    pool: PgPool,
}

impl PostgresAuthorDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    username: String,
}

impl TryFrom<AuthorRow> for Author {
    type Error = DomainError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(Author {
            id: AuthorId::new(row.id)?,
            username: row.username,
        })
    }
}

#[async_trait]
impl AuthorDirectory for PostgresAuthorDirectory {
    async fn ensure(&self, username: &str) -> DomainResult<Author> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation("username cannot be empty".into()));
        }

        // The no-op update makes RETURNING yield the existing row on conflict.
        let row = sqlx::query_as::<_, AuthorRow>(
            "INSERT INTO users (username) VALUES ($1)
             ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username
             RETURNING id, username",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Author::try_from(row)
    }
}
