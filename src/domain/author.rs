// src/domain/author.rs
//! Authors are user accounts owned by the surrounding platform; articles only
//! hold a reference to them.
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorId(pub i64);

impl AuthorId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("author id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<AuthorId> for i64 {
    fn from(value: AuthorId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorId,
    pub username: String,
}

/// Lookup into the external user directory, used when importing content.
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    /// Returns the author with `username`, registering it when unknown.
    async fn ensure(&self, username: &str) -> DomainResult<Author>;
}
