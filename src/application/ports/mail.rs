// src/application/ports/mail.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
    pub sender: String,
    pub recipients: Vec<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hands the message to the delivery service; failures are not retried.
    async fn send(&self, mail: OutgoingMail) -> ApplicationResult<()>;
}
