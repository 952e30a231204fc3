use crate::application::{
    ApplicationResult,
    ports::mail::{Mailer, OutgoingMail},
};
use async_trait::async_trait;

/// Writes messages to the log instead of delivering them (development).
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> ApplicationResult<()> {
        tracing::info!(
            from = %mail.sender,
            to = ?mail.recipients,
            subject = %mail.subject,
            body = %mail.body,
            "outgoing mail (not delivered)"
        );
        Ok(())
    }
}
