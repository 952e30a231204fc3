use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::mail::{Mailer, OutgoingMail},
};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Posts messages as JSON to an HTTP mail relay.
pub struct RelayMailer {
    url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

impl RelayMailer {
    pub fn new(url: impl Into<String>) -> ApplicationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, mail: OutgoingMail) -> ApplicationResult<()> {
        let payload = RelayPayload {
            from: &mail.sender,
            to: &mail.recipients,
            subject: &mail.subject,
            text: &mail.body,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("mail relay unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, relay = %self.url, "mail relay rejected message");
            return Err(ApplicationError::infrastructure(format!(
                "mail relay responded with {status}"
            )));
        }
        Ok(())
    }
}
