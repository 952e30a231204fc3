// tests/support/mocks/mail.rs
use async_trait::async_trait;
use bitacora::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::mail::{Mailer, OutgoingMail},
};
use std::sync::Mutex;

/// Keeps every message instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> ApplicationResult<()> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _mail: OutgoingMail) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("relay refused the message"))
    }
}
