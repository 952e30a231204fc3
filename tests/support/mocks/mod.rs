// tests/support/mocks/mod.rs
//! Test doubles for the application ports and the article store.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mail;
pub mod repos;
pub mod time;

pub use mail::{FailingMailer, RecordingMailer};
pub use repos::CountingArticleRead;
pub use time::{FixedClock, days_after, fixed_now};
