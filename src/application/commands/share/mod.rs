// src/application/commands/share/mod.rs
mod message;
mod service;

pub use message::{MAX_SHARER_NAME_LEN, ShareArticleCommand};
pub use service::{ShareCommandService, ShareSettings};
