// src/application/commands/comments/mod.rs
mod post;
mod service;

pub use post::PostCommentCommand;
pub use service::CommentCommandService;
