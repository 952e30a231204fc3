pub mod article;
pub mod author;
pub mod comment;
pub mod contact;
pub mod errors;
pub mod pagination;
pub mod search;
pub mod tag;
