//! Outbound email backends.
mod log;
mod relay;

pub use log::LogMailer;
pub use relay::RelayMailer;
