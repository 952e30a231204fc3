// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of "now" for comment timestamps and default publish times.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
