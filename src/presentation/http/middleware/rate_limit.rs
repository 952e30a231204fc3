// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Token bucket applied per client IP to form submission routes.
///
/// `per_second` is the sustained request rate: one token is restored every
/// `1000 / per_second` milliseconds (at least one). `burst` is the bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub per_second: u64,
    pub burst: u32,
}

impl RateLimitSettings {
    /// Milliseconds between restored tokens.
    pub fn replenish_millis(&self) -> u64 {
        (1000 / self.per_second.max(1)).max(1)
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            per_second: 10,
            burst: 20,
        }
    }
}

pub type FormRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// `None` when either quota is zero, which disables limiting.
pub fn rate_limit_layer(settings: RateLimitSettings) -> Option<FormRateLimitLayer> {
    if settings.per_second == 0 || settings.burst == 0 {
        return None;
    }

    let mut builder = GovernorConfigBuilder::default();
    builder.per_millisecond(settings.replenish_millis());
    builder.burst_size(settings.burst);
    let Some(config) = builder.key_extractor(SmartIpKeyExtractor).finish() else {
        tracing::warn!(?settings, "invalid rate limit settings, limiting disabled");
        return None;
    };

    Some(GovernorLayer::new(config))
}
