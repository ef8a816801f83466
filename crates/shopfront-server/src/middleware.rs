use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shopfront_core::AppConfig;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request correlation id, stored as a request extension and echoed on the response.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    admitted: u32,
}

/// Storefront-wide request budget for the variation routes: one fixed
/// window shared by every client.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: u32,
    window: Duration,
    current: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(Mutex::new(Window {
                opened_at: Instant::now(),
                admitted: 0,
            })),
        }
    }

    /// Budget from `SHOPFRONT_API_RATE_LIMIT_*`.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_rate_limit_max_requests,
            Duration::from_secs(config.api_rate_limit_window_secs),
        )
    }

    /// Counts one request against the current window. On rejection returns
    /// how long until the window reopens.
    async fn admit(&self) -> Result<(), Duration> {
        let mut window = self.current.lock().await;
        let age = window.opened_at.elapsed();
        if age >= self.window {
            window.opened_at = Instant::now();
            window.admitted = 0;
        }

        if window.admitted >= self.max_requests {
            return Err(self.window.saturating_sub(window.opened_at.elapsed()));
        }
        window.admitted += 1;
        Ok(())
    }
}

/// Uses the caller's `x-request-id` when present, otherwise mints a `UUIDv4`.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

    req.extensions_mut().insert(RequestId(id.clone()));
    let mut res = next.run(req).await;
    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    res
}

/// Rejects requests over the storefront budget with a `rate_limited`
/// envelope and a `Retry-After` header (seconds until the window reopens,
/// rounded up).
pub async fn enforce_rate_limit(
    State(limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let Err(reopens_in) = limit.admit().await else {
        return next.run(req).await;
    };

    let retry_after_secs =
        (reopens_in.as_secs() + u64::from(reopens_in.subsec_nanos() > 0)).max(1);
    let req_id = req
        .extensions()
        .get::<RequestId>()
        .map_or_else(String::new, |id| id.0.clone());
    tracing::warn!(
        path = %req.uri().path(),
        max_requests = limit.max_requests,
        retry_after_secs,
        "storefront request budget exhausted"
    );

    let mut res = ApiError::new(
        req_id,
        "rate_limited",
        "too many variation requests, retry later",
    )
    .into_response();
    res.headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
    res
}
