//! Health check endpoint

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::http::response::{ApiResult, Envelope};

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub time: DateTime<Utc>,
}

/// GET / and GET /health
async fn health() -> ApiResult<HealthResponse> {
    Ok(Envelope::ok(HealthResponse {
        service: "tally",
        version: env!("CARGO_PKG_VERSION"),
        time: Utc::now(),
    }))
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_service() {
        let envelope = health().await.unwrap();
        assert!(envelope.success);

        let body = envelope.data.unwrap();
        assert_eq!(body.service, "tally");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
