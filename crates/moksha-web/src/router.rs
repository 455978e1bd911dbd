//! Axum router — request logging, compression, `/api` proxy and the static site.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{Request, Response},
    routing::any,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    trace::{MakeSpan, OnResponse, TraceLayer},
};
use tracing::{info, info_span, Span};

use crate::handlers::{api::proxy_api, site::serve_site};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let enable_logs = state.config.server.enable_logs;
    let shared: SharedState = Arc::new(state);

    let router = Router::new()
        .nest_service("/api", any(proxy_api).with_state::<()>(shared.clone()))
        .fallback(serve_site)
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .with_state(shared);

    if enable_logs {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestSpan)
                .on_request(())
                .on_response(LogResponse),
        )
    } else {
        router
    }
}

/// Span carrying the method and the URI exactly as the client sent it.
#[derive(Debug, Clone, Copy)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!("request", method = %request.method(), uri = %request.uri())
    }
}

/// One line per completed request: `GET /contests 200 - 3ms`.
#[derive(Debug, Clone, Copy)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        info!(
            status = response.status().as_u16(),
            latency_ms = latency.as_millis() as u64,
            "{} - {}ms",
            response.status().as_u16(),
            latency.as_millis(),
        );
    }
}
