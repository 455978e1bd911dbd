//! `/api` passthrough to the backend origin.

use axum::{
    extract::{OriginalUri, Request, State},
    response::Response,
};

use crate::proxy::ProxyError;
use crate::state::SharedState;

/// ANY /api, /api/* - forwarded with the original path intact
pub async fn proxy_api(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
    request: Request,
) -> Result<Response, ProxyError> {
    state.proxy.forward(&uri, request).await
}
