//! Panic recovery.
//!
//! A panicking handler is answered with the internal-error envelope instead
//! of tearing down the connection. The panic payload is logged and never
//! sent to the client.

use std::any::Any;

use axum::Json;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::response::StdResponse;

type PanicPayload = Box<dyn Any + Send + 'static>;

pub type PanicHandler = fn(PanicPayload) -> Response;

/// REST recovery: `500` with the `5000` envelope.
pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(rest_response as PanicHandler)
}

/// RPC recovery: the `5000` envelope with status `200`, like any other
/// internal failure on that surface.
pub fn rpc_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(rpc_response as PanicHandler)
}

fn rest_response(payload: PanicPayload) -> Response {
    log_panic(&payload);
    StdResponse::<()>::internal_server_error().into_response()
}

fn rpc_response(payload: PanicPayload) -> Response {
    log_panic(&payload);
    Json(StdResponse::<()>::internal_server_error()).into_response()
}

fn log_panic(payload: &PanicPayload) {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(panic = %detail, "Request handler panicked");
}
