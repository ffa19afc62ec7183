pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::diagnostics::Diagnostics;
use crate::application::inquiry_service::InquiryService;
use crate::application::spreadsheet_writer::SpreadsheetWriter;
use crate::config::app_config::AppConfig;
use crate::config::sheets_config::SpreadsheetConfig;
use crate::ports::spreadsheet_client::SpreadsheetClient;

/// Everything the handlers share. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub inquiries: InquiryService,
    pub diagnostics: Diagnostics,
}

impl AppState {
    pub fn new(config: AppConfig, client: Arc<dyn SpreadsheetClient>) -> Self {
        let config = Arc::new(config);
        let writer =
            SpreadsheetWriter::new(SpreadsheetConfig::from(config.as_ref()), Arc::clone(&client));

        AppState {
            inquiries: InquiryService::new(writer),
            diagnostics: Diagnostics::new(config, client),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    // OPTIONS /submit is answered by its own handler instead of the CORS layer.
    let submit = post(handlers::submit)
        .layer(cors.clone())
        .options(handlers::preflight);

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/test", get(handlers::config_test))
        .route("/debug", get(handlers::debug))
        .route("/check-creds", get(handlers::check_credentials))
        .route_layer(cors)
        .route("/submit", submit)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(trace_layer)
        .with_state(state)
}
