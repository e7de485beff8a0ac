use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{self, HeaderName},
        HeaderValue, Method, StatusCode,
    },
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{auth, ideas};

const BODY_LIMIT_BYTES: usize = 100 * 1024;

pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(ideas::router())
                .route("/health", get(health)),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("same-origin"),
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

fn allowed_origins(configured: &[String]) -> Vec<HeaderValue> {
    configured
        .iter()
        .filter_map(|o| {
            if o == "*" {
                // credentials cannot be combined with a wildcard origin
                tracing::warn!("ignoring wildcard CORS origin, credentials are allowed");
                return None;
            }
            HeaderValue::from_str(o)
                .map_err(|_| tracing::warn!(origin = %o, "ignoring unparsable CORS origin"))
                .ok()
        })
        .collect()
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = allowed_origins(&config.cors_origins);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
