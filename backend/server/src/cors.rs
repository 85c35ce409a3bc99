use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

/// `None` when cross-origin support is switched off.
pub fn build_cors_layer(cors_config: &CorsConfig) -> Option<CorsLayer> {
    if !cors_config.enabled {
        return None;
    }

    let mut layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        warn!("CORS allows any origin");
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .inspect_err(|e| warn!("Skipping CORS origin {origin}: {e}"))
                    .ok()
            })
            .collect();
        layer = layer.allow_origin(origins);
    }

    Some(layer)
}
