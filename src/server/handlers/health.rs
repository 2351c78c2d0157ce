use crate::GIT_COMMIT_HASH;
use axum::{
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Service is running", body = Health)
    ),
    tag = "health",
)]
/// Report build information; upstream availability is not probed.
pub async fn health() -> impl IntoResponse {
    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let header = x_app(&health.name, &health.version, &health.commit);

    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&header) {
        Ok(value) => {
            headers.insert("X-App", value);
        }
        Err(err) => debug!("Failed to build X-App header: {err}"),
    }

    (headers, Json(health))
}

/// `name:version:hash7`; commits shorter than 7 characters leave the hash empty.
fn x_app(name: &str, version: &str, commit: &str) -> String {
    let short_hash = commit.get(..7).unwrap_or_default();
    format!("{name}:{version}:{short_hash}")
}
