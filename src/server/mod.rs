//! JSON server that exposes the dashboard view model to a presentation layer.

mod handlers;

use crate::api::ApiClient;
use anyhow::Result;
use axum::{
    Extension, Router,
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    response::Json,
    routing::get,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug_span, info};
use ulid::Ulid;
use utoipa::openapi::{Contact, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

const REQUEST_ID: &str = "x-request-id";

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Same wiring as the served router; only the document is kept.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and included in the generated `OpenAPI` document.
fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(handlers::health::health))
        .routes(routes!(handlers::dashboard::dashboard))
        .routes(routes!(handlers::dashboard::residents))
        .routes(routes!(handlers::dashboard::expenses));

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Service build information".to_string());
    let mut dashboard_tag = Tag::new("dashboard");
    dashboard_tag.description = Some("Hostel admin dashboard view model".to_string());
    router.get_openapi_mut().tags = Some(vec![health_tag, dashboard_tag]);

    router
}

/// Full application: documented routes, `/openapi.json` and middleware.
pub fn router(client: ApiClient) -> Router {
    let (router, openapi) = api_router().split_for_parts();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    router
        .route(
            "/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(client)),
        )
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(non_blank(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = non_blank(env!("CARGO_PKG_AUTHORS"))
        .and_then(|authors| authors.split(';').next())
        .and_then(contact);
    info.license = non_blank(env!("CARGO_PKG_LICENSE")).map(|spdx| {
        let mut license = License::new(spdx);
        license.identifier = Some(spdx.to_string());
        license
    });

    OpenApiBuilder::new().info(info).build()
}

/// First Cargo author (`Name <email>`) as an `OpenAPI` contact.
fn contact(author: &str) -> Option<Contact> {
    let (name, email) = match author.split_once('<') {
        Some((name, rest)) => (non_blank(name), non_blank(rest.trim().trim_end_matches('>'))),
        None => (non_blank(author), None),
    };

    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

/// Serve the dashboard API until Ctrl-C.
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails
pub async fn new(port: u16, client: ApiClient) -> Result<()> {
    info!("Upstream API: {}", client.base_url());

    let app = router(client);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get(REQUEST_ID)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}
