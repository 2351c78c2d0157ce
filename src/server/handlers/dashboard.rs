//! Dashboard handlers. Every request performs a fresh load against the
//! upstream API; nothing is cached between requests.

use crate::{
    api::ApiClient,
    dashboard::{self, DashboardState, ExpenseCategory, ResidentView},
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};

#[utoipa::path(
    get,
    path= "/dashboard",
    responses (
        (status = 200, description = "Dashboard loaded", body = DashboardState),
        (status = 502, description = "Upstream fetch failed, defaulted dashboard", body = DashboardState)
    ),
    tag = "dashboard",
)]
/// Load and aggregate the admin dashboard.
pub async fn dashboard(Extension(client): Extension<ApiClient>) -> impl IntoResponse {
    let state = dashboard::load(&client).await;

    (status_of(&state), Json(state))
}

#[utoipa::path(
    get,
    path= "/dashboard/residents",
    responses (
        (status = 200, description = "Residents with their room numbers", body = [ResidentView]),
        (status = 502, description = "Upstream fetch failed, partial or empty list", body = [ResidentView])
    ),
    tag = "dashboard",
)]
/// Resident roster joined with room assignments.
pub async fn residents(Extension(client): Extension<ApiClient>) -> impl IntoResponse {
    let state = dashboard::load(&client).await;
    let status = status_of(&state);

    (status, Json(state.into_view().residents))
}

#[utoipa::path(
    get,
    path= "/dashboard/expenses",
    responses (
        (status = 200, description = "Expense totals by category", body = [ExpenseCategory]),
        (status = 502, description = "Upstream fetch failed, partial or empty list", body = [ExpenseCategory])
    ),
    tag = "dashboard",
)]
/// Expense totals grouped by category.
pub async fn expenses(Extension(client): Extension<ApiClient>) -> impl IntoResponse {
    let state = dashboard::load(&client).await;
    let status = status_of(&state);

    (status, Json(state.into_view().expenses_by_category))
}

const fn status_of(state: &DashboardState) -> StatusCode {
    if state.is_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}
