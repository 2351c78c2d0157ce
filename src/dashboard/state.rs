use super::{
    aggregate::{DashboardViewModel, aggregate},
    dto::{DashboardSummary, RoomAssignments},
};
use crate::api::{
    ApiClient, ApiError,
    dashboard::{ASSIGNED_ROOMS_PATH, DASHBOARD_PATH},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

/// Banner shown when either source could not be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data. Please try again.";

/// Presentation state of one dashboard load.
#[derive(ToSchema, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardState {
    #[default]
    Loading,
    Loaded {
        view: DashboardViewModel,
    },
    /// At least one source failed; `view` holds whatever could still be built.
    Error {
        message: String,
        view: DashboardViewModel,
    },
}

impl DashboardState {
    #[must_use]
    pub const fn view(&self) -> Option<&DashboardViewModel> {
        match self {
            Self::Loading => None,
            Self::Loaded { view } | Self::Error { view, .. } => Some(view),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    #[must_use]
    pub fn into_view(self) -> DashboardViewModel {
        match self {
            Self::Loading => DashboardViewModel::default(),
            Self::Loaded { view } | Self::Error { view, .. } => view,
        }
    }
}

/// Fetch both sources concurrently and aggregate whatever arrived.
///
/// Never fails: a failed request is logged and replaced by defaults, and the
/// returned state is [`DashboardState::Error`].
#[instrument(skip(client))]
pub async fn load(client: &ApiClient) -> DashboardState {
    let (summary, assignments) =
        tokio::join!(client.dashboard_summary(), client.room_assignments());

    resolve(summary, assignments)
}

/// Fan-in step of [`load`], separate so it can run without a network.
#[must_use]
pub fn resolve(
    summary: Result<Value, ApiError>,
    assignments: Result<Value, ApiError>,
) -> DashboardState {
    let summary = summary
        .map(|body| DashboardSummary::from_value(&body))
        .map_err(|err| log_failure(DASHBOARD_PATH, &err))
        .ok();

    let assignments = assignments
        .map(|body| RoomAssignments::from_value(&body))
        .map_err(|err| log_failure(ASSIGNED_ROOMS_PATH, &err))
        .ok();

    let failed = summary.is_none() || assignments.is_none();
    let view = aggregate(summary.as_ref(), assignments.as_ref());

    if failed {
        DashboardState::Error {
            message: LOAD_FAILED_MESSAGE.to_string(),
            view,
        }
    } else {
        info!(
            staff = view.staff_count(),
            residents = view.resident_count(),
            assigned = view.assigned_resident_count(),
            categories = view.category_count(),
            "dashboard loaded"
        );

        DashboardState::Loaded { view }
    }
}

fn log_failure(endpoint: &str, err: &ApiError) {
    if err.is_unauthorized() {
        error!(endpoint, "Error fetching dashboard data, missing or expired token: {err}");
    } else {
        error!(endpoint, "Error fetching dashboard data: {err}");
    }
}
