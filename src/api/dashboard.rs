//! Dashboard endpoints. Paths are kept here so callers never spell them out.

use super::{ApiClient, ApiError};
use serde_json::Value;

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ASSIGNED_ROOMS_PATH: &str = "/getAllAssignedRooms";

impl ApiClient {
    /// Fetch the raw admin dashboard summary.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn dashboard_summary(&self) -> Result<Value, ApiError> {
        self.get_json(DASHBOARD_PATH).await
    }

    /// Fetch the raw list of room assignments.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn room_assignments(&self) -> Result<Value, ApiError> {
        self.get_json(ASSIGNED_ROOMS_PATH).await
    }
}
