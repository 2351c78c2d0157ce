//! Boundary DTOs for the two upstream endpoints.
//!
//! Upstream responses are not schema-checked by the backend, so they are read
//! field by field from a [`serde_json::Value`] instead of through a derived
//! `Deserialize`: a single wrong-typed leaf would otherwise reject the whole
//! body. Every leaf falls back to its default (`0`, empty list, `"Unknown"`),
//! which leaves the aggregator free of null checks.

use serde_json::Value;
use tracing::debug;

/// Display name used when an upstream name or category is missing or blank.
pub const UNKNOWN: &str = "Unknown";

const SUMMARY_SECTIONS: [&str; 5] = [
    "staffData",
    "revenueData",
    "expensesData",
    "residentData",
    "roomData",
];

/// A `{period, amount}` point of the revenue or expense series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesPoint {
    pub period: String,
    pub amount: f64,
}

/// One `expensesData.expenses` entry; upstream stores the category in `_id`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resident {
    /// Normalized identifier, see [`normalize_id`].
    pub id: String,
    pub username: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomData {
    pub total_rooms: f64,
    pub occupied_rooms: f64,
    pub available_rooms: f64,
    pub active_assignments: f64,
    pub inactive_assignments: f64,
    pub net_worth: f64,
}

/// Validated `GET /dashboard` response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSummary {
    pub staff_names: Vec<String>,
    pub revenue_series: Vec<SeriesPoint>,
    pub total_revenue: f64,
    pub expense_series: Vec<SeriesPoint>,
    pub total_expenses: f64,
    pub expense_categories: Vec<CategoryTotal>,
    pub residents: Vec<Resident>,
    pub rooms: RoomData,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomAssignment {
    /// Normalized identifier, see [`normalize_id`].
    pub resident_id: String,
    /// `roomId.roomNumber`, `None` when the room reference is not populated.
    pub room_number: Option<String>,
}

/// Validated `GET /getAllAssignedRooms` response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomAssignments {
    pub assignments: Vec<RoomAssignment>,
}

impl DashboardSummary {
    #[must_use]
    pub fn from_value(body: &Value) -> Self {
        for section in SUMMARY_SECTIONS {
            if body[section].is_null() {
                debug!("dashboard summary has no {section}");
            }
        }

        let revenue = &body["revenueData"];
        let expenses = &body["expensesData"];
        let rooms = &body["roomData"];

        Self {
            staff_names: list(&body["staffData"]["staffNames"])
                .iter()
                .filter_map(staff_name)
                .collect(),
            revenue_series: series(&revenue["reveData"]),
            total_revenue: number(&revenue["totalRevenue"]),
            expense_series: series(&expenses["expenseData"]),
            total_expenses: number(&expenses["totalExpenses"]),
            expense_categories: list(&expenses["expenses"])
                .iter()
                .filter(|entry| entry.is_object())
                .map(|entry| CategoryTotal {
                    category: display_name(&entry["_id"]),
                    total_amount: number(&entry["totalAmount"]),
                })
                .collect(),
            residents: list(&body["residentData"]["residents"])
                .iter()
                .filter(|entry| entry.is_object())
                .map(|entry| Resident {
                    id: normalize_id(&entry["_id"]),
                    username: display_name(&entry["username"]),
                })
                .collect(),
            rooms: RoomData {
                total_rooms: number(&rooms["totalRooms"]),
                occupied_rooms: number(&rooms["occupiedRooms"]),
                available_rooms: number(&rooms["availableRooms"]),
                active_assignments: number(&rooms["activeAssignments"]),
                inactive_assignments: number(&rooms["inActiveAssignments"]),
                net_worth: number(&rooms["netWorth"]),
            },
        }
    }
}

impl RoomAssignments {
    #[must_use]
    pub fn from_value(body: &Value) -> Self {
        if body["roomAssignments"].is_null() {
            debug!("room assignments response has no roomAssignments");
        }

        Self {
            assignments: list(&body["roomAssignments"])
                .iter()
                .filter(|entry| entry.is_object())
                .map(|entry| RoomAssignment {
                    resident_id: normalize_id(&entry["residentId"]),
                    room_number: text(&entry["roomId"]["roomNumber"]),
                })
                .collect(),
        }
    }
}

/// Normalize an upstream identifier to its string form.
///
/// Strings are trimmed, integral numbers print without a fraction, and
/// `{"$oid": ..}` / populated `{"_id": ..}` references unwrap to the inner id.
/// `null` yields an empty string, which never matches.
#[must_use]
pub fn normalize_id(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(id) => id.trim().to_string(),
        Value::Number(_) => number_text(value).unwrap_or_default(),
        Value::Object(map) => map
            .get("$oid")
            .or_else(|| map.get("_id"))
            .map_or_else(|| value.to_string(), normalize_id),
        Value::Bool(_) | Value::Array(_) => value.to_string(),
    }
}

/// Read a numeric leaf; numeric strings are accepted, anything else is `0`.
fn number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Read a textual leaf; blank strings count as absent.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(_) => number_text(value),
        _ => None,
    }
}

fn display_name(value: &Value) -> String {
    text(value).unwrap_or_else(|| UNKNOWN.to_string())
}

fn staff_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(_) | Value::Array(_) => None,
        _ => Some(display_name(value)),
    }
}

fn number_text(value: &Value) -> Option<String> {
    let Value::Number(n) = value else {
        return None;
    };

    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }

    n.as_f64().filter(|f| f.is_finite()).map(|f| {
        if f == 0.0 {
            // negative zero prints as "0"
            "0".to_string()
        } else if f.fract() == 0.0 && f.abs() < 1e15 {
            format!("{f:.0}")
        } else {
            f.to_string()
        }
    })
}

fn list(value: &Value) -> &[Value] {
    value.as_array().map_or(&[][..], Vec::as_slice)
}

fn series(value: &Value) -> Vec<SeriesPoint> {
    list(value)
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| SeriesPoint {
            period: text(&entry["period"]).unwrap_or_default(),
            amount: number(&entry["amount"]),
        })
        .collect()
}
