use super::dto::{DashboardSummary, RoomAssignments, SeriesPoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Room number shown for residents without a usable room assignment.
pub const NOT_ASSIGNED: &str = "Not Assigned";

#[derive(ToSchema, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub net_worth: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_rooms: f64,
    pub occupied_rooms: f64,
    pub available_rooms: f64,
    pub active_assignments: f64,
    #[serde(rename = "inActiveAssignments")]
    pub inactive_assignments: f64,
}

#[derive(ToSchema, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentView {
    pub username: String,
    pub resident_id: String,
    pub room_number: String,
}

impl ResidentView {
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.room_number != NOT_ASSIGNED
    }
}

#[derive(ToSchema, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub category: String,
    pub total_amount: f64,
}

#[derive(ToSchema, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub period: String,
    pub amount: f64,
}

impl From<&SeriesPoint> for SeriesEntry {
    fn from(point: &SeriesPoint) -> Self {
        Self {
            period: point.period.clone(),
            amount: point.amount,
        }
    }
}

/// Everything the dashboard renders, with every field defaulted.
#[derive(ToSchema, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewModel {
    pub totals: Totals,
    pub staff: Vec<String>,
    pub residents: Vec<ResidentView>,
    pub expenses_by_category: Vec<ExpenseCategory>,
    pub revenue_series: Vec<SeriesEntry>,
    pub expense_series: Vec<SeriesEntry>,
}

impl DashboardViewModel {
    #[must_use]
    pub fn staff_count(&self) -> usize {
        self.staff.len()
    }

    #[must_use]
    pub fn resident_count(&self) -> usize {
        self.residents.len()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.expenses_by_category.len()
    }

    #[must_use]
    pub fn assigned_resident_count(&self) -> usize {
        self.residents.iter().filter(|r| r.is_assigned()).count()
    }
}

/// Build the dashboard view model from whichever sources were fetched.
///
/// Residents are joined to assignments on the normalized resident id. When a
/// resident has several assignments the first one in upstream order wins.
#[must_use]
pub fn aggregate(
    summary: Option<&DashboardSummary>,
    assignments: Option<&RoomAssignments>,
) -> DashboardViewModel {
    let Some(summary) = summary else {
        return DashboardViewModel::default();
    };

    let rooms = room_index(assignments);

    DashboardViewModel {
        totals: Totals {
            net_worth: summary.rooms.net_worth,
            total_revenue: summary.total_revenue,
            total_expenses: summary.total_expenses,
            total_rooms: summary.rooms.total_rooms,
            occupied_rooms: summary.rooms.occupied_rooms,
            available_rooms: summary.rooms.available_rooms,
            active_assignments: summary.rooms.active_assignments,
            inactive_assignments: summary.rooms.inactive_assignments,
        },
        staff: summary.staff_names.clone(),
        residents: summary
            .residents
            .iter()
            .map(|resident| ResidentView {
                username: resident.username.clone(),
                resident_id: resident.id.clone(),
                room_number: rooms
                    .get(resident.id.as_str())
                    .copied()
                    .flatten()
                    .unwrap_or(NOT_ASSIGNED)
                    .to_string(),
            })
            .collect(),
        expenses_by_category: summary
            .expense_categories
            .iter()
            .map(|expense| ExpenseCategory {
                category: expense.category.clone(),
                total_amount: expense.total_amount,
            })
            .collect(),
        revenue_series: summary.revenue_series.iter().map(SeriesEntry::from).collect(),
        expense_series: summary.expense_series.iter().map(SeriesEntry::from).collect(),
    }
}

// resident id -> room number of its first assignment
fn room_index(assignments: Option<&RoomAssignments>) -> HashMap<&str, Option<&str>> {
    let mut index = HashMap::new();

    for assignment in assignments.map_or(&[][..], |a| a.assignments.as_slice()) {
        if assignment.resident_id.is_empty() {
            continue;
        }

        index
            .entry(assignment.resident_id.as_str())
            .or_insert(assignment.room_number.as_deref());
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(body: serde_json::Value) -> DashboardSummary {
        DashboardSummary::from_value(&body)
    }

    fn assignments(body: serde_json::Value) -> RoomAssignments {
        RoomAssignments::from_value(&body)
    }

    fn all_finite(view: &DashboardViewModel) -> bool {
        let t = &view.totals;
        [
            t.net_worth,
            t.total_revenue,
            t.total_expenses,
            t.total_rooms,
            t.occupied_rooms,
            t.available_rooms,
            t.active_assignments,
            t.inactive_assignments,
        ]
        .iter()
        .chain(view.expenses_by_category.iter().map(|e| &e.total_amount))
        .chain(view.revenue_series.iter().map(|p| &p.amount))
        .chain(view.expense_series.iter().map(|p| &p.amount))
        .all(|n| n.is_finite())
    }

    #[test]
    fn no_sources_yields_empty_view() {
        let view = aggregate(None, None);

        assert_eq!(view, DashboardViewModel::default());
        assert_eq!(view.totals, Totals::default());
        assert!(view.staff.is_empty());
        assert!(view.residents.is_empty());
        assert!(view.expenses_by_category.is_empty());
        assert!(all_finite(&view));
    }

    #[test]
    fn assignments_without_summary_yield_empty_view() {
        let rooms = assignments(json!({
            "roomAssignments": [{ "residentId": "r1", "roomId": { "roomNumber": "A-101" } }]
        }));

        assert_eq!(aggregate(None, Some(&rooms)), DashboardViewModel::default());
    }

    #[test]
    fn matching_assignment_sets_room_number() {
        let summary = summary(json!({
            "residentData": { "residents": [{ "_id": "r1", "username": "amy" }] }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [{ "residentId": "r1", "roomId": { "roomNumber": "A-101" } }]
        }));

        let view = aggregate(Some(&summary), Some(&rooms));

        assert_eq!(view.residents[0].room_number, "A-101");
        assert!(view.residents[0].is_assigned());
    }

    #[test]
    fn unmatched_resident_is_not_assigned() {
        let summary = summary(json!({
            "residentData": { "residents": [{ "_id": "r2", "username": "ben" }] }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [{ "residentId": "r1", "roomId": { "roomNumber": "A-101" } }]
        }));

        let view = aggregate(Some(&summary), Some(&rooms));

        assert_eq!(view.residents[0].room_number, NOT_ASSIGNED);
        assert!(!view.residents[0].is_assigned());

        let view = aggregate(Some(&summary), None);
        assert_eq!(view.residents[0].room_number, NOT_ASSIGNED);
    }

    #[test]
    fn assignment_without_room_number_is_not_assigned() {
        let summary = summary(json!({
            "residentData": { "residents": [{ "_id": "r1", "username": "amy" }] }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [{ "residentId": "r1", "roomId": "65aa01" }]
        }));

        let view = aggregate(Some(&summary), Some(&rooms));

        assert_eq!(view.residents[0].room_number, NOT_ASSIGNED);
    }

    #[test]
    fn identifier_comparison_ignores_upstream_types() {
        let summary = summary(json!({
            "residentData": { "residents": [
                { "_id": "5f1a", "username": "amy" },
                { "_id": { "$oid": "5f1b" }, "username": "ben" },
                { "_id": 77, "username": "cal" }
            ] }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [
                { "residentId": { "$oid": "5f1a" }, "roomId": { "roomNumber": "1A" } },
                { "residentId": "5f1b", "roomId": { "roomNumber": "1B" } },
                { "residentId": "77", "roomId": { "roomNumber": "1C" } }
            ]
        }));

        let view = aggregate(Some(&summary), Some(&rooms));
        let numbers: Vec<&str> = view
            .residents
            .iter()
            .map(|r| r.room_number.as_str())
            .collect();

        assert_eq!(numbers, vec!["1A", "1B", "1C"]);
        assert_eq!(view.residents[1].resident_id, "5f1b");
    }

    #[test]
    fn negative_zero_id_matches_zero() {
        let summary = summary(json!({
            "residentData": { "residents": [{ "_id": -0.0, "username": "zed" }] }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [{ "residentId": "0", "roomId": { "roomNumber": "G-1" } }]
        }));

        let view = aggregate(Some(&summary), Some(&rooms));

        assert_eq!(view.residents[0].resident_id, "0");
        assert_eq!(view.residents[0].room_number, "G-1");
    }

    #[test]
    fn first_assignment_wins_on_duplicates() {
        let summary = summary(json!({
            "residentData": { "residents": [{ "_id": "r1", "username": "amy" }] }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [
                { "residentId": "r1", "roomId": { "roomNumber": "FIRST" } },
                { "residentId": "r1", "roomId": { "roomNumber": "SECOND" } }
            ]
        }));

        let view = aggregate(Some(&summary), Some(&rooms));

        assert_eq!(view.residents[0].room_number, "FIRST");
    }

    #[test]
    fn missing_resident_ids_never_match() {
        let summary = summary(json!({
            "residentData": { "residents": [{ "username": "ghost" }] }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [{ "roomId": { "roomNumber": "0" } }]
        }));

        let view = aggregate(Some(&summary), Some(&rooms));

        assert_eq!(view.residents[0].resident_id, "");
        assert_eq!(view.residents[0].room_number, NOT_ASSIGNED);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let summary = summary(json!({
            "staffData": { "staffNames": ["bob"] },
            "residentData": { "residents": [{ "_id": "r1", "username": "amy" }] },
            "roomData": { "totalRooms": 3 }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [{ "residentId": "r1", "roomId": { "roomNumber": "A-101" } }]
        }));

        let first = aggregate(Some(&summary), Some(&rooms));
        let second = aggregate(Some(&summary), Some(&rooms));

        assert_eq!(first, second);
    }

    #[test]
    fn resident_roster_scenario() {
        let summary = summary(json!({
            "residentData": { "residents": [{ "_id": "1", "username": "amy" }] },
            "roomData": {
                "totalRooms": 10,
                "occupiedRooms": 4,
                "availableRooms": 6,
                "activeAssignments": 4,
                "inActiveAssignments": 0,
                "netWorth": 0
            }
        }));
        let rooms = assignments(json!({
            "roomAssignments": [{ "residentId": "1", "roomId": { "roomNumber": "12B" } }]
        }));

        let view = aggregate(Some(&summary), Some(&rooms));

        assert_eq!(
            view.residents,
            vec![ResidentView {
                username: "amy".to_string(),
                resident_id: "1".to_string(),
                room_number: "12B".to_string(),
            }]
        );
        assert!((view.totals.total_rooms - 10.0).abs() < f64::EPSILON);
        assert!((view.totals.occupied_rooms - 4.0).abs() < f64::EPSILON);
        assert_eq!(view.assigned_resident_count(), 1);
    }

    #[test]
    fn expense_category_scenario() {
        let summary = summary(json!({
            "expensesData": { "expenses": [{ "_id": "Utilities", "totalAmount": 500 }] }
        }));

        let view = aggregate(Some(&summary), None);

        assert_eq!(
            view.expenses_by_category,
            vec![ExpenseCategory {
                category: "Utilities".to_string(),
                total_amount: 500.0,
            }]
        );
        assert_eq!(view.category_count(), 1);
    }

    #[test]
    fn series_and_totals_are_carried_over() {
        let summary = summary(json!({
            "staffData": { "staffNames": ["bob", "carol"] },
            "revenueData": { "reveData": [{ "period": "Jan", "amount": 100 }], "totalRevenue": 100 },
            "expensesData": { "expenseData": [{ "period": "Jan", "amount": 40 }], "totalExpenses": 40 },
            "roomData": { "netWorth": 60 }
        }));

        let view = aggregate(Some(&summary), None);

        assert_eq!(view.staff_count(), 2);
        assert_eq!(
            view.revenue_series,
            vec![SeriesEntry {
                period: "Jan".to_string(),
                amount: 100.0
            }]
        );
        assert_eq!(view.expense_series.len(), 1);
        assert!((view.totals.total_revenue - 100.0).abs() < f64::EPSILON);
        assert!((view.totals.total_expenses - 40.0).abs() < f64::EPSILON);
        assert!((view.totals.net_worth - 60.0).abs() < f64::EPSILON);
        assert!(all_finite(&view));
    }

    #[test]
    fn view_serializes_with_camel_case_keys() {
        let summary = summary(json!({
            "residentData": { "residents": [{ "_id": "1", "username": "amy" }] },
            "roomData": { "inActiveAssignments": 2 }
        }));

        let value = serde_json::to_value(aggregate(Some(&summary), None))
            .expect("view model serializes");

        assert_eq!(value["totals"]["inActiveAssignments"], json!(2.0));
        assert_eq!(value["residents"][0]["residentId"], json!("1"));
        assert_eq!(value["residents"][0]["roomNumber"], json!(NOT_ASSIGNED));
        assert!(value["expensesByCategory"].as_array().is_some());
        assert!(value["revenueSeries"].as_array().is_some());
    }
}
