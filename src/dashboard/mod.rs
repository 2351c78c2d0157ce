//! Admin dashboard: boundary parsing, the resident/room join and the
//! presentation state of a load.

pub mod aggregate;
pub mod dto;
pub mod state;

pub use self::aggregate::{
    DashboardViewModel, ExpenseCategory, NOT_ASSIGNED, ResidentView, SeriesEntry, Totals,
    aggregate,
};
pub use self::dto::{DashboardSummary, RoomAssignments};
pub use self::state::{DashboardState, LOAD_FAILED_MESSAGE, load};
