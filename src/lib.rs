//! # StayEase (hostel dashboard aggregation)
//!
//! `stayease` fetches the admin dashboard of a hostel-management backend and
//! shapes it into a view model that a presentation layer can render without
//! branching on missing data.
//!
//! ## Data flow
//!
//! - **Fetch:** [`api::ApiClient`] issues `GET /dashboard` and
//!   `GET /getAllAssignedRooms` with an explicitly injected bearer token.
//! - **Validate:** [`dashboard::dto`] turns each raw JSON body into a fully
//!   defaulted DTO. A malformed field only loses that field.
//! - **Join:** [`dashboard::aggregate`] enriches the resident roster with room
//!   numbers. Identifiers are compared as normalized strings and the first
//!   matching assignment wins.
//! - **Present:** [`dashboard::load`] runs both requests concurrently and yields
//!   a [`dashboard::DashboardState`]; a failed source degrades to defaults and an
//!   error banner instead of failing the whole load.

pub mod api;
pub mod cli;
pub mod dashboard;
pub mod server;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
