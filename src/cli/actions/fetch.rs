use crate::{
    api::ApiClient,
    cli::globals::GlobalArgs,
    dashboard::{self, DashboardState},
};
use anyhow::Result;
use std::io::Write;
use tracing::warn;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub pretty: bool,
}

/// Load the dashboard once and write the resulting state to stdout.
///
/// A failed load is still printed (with its defaulted view) and only
/// reported as a warning; the error banner is part of the output.
/// # Errors
/// Returns an error if the HTTP client cannot be built or stdout fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = ApiClient::new(args.globals.api_config())?;

    let state = dashboard::load(&client).await;

    if let DashboardState::Error { message, .. } = &state {
        warn!("{message}");
    }

    let json = render(&state, args.pretty)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;

    Ok(())
}

fn render(state: &DashboardState, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(state)
    } else {
        serde_json::to_string(state)
    }
}
