use crate::cli::actions::{Action, fetch, server};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Fetch(args) => fetch::execute(args).await,
        Action::Server(args) => server::execute(args).await,
    }
}
