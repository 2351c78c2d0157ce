use crate::{api::ApiClient, cli::globals::GlobalArgs, server};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub port: u16,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Global args: {:?}", args.globals);

    log_startup(&args);

    let client = ApiClient::new(args.globals.api_config())?;

    server::new(args.port, client).await
}

fn log_startup(args: &Args) {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    info!(
        "{} {} ({}) port={} upstream={} authenticated={} timeout={}s",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_hash,
        args.port,
        args.globals.api_url,
        args.globals.api_token.is_some(),
        args.globals.timeout.as_secs(),
    );
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
