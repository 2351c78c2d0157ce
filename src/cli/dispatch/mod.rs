use crate::{
    api::session,
    cli::{
        actions::{Action, fetch, server},
        commands::{self, api::Options},
        globals::GlobalArgs,
    },
};
use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use tracing::debug;

/// # Errors
/// Returns an error if required arguments are missing or the session file
/// cannot be read.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let options = Options::parse(matches)?;
    let globals = globals(options)?;

    match matches.subcommand() {
        Some((commands::CMD_FETCH, sub)) => Ok(Action::Fetch(fetch::Args {
            globals,
            pretty: sub.get_flag(commands::ARG_PRETTY),
        })),
        Some((commands::CMD_SERVER, sub)) => Ok(Action::Server(server::Args {
            globals,
            port: sub
                .get_one::<u16>(commands::ARG_PORT)
                .copied()
                .context("missing required argument: --port")?,
        })),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}

fn globals(options: Options) -> Result<GlobalArgs> {
    let mut globals = GlobalArgs::new(options.api_url);
    globals.set_timeout(options.timeout);
    globals.set_token(resolve_token(options.token, options.session_file.as_deref())?);
    Ok(globals)
}

/// An explicit token wins; the session file is only read without one.
fn resolve_token(
    token: Option<SecretString>,
    session_file: Option<&std::path::Path>,
) -> Result<Option<SecretString>> {
    if token.is_some() {
        return Ok(token);
    }

    match session_file {
        Some(path) => {
            debug!("reading token from session file {}", path.display());
            session::token_from_file(path)
        }
        None => Ok(None),
    }
}
