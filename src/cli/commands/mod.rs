pub mod api;
pub mod logging;

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_FETCH: &str = "fetch";
pub const CMD_SERVER: &str = "server";
pub const ARG_PRETTY: &str = "pretty";
pub const ARG_PORT: &str = "port";

fn fetch() -> Command {
    Command::new(CMD_FETCH)
        .about("Load the dashboard once and print it as JSON")
        .arg(
            Arg::new(ARG_PRETTY)
                .long(ARG_PRETTY)
                .help("Pretty-print the JSON output")
                .action(ArgAction::SetTrue),
        )
}

fn server() -> Command {
    Command::new(CMD_SERVER)
        .about("Serve the dashboard view model over HTTP")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("STAYEASE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("stayease")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(fetch())
        .subcommand(server());

    let command = api::with_args(command);
    logging::with_args(command)
}
