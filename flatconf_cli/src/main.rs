//! `flatconf` entry-point: parse arguments, layer settings, run one command.

use clap::Parser;

use flatconf_cli::cli::{CommandLine, is_display_request};
use flatconf_cli::error::Result;
use flatconf_cli::{commands, output, settings, telemetry};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let cli = parse_command_line()?;
    let settings = settings::load_settings(&cli.globals, cli.config_path.as_deref())?;
    telemetry::init(&settings.log_level)?;
    tracing::debug!(
        config = ?cli.config_path,
        grammar = ?settings.pipeline.grammar,
        max_index = ?settings.pipeline.max_index,
        "settings loaded"
    );
    let value = commands::run(&cli.command, &settings)?;
    output::print_json(&value, settings.pretty)
}

fn parse_command_line() -> Result<CommandLine> {
    match CommandLine::try_parse() {
        Ok(cli) => Ok(cli),
        Err(err) => {
            if is_display_request(&err) {
                err.exit();
            }
            Err(err.into())
        }
    }
}
