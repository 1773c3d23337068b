//! Command-line surface of the `flatconf` binary.

use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use flatconf::path::KeyGrammar;

use crate::sources::SourceSpec;

/// Aggregate, expand, flatten, and prune configuration documents.
#[derive(Debug, Parser)]
#[command(name = "flatconf", bin_name = "flatconf", version)]
pub struct CommandLine {
    /// Path to a TOML settings file, replacing `flatconf.toml` discovery.
    #[arg(long = "config", short = 'c', value_name = "PATH", global = true)]
    pub config_path: Option<Utf8PathBuf>,
    /// Switches shared by every subcommand.
    #[command(flatten)]
    pub globals: GlobalArgs,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Global switches that override file and environment settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Args)]
pub struct GlobalArgs {
    /// Grammar used to parse flat keys.
    #[arg(long, value_enum, global = true)]
    pub grammar: Option<GrammarArg>,
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long = "log-level", value_name = "FILTER", global = true)]
    pub log_level: Option<String>,
    /// Print JSON on a single line.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub compact: bool,
}

/// Key grammar as spelt on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GrammarArg {
    /// At most one `-` per segment, always followed by a decimal index.
    Strict,
    /// Only a trailing `<alnum>-<digits>` marks an array index.
    Heuristic,
}

impl From<GrammarArg> for KeyGrammar {
    fn from(arg: GrammarArg) -> Self {
        match arg {
            GrammarArg::Strict => Self::Strict,
            GrammarArg::Heuristic => Self::Heuristic,
        }
    }
}

/// Subcommands implemented by the binary.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Merge sources, lowest precedence first, into one document.
    #[command(name = "aggregate")]
    Aggregate(AggregateCommand),
    /// Decode a flat record file into a nested document.
    #[command(name = "expand")]
    Expand(FileCommand),
    /// Encode a nested document file as a flat record.
    #[command(name = "flatten")]
    Flatten(FileCommand),
    /// Strip nulls and empty objects from a JSON file.
    #[command(name = "prune")]
    Prune(FileCommand),
}

/// Arguments for `aggregate`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AggregateCommand {
    /// Sources as `[provenance:]path`, lowest precedence first.
    ///
    /// Files ending in `.flat.json` are read as flat records.
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<SourceSpec>,
    /// Shape of the printed result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Context)]
    pub output: OutputFormat,
    /// Stamp `apiVersion` and `kind` onto an untyped context.
    #[arg(long, action = ArgAction::SetTrue)]
    pub stamp: bool,
}

/// Result shapes offered by `aggregate`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The merged nested document.
    #[default]
    Context,
    /// The merged document as flat entries.
    Record,
}

/// Arguments for subcommands operating on one file.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct FileCommand {
    /// JSON file to read.
    #[arg(value_name = "FILE")]
    pub file: Utf8PathBuf,
}

/// Whether a parse error is really a request to show help or the version.
#[must_use]
pub fn is_display_request(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail, ensure};
    use flatconf::pipeline::SourceProvenance;
    use rstest::rstest;

    #[rstest]
    fn parses_aggregate_sources_in_order() -> Result<()> {
        let cli = CommandLine::try_parse_from([
            "flatconf",
            "aggregate",
            "context:ctx.json",
            "stored.flat.json",
            "--output",
            "record",
        ])?;
        let Commands::Aggregate(command) = cli.command else {
            bail!("expected aggregate");
        };
        ensure!(command.output == OutputFormat::Record, "output not parsed");
        ensure!(
            command.sources
                == vec![
                    SourceSpec::new(SourceProvenance::Context, "ctx.json"),
                    SourceSpec::new(SourceProvenance::Custom, "stored.flat.json"),
                ],
            "unexpected sources {:?}",
            command.sources
        );
        Ok(())
    }

    #[rstest]
    fn globals_follow_the_subcommand() -> Result<()> {
        let cli = CommandLine::try_parse_from([
            "flatconf",
            "expand",
            "in.json",
            "--grammar",
            "heuristic",
            "--compact",
        ])?;
        ensure!(cli.globals.grammar == Some(GrammarArg::Heuristic), "grammar missing");
        ensure!(cli.globals.compact, "compact flag missing");
        Ok(())
    }

    #[rstest]
    fn aggregate_requires_a_source() {
        let err = CommandLine::try_parse_from(["flatconf", "aggregate"]).err();
        assert!(err.is_some_and(|e| e.kind() == ErrorKind::MissingRequiredArgument));
    }

    #[rstest]
    #[case(&["flatconf", "--help"], true)]
    #[case(&["flatconf", "--version"], true)]
    #[case(&["flatconf", "frobnicate"], false)]
    fn recognises_display_requests(#[case] args: &[&str], #[case] expected: bool) {
        let err = CommandLine::try_parse_from(args).err();
        assert_eq!(err.as_ref().map(is_display_request), Some(expected));
    }
}
