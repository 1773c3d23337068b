//! Layered settings for the binary.
//!
//! Settings are composed with `figment` from lowest to highest precedence:
//! built-in defaults, a TOML file, `FLATCONF_` environment variables, and
//! finally the global command-line switches. Nested keys in the environment
//! use a double underscore, so `FLATCONF_PIPELINE__GRAMMAR=heuristic` sets
//! `pipeline.grammar`.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use flatconf::path::KeyGrammar;
use flatconf::pipeline::PipelineOptions;
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;
use crate::error::{CliError, Result};

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "flatconf.toml";
/// Prefix of environment variables read into settings.
pub const ENV_PREFIX: &str = "FLATCONF_";

/// Resolved settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Options handed to the aggregation pipeline.
    pub pipeline: PipelineOptions,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pipeline: PipelineOptions::default(),
            log_level: String::from("warn"),
            pretty: true,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct PipelineOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    grammar: Option<KeyGrammar>,
}

/// Command-line switches in the shape of [`Settings`]; unset switches are
/// omitted so they do not mask lower layers.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    pipeline: PipelineOverrides,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pretty: Option<bool>,
}

impl From<&GlobalArgs> for CliOverrides {
    fn from(globals: &GlobalArgs) -> Self {
        Self {
            pipeline: PipelineOverrides {
                grammar: globals.grammar.map(KeyGrammar::from),
            },
            log_level: globals.log_level.clone(),
            pretty: globals.compact.then_some(false),
        }
    }
}

/// Compose settings from every layer.
///
/// When `config_path` is `None`, [`DEFAULT_CONFIG_FILE`] is read if present.
///
/// # Errors
///
/// Returns [`CliError::MissingConfig`] when an explicit `config_path` does not
/// exist and [`CliError::Configuration`] when any layer fails to deserialise.
pub fn load_settings(globals: &GlobalArgs, config_path: Option<&Utf8Path>) -> Result<Settings> {
    let file = match config_path {
        Some(path) if !path.is_file() => return Err(CliError::MissingConfig(path.to_owned())),
        Some(path) => path.to_owned(),
        None => Utf8PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    let settings = Figment::from(Serialized::defaults(Settings::default()))
        .merge(Toml::file(file.as_std_path()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Serialized::defaults(CliOverrides::from(globals)))
        .extract()?;
    Ok(settings)
}
