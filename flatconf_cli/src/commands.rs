//! Execution of the parsed subcommands.
//!
//! Each command produces a JSON value; printing is left to [`crate::output`].

use std::fs;

use camino::Utf8Path;
use flatconf::build::build_tree_bounded;
use flatconf::pipeline::{AggregationPipeline, SourceComposer};
use flatconf::prune::prune;
use flatconf::{Document, FlatRecord, FlatconfResult, FlatconfResultExt};
use serde_json::Value;
use tracing::info;

use crate::cli::{AggregateCommand, Commands, FileCommand, OutputFormat};
use crate::error::{CliError, Result};
use crate::settings::Settings;

/// Run `command` with the resolved `settings`.
///
/// # Errors
///
/// Returns a [`CliError`] when an input cannot be read or decoded, or when the
/// library rejects the data.
pub fn run(command: &Commands, settings: &Settings) -> Result<Value> {
    match command {
        Commands::Aggregate(args) => aggregate(args, settings),
        Commands::Expand(args) => expand(args, settings),
        Commands::Flatten(args) => flatten(args),
        Commands::Prune(args) => prune_file(args),
    }
}

fn aggregate(args: &AggregateCommand, settings: &Settings) -> Result<Value> {
    let mut composer = SourceComposer::with_capacity(args.sources.len());
    for spec in &args.sources {
        composer.push_layer(spec.load()?);
    }
    let pipeline = AggregationPipeline::new(settings.pipeline.clone());
    let aggregation = pipeline.aggregate(composer)?;
    info!(
        keys = aggregation.record().len(),
        skipped = aggregation.unavailable().len(),
        "aggregated sources"
    );
    match args.output {
        OutputFormat::Context => {
            let stamp = args.stamp.then_some(&settings.pipeline.stamp);
            Ok(aggregation.context_value(stamp))
        }
        OutputFormat::Record => serde_json::to_value(aggregation.record()).map_err(CliError::Encode),
    }
}

fn expand(args: &FileCommand, settings: &Settings) -> Result<Value> {
    let record = decode_file(&args.file, FlatRecord::from_json_str)?;
    let document = build_tree_bounded(
        record,
        settings.pipeline.grammar,
        settings.pipeline.max_index,
    )?;
    Ok(document.to_json())
}

fn flatten(args: &FileCommand) -> Result<Value> {
    let document = decode_file(&args.file, Document::from_json_str)?;
    serde_json::to_value(document.flatten()).map_err(CliError::Encode)
}

fn prune_file(args: &FileCommand) -> Result<Value> {
    let value = decode_file(&args.file, |text| {
        serde_json::from_str::<Value>(text).into_flatconf()
    })?;
    Ok(prune(value))
}

fn decode_file<T>(path: &Utf8Path, decode: impl FnOnce(&str) -> FlatconfResult<T>) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    decode(&text).map_err(|source| CliError::Source {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result as TestResult, bail, ensure};
    use camino::Utf8PathBuf;
    use flatconf::path::KeyGrammar;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    use crate::sources::SourceSpec;

    struct Workdir {
        dir: TempDir,
    }

    impl Workdir {
        fn write(&self, name: &str, contents: &str) -> TestResult<Utf8PathBuf> {
            let path = Utf8PathBuf::from_path_buf(self.dir.path().join(name))
                .map_err(|p| anyhow::anyhow!("non UTF-8 temp path {}", p.display()))?;
            fs::write(&path, contents)?;
            Ok(path)
        }

        fn missing(&self, name: &str) -> TestResult<Utf8PathBuf> {
            Utf8PathBuf::from_path_buf(self.dir.path().join(name))
                .map_err(|p| anyhow::anyhow!("non UTF-8 temp path {}", p.display()))
        }
    }

    #[fixture]
    fn workdir() -> Workdir {
        #[expect(clippy::expect_used, reason = "fixture setup failures abort the test")]
        let dir = tempfile::tempdir().expect("create temp dir");
        Workdir { dir }
    }

    const fn file(path: Utf8PathBuf) -> FileCommand {
        FileCommand { file: path }
    }

    #[rstest]
    fn aggregate_applies_sources_in_order(workdir: Workdir) -> TestResult<()> {
        let context = workdir.write("ctx.json", r#"{"db": {"host": "a", "port": "5432"}}"#)?;
        let stored = workdir.write("stored.flat.json", r#"{"db.host": "b", "tags-0": "x"}"#)?;
        let missing = workdir.missing("gone.json")?;
        let command = Commands::Aggregate(AggregateCommand {
            sources: vec![
                SourceSpec::new(flatconf::pipeline::SourceProvenance::Context, context),
                SourceSpec::new(flatconf::pipeline::SourceProvenance::NamedSecret, missing),
                SourceSpec::new(flatconf::pipeline::SourceProvenance::StoredSecret, stored),
            ],
            output: OutputFormat::Context,
            stamp: true,
        });
        let value = run(&command, &Settings::default())?;
        ensure!(
            value
                == json!({
                    "apiVersion": "internal.crossplane.io/v1alpha1",
                    "kind": "Environment",
                    "db": {"host": "b", "port": "5432"},
                    "tags": ["x"],
                }),
            "unexpected context {value}"
        );
        Ok(())
    }

    #[rstest]
    fn aggregate_can_emit_the_record(workdir: Workdir) -> TestResult<()> {
        let tree = workdir.write("tree.json", r#"{"a": [{"b": "1"}], "c": "2"}"#)?;
        let command = Commands::Aggregate(AggregateCommand {
            sources: vec![tree.as_str().parse().map_err(anyhow::Error::msg)?],
            output: OutputFormat::Record,
            stamp: false,
        });
        let value = run(&command, &Settings::default())?;
        ensure!(value == json!({"a-0.b": "1", "c": "2"}), "unexpected record {value}");
        Ok(())
    }

    #[rstest]
    fn expand_honours_the_configured_grammar(workdir: Workdir) -> TestResult<()> {
        let path = workdir.write("flat.json", r#"{"foo-bar.baz": "1"}"#)?;
        let value = run(&Commands::Expand(file(path.clone())), &Settings::default())?;
        ensure!(value == json!({"foo-bar": {"baz": "1"}}), "unexpected tree {value}");

        let mut settings = Settings::default();
        settings.pipeline.grammar = KeyGrammar::Strict;
        let strict = run(&Commands::Expand(file(path)), &settings);
        ensure!(strict.is_err(), "strict grammar should reject foo-bar");
        Ok(())
    }

    #[rstest]
    fn expand_honours_the_index_bound(workdir: Workdir) -> TestResult<()> {
        let path = workdir.write("flat.json", r#"{"list-3": "d"}"#)?;
        let mut settings = Settings::default();
        settings.pipeline.max_index = Some(2);
        match run(&Commands::Expand(file(path.clone())), &settings) {
            Err(CliError::Flatconf(err)) if err.is_malformed_path() => {}
            other => bail!("expected a malformed path error, got {other:?}"),
        }
        settings.pipeline.max_index = Some(3);
        let value = run(&Commands::Expand(file(path)), &settings)?;
        ensure!(value == json!({"list": [{}, {}, {}, "d"]}), "unexpected tree {value}");
        Ok(())
    }

    #[rstest]
    fn flatten_encodes_trees(workdir: Workdir) -> TestResult<()> {
        let path = workdir.write("tree.json", r#"{"ports": [{"name": "http"}, "tcp"]}"#)?;
        let value = run(&Commands::Flatten(file(path)), &Settings::default())?;
        ensure!(
            value == json!({"ports-0.name": "http", "ports-1": "tcp"}),
            "unexpected record {value}"
        );
        Ok(())
    }

    #[rstest]
    fn prune_strips_nulls(workdir: Workdir) -> TestResult<()> {
        let path = workdir.write("desired.json", r#"{"a": null, "b": {"c": null}, "d": [null]}"#)?;
        let value = run(&Commands::Prune(file(path)), &Settings::default())?;
        ensure!(value == json!({"d": [null]}), "unexpected pruned value {value}");
        Ok(())
    }

    #[rstest]
    fn unreadable_file_is_a_read_error(workdir: Workdir) -> TestResult<()> {
        let path = workdir.missing("absent.json")?;
        match run(&Commands::Flatten(file(path)), &Settings::default()) {
            Err(CliError::Read { .. }) => Ok(()),
            other => bail!("expected a read error, got {other:?}"),
        }
    }
}
