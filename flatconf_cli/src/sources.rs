//! Reading aggregation sources from disk.
//!
//! A source argument has the form `[provenance:]path`. The provenance names
//! which kind of fetch produced the file; when it is omitted (or is not a
//! known provenance) the whole argument is taken as a path and the layer is
//! recorded as `custom`.

use std::fmt;
use std::fs;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use flatconf::pipeline::{SourceLayer, SourceProvenance};
use flatconf::{Document, FlatRecord, FlatconfError};
use tracing::debug;

use crate::error::{CliError, Result};

/// Suffix marking a file as a flat record rather than a tree.
pub const FLAT_RECORD_SUFFIX: &str = ".flat.json";

/// A source named on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSpec {
    provenance: SourceProvenance,
    path: Utf8PathBuf,
}

impl SourceSpec {
    /// Describe a source explicitly.
    #[must_use]
    pub fn new(provenance: SourceProvenance, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            provenance,
            path: path.into(),
        }
    }

    /// Kind of fetch the file represents.
    #[must_use]
    pub const fn provenance(&self) -> SourceProvenance {
        self.provenance
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Whether the file holds flat entries rather than a nested document.
    #[must_use]
    pub fn is_flat_record(&self) -> bool {
        self.path.as_str().ends_with(FLAT_RECORD_SUFFIX)
    }

    /// Read the file into a layer.
    ///
    /// A file that cannot be read becomes an unavailable layer so the
    /// aggregation can carry on without it.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Source`] when the file was read but its content is
    /// not valid for its shape.
    pub fn load(&self) -> Result<SourceLayer> {
        let label = self.path.as_str();
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                debug!(source = label, error = %err, "source file could not be read");
                return Ok(SourceLayer::unavailable(
                    self.provenance,
                    label,
                    FlatconfError::source_unavailable_arc(label, err.to_string()),
                )
                .with_path(self.path.clone()));
            }
        };
        let layer = if self.is_flat_record() {
            let record = FlatRecord::from_json_str(&text).map_err(|source| self.invalid(source))?;
            SourceLayer::record(self.provenance, label, record)
        } else {
            let document = Document::from_json_str(&text).map_err(|source| self.invalid(source))?;
            SourceLayer::tree(self.provenance, label, document)
        };
        Ok(layer.with_path(self.path.clone()))
    }

    fn invalid(&self, source: std::sync::Arc<FlatconfError>) -> CliError {
        CliError::Source {
            path: self.path.clone(),
            source,
        }
    }
}

impl FromStr for SourceSpec {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(String::from("source path must not be empty"));
        }
        let known = raw.split_once(':').and_then(|(prefix, rest)| {
            SourceProvenance::from_name(prefix).map(|provenance| (provenance, rest))
        });
        match known {
            Some((_, "")) => Err(format!("source `{raw}` names a provenance but no path")),
            Some((provenance, path)) => Ok(Self::new(provenance, path)),
            None => Ok(Self::new(SourceProvenance::Custom, raw)),
        }
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provenance, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result, bail, ensure};
    use rstest::rstest;

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> Result<Utf8PathBuf> {
        Utf8PathBuf::from_path_buf(dir.path().join(name))
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp path {}", path.display()))
    }

    #[rstest]
    #[case("context:ctx.json", SourceProvenance::Context, "ctx.json")]
    #[case("resource-status:out/status.json", SourceProvenance::ResourceStatus, "out/status.json")]
    #[case("plain.json", SourceProvenance::Custom, "plain.json")]
    #[case("C:/windows/path.json", SourceProvenance::Custom, "C:/windows/path.json")]
    #[case("stored-secret:a:b.json", SourceProvenance::StoredSecret, "a:b.json")]
    fn parses_source_arguments(
        #[case] raw: &str,
        #[case] provenance: SourceProvenance,
        #[case] path: &str,
    ) -> Result<()> {
        let spec: SourceSpec = raw.parse().map_err(anyhow::Error::msg)?;
        ensure!(spec == SourceSpec::new(provenance, path), "unexpected spec {spec}");
        Ok(())
    }

    #[rstest]
    #[case("")]
    #[case("context:")]
    fn rejects_empty_paths(#[case] raw: &str) {
        assert!(raw.parse::<SourceSpec>().is_err());
    }

    #[rstest]
    #[case("stored.flat.json", true)]
    #[case("stored.json", false)]
    #[case("flat.json", false)]
    fn detects_flat_records(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(
            SourceSpec::new(SourceProvenance::Custom, path).is_flat_record(),
            expected
        );
    }

    #[rstest]
    fn missing_file_becomes_unavailable_layer() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = temp_path(&dir, "absent.json")?;
        let layer = SourceSpec::new(SourceProvenance::NamedSecret, path.clone()).load()?;
        ensure!(!layer.is_available(), "missing file should be unavailable");
        ensure!(layer.path() == Some(path.as_path()), "layer lost its path");
        Ok(())
    }

    #[rstest]
    fn flat_record_files_load_as_records() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = temp_path(&dir, "stored.flat.json")?;
        fs::write(&path, r#"{"tags-0": "prod"}"#).context("write fixture")?;
        let layer = SourceSpec::new(SourceProvenance::StoredSecret, path).load()?;
        let flatconf::pipeline::SourceContent::Record(record) = layer.content() else {
            bail!("expected a record layer");
        };
        ensure!(record.get("tags-0") == Some("prod"), "unexpected record {record:?}");
        Ok(())
    }

    #[rstest]
    fn malformed_tree_is_fatal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = temp_path(&dir, "bad.json")?;
        fs::write(&path, "[1, 2]").context("write fixture")?;
        match SourceSpec::new(SourceProvenance::Custom, path).load() {
            Err(CliError::Source { .. }) => Ok(()),
            other => bail!("expected a source error, got {other:?}"),
        }
    }
}
