//! A batch of errors reported together by one aggregation run.

use std::{error::Error, fmt, slice, sync::Arc, vec};

use super::FlatconfError;

/// Every [`FlatconfError`] collected while decoding the layers of one
/// aggregation, in the order the layers were visited.
///
/// Errors are held behind [`Arc`] so that a failure already shared with a
/// caller can be reported again without cloning it.
///
/// # Examples
///
/// ```
/// use flatconf::{AggregatedErrors, FlatconfError};
///
/// let batch: AggregatedErrors = [
///     FlatconfError::source_unavailable("context", "missing"),
///     FlatconfError::source_unavailable("secret", "forbidden"),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch.to_string(), "  [1] source 'context' is unavailable: missing\n  [2] source 'secret' is unavailable: forbidden");
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors {
    errors: Vec<Arc<FlatconfError>>,
}

impl AggregatedErrors {
    /// Wrap errors that have already been collected.
    #[must_use]
    pub const fn new(errors: Vec<Arc<FlatconfError>>) -> Self {
        Self { errors }
    }

    /// Record one more failure.
    pub fn push(&mut self, error: impl Into<Arc<FlatconfError>>) {
        self.errors.push(error.into());
    }

    /// Borrow each failure in report order.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &FlatconfError> {
        self.errors.iter().map(Arc::as_ref)
    }

    /// Keys rejected by the path parser, in report order.
    #[must_use = "iterators should be consumed to inspect keys"]
    pub fn malformed_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|error| match error {
            FlatconfError::MalformedPath { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    /// How many failures were collected.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// `true` when nothing failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, error) in (1_usize..).zip(&self.errors) {
            if position > 1 {
                f.write_str("\n")?;
            }
            write!(f, "  [{position}] {error}")?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<E: Into<Arc<FlatconfError>>> FromIterator<E> for AggregatedErrors {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<E: Into<Arc<FlatconfError>>> Extend<E> for AggregatedErrors {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.errors.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a Arc<FlatconfError>;
    type IntoIter = slice::Iter<'a, Arc<FlatconfError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<FlatconfError>;
    type IntoIter = vec::IntoIter<Arc<FlatconfError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
