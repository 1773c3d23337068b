//! Constructors and aggregation helpers for `FlatconfError`.

use std::sync::Arc;

use super::{AggregatedErrors, FlatconfError, MalformedReason};

impl FlatconfError {
    /// Tries to build a [`FlatconfError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.len() > 1 {
            return Some(AggregatedErrors::new(arcs).into());
        }
        let only = arcs.pop()?;
        Some(Arc::try_unwrap(only).unwrap_or_else(|shared| AggregatedErrors::new(vec![shared]).into()))
    }

    /// Build a [`FlatconfError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`FlatconfError::try_aggregate`] when
    /// the error list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Construct a [`FlatconfError::MalformedPath`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flatconf::{FlatconfError, MalformedReason};
    /// let e = FlatconfError::malformed("foo-bar.baz", "foo-bar", MalformedReason::NonNumericIndex);
    /// assert!(matches!(e, FlatconfError::MalformedPath { .. }));
    /// ```
    #[must_use]
    pub fn malformed(
        key: impl Into<String>,
        segment: impl Into<String>,
        reason: MalformedReason,
    ) -> Self {
        Self::MalformedPath {
            key: key.into(),
            segment: segment.into(),
            reason,
        }
    }

    /// Construct a [`FlatconfError::SourceUnavailable`].
    #[must_use]
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Construct a [`FlatconfError::InvalidEncoding`].
    #[must_use]
    pub fn invalid_encoding(key: impl Into<String>) -> Self {
        Self::InvalidEncoding { key: key.into() }
    }

    /// Construct a [`FlatconfError::SourceUnavailable`] wrapped in an [`Arc`].
    #[must_use]
    pub fn source_unavailable_arc(
        source_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self::source_unavailable(source_name, reason))
    }

    /// Returns `true` for [`FlatconfError::MalformedPath`], including when
    /// every member of an aggregate is a malformed path.
    #[must_use]
    pub fn is_malformed_path(&self) -> bool {
        match self {
            Self::MalformedPath { .. } => true,
            Self::Aggregate(errors) => errors.iter().all(Self::is_malformed_path),
            _ => false,
        }
    }
}
