//! Parsing of flat keys into path segments.
//!
//! A flat key is a sequence of segments joined by `.`. A segment is either a
//! plain object key or an array element written as `<name>-<index>`. How a
//! segment is classified depends on the [`KeyGrammar`] in effect:
//!
//! * [`KeyGrammar::Strict`] treats a `-` as an array marker and allows at
//!   most one per segment, so `foo-bar` and `a-1-2` are rejected rather than
//!   silently read as plain keys.
//! * [`KeyGrammar::Heuristic`] only recognises a trailing
//!   `<alphanumeric>-<digits>` suffix and reads anything else as a plain key.
//!   Names such as `item-2` are therefore always arrays under this grammar.
//!
//! # Examples
//!
//! ```
//! use flatconf::path::{KeyGrammar, Segment, parse_key};
//!
//! let path = parse_key("tags-1.name", KeyGrammar::Strict)?;
//! assert_eq!(
//!     path.segments(),
//!     &[Segment::indexed("tags", 1), Segment::plain("name")]
//! );
//! assert!(parse_key("foo-bar.baz", KeyGrammar::Strict).is_err());
//! # Ok::<_, std::sync::Arc<flatconf::FlatconfError>>(())
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{FlatconfError, FlatconfResult, MalformedReason};

/// Rules used to decide whether a segment addresses an array element.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyGrammar {
    /// A segment holds at most one `-`, and the text after it must be a
    /// decimal index.
    #[default]
    Strict,
    /// Only a trailing `<alphanumeric>-<digits>` suffix marks an array index.
    Heuristic,
}

/// One dot-delimited component of a flat key.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Segment {
    name: String,
    index: Option<usize>,
}

impl Segment {
    /// A plain object-key segment.
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// An array-element segment addressing `name[index]`.
    #[must_use]
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }

    /// The object key (or array name) of this segment.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The array index, if this segment addresses an array element.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Reject an index above `max_index`; `None` leaves indices unbounded.
    ///
    /// Inserting densifies arrays up to the index, so a bound caps what a
    /// single entry can allocate.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedReason::IndexOverflow`] when the index exceeds
    /// `max_index`.
    pub fn within(self, max_index: Option<usize>) -> Result<Self, MalformedReason> {
        match (self.index, max_index) {
            (Some(index), Some(limit)) if index > limit => Err(MalformedReason::IndexOverflow),
            _ => Ok(self),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}-{index}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A parsed flat key: a non-empty sequence of segments.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Build a path from already-classified segments.
    ///
    /// Returns `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Option<Self> {
        (!segments.is_empty()).then_some(Self { segments })
    }

    /// The segments in order from the root.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Split into the leaf segment and the segments leading to it.
    #[must_use]
    pub fn split_last(&self) -> Option<(&Segment, &[Segment])> {
        self.segments.split_last()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Parse a flat key into its segments.
///
/// # Errors
///
/// Returns [`FlatconfError::MalformedPath`] when the key is empty, contains an
/// empty segment, or carries an array suffix that is not a valid index under
/// `grammar`.
pub fn parse_key(key: &str, grammar: KeyGrammar) -> FlatconfResult<KeyPath> {
    parse_key_bounded(key, grammar, None)
}

/// Parse a flat key, additionally rejecting array indices above `max_index`.
///
/// # Errors
///
/// Returns [`FlatconfError::MalformedPath`] for the same reasons as
/// [`parse_key`], and with [`MalformedReason::IndexOverflow`] for an index
/// beyond `max_index`.
pub fn parse_key_bounded(
    key: &str,
    grammar: KeyGrammar,
    max_index: Option<usize>,
) -> FlatconfResult<KeyPath> {
    let segments = key
        .split('.')
        .map(|token| {
            parse_segment(token, grammar)
                .and_then(|segment| segment.within(max_index))
                .map_err(|reason| Arc::new(FlatconfError::malformed(key, token, reason)))
        })
        .collect::<FlatconfResult<Vec<_>>>()?;
    Ok(KeyPath { segments })
}

/// Classify a single dot-free token.
///
/// # Errors
///
/// Returns the [`MalformedReason`] describing why `token` is not a valid
/// segment under `grammar`.
pub fn parse_segment(token: &str, grammar: KeyGrammar) -> Result<Segment, MalformedReason> {
    if token.is_empty() {
        return Err(MalformedReason::EmptySegment);
    }
    match grammar {
        KeyGrammar::Strict => parse_strict(token),
        KeyGrammar::Heuristic => parse_heuristic(token),
    }
}

fn parse_strict(token: &str) -> Result<Segment, MalformedReason> {
    let Some((name, digits)) = token.split_once('-') else {
        return Ok(Segment::plain(token));
    };
    if !is_decimal(digits) {
        return Err(MalformedReason::NonNumericIndex);
    }
    if name.is_empty() {
        return Err(MalformedReason::MissingName);
    }
    Ok(Segment::indexed(name, parse_index(digits)?))
}

fn parse_heuristic(token: &str) -> Result<Segment, MalformedReason> {
    let suffix = token
        .rsplit_once('-')
        .filter(|(name, digits)| {
            is_decimal(digits) && name.chars().next_back().is_some_and(|c| c.is_ascii_alphanumeric())
        });
    match suffix {
        Some((name, digits)) => Ok(Segment::indexed(name, parse_index(digits)?)),
        None => Ok(Segment::plain(token)),
    }
}

fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

// Callers check `is_decimal` first, so the only failure left is overflow.
fn parse_index(digits: &str) -> Result<usize, MalformedReason> {
    digits.parse().map_err(|_| MalformedReason::IndexOverflow)
}
