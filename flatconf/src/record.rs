//! The flat key/value record used for persistence.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{FlatconfError, FlatconfResult, FlatconfResultExt};

/// A set of flat entries: dotted keys mapped to string values.
///
/// Keys are kept in sorted order so that records serialise deterministically.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord(BTreeMap<String, String>);

impl FlatRecord {
    /// An empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert an entry, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Decode a byte-valued record as found at the storage boundary.
    ///
    /// Values are taken verbatim, so [`Self::to_bytes`] writes back exactly
    /// the bytes that were read.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlatconfError::InvalidEncoding`] for a value that is
    /// not valid UTF-8, or an aggregate naming every such key.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatconf::FlatRecord;
    ///
    /// let record = FlatRecord::from_bytes([("db.host", b"localhost".as_slice())])?;
    /// assert_eq!(record.get("db.host"), Some("localhost"));
    /// assert!(FlatRecord::from_bytes([("blob", b"f\xff".as_slice())]).is_err());
    /// # Ok::<_, std::sync::Arc<flatconf::FlatconfError>>(())
    /// ```
    pub fn from_bytes<I, K, V>(entries: I) -> FlatconfResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let mut record = Self::new();
        let mut rejected = Vec::new();
        for (key, value) in entries {
            let name = key.into();
            match String::from_utf8(value.into()) {
                Ok(text) => {
                    record.insert(name, text);
                }
                Err(_) => rejected.push(FlatconfError::invalid_encoding(name)),
            }
        }
        if let Some(err) = FlatconfError::try_aggregate(rejected) {
            return Err(Arc::new(err));
        }
        Ok(record)
    }

    /// Encode the record with byte values for the storage boundary.
    #[must_use]
    pub fn to_bytes(&self) -> BTreeMap<String, Vec<u8>> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.clone().into_bytes()))
            .collect()
    }

    /// Parse a JSON object of string values.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlatconfError::Json`] when `text` is not a JSON object
    /// whose values are all strings.
    pub fn from_json_str(text: &str) -> FlatconfResult<Self> {
        serde_json::from_str(text).into_flatconf()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FlatRecord {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

impl IntoIterator for FlatRecord {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatRecord {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
