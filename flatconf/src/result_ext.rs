//! Extensions for mapping errors to `FlatconfResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(FlatconfError::from(e)))`
//! patterns when converting external error types into the crate's
//! `FlatconfResult<T>` alias (`Result<T, Arc<FlatconfError>>`).
//!
//! # Examples
//!
//! ```
//! use flatconf::{FlatconfResult, FlatconfResultExt};
//!
//! fn parse() -> FlatconfResult<serde_json::Value> {
//!     // serde_json::Error implements Into<FlatconfError>
//!     serde_json::from_str("{}").into_flatconf()
//! }
//! # assert!(parse().is_ok());
//! ```

use crate::{FlatconfError, FlatconfResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<FlatconfError>` into a `FlatconfResult<T>`.
pub trait FlatconfResultExt<T, E> {
    /// Convert `Result<T, E>` into `FlatconfResult<T>` using `Into<FlatconfError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<FlatconfError>`.
    fn into_flatconf(self) -> FlatconfResult<T>;
}

impl<T, E> FlatconfResultExt<T, E> for Result<T, E>
where
    E: Into<FlatconfError>,
{
    fn into_flatconf(self) -> FlatconfResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
