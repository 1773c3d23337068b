//! Command-line front end for the `flatconf` configuration codec.
//!
//! The binary reads JSON files from disk, runs them through the library, and
//! prints the result on stdout. Settings for the pipeline are layered with
//! `figment` (see [`settings`]).

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod settings;
pub mod sources;
pub mod telemetry;
