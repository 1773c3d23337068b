//! `rstest-bdd` behavioural suite for the aggregation pipeline.
//!
//! Fixtures live in [`fixtures`], step implementations in [`steps`], and
//! [`scenarios`] binds the `.feature` files to them.

mod fixtures;
mod scenarios;
mod steps;
