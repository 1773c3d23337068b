//! Binds the aggregation feature file to the shared fixtures.

use crate::fixtures::{AggregationContext, aggregation_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/aggregation.feature",
    fixtures = [aggregation_context: AggregationContext]
);
