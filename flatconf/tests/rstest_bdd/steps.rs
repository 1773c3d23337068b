//! Step implementations for the aggregation scenarios.

use anyhow::{Result, anyhow, ensure};
use flatconf::pipeline::{PipelineOptions, SourceLayer, SourceProvenance};
use flatconf::path::KeyGrammar;
use flatconf::{Document, FlatRecord, FlatconfError};
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;

use crate::fixtures::AggregationContext;

#[given("a context source with {key} set to {value}")]
fn context_source(aggregation_context: &AggregationContext, key: String, value: String) -> Result<()> {
    let mut document = Document::new();
    document.insert(&key, value, KeyGrammar::Heuristic)?;
    aggregation_context.push(SourceLayer::tree(SourceProvenance::Context, "context", document));
    Ok(())
}

#[given("a stored record with {key} set to {value}")]
fn stored_record(aggregation_context: &AggregationContext, key: String, value: String) {
    let record: FlatRecord = [(key, value)].into_iter().collect();
    aggregation_context.push(SourceLayer::record(
        SourceProvenance::StoredSecret,
        "stored",
        record,
    ));
}

#[given("keys are read with the strict grammar")]
fn strict_grammar(aggregation_context: &AggregationContext) {
    aggregation_context.options.set(PipelineOptions {
        grammar: KeyGrammar::Strict,
        ..PipelineOptions::default()
    });
}

#[given("an unavailable named secret")]
fn unavailable_secret(aggregation_context: &AggregationContext) {
    aggregation_context.push(SourceLayer::unavailable(
        SourceProvenance::NamedSecret,
        "named",
        FlatconfError::source_unavailable_arc("named", "secret not found"),
    ));
}

#[when("the sources are aggregated")]
fn aggregate_sources(aggregation_context: &AggregationContext) {
    aggregation_context.aggregate();
}

#[when("the flat record is stored and aggregated again")]
fn aggregate_stored_record(aggregation_context: &AggregationContext) -> Result<()> {
    let (_, stored) = aggregation(aggregation_context)?.into_parts();
    aggregation_context.push(SourceLayer::record(
        SourceProvenance::StoredSecret,
        "stored",
        stored,
    ));
    aggregation_context.aggregate();
    Ok(())
}

fn aggregation(
    aggregation_context: &AggregationContext,
) -> Result<flatconf::pipeline::Aggregation> {
    let result = aggregation_context
        .result
        .get()
        .ok_or_else(|| anyhow!("sources have not been aggregated"))?;
    result.map_err(|err| anyhow!("aggregation failed: {err}"))
}

#[then("the flat record maps {key} to {expected}")]
fn record_maps(aggregation_context: &AggregationContext, key: String, expected: String) -> Result<()> {
    let aggregation = aggregation(aggregation_context)?;
    let actual = aggregation.record().get(&key);
    ensure!(
        actual == Some(expected.as_str()),
        "expected {key} = {expected:?}, got {actual:?}"
    );
    Ok(())
}

#[then("one source is reported unavailable")]
fn one_unavailable(aggregation_context: &AggregationContext) -> Result<()> {
    let aggregation = aggregation(aggregation_context)?;
    let count = aggregation.unavailable().len();
    ensure!(count == 1, "expected one unavailable source, got {count}");
    Ok(())
}

#[then("the context object is {expected}")]
fn context_is(aggregation_context: &AggregationContext, expected: String) -> Result<()> {
    let aggregation = aggregation(aggregation_context)?;
    let wanted: Value = serde_json::from_str(&expected)?;
    let actual = aggregation.context_value(None);
    ensure!(actual == wanted, "expected {wanted}, got {actual}");
    Ok(())
}

#[then("aggregation fails with a malformed path error")]
fn fails_with_malformed_path(aggregation_context: &AggregationContext) -> Result<()> {
    let result = aggregation_context
        .result
        .take()
        .ok_or_else(|| anyhow!("sources have not been aggregated"))?;
    match result {
        Ok(_) => Err(anyhow!("expected aggregation to fail")),
        Err(err) => {
            ensure!(err.is_malformed_path(), "unexpected error: {err:?}");
            Ok(())
        }
    }
}
