//! Shared fixtures for the behavioural scenarios.

use flatconf::FlatconfResult;
use flatconf::pipeline::{Aggregation, AggregationPipeline, PipelineOptions, SourceLayer};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Scenario state shared between aggregation steps.
#[derive(Debug, Default, ScenarioState)]
pub struct AggregationContext {
    /// Layers pushed so far, lowest precedence first.
    pub layers: Slot<Vec<SourceLayer>>,
    /// Options for the pipeline; defaults apply when unset.
    pub options: Slot<PipelineOptions>,
    /// Outcome of the most recent aggregation.
    pub result: Slot<FlatconfResult<Aggregation>>,
}

impl AggregationContext {
    /// Append `layer` to the layers collected so far.
    pub fn push(&self, layer: SourceLayer) {
        let mut layers = self.layers.take().unwrap_or_default();
        layers.push(layer);
        self.layers.set(layers);
    }

    /// Aggregate the collected layers and record the outcome.
    pub fn aggregate(&self) {
        let layers = self.layers.take().unwrap_or_default();
        let options = self.options.get().unwrap_or_default();
        self.result.set(AggregationPipeline::new(options).aggregate(layers));
    }
}

/// Creates a clean aggregation context for each scenario.
#[fixture]
pub fn aggregation_context() -> AggregationContext {
    AggregationContext::default()
}
