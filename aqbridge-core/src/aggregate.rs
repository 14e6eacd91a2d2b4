//! Batch Reconciliation
//!
//! ## Overview
//!
//! A batch usually reports the same component several times, once per
//! reading period. Reconciliation collapses the batch to exactly one value per
//! component plus the mean quality score.
//!
//! ## Merge Rule
//!
//! Values are folded in batch order (readings in order, samples in order
//! within a reading):
//!
//! ```text
//! first value:  running = v₁
//! each next:    running = (running + vₙ) / 2
//! ```
//!
//! This is an exponentially weighted running average with weight 0.5, not the
//! arithmetic mean. Later values count more:
//!
//! ```text
//! 10, 20, 40  →  15  →  27.5        (mean would be 23.33)
//! ```
//!
//! The order sensitivity is kept on purpose so published values stay
//! compatible with earlier deployments.
//!
//! ## Output Order
//!
//! [`ReconciledState`] iterates components in first-observed order. The
//! publish step relies on this when two kinds share an output channel.
//!
//! ## Memory
//!
//! The component map is a fixed-capacity `heapless::Vec` sized for every
//! known kind, so reconciliation allocates nothing beyond the input batch.

use heapless::Vec;

use crate::errors::{ReconcileError, ReconcileResult};
use crate::readings::{ScoredReading, SensorComponentKind};

/// Number of distinct components a reconciled state can hold
pub const MAX_COMPONENTS: usize = SensorComponentKind::KNOWN.len();

/// One merged value per component, in first-observed order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentMap {
    entries: Vec<(SensorComponentKind, f64), MAX_COMPONENTS>,
}

impl ComponentMap {
    /// Empty map
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Fold a value into the running average for its component
    pub fn merge(&mut self, component: SensorComponentKind, value: f64) -> ReconcileResult<()> {
        if let Some((_, running)) = self.entries.iter_mut().find(|(kind, _)| *kind == component) {
            *running = 0.5 * (*running + value);
            return Ok(());
        }

        self.entries
            .push((component, value))
            .map_err(|_| ReconcileError::CapacityExceeded { capacity: MAX_COMPONENTS })
    }

    /// Merged value for a component, if the batch contained it
    pub fn get(&self, component: SensorComponentKind) -> Option<f64> {
        self.entries
            .iter()
            .find(|(kind, _)| *kind == component)
            .map(|(_, value)| *value)
    }

    /// Whether the batch contained the component
    pub fn contains(&self, component: SensorComponentKind) -> bool {
        self.get(component).is_some()
    }

    /// Components with their merged values, first-observed first
    pub fn iter(&self) -> impl Iterator<Item = (SensorComponentKind, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of distinct components
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the batch held no known component
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of reconciling one batch
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledState {
    /// One merged value per component present in the batch
    pub components: ComponentMap,

    /// Mean of the per-reading quality scores
    pub average_score: f64,
}

/// Merges a batch of readings into a [`ReconciledState`]
///
/// Stateless: reconciling the same batch twice gives the same result.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorAggregator;

impl SensorAggregator {
    /// Create an aggregator
    pub const fn new() -> Self {
        Self
    }

    /// Collapse a batch to one value per component and a mean score
    ///
    /// Fails with [`ReconcileError::EmptyBatch`] when there are no readings.
    /// Samples of unknown kind are skipped.
    pub fn reconcile(&self, readings: &[ScoredReading]) -> ReconcileResult<ReconciledState> {
        if readings.is_empty() {
            return Err(ReconcileError::EmptyBatch);
        }

        let mut components = ComponentMap::new();
        let mut score_total = 0.0;

        for reading in readings {
            score_total += reading.quality_score;

            for sample in &reading.samples {
                if sample.component.is_known() {
                    components.merge(sample.component, sample.value)?;
                }
            }
        }

        Ok(ReconciledState {
            components,
            average_score: score_total / readings.len() as f64,
        })
    }
}
