//! Records produced by the aggregation queries.
//!
//! Numeric fields hold the raw values read from the store. Rounding happens
//! only when a report is rendered, so every ordering is computed on
//! unrounded values.

use std::fmt;

use serde::Serialize;

/// Opaque identifier of a brain, the partition key of every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BrainId(String);

impl BrainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Activation health across all neuron states of a brain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivationHealth {
    pub total: i64,
    /// activation_level = 0
    pub dormant: i64,
    /// 0 < activation_level < 0.2
    pub low: i64,
    /// 0.2 <= activation_level < 0.5
    pub medium: i64,
    /// activation_level >= 0.5
    pub high: i64,
    /// 0.0 when the brain has no neuron states.
    pub avg_activation: f64,
    /// 0.0 when the brain has no neuron states.
    pub max_activation: f64,
    /// Neurons recalled at least once.
    pub ever_accessed: i64,
}

/// Number of neurons of one type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuronTypeCount {
    pub neuron_type: String,
    pub count: i64,
}

/// A neuron that has been recalled at least once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecalledNeuron {
    /// Truncated to [`crate::RECALLED_CONTENT_CHARS`].
    pub content: String,
    pub neuron_type: String,
    pub access_frequency: i64,
    pub activation_level: f64,
}

/// A synapse with both endpoints resolved inside the same brain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrongSynapse {
    /// Source neuron content, truncated to [`crate::SYNAPSE_CONTENT_CHARS`].
    pub source: String,
    /// Target neuron content, truncated to [`crate::SYNAPSE_CONTENT_CHARS`].
    pub target: String,
    pub weight: f64,
    pub reinforced_count: i64,
    pub synapse_type: String,
}

/// Typed memory attached to a fiber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiberMemoryType {
    pub memory_type: String,
    /// None when the typed memory carries no priority.
    pub priority: Option<f64>,
}

/// A fiber ranked by how often it fired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveFiber {
    /// Truncated to [`crate::FIBER_SUMMARY_CHARS`]; empty when the fiber has no summary.
    pub summary: String,
    pub frequency: i64,
    pub conductivity: f64,
    pub salience: f64,
    /// None when no typed memory references this fiber.
    pub memory: Option<FiberMemoryType>,
}

/// Number of typed memories of one type and their mean priority.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryTypeCount {
    pub memory_type: String,
    pub count: i64,
    pub avg_priority: f64,
}

/// Fixed synapse weight bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightBand {
    /// weight < 0.3
    Weak,
    /// 0.3 <= weight < 0.5
    Moderate,
    /// 0.5 <= weight < 0.7
    Standard,
    /// 0.7 <= weight < 0.9
    Strong,
    /// weight >= 0.9
    VeryStrong,
}

impl WeightBand {
    pub const ALL: [WeightBand; 5] = [
        WeightBand::Weak,
        WeightBand::Moderate,
        WeightBand::Standard,
        WeightBand::Strong,
        WeightBand::VeryStrong,
    ];

    /// Band a weight falls into, mirroring the SQL bucketing.
    #[cfg(test)]
    pub(crate) fn of(weight: f64) -> Self {
        if weight < 0.3 {
            WeightBand::Weak
        } else if weight < 0.5 {
            WeightBand::Moderate
        } else if weight < 0.7 {
            WeightBand::Standard
        } else if weight < 0.9 {
            WeightBand::Strong
        } else {
            WeightBand::VeryStrong
        }
    }

    /// Band at `index` in the SQL bucketing, lightest first.
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            WeightBand::Weak => "weak (<0.3)",
            WeightBand::Moderate => "moderate (0.3-0.5)",
            WeightBand::Standard => "standard (0.5-0.7)",
            WeightBand::Strong => "strong (0.7-0.9)",
            WeightBand::VeryStrong => "very strong (>=0.9)",
        }
    }
}

impl fmt::Display for WeightBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Synapses falling into one weight band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightBucket {
    pub band: WeightBand,
    pub count: i64,
    pub avg_weight: f64,
}
