//! Brain Analytics
//!
//! A read-only health and usage report over a neural memory brain: neuron
//! activation, recall rankings, synapse strength, fiber activity and typed
//! memory distribution.
//!
//! # Example
//!
//! ```no_run
//! use brain_analytics::{AnalyticsError, BrainReport, BrainStore, ReportParams, default_db_path};
//!
//! fn main() -> Result<(), AnalyticsError> {
//!     let store = BrainStore::open(default_db_path("default"))?;
//!     let report = BrainReport::generate(&store, "default", &ReportParams::default())?;
//!     println!("{}", report.render(true));
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod model;
pub mod queries;
pub mod report;
pub mod store;

#[cfg(test)]
mod test_helpers;

use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Constants
// ============================================================================
//
// ### Truncation (chars, not bytes)
// Recalled neuron content 80, synapse endpoints 40, fiber summaries 60.
//
// ### Bars
// Distribution rows draw `#` repeated `count / divisor` times, capped so a
// single dominant row cannot push the line off the page.

/// Default number of rows returned by the ranking queries.
pub const DEFAULT_LIMIT: usize = 10;

/// Maximum characters of neuron content shown in the recall ranking.
pub const RECALLED_CONTENT_CHARS: usize = 80;

/// Maximum characters of each endpoint shown in the synapse ranking.
pub const SYNAPSE_CONTENT_CHARS: usize = 40;

/// Maximum characters of a fiber summary.
pub const FIBER_SUMMARY_CHARS: usize = 60;

/// Brain analyzed when none is given.
pub const DEFAULT_BRAIN: &str = "default";

// ============================================================================
// Runtime Configuration
// ============================================================================

/// Runtime report parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportParams {
    /// Maximum rows in each ranking section.
    pub limit: usize,
    /// Neurons per `#` in the neuron type distribution.
    pub type_bar_divisor: i64,
    /// Synapses per `#` in the weight distribution.
    pub weight_bar_divisor: i64,
    /// Longest bar drawn in any distribution.
    pub max_bar_len: usize,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            type_bar_divisor: 2,
            weight_bar_divisor: 5,
            max_bar_len: 30,
        }
    }
}

// ============================================================================
// Re-exports
// ============================================================================

pub use db::default_db_path;
pub use error::AnalyticsError;
pub use model::{
    ActivationHealth, ActiveFiber, BrainId, FiberMemoryType, MemoryTypeCount, NeuronTypeCount,
    RecalledNeuron, StrongSynapse, WeightBand, WeightBucket,
};
pub use report::BrainReport;
pub use store::BrainStore;
