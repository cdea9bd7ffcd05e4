//! Report assembly: runs the aggregation queries in a fixed order and
//! renders them as one plain text report.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::ReportParams;
use crate::error::AnalyticsError;
use crate::model::{
    ActivationHealth, ActiveFiber, BrainId, MemoryTypeCount, NeuronTypeCount, RecalledNeuron,
    StrongSynapse, WeightBucket,
};
use crate::queries;
use crate::store::BrainStore;

/// Width of the `=` rules framing the report.
const RULE_WIDTH: usize = 60;

/// Indentation of every content line.
const INDENT: &str = "   ";

/// Every facet of a brain's analytics, in report order.
#[derive(Debug, Clone, Serialize)]
pub struct BrainReport {
    pub brain: String,
    pub brain_id: BrainId,
    pub generated_at: DateTime<Utc>,
    pub activation: ActivationHealth,
    pub neuron_types: Vec<NeuronTypeCount>,
    pub recalled: Vec<RecalledNeuron>,
    pub synapses: Vec<StrongSynapse>,
    pub fibers: Vec<ActiveFiber>,
    pub memory_types: Vec<MemoryTypeCount>,
    pub weight_distribution: Vec<WeightBucket>,
    #[serde(skip)]
    params: ReportParams,
}

impl BrainReport {
    /// Collect all seven facets for the brain named `brain`.
    ///
    /// The brain is resolved first; if it does not exist no query runs and
    /// [`AnalyticsError::NotFound`] is returned. All queries share one read
    /// transaction. Any failure aborts the whole report.
    pub fn generate(
        store: &BrainStore,
        brain: &str,
        params: &ReportParams,
    ) -> Result<Self, AnalyticsError> {
        let tx = store.snapshot()?;

        let brain_id = queries::resolve_brain_id(&tx, brain).inspect_err(|e| {
            warn!(brain, error = %e, "brain resolution failed");
        })?;

        let activation = queries::activation_health(&tx, &brain_id)?;
        let neuron_types = queries::neuron_type_counts(&tx, &brain_id)?;
        let recalled = queries::most_recalled_neurons(&tx, &brain_id, params.limit)?;
        let synapses = queries::strongest_synapses(&tx, &brain_id, params.limit)?;
        let fibers = queries::most_active_fibers(&tx, &brain_id, params.limit)?;
        let memory_types = queries::memory_type_distribution(&tx, &brain_id)?;
        let weight_distribution = queries::synapse_weight_distribution(&tx, &brain_id)?;

        tx.commit()?;

        info!(brain, brain_id = %brain_id, neurons = activation.total, "report generated");

        Ok(Self {
            brain: brain.to_string(),
            brain_id,
            generated_at: Utc::now(),
            activation,
            neuron_types,
            recalled,
            synapses,
            fibers,
            memory_types,
            weight_distribution,
            params: params.clone(),
        })
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, AnalyticsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the report as plain text.
    ///
    /// `use_local` selects the timezone of the generation timestamp.
    pub fn render(&self, use_local: bool) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines: Vec<String> = Vec::new();

        lines.push(rule.clone());
        lines.push("  NEURAL MEMORY ANALYTICS REPORT".to_string());
        lines.push(format!(
            "  Brain: {} | {}",
            self.brain,
            format_datetime(&self.generated_at, use_local)
        ));
        lines.push(rule.clone());

        self.render_activation(&mut lines);
        self.render_neuron_types(&mut lines);
        self.render_recalled(&mut lines);
        self.render_synapses(&mut lines);
        self.render_fibers(&mut lines);
        self.render_memory_types(&mut lines);
        self.render_weight_distribution(&mut lines);

        lines.push(String::new());
        lines.push(rule);
        lines.join("\n")
    }

    fn render_activation(&self, lines: &mut Vec<String>) {
        let h = &self.activation;
        section(lines, "1. NEURON ACTIVATION HEALTH");
        lines.push(format!(
            "{INDENT}Total: {}  |  Ever accessed: {}",
            h.total, h.ever_accessed
        ));
        lines.push(format!(
            "{INDENT}Dormant: {}  Low: {}  Med: {}  High: {}",
            h.dormant, h.low, h.medium, h.high
        ));
        lines.push(format!(
            "{INDENT}Avg activation: {}  Max: {}",
            decimal(h.avg_activation, 4),
            decimal(h.max_activation, 4)
        ));
    }

    fn render_neuron_types(&self, lines: &mut Vec<String>) {
        section(lines, "2. NEURON TYPE DISTRIBUTION");
        for n in &self.neuron_types {
            let row = format!("{INDENT}{:<12} {:>4}", n.neuron_type, n.count);
            lines.push(with_bar(
                row,
                n.count,
                self.params.type_bar_divisor,
                self.params.max_bar_len,
            ));
        }
    }

    fn render_recalled(&self, lines: &mut Vec<String>) {
        section(lines, "3. MOST RECALLED NEURONS");
        if self.recalled.is_empty() {
            lines.push(format!("{INDENT}(none recalled yet)"));
            return;
        }
        for (i, n) in self.recalled.iter().enumerate() {
            lines.push(format!(
                "{INDENT}{}. [{}] freq={} act={} | {}",
                i + 1,
                n.neuron_type,
                n.access_frequency,
                decimal(n.activation_level, 4),
                n.content
            ));
        }
    }

    fn render_synapses(&self, lines: &mut Vec<String>) {
        section(lines, "4. STRONGEST SYNAPSES");
        for (i, s) in self.synapses.iter().enumerate() {
            lines.push(format!("{INDENT}{}. {} -> {}", i + 1, s.source, s.target));
            lines.push(format!(
                "{INDENT}   w={} reinforced={} type={}",
                decimal(s.weight, 3),
                s.reinforced_count,
                s.synapse_type
            ));
        }
    }

    fn render_fibers(&self, lines: &mut Vec<String>) {
        section(lines, "5. MOST ACTIVE FIBERS (memories)");
        for (i, f) in self.fibers.iter().enumerate() {
            let (memory_type, priority) = match &f.memory {
                Some(m) => (
                    m.memory_type.clone(),
                    m.priority.map_or_else(|| "-".to_string(), |p| p.to_string()),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            lines.push(format!(
                "{INDENT}{}. [{}] p={} freq={} cond={} | {}",
                i + 1,
                memory_type,
                priority,
                f.frequency,
                decimal(f.conductivity, 3),
                f.summary
            ));
        }
    }

    fn render_memory_types(&self, lines: &mut Vec<String>) {
        section(lines, "6. TYPED MEMORY DISTRIBUTION");
        for d in &self.memory_types {
            lines.push(format!(
                "{INDENT}{:<15} count={:>3}  avg_priority={}",
                d.memory_type,
                d.count,
                decimal(d.avg_priority, 1)
            ));
        }
    }

    fn render_weight_distribution(&self, lines: &mut Vec<String>) {
        section(lines, "7. SYNAPSE WEIGHT DISTRIBUTION");
        for w in &self.weight_distribution {
            let row = format!(
                "{INDENT}{:<25} {:>4} (avg {})",
                w.band.label(),
                w.count,
                decimal(w.avg_weight, 3)
            );
            lines.push(with_bar(
                row,
                w.count,
                self.params.weight_bar_divisor,
                self.params.max_bar_len,
            ));
        }
    }
}

/// Blank line followed by a section title.
fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
}

/// Round for display only.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Rounded value as a decimal; whole numbers keep their ".0".
fn decimal(value: f64, places: i32) -> String {
    format!("{:?}", round_to(value, places))
}

/// Bar of `#` whose length is `count / divisor`, capped at `max_len`.
fn bar(count: i64, divisor: i64, max_len: usize) -> String {
    let len = count.max(0).checked_div(divisor).unwrap_or(0).max(0);
    let len = usize::try_from(len).unwrap_or(usize::MAX).min(max_len);
    "#".repeat(len)
}

fn with_bar(row: String, count: i64, divisor: i64, max_len: usize) -> String {
    let bar = bar(count, divisor, max_len);
    if bar.is_empty() {
        row
    } else {
        format!("{row} {bar}")
    }
}

/// Format datetime based on timezone option
fn format_datetime(dt: &DateTime<Utc>, use_local: bool) -> String {
    if use_local {
        Local
            .from_utc_datetime(&dt.naive_utc())
            .format("%Y-%m-%d %H:%M")
            .to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M").to_string()
    }
}
