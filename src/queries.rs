//! Aggregation queries over a single brain.
//!
//! Every query binds the brain id as a parameter and repeats the
//! `brain_id` equality on each joined relation, so no join can cross from
//! one brain into another. Queries never fail on an empty brain: they return
//! an empty `Vec` (or a zeroed [`ActivationHealth`]).

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::AnalyticsError;
use crate::model::{
    ActivationHealth, ActiveFiber, BrainId, FiberMemoryType, MemoryTypeCount, NeuronTypeCount,
    RecalledNeuron, StrongSynapse, WeightBand, WeightBucket,
};
use crate::{FIBER_SUMMARY_CHARS, RECALLED_CONTENT_CHARS, SYNAPSE_CONTENT_CHARS};

/// Keep at most `max_chars` characters of `text`.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Look up the id of the brain named exactly `name`.
pub fn resolve_brain_id(conn: &Connection, name: &str) -> Result<BrainId, AnalyticsError> {
    let id: Option<String> = conn
        .query_row("SELECT id FROM brains WHERE name = ?1", params![name], |row| {
            row.get(0)
        })
        .optional()?;

    id.map(BrainId::new).ok_or_else(|| AnalyticsError::NotFound {
        brain: name.to_string(),
    })
}

/// Bucket neuron states by activation level.
pub fn activation_health(
    conn: &Connection,
    brain_id: &BrainId,
) -> Result<ActivationHealth, AnalyticsError> {
    let health = conn.query_row(
        "SELECT
             COUNT(*),
             COALESCE(SUM(CASE WHEN activation_level = 0 THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN activation_level > 0 AND activation_level < 0.2 THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN activation_level >= 0.2 AND activation_level < 0.5 THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN activation_level >= 0.5 THEN 1 ELSE 0 END), 0),
             AVG(activation_level),
             MAX(activation_level),
             COALESCE(SUM(CASE WHEN access_frequency > 0 THEN 1 ELSE 0 END), 0)
         FROM neuron_states
         WHERE brain_id = ?1",
        params![brain_id.as_str()],
        |row| {
            Ok(ActivationHealth {
                total: row.get(0)?,
                dormant: row.get(1)?,
                low: row.get(2)?,
                medium: row.get(3)?,
                high: row.get(4)?,
                avg_activation: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
                max_activation: row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
                ever_accessed: row.get(7)?,
            })
        },
    )?;

    debug!(brain = %brain_id, total = health.total, "activation health");
    Ok(health)
}

/// Count neurons per type, most common first.
pub fn neuron_type_counts(
    conn: &Connection,
    brain_id: &BrainId,
) -> Result<Vec<NeuronTypeCount>, AnalyticsError> {
    let mut stmt = conn.prepare(
        "SELECT type, COUNT(*) AS cnt
         FROM neurons
         WHERE brain_id = ?1
         GROUP BY type
         ORDER BY cnt DESC, type",
    )?;

    let rows = stmt.query_map(params![brain_id.as_str()], |row| {
        Ok(NeuronTypeCount {
            neuron_type: row.get(0)?,
            count: row.get(1)?,
        })
    })?;

    let counts = rows.collect::<Result<Vec<_>, _>>()?;
    debug!(brain = %brain_id, types = counts.len(), "neuron type counts");
    Ok(counts)
}

/// Neurons recalled at least once, most recalled first.
pub fn most_recalled_neurons(
    conn: &Connection,
    brain_id: &BrainId,
    limit: usize,
) -> Result<Vec<RecalledNeuron>, AnalyticsError> {
    let mut stmt = conn.prepare(
        "SELECT n.content, n.type, ns.access_frequency, ns.activation_level
         FROM neuron_states ns
         JOIN neurons n ON ns.neuron_id = n.id AND ns.brain_id = n.brain_id
         WHERE ns.brain_id = ?1 AND ns.access_frequency > 0
         ORDER BY ns.access_frequency DESC, n.id
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![brain_id.as_str(), limit as i64], |row| {
        let content: String = row.get(0)?;
        Ok(RecalledNeuron {
            content: truncate_chars(&content, RECALLED_CONTENT_CHARS),
            neuron_type: row.get(1)?,
            access_frequency: row.get(2)?,
            activation_level: row.get(3)?,
        })
    })?;

    let neurons = rows.collect::<Result<Vec<_>, _>>()?;
    debug!(brain = %brain_id, rows = neurons.len(), "most recalled neurons");
    Ok(neurons)
}

/// Heaviest synapses whose endpoints both resolve inside the brain.
pub fn strongest_synapses(
    conn: &Connection,
    brain_id: &BrainId,
    limit: usize,
) -> Result<Vec<StrongSynapse>, AnalyticsError> {
    let mut stmt = conn.prepare(
        "SELECT src.content, tgt.content, s.weight, s.reinforced_count, s.type
         FROM synapses s
         JOIN neurons src ON s.source_id = src.id AND s.brain_id = src.brain_id
         JOIN neurons tgt ON s.target_id = tgt.id AND s.brain_id = tgt.brain_id
         WHERE s.brain_id = ?1
         ORDER BY s.weight DESC, s.id
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![brain_id.as_str(), limit as i64], |row| {
        let source: String = row.get(0)?;
        let target: String = row.get(1)?;
        Ok(StrongSynapse {
            source: truncate_chars(&source, SYNAPSE_CONTENT_CHARS),
            target: truncate_chars(&target, SYNAPSE_CONTENT_CHARS),
            weight: row.get(2)?,
            reinforced_count: row.get(3)?,
            synapse_type: row.get(4)?,
        })
    })?;

    let synapses = rows.collect::<Result<Vec<_>, _>>()?;
    debug!(brain = %brain_id, rows = synapses.len(), "strongest synapses");
    Ok(synapses)
}

/// Most frequently fired fibers, with their typed memory when one exists.
pub fn most_active_fibers(
    conn: &Connection,
    brain_id: &BrainId,
    limit: usize,
) -> Result<Vec<ActiveFiber>, AnalyticsError> {
    let mut stmt = conn.prepare(
        "SELECT f.summary, f.frequency, f.conductivity, f.salience,
                tm.memory_type, tm.priority
         FROM fibers f
         LEFT JOIN typed_memories tm ON f.id = tm.fiber_id AND f.brain_id = tm.brain_id
         WHERE f.brain_id = ?1
         ORDER BY f.frequency DESC, f.id
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![brain_id.as_str(), limit as i64], |row| {
        let summary: Option<String> = row.get(0)?;
        let memory_type: Option<String> = row.get(4)?;
        let priority: Option<f64> = row.get(5)?;
        Ok(ActiveFiber {
            summary: truncate_chars(summary.as_deref().unwrap_or(""), FIBER_SUMMARY_CHARS),
            frequency: row.get(1)?,
            conductivity: row.get(2)?,
            salience: row.get(3)?,
            memory: memory_type.map(|memory_type| FiberMemoryType {
                memory_type,
                priority,
            }),
        })
    })?;

    let fibers = rows.collect::<Result<Vec<_>, _>>()?;
    debug!(brain = %brain_id, rows = fibers.len(), "most active fibers");
    Ok(fibers)
}

/// Count typed memories per type with their mean priority, most common first.
pub fn memory_type_distribution(
    conn: &Connection,
    brain_id: &BrainId,
) -> Result<Vec<MemoryTypeCount>, AnalyticsError> {
    let mut stmt = conn.prepare(
        "SELECT memory_type, COUNT(*) AS cnt, AVG(priority)
         FROM typed_memories
         WHERE brain_id = ?1
         GROUP BY memory_type
         ORDER BY cnt DESC, memory_type",
    )?;

    let rows = stmt.query_map(params![brain_id.as_str()], |row| {
        Ok(MemoryTypeCount {
            memory_type: row.get(0)?,
            count: row.get(1)?,
            avg_priority: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
        })
    })?;

    let distribution = rows.collect::<Result<Vec<_>, _>>()?;
    debug!(brain = %brain_id, types = distribution.len(), "typed memory distribution");
    Ok(distribution)
}

/// Histogram of synapse weights over the fixed [`WeightBand`]s.
///
/// Bands without synapses are not returned. Rows are ordered by their
/// unrounded average weight, lightest first.
pub fn synapse_weight_distribution(
    conn: &Connection,
    brain_id: &BrainId,
) -> Result<Vec<WeightBucket>, AnalyticsError> {
    let mut stmt = conn.prepare(
        "SELECT
             CASE
                 WHEN weight < 0.3 THEN 0
                 WHEN weight < 0.5 THEN 1
                 WHEN weight < 0.7 THEN 2
                 WHEN weight < 0.9 THEN 3
                 ELSE 4
             END AS band,
             COUNT(*) AS cnt,
             AVG(weight) AS avg_weight
         FROM synapses
         WHERE brain_id = ?1
         GROUP BY band
         ORDER BY avg_weight, band",
    )?;

    let rows = stmt.query_map(params![brain_id.as_str()], |row| {
        let index: i64 = row.get(0)?;
        let band = WeightBand::from_index(index)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(0, index))?;
        Ok(WeightBucket {
            band,
            count: row.get(1)?,
            avg_weight: row.get(2)?,
        })
    })?;

    let buckets = rows.collect::<Result<Vec<_>, _>>()?;
    debug!(brain = %brain_id, buckets = buckets.len(), "synapse weight distribution");
    Ok(buckets)
}
