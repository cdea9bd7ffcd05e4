//! Shared helpers for integration tests: builds brain databases on disk.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tempfile::TempDir;

use brain_analytics::db::init_schema;

/// A brain database file that lives as long as the value.
pub struct BrainDb {
    pub path: PathBuf,
    _dir: TempDir,
}

impl BrainDb {
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("brain.db");
        let conn = Connection::open(&path).unwrap();
        init_schema(&conn).unwrap();
        Self { path, _dir: dir }
    }

    /// The "demo" brain with neurons, synapses, fibers and typed memories,
    /// plus a second brain ("noise") whose rows must never leak into it.
    pub fn demo() -> Self {
        let db = Self::empty();
        let conn = db.connection();

        conn.execute_batch(
            "INSERT INTO brains (id, name) VALUES ('b-demo', 'demo'), ('b-noise', 'noise');",
        )
        .unwrap();

        let levels = [0.0, 0.0, 0.1, 0.15, 0.3, 0.4, 0.5, 0.6, 0.9, 1.0];
        for (i, level) in levels.iter().enumerate() {
            let id = format!("n{i}");
            let neuron_type = if i < 6 { "concept" } else { "entity" };
            conn.execute(
                "INSERT INTO neurons (id, brain_id, type, content) VALUES (?1, 'b-demo', ?2, ?3)",
                params![id, neuron_type, format!("demo neuron {i}")],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO neuron_states (neuron_id, brain_id, activation_level, access_frequency)
                 VALUES (?1, 'b-demo', ?2, ?3)",
                params![id, level, (i as i64) * 2],
            )
            .unwrap();
        }

        let synapses = [
            ("s0", "n0", "n1", 0.05),
            ("s1", "n1", "n2", 0.25),
            ("s2", "n2", "n3", 0.35),
            ("s3", "n3", "n4", 0.55),
            ("s4", "n4", "n5", 0.65),
            ("s5", "n5", "n6", 0.75),
            ("s6", "n6", "n7", 0.95),
            ("s7", "n7", "ghost-neuron", 0.99),
        ];
        for (id, source, target, weight) in synapses {
            conn.execute(
                "INSERT INTO synapses (id, brain_id, source_id, target_id, type, weight, reinforced_count)
                 VALUES (?1, 'b-demo', ?2, ?3, 'related_to', ?4, 1)",
                params![id, source, target, weight],
            )
            .unwrap();
        }

        let long_summary = "a".repeat(120);
        conn.execute(
            "INSERT INTO fibers (id, brain_id, summary, frequency, conductivity, salience)
             VALUES ('f1', 'b-demo', ?1, 10, 0.9, 0.4),
                    ('f2', 'b-demo', 'short summary', 3, 0.5, 0.1),
                    ('f3', 'b-demo', NULL, 1, 1.0, 0.0)",
            params![long_summary],
        )
        .unwrap();
        conn.execute_batch(
            "INSERT INTO typed_memories (id, brain_id, fiber_id, memory_type, priority)
             VALUES ('t1', 'b-demo', 'f1', 'decision', 8),
                    ('t2', 'b-demo', NULL, 'fact', 5),
                    ('t3', 'b-demo', NULL, 'fact', 6);

             INSERT INTO neurons (id, brain_id, type, content)
             VALUES ('n0', 'b-noise', 'secret', 'noise neuron');
             INSERT INTO neuron_states (neuron_id, brain_id, activation_level, access_frequency)
             VALUES ('n0', 'b-noise', 0.7, 99);
             INSERT INTO synapses (id, brain_id, source_id, target_id, type, weight, reinforced_count)
             VALUES ('s9', 'b-noise', 'n0', 'n0', 'secret', 1.0, 50);
             INSERT INTO fibers (id, brain_id, summary, frequency, conductivity, salience)
             VALUES ('f2', 'b-noise', 'noise fiber', 500, 1.0, 1.0);
             INSERT INTO typed_memories (id, brain_id, fiber_id, memory_type, priority)
             VALUES ('t9', 'b-noise', 'f2', 'secret', 1);",
        )
        .unwrap();

        db
    }

    pub fn connection(&self) -> Connection {
        Connection::open(&self.path).unwrap()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
