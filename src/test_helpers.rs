//! Shared fixtures for unit tests.
//!
//! [`Fixture`] builds an in-memory store with the memory system's layout and
//! offers one insert helper per relation.

use rusqlite::{Connection, params};

use crate::db::init_schema;
use crate::store::BrainStore;

pub struct Fixture {
    pub conn: Connection,
}

impl Fixture {
    pub fn new() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        Self { conn }
    }

    pub fn brain(&self, id: &str, name: &str) -> &Self {
        self.conn
            .execute(
                "INSERT INTO brains (id, name) VALUES (?1, ?2)",
                params![id, name],
            )
            .unwrap();
        self
    }

    pub fn neuron(&self, brain: &str, id: &str, neuron_type: &str, content: &str) -> &Self {
        self.conn
            .execute(
                "INSERT INTO neurons (id, brain_id, type, content) VALUES (?1, ?2, ?3, ?4)",
                params![id, brain, neuron_type, content],
            )
            .unwrap();
        self
    }

    pub fn state(&self, brain: &str, neuron: &str, activation: f64, frequency: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO neuron_states (neuron_id, brain_id, activation_level, access_frequency)
                 VALUES (?1, ?2, ?3, ?4)",
                params![neuron, brain, activation, frequency],
            )
            .unwrap();
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn synapse(
        &self,
        brain: &str,
        id: &str,
        source: &str,
        target: &str,
        weight: f64,
        reinforced: i64,
        synapse_type: &str,
    ) -> &Self {
        self.conn
            .execute(
                "INSERT INTO synapses (id, brain_id, source_id, target_id, type, weight, reinforced_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![id, brain, source, target, synapse_type, weight, reinforced],
            )
            .unwrap();
        self
    }

    pub fn fiber(
        &self,
        brain: &str,
        id: &str,
        summary: Option<&str>,
        frequency: i64,
        conductivity: f64,
    ) -> &Self {
        self.conn
            .execute(
                "INSERT INTO fibers (id, brain_id, summary, frequency, conductivity, salience)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0.5)",
                params![id, brain, summary, frequency, conductivity],
            )
            .unwrap();
        self
    }

    pub fn typed_memory(
        &self,
        brain: &str,
        id: &str,
        fiber: Option<&str>,
        memory_type: &str,
        priority: i64,
    ) -> &Self {
        self.conn
            .execute(
                "INSERT INTO typed_memories (id, brain_id, fiber_id, memory_type, priority)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, brain, fiber, memory_type, priority],
            )
            .unwrap();
        self
    }

    pub fn into_store(self) -> BrainStore {
        BrainStore::from_connection(self.conn)
    }
}

/// The "demo" brain: ten neuron states with a known activation spread.
pub fn demo_fixture() -> Fixture {
    let fx = Fixture::new();
    fx.brain("b-demo", "demo");
    let levels = [0.0, 0.0, 0.1, 0.15, 0.3, 0.4, 0.5, 0.6, 0.9, 1.0];
    for (i, level) in levels.iter().enumerate() {
        let id = format!("n{i}");
        let neuron_type = if i % 2 == 0 { "concept" } else { "entity" };
        fx.neuron("b-demo", &id, neuron_type, &format!("neuron number {i}"));
        fx.state("b-demo", &id, *level, i as i64);
    }
    fx
}
