//! Store location, read-only connection setup and schema definition.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Result};

use crate::error::AnalyticsError;

/// Get the default database path for a brain (~/.neuralmemory/brains/<brain>.db).
pub fn default_db_path(brain: &str) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".neuralmemory")
        .join("brains")
        .join(format!("{brain}.db"))
}

/// Open an existing brain database without write access.
///
/// A missing file, a file that cannot be opened and a file that is not a
/// SQLite database are all reported as [`AnalyticsError::StoreUnavailable`].
/// SQLite is never allowed to create an empty database in its place.
pub(crate) fn open_read_only(path: &Path) -> Result<Connection, AnalyticsError> {
    let unavailable = |reason: String| AnalyticsError::StoreUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(unavailable("file not found".to_string()));
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| unavailable(e.to_string()))?;

    // SQLite reads the header lazily; touch the schema so a foreign file fails here.
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(|e| unavailable(e.to_string()))?;

    Ok(conn)
}

/// Create the relations the analytics engine reads.
///
/// The engine itself never writes; this exists so fixtures and tooling can
/// build a store with the layout the memory system persists.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS brains (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS neurons (
            id TEXT NOT NULL,
            brain_id TEXT NOT NULL,
            type TEXT NOT NULL,
            content TEXT NOT NULL,
            PRIMARY KEY (brain_id, id),
            FOREIGN KEY (brain_id) REFERENCES brains(id)
        );

        CREATE TABLE IF NOT EXISTS neuron_states (
            neuron_id TEXT NOT NULL,
            brain_id TEXT NOT NULL,
            activation_level REAL NOT NULL DEFAULT 0.0,
            access_frequency INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (brain_id, neuron_id)
        );

        CREATE TABLE IF NOT EXISTS synapses (
            id TEXT NOT NULL,
            brain_id TEXT NOT NULL,
            source_id TEXT NOT NULL,
            target_id TEXT NOT NULL,
            type TEXT NOT NULL,
            weight REAL NOT NULL DEFAULT 0.5,
            reinforced_count INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (brain_id, id)
        );

        CREATE TABLE IF NOT EXISTS fibers (
            id TEXT NOT NULL,
            brain_id TEXT NOT NULL,
            summary TEXT,
            frequency INTEGER NOT NULL DEFAULT 0,
            conductivity REAL NOT NULL DEFAULT 1.0,
            salience REAL NOT NULL DEFAULT 0.0,
            PRIMARY KEY (brain_id, id)
        );

        CREATE TABLE IF NOT EXISTS typed_memories (
            id TEXT NOT NULL,
            brain_id TEXT NOT NULL,
            fiber_id TEXT,
            memory_type TEXT NOT NULL,
            priority INTEGER DEFAULT 5,
            PRIMARY KEY (brain_id, id)
        );

        CREATE INDEX IF NOT EXISTS idx_neurons_type ON neurons(brain_id, type);
        CREATE INDEX IF NOT EXISTS idx_synapses_weight ON synapses(brain_id, weight);
        CREATE INDEX IF NOT EXISTS idx_fibers_frequency ON fibers(brain_id, frequency);
        CREATE INDEX IF NOT EXISTS idx_typed_memories_fiber ON typed_memories(brain_id, fiber_id);
        ",
    )
}
