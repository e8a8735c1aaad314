//! Analytics engine using DuckDB for OLAP queries.

use duckdb::{params, Connection};
use gtd_domain::EventRecord;

use crate::error::{AnalyticsError, Result};

/// DuckDB-backed, read-only view of the prepared event table.
///
/// The `events` table is written once by [`AnalyticsEngine::from_events`]; every other
/// method only reads it.
pub struct AnalyticsEngine {
    pub(crate) conn: Connection,
}

impl AnalyticsEngine {
    /// Load `events` into a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if DuckDB cannot create the schema or append a row.
    pub fn from_events(events: &[EventRecord]) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let engine = Self { conn };
        engine.initialize_schema()?;
        let count = engine.ingest(events)?;
        tracing::info!(events = count, "Analytics engine loaded");
        Ok(engine)
    }

    /// Initialize the analytics schema.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r"
            -- Events fact table; row_id preserves file order
            CREATE TABLE IF NOT EXISTS events (
                row_id BIGINT PRIMARY KEY,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                country VARCHAR,
                region VARCHAR,
                latitude DOUBLE,
                longitude DOUBLE,
                success_status INTEGER,
                attack_type VARCHAR,
                target_type VARCHAR,
                nationality VARCHAR,
                group_name VARCHAR,
                weapon_type VARCHAR,
                num_killed DOUBLE,
                num_wounded DOUBLE,
                total_casualties DOUBLE NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Bulk load through the appender. Only called during construction.
    fn ingest(&self, events: &[EventRecord]) -> Result<usize> {
        let mut appender = self.conn.appender("events")?;
        for (index, event) in events.iter().enumerate() {
            let row_id = i64::try_from(index)
                .map_err(|e| AnalyticsError::Conversion(e.to_string()))?;
            appender.append_row(params![
                row_id,
                event.year,
                event.month,
                event.country,
                event.region,
                event.latitude,
                event.longitude,
                event.success_status,
                event.attack_type,
                event.target_type,
                event.nationality,
                event.group_name,
                event.weapon_type,
                event.num_killed,
                event.num_wounded,
                event.total_casualties,
            ])?;
        }
        appender.flush()?;
        Ok(events.len())
    }

    /// Open another connection to the same in-memory database.
    ///
    /// Each handle can run queries on its own thread; all of them see the loaded table.
    ///
    /// # Errors
    ///
    /// Returns an error if DuckDB cannot open the connection.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            conn: self.conn.try_clone()?,
        })
    }

    /// Number of events in the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn event_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::event;

    #[test]
    fn test_create_engine() {
        let engine = AnalyticsEngine::from_events(&[]).unwrap();
        assert_eq!(engine.event_count().unwrap(), 0);
    }

    #[test]
    fn test_ingest_and_count() {
        let events = vec![
            event(1990, "Peru", "Explosives", Some(1.0), Some(2.0)),
            event(1991, "India", "Firearms", None, Some(3.0)),
        ];
        let engine = AnalyticsEngine::from_events(&events).unwrap();
        assert_eq!(engine.event_count().unwrap(), 2);
    }

    #[test]
    fn test_cloned_handle_sees_loaded_table() {
        let events = vec![event(1990, "Peru", "Explosives", Some(1.0), None)];
        let engine = AnalyticsEngine::from_events(&events).unwrap();

        let handle = engine.try_clone().unwrap();
        drop(engine);
        let count = std::thread::spawn(move || handle.event_count().unwrap())
            .join()
            .unwrap();
        assert_eq!(count, 1);
    }
}
