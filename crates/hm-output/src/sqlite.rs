//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `round_summaries` and `neighbourhood_stats`.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::writer::OutputWriter;
use crate::{NeighbourhoodRow, OutputResult, RoundSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS round_summaries (
                 round           INTEGER PRIMARY KEY,
                 deals           INTEGER NOT NULL,
                 swap_deals      INTEGER NOT NULL,
                 vacancy_deals   INTEGER NOT NULL,
                 bankruptcies    INTEGER NOT NULL,
                 new_residents   INTEGER NOT NULL,
                 new_units       INTEGER NOT NULL,
                 population      INTEGER NOT NULL,
                 homeless        INTEGER NOT NULL,
                 seekers         INTEGER NOT NULL,
                 unhappy_share   REAL    NOT NULL,
                 total_units     INTEGER NOT NULL,
                 avg_contentment REAL    NOT NULL,
                 avg_price       REAL    NOT NULL,
                 avg_cash        REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS neighbourhood_stats (
                 round           INTEGER NOT NULL,
                 neighbourhood   TEXT    NOT NULL,
                 capacity        INTEGER NOT NULL,
                 occupied        INTEGER NOT NULL,
                 vacant          INTEGER NOT NULL,
                 moves_in        INTEGER NOT NULL,
                 moves_out       INTEGER NOT NULL,
                 avg_contentment REAL    NOT NULL,
                 avg_salary      REAL    NOT NULL,
                 avg_cash        REAL    NOT NULL,
                 avg_price       REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO round_summaries VALUES \
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                row.round as i64,
                row.deals,
                row.swap_deals,
                row.vacancy_deals,
                row.bankruptcies,
                row.new_residents,
                row.new_units,
                row.population,
                row.homeless,
                row.seekers,
                row.unhappy_share,
                row.total_units,
                row.avg_contentment,
                row.avg_price,
                row.avg_cash,
            ],
        )?;
        Ok(())
    }

    fn write_neighbourhoods(&mut self, rows: &[NeighbourhoodRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO neighbourhood_stats VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.round as i64,
                    row.neighbourhood,
                    row.capacity,
                    row.occupied,
                    row.vacant,
                    row.moves_in as i64,
                    row.moves_out as i64,
                    row.avg_contentment,
                    row.avg_salary,
                    row.avg_cash,
                    row.avg_price,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
