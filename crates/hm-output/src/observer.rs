//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use hm_agent::Market;
use hm_sim::{RoundStats, SimObserver};

use crate::row::{NeighbourhoodRow, RoundSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes round summaries and neighbourhood snapshots
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_round_end(&mut self, stats: &RoundStats) {
        let result = self.writer.write_round_summary(&RoundSummaryRow::from(stats));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, round: u64, market: &Market) {
        let rows: Vec<NeighbourhoodRow> =
            market.neighbourhoods.iter().map(|n| NeighbourhoodRow::new(round, n)).collect();
        let result = self.writer.write_neighbourhoods(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_round: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
