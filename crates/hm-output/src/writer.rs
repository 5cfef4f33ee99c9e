//! The `OutputWriter` trait implemented by all backend writers.

use crate::{NeighbourhoodRow, OutputResult, RoundSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to the observer, which stores the first one for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one round summary row.
    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()>;

    /// Write a batch of per-neighbourhood rows for one round.
    fn write_neighbourhoods(&mut self, rows: &[NeighbourhoodRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
