//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `round_summaries.csv`
//! - `neighbourhood_stats.csv`

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::writer::OutputWriter;
use crate::{NeighbourhoodRow, OutputResult, RoundSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries:      Writer<File>,
    neighbourhoods: Writer<File>,
    finished:       bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    ///
    /// Headers are written up front so a run with no rounds still produces
    /// well-formed files.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let open = |name: &str| WriterBuilder::new().has_headers(false).from_path(dir.join(name));

        let mut summaries = open("round_summaries.csv")?;
        summaries.write_record(RoundSummaryRow::HEADERS)?;

        let mut neighbourhoods = open("neighbourhood_stats.csv")?;
        neighbourhoods.write_record(NeighbourhoodRow::HEADERS)?;

        Ok(Self { summaries, neighbourhoods, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()> {
        self.summaries.serialize(row)?;
        Ok(())
    }

    fn write_neighbourhoods(&mut self, rows: &[NeighbourhoodRow]) -> OutputResult<()> {
        for row in rows {
            self.neighbourhoods.serialize(row)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.neighbourhoods.flush()?;
        Ok(())
    }
}
