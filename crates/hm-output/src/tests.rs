//! Integration tests for hm-output.

#[cfg(test)]
fn city() -> Vec<hm_agent::NeighbourhoodRecord> {
    ["Centrum", "Noord", "Oost"]
        .iter()
        .enumerate()
        .map(|(i, name)| hm_agent::NeighbourhoodRecord {
            name:            (*name).to_owned(),
            housing_quality: 1.0 + i as f64,
            shops:           2.0 - i as f64 * 0.5,
            crime:           0.5,
            nature:          i as f64,
            expense:         300.0,
            capacity:        400.0,
            base_price:      50_000.0 * (i + 1) as f64,
            x:               None,
            y:               None,
        })
        .collect()
}

#[cfg(test)]
fn config(max_rounds: u64, output_interval: u64) -> hm_core::Config {
    let mut config = hm_core::Config::default();
    config.model.housing_fraction = 0.05;
    config.run.max_rounds = max_rounds;
    config.run.output_interval = output_interval;
    config
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use hm_sim::SimBuilder;

    use super::{city, config};
    use crate::{CsvWriter, NeighbourhoodRow, OutputWriter, RoundSummaryRow, SimOutputObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(dir.path().join("round_summaries.csv")), RoundSummaryRow::HEADERS);
        assert_eq!(headers(dir.path().join("neighbourhood_stats.csv")), NeighbourhoodRow::HEADERS);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn integration_csv() {
        let dir = tmp();
        let mut sim = SimBuilder::new(config(6, 2), city()).build().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("round_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[5][0], "6");
        let last_population: u32 = rows[5][7].parse().unwrap();
        assert_eq!(last_population as usize, sim.market.population());

        // Snapshots at rounds 2, 4, 6; one row per neighbourhood.
        let mut rdr = csv::Reader::from_path(dir.path().join("neighbourhood_stats.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9);
        assert_eq!(&rows[0][0], "2");
        assert_eq!(&rows[0][1], "Centrum");
        assert_eq!(&rows[8][0], "6");
        assert_eq!(&rows[8][1], "Oost");
    }

    #[test]
    fn zero_interval_writes_no_snapshots() {
        let dir = tmp();
        let mut sim = SimBuilder::new(config(3, 0), city()).build().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);

        let mut rdr = csv::Reader::from_path(dir.path().join("neighbourhood_stats.csv")).unwrap();
        assert_eq!(rdr.records().count(), 0);
    }
}

#[cfg(test)]
mod row_tests {
    use hm_agent::{Neighbourhood, NeighbourhoodStats};
    use hm_core::NeighbourhoodId;
    use hm_sim::RoundStats;

    use super::city;
    use crate::{NeighbourhoodRow, RoundSummaryRow};

    #[test]
    fn summary_row_copies_stats() {
        let stats = RoundStats {
            round:         4,
            deals:         7,
            swap_deals:    3,
            vacancy_deals: 4,
            avg_price:     12.5,
            ..RoundStats::default()
        };
        let row = RoundSummaryRow::from(&stats);
        assert_eq!((row.round, row.deals, row.swap_deals, row.vacancy_deals), (4, 7, 3, 4));
        assert_eq!(row.avg_price, 12.5);
    }

    #[test]
    fn neighbourhood_row_carries_counters() {
        let records = city();
        let mut n = Neighbourhood::from_record(NeighbourhoodId(1), &records[1]);
        n.moves_in = 3;
        n.moves_out = 2;
        n.stats = NeighbourhoodStats { occupied: 5, vacant: 1, avg_price: 9.0, ..NeighbourhoodStats::default() };

        let row = NeighbourhoodRow::new(8, &n);
        assert_eq!(row.neighbourhood, "Noord");
        assert_eq!((row.round, row.occupied, row.vacant), (8, 5, 1));
        assert_eq!((row.moves_in, row.moves_out), (3, 2));
        assert_eq!(row.avg_price, 9.0);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use hm_sim::SimBuilder;

    use super::{city, config};
    use crate::{SimOutputObserver, SqliteWriter};

    #[test]
    fn integration_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = SimBuilder::new(config(4, 1), city()).build().unwrap();
        let mut obs = SimOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());
        drop(obs);

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let rounds: i64 = conn.query_row("SELECT COUNT(*) FROM round_summaries", [], |r| r.get(0)).unwrap();
        assert_eq!(rounds, 4);
        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM neighbourhood_stats", [], |r| r.get(0)).unwrap();
        assert_eq!(rows, 12);
        let name: String = conn
            .query_row("SELECT neighbourhood FROM neighbourhood_stats WHERE round = 1 LIMIT 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(name, "Centrum");
    }
}
