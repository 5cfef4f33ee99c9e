//! Integration tests for hm-sim.

use hm_agent::{Market, Neighbourhood, NeighbourhoodRecord, Preferences, UtilityModel, WealthReference};
use hm_core::{Config, GeoPoint, ModelConfig, NeighbourhoodId, RunConfig, StopCondition};

use crate::{RoundStats, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn record(name: &str, quality: [f64; 4], expense: f64, capacity: f64, base_price: f64) -> NeighbourhoodRecord {
    NeighbourhoodRecord {
        name: name.to_owned(),
        housing_quality: quality[0],
        shops: quality[1],
        crime: quality[2],
        nature: quality[3],
        expense,
        capacity,
        base_price,
        x: None,
        y: None,
    }
}

/// Five neighbourhoods of 30 generated units each.
fn city() -> Vec<NeighbourhoodRecord> {
    (0..5)
        .map(|i| {
            let q = [(i % 3) as f64, ((i + 1) % 4) as f64, (i % 2) as f64, ((i * 7) % 5) as f64];
            record(&format!("N{i}"), q, 200.0 + 50.0 * i as f64, 300.0, 20_000.0 * (i + 1) as f64)
        })
        .collect()
}

/// Market over hand-specified neighbourhoods with no units yet.
fn empty_market(neighbourhoods: &[([f64; 4], f64)]) -> Market {
    let n = neighbourhoods
        .iter()
        .enumerate()
        .map(|(i, &(q, expense))| {
            Neighbourhood::from_record(NeighbourhoodId(i as u16), &record(&format!("N{i}"), q, expense, 1.0, 100.0))
        })
        .collect();
    Market::new(n, UtilityModel::new(0.2, WealthReference::new(10.0, 1.0, 100.0)))
}

/// No growth, no noise.
fn static_config(threshold: f64, max_rounds: u64) -> Config {
    Config {
        model: ModelConfig {
            contentment_threshold:  threshold,
            population_growth_rate: 1.0,
            housing_growth_rate:    1.0,
            noise:                  0.0,
            ..ModelConfig::default()
        },
        run: RunConfig { max_rounds, ..RunConfig::default() },
    }
}

fn generated_config(seed: u64, max_rounds: u64) -> Config {
    Config {
        model: ModelConfig { housing_fraction: 0.1, initial_occupancy: 0.9, ..ModelConfig::default() },
        run:   RunConfig { seed, max_rounds, ..RunConfig::default() },
    }
}

/// Records every hook invocation.
#[derive(Default)]
struct Recorder {
    starts:    Vec<u64>,
    rounds:    Vec<RoundStats>,
    snapshots: Vec<u64>,
    ended:     Option<u64>,
}

impl SimObserver for Recorder {
    fn on_round_start(&mut self, round: u64) {
        self.starts.push(round);
    }
    fn on_round_end(&mut self, stats: &RoundStats) {
        self.rounds.push(*stats);
    }
    fn on_snapshot(&mut self, round: u64, _market: &Market) {
        self.snapshots.push(round);
    }
    fn on_sim_end(&mut self, final_round: u64) {
        self.ended = Some(final_round);
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{SimBuilder, SimError};

    #[test]
    fn builds_generated_city() {
        let sim = SimBuilder::new(generated_config(1, 5), city()).build().unwrap();
        assert_eq!(sim.market.unit_count(), 150);
        assert_eq!(sim.market.population(), 5 * 27);
        assert_eq!(sim.round, 0);
        assert!(sim.is_running());
        assert!(sim.last_stats().is_none());
    }

    #[test]
    fn zero_capacity_city_is_rejected() {
        let records = vec![record("Void", [1.0; 4], 0.0, 0.0, 100.0)];
        let result = SimBuilder::new(generated_config(1, 5), records).build();
        assert!(matches!(result, Err(SimError::EmptyCity)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = generated_config(1, 5);
        config.model.materialism = 1.5;
        let result = SimBuilder::new(config, city()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn quiescence_downgraded_when_model_grows() {
        let mut config = generated_config(1, 5);
        config.run.stop = StopCondition::Quiescent { quiet_rounds: 2 };
        let sim = SimBuilder::new(config, city()).build().unwrap();
        assert_eq!(sim.stop_condition(), StopCondition::FixedRounds);
    }

    #[test]
    fn quiescence_kept_for_static_model() {
        let mut config = static_config(0.6, 5);
        config.model.housing_fraction = 0.1;
        config.run.stop = StopCondition::Quiescent { quiet_rounds: 2 };
        let sim = SimBuilder::new(config, city()).build().unwrap();
        assert_eq!(sim.stop_condition(), StopCondition::Quiescent { quiet_rounds: 2 });
    }
}

// ── Growth ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod growth_tests {
    use hm_agent::NullPlacement;
    use hm_core::SimRng;

    use super::*;
    use crate::growth::{grow_housing, grow_population, perturb_quality};

    #[test]
    fn newcomers_arrive_homeless_with_newcomer_cash() {
        let mut m = empty_market(&[([1.0; 4], 0.0)]);
        for _ in 0..4 {
            m.add_resident(Preferences::uniform(), 10.0, 10.0);
        }
        let cfg = ModelConfig { population_growth_rate: 1.5, newcomer_cash_multiplier: 3.0, ..ModelConfig::default() };

        assert_eq!(grow_population(&mut m, &cfg, &mut SimRng::new(1)), 2);
        assert_eq!(m.population(), 6);
        for r in &m.residents[4..] {
            assert!(r.is_homeless() && r.seeking);
            assert!((r.cash - 3.0 * r.salary).abs() < 1e-9);
        }
    }

    #[test]
    fn fractional_growth_is_floored_away() {
        let mut m = empty_market(&[([1.0; 4], 0.0)]);
        m.add_resident(Preferences::uniform(), 10.0, 10.0);
        assert_eq!(grow_population(&mut m, &ModelConfig::default(), &mut SimRng::new(1)), 0);
    }

    #[test]
    fn housing_shortfall_built_at_average_price() {
        let mut m = empty_market(&[([1.0; 4], 0.0)]);
        let nid = NeighbourhoodId(0);
        for price in [100.0, 300.0] {
            m.add_dwelling(nid, price, GeoPoint::ORIGIN);
        }
        m.neighbourhood_mut(nid).capacity = 2;
        m.recompute_neighbourhood_stats();
        let cfg = ModelConfig { housing_growth_rate: 2.0, ..ModelConfig::default() };

        let built = grow_housing(&mut m, &cfg, &NullPlacement, &mut SimRng::new(1));
        assert_eq!(built, 2);
        let n = m.neighbourhood(nid);
        assert_eq!(n.capacity, 4);
        assert_eq!(n.units.len(), 4);
        assert!(m.dwellings[2..].iter().all(|d| d.is_vacant() && d.price == 200.0));
        m.check_invariants();
    }

    #[test]
    fn noise_is_bounded_and_non_negative() {
        let mut m = empty_market(&[([0.05, 1.0, 2.0, 3.0], 0.0)]);
        let before = m.neighbourhood(NeighbourhoodId(0)).quality.as_array();
        perturb_quality(&mut m, 0.1, &mut SimRng::new(3));
        let after = m.neighbourhood(NeighbourhoodId(0)).quality.as_array();
        for (b, a) in before.iter().zip(after) {
            assert!(a >= 0.0);
            assert!((a - b).abs() <= 0.1 + 1e-12);
        }
    }

    #[test]
    fn zero_noise_leaves_quality_alone() {
        let mut m = empty_market(&[([1.0, 2.0, 3.0, 4.0], 0.0)]);
        perturb_quality(&mut m, 0.0, &mut SimRng::new(3));
        assert_eq!(m.neighbourhood(NeighbourhoodId(0)).quality.as_array(), [1.0, 2.0, 3.0, 4.0]);
    }
}

// ── Per-agent update ──────────────────────────────────────────────────────────

#[cfg(test)]
mod update_tests {
    use super::*;
    use crate::update::update_residents;

    #[test]
    fn insolvent_owner_is_forced_to_sell() {
        let mut m = empty_market(&[([1.0; 4], 100.0)]);
        let d = m.add_dwelling(NeighbourhoodId(0), 400.0, GeoPoint::ORIGIN);
        let r = m.add_resident(Preferences::uniform(), 1.0, 0.0);
        m.occupy(r, d);

        assert_eq!(update_residents(&mut m, 0.6), 1);
        let res = m.resident(r);
        assert!(res.is_homeless() && res.seeking);
        assert_eq!(res.cash, 1.0 - 100.0 + 200.0);
        assert_eq!(m.dwelling(d).price, 200.0);
        m.check_invariants();
    }

    #[test]
    fn low_cash_penalises_contentment() {
        let mut m = empty_market(&[([1.0; 4], 10.0)]);
        let d = m.add_dwelling(NeighbourhoodId(0), 100.0, GeoPoint::ORIGIN);
        let r = m.add_resident(Preferences::uniform(), 5.0, 10.0);
        m.occupy(r, d);

        assert_eq!(update_residents(&mut m, 0.0), 0);
        assert_eq!(m.resident(r).cash, 5.0);
        let full = m.current_contentment(r);
        assert!((m.resident(r).contentment - full * 5.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn comfortable_cash_is_not_penalised() {
        let mut m = empty_market(&[([1.0; 4], 10.0)]);
        let d = m.add_dwelling(NeighbourhoodId(0), 100.0, GeoPoint::ORIGIN);
        let r = m.add_resident(Preferences::uniform(), 5.0, 1000.0);
        m.occupy(r, d);

        update_residents(&mut m, 0.0);
        assert_eq!(m.resident(r).contentment, m.current_contentment(r));
        assert!(!m.resident(r).seeking);
    }

    #[test]
    fn homeless_earn_salary_without_expense() {
        let mut m = empty_market(&[([1.0; 4], 50.0)]);
        let r = m.add_resident(Preferences::uniform(), 7.0, 3.0);
        update_residents(&mut m, 0.6);
        assert_eq!(m.resident(r).cash, 10.0);
        assert!(m.resident(r).seeking);
        assert_eq!(m.resident(r).contentment, 0.0);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use crate::{NoopObserver, SimBuilder};

    /// One neighbourhood, two identical residents in identically priced units.
    fn twins() -> Market {
        let mut m = empty_market(&[([1.0; 4], 0.0)]);
        let prefs = Preferences { neighbourhood: [0.4, 0.3, 0.2, 0.1], cash: 0.5, salary: 0.3, house: 0.2 };
        for _ in 0..2 {
            let d = m.add_dwelling(NeighbourhoodId(0), 100.0, GeoPoint::ORIGIN);
            let r = m.add_resident(prefs, 10.0, 20.0);
            m.occupy(r, d);
            m.refresh(r, 0.0);
        }
        m
    }

    #[test]
    fn identical_residents_never_trade() {
        let mut sim = SimBuilder::with_market(static_config(0.0, 10), twins()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert_eq!(rec.rounds.len(), 10);
        assert!(rec.rounds.iter().all(|s| s.deals == 0));
    }

    #[test]
    fn homeless_buyer_housed_within_one_round() {
        let mut m = empty_market(&[([1.0; 4], 0.0), ([2.0; 4], 0.0)]);
        let d = m.add_dwelling(NeighbourhoodId(1), 500.0, GeoPoint::ORIGIN);
        let r = m.add_resident(Preferences::uniform(), 10.0, 1000.0);

        let mut sim = SimBuilder::with_market(static_config(0.6, 1), m).build().unwrap();
        let stats = sim.step();
        assert_eq!(stats.vacancy_deals, 1);
        assert_eq!(stats.homeless, 0);
        assert_eq!(sim.market.resident(r).dwelling, Some(d));
        assert_eq!(sim.market.resident(r).cash, 1000.0 - 500.0 + 10.0);
    }

    #[test]
    fn one_sided_gain_never_swaps() {
        let mut m = empty_market(&[([0.9; 4], 0.0), ([2.0; 4], 0.0)]);
        for n in 0..2 {
            let d = m.add_dwelling(NeighbourhoodId(n), 100.0, GeoPoint::ORIGIN);
            let r = m.add_resident(Preferences::uniform(), 10.0, 1e6);
            m.occupy(r, d);
        }
        let mut sim = SimBuilder::with_market(static_config(1e9, 5), m).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert!(rec.rounds.iter().all(|s| s.swap_deals == 0));
    }

    #[test]
    fn unit_growth_disabled_keeps_city_size() {
        let mut config = static_config(0.6, 25);
        config.model.housing_fraction = 0.1;
        config.model.initial_occupancy = 0.8;
        let mut sim = SimBuilder::new(config, city()).build().unwrap();
        let (population, units) = (sim.market.population(), sim.market.unit_count());

        sim.run(&mut NoopObserver);
        assert_eq!(sim.market.population(), population);
        assert_eq!(sim.market.unit_count(), units);
    }

    #[test]
    fn dwellings_are_conserved_under_growth() {
        let mut config = generated_config(3, 30);
        config.model.housing_growth_rate = 1.05;
        config.model.population_growth_rate = 1.05;
        let mut sim = SimBuilder::new(config, city()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        let units: Vec<u32> = rec.rounds.iter().map(|s| s.total_units).collect();
        assert!(units.windows(2).all(|w| w[1] >= w[0]));
        assert!(units.last().unwrap() > &150);
        assert!(rec.rounds.iter().any(|s| s.new_residents > 0));
        sim.market.check_invariants();
    }

    #[test]
    fn neighbourhood_units_match_capacity_after_growth() {
        let mut config = generated_config(4, 10);
        config.model.housing_growth_rate = 1.1;
        let mut sim = SimBuilder::new(config, city()).build().unwrap();
        sim.run(&mut NoopObserver);
        for n in &sim.market.neighbourhoods {
            assert_eq!(n.units.len(), n.capacity as usize);
        }
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use hm_agent::JitterPlacement;

    use super::*;
    use crate::{NoopObserver, SimBuilder};

    #[test]
    fn observer_hooks_fire_in_order() {
        let mut config = generated_config(1, 5);
        config.run.output_interval = 2;
        let mut sim = SimBuilder::new(config, city()).build().unwrap();
        let mut rec = Recorder::default();

        assert_eq!(sim.run(&mut rec), 5);
        assert_eq!(rec.starts, vec![1, 2, 3, 4, 5]);
        assert_eq!(rec.rounds.iter().map(|s| s.round).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(rec.snapshots, vec![2, 4]);
        assert_eq!(rec.ended, Some(5));
        assert_eq!(sim.last_stats().map(|s| s.round), Some(5));
    }

    #[test]
    fn deals_split_into_swaps_and_vacancies() {
        let mut sim = SimBuilder::new(generated_config(2, 10), city()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        for s in &rec.rounds {
            assert_eq!(s.deals, s.swap_deals + s.vacancy_deals);
            assert!(s.homeless <= s.population);
            assert!((0.0..=1.0).contains(&s.unhappy_share));
        }
        assert!(rec.rounds.iter().map(|s| s.deals).sum::<u32>() > 0);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = |seed| {
            let mut sim = SimBuilder::new(generated_config(seed, 12), city()).build().unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec);
            let cash: Vec<f64> = sim.market.residents.iter().map(|r| r.cash).collect();
            (rec.rounds, cash)
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7).1, run(8).1);
    }

    #[test]
    fn placement_never_affects_economics() {
        let run = |jitter: bool| {
            let mut config = generated_config(5, 8);
            config.model.housing_growth_rate = 1.1;
            let mut builder = SimBuilder::new(config, city());
            if jitter {
                builder = builder.placement(Box::new(JitterPlacement { half_width: 1.0 }));
            }
            let mut sim = builder.build().unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec);
            rec.rounds
        };
        assert_eq!(run(false), run(true));
    }

    #[test]
    fn quiescent_market_stops_early() {
        let mut config = static_config(0.0, 100);
        config.run.stop = StopCondition::Quiescent { quiet_rounds: 3 };
        let mut m = empty_market(&[([1.0; 4], 0.0)]);
        let d = m.add_dwelling(NeighbourhoodId(0), 100.0, GeoPoint::ORIGIN);
        let r = m.add_resident(Preferences::uniform(), 10.0, 20.0);
        m.occupy(r, d);

        let mut sim = SimBuilder::with_market(config, m).build().unwrap();
        assert_eq!(sim.run(&mut NoopObserver), 3);
        assert!(!sim.is_running());
        assert_eq!(sim.round, 3);
    }

    #[test]
    fn run_rounds_ignores_limits() {
        let mut sim = SimBuilder::new(generated_config(1, 2), city()).build().unwrap();
        sim.run_rounds(4, &mut NoopObserver);
        assert_eq!(sim.round, 4);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch_tests {
    use super::*;
    use crate::{NoopObserver, SimBuilder, run_batch};

    #[test]
    fn one_result_per_seed_in_order() {
        let runs = run_batch(&city(), &generated_config(0, 4), &[11, 12, 13]).unwrap();
        assert_eq!(runs.iter().map(|r| r.seed).collect::<Vec<_>>(), vec![11, 12, 13]);
        assert!(runs.iter().all(|r| r.rounds == 4 && r.final_stats.is_some()));
    }

    #[test]
    fn batch_member_matches_standalone_run() {
        let runs = run_batch(&city(), &generated_config(0, 6), &[21]).unwrap();
        let mut sim = SimBuilder::new(generated_config(21, 6), city()).build().unwrap();
        sim.run(&mut NoopObserver);
        assert_eq!(runs[0].final_stats.as_ref(), sim.last_stats());
    }

    #[test]
    fn build_failure_propagates() {
        let records = vec![record("Void", [1.0; 4], 0.0, 0.0, 100.0)];
        assert!(run_batch(&records, &generated_config(0, 4), &[1, 2]).is_err());
    }
}
