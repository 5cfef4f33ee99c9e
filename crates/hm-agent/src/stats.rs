//! Per-neighbourhood aggregates.
//!
//! Aggregates are a pure function of the current arena state, so
//! recomputing twice without an intervening change yields identical values.

use crate::{Market, NeighbourhoodStats};

#[derive(Default)]
struct Accumulator {
    occupied:    u32,
    vacant:      u32,
    contentment: f64,
    salary:      f64,
    cash:        f64,
    price:       f64,
}

impl Market {
    /// Recompute [`NeighbourhoodStats`] for every neighbourhood.
    ///
    /// Resident averages are over owners of the neighbourhood's units (zero
    /// when nobody lives there); the price average is over all units.  A
    /// neighbourhood without units keeps its previous `avg_price` so newly
    /// built units still have a reference price.
    pub fn recompute_neighbourhood_stats(&mut self) {
        let mut acc: Vec<Accumulator> = (0..self.neighbourhoods.len()).map(|_| Accumulator::default()).collect();

        for d in &self.dwellings {
            let a = &mut acc[d.neighbourhood.index()];
            a.price += d.price;
            match d.owner {
                Some(owner) => {
                    let r = &self.residents[owner.index()];
                    a.occupied += 1;
                    a.contentment += r.contentment;
                    a.salary += r.salary;
                    a.cash += r.cash;
                }
                None => a.vacant += 1,
            }
        }

        for (n, a) in self.neighbourhoods.iter_mut().zip(acc) {
            let units = a.occupied + a.vacant;
            let per_resident = |sum: f64| if a.occupied > 0 { sum / a.occupied as f64 } else { 0.0 };
            n.stats = NeighbourhoodStats {
                occupied:        a.occupied,
                vacant:          a.vacant,
                avg_contentment: per_resident(a.contentment),
                avg_salary:      per_resident(a.salary),
                avg_cash:        per_resident(a.cash),
                avg_price:       if units > 0 { a.price / units as f64 } else { n.stats.avg_price },
            };
        }
    }
}
