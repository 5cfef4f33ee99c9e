//! Fluent builder for constructing a [`Sim`].

use tracing::{info, warn};

use hm_agent::{Market, MarketBuilder, NeighbourhoodRecord, NullPlacement, Placement};
use hm_core::{Config, SimRng, StopCondition};

use crate::sim::PLACEMENT_STREAM;
use crate::{Sim, SimError, SimResult};

enum Source {
    Records(Vec<NeighbourhoodRecord>),
    Market(Market),
}

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`Config`]: model economics plus seed, round limit, stop condition
/// - either neighbourhood records ([`SimBuilder::new`]) from which the
///   initial population is generated, or a ready [`Market`]
///   ([`SimBuilder::with_market`])
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default          |
/// |------------------|------------------|
/// | `.placement(p)`  | [`NullPlacement`] |
///
/// # Example
///
/// ```rust,ignore
/// let records = hm_agent::load_neighbourhoods_csv("neighbourhoods.csv")?;
/// let mut sim = SimBuilder::new(config, records)
///     .placement(Box::new(JitterPlacement { half_width: 0.005 }))
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:    Config,
    source:    Source,
    placement: Box<dyn Placement>,
}

impl SimBuilder {
    /// Generate the initial market from `records`.
    pub fn new(config: Config, records: Vec<NeighbourhoodRecord>) -> Self {
        Self { config, source: Source::Records(records), placement: Box::new(NullPlacement) }
    }

    /// Run on a hand-built market instead of generating one.
    pub fn with_market(config: Config, market: Market) -> Self {
        Self { config, source: Source::Market(market), placement: Box::new(NullPlacement) }
    }

    /// Supply the placement source for newly built dwellings.
    pub fn placement(mut self, placement: Box<dyn Placement>) -> Self {
        self.placement = placement;
        self
    }

    /// Validate the configuration, build the market, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let seed = self.config.run.seed;
        let mut rng = SimRng::new(seed);
        let mut placement_rng = SimRng::for_stream(seed, PLACEMENT_STREAM);

        let market = match self.source {
            Source::Records(records) => MarketBuilder::new(&records, &self.config.model)
                .placement(self.placement.as_ref())
                .build(&mut rng, &mut placement_rng)?,
            Source::Market(market) => market,
        };
        if market.unit_count() == 0 {
            return Err(SimError::EmptyCity);
        }

        let stop = match self.config.run.stop {
            StopCondition::Quiescent { .. } if !self.config.model.is_static() => {
                warn!("quiescent stop ignored: growth or noise keeps perturbing the market; running fixed rounds");
                StopCondition::FixedRounds
            }
            stop => stop,
        };

        info!(
            neighbourhoods = market.neighbourhoods.len(),
            residents = market.population(),
            units = market.unit_count(),
            ?stop,
            "simulation built"
        );

        Ok(Sim {
            config:        self.config,
            market,
            rng,
            placement_rng,
            placement:     self.placement,
            round:         0,
            stop,
            quiet_rounds:  0,
            running:       true,
            last:          None,
        })
    }
}
