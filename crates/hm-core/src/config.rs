//! Model and run configuration.
//!
//! All settings are supplied once at construction and are immutable for the
//! rest of the run.  A TOML file mirrors the struct layout:
//!
//! ```toml
//! [model]
//! contentment_threshold = 0.6
//! materialism           = 0.2
//! housing_growth_rate   = 1.01
//!
//! [run]
//! seed       = 7
//! max_rounds = 100
//! stop       = { kind = "quiescent", quiet_rounds = 3 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{HmError, HmResult};

// ── Config ────────────────────────────────────────────────────────────────────

/// Root configuration: economics plus run control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> HmResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> HmResult<Self> {
        let config: Config = toml::from_str(content).map_err(|e| HmError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML (e.g. to dump the defaults).
    pub fn to_toml(&self) -> HmResult<String> {
        toml::to_string_pretty(self).map_err(|e| HmError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> HmResult<()> {
        self.model.validate()?;
        self.run.validate()
    }
}

// ── ModelConfig ───────────────────────────────────────────────────────────────

/// Economic parameters read by every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Residents whose contentment falls below this value seek to move.
    pub contentment_threshold: f64,

    /// Share of utility attributed to wealth, in `[0, 1]`.  Shared by the
    /// whole population.
    pub materialism: f64,

    /// Half-width of the uniform noise added to each quality index every
    /// round.  `0.0` disables perturbation.
    pub noise: f64,

    /// Per-round multiplier on each neighbourhood's unit capacity.
    pub housing_growth_rate: f64,

    /// Per-round multiplier on the resident population.
    pub population_growth_rate: f64,

    /// Starting cash of residents created at setup, in salaries.
    pub native_cash_multiplier: f64,

    /// Starting cash of residents arriving through growth, in salaries.
    pub newcomer_cash_multiplier: f64,

    /// Fraction of each neighbourhood's real-world capacity instantiated as
    /// dwelling units.
    pub housing_fraction: f64,

    /// Fraction of initial units that start with an owner.
    pub initial_occupancy: f64,

    /// `mu` of the log-normal salary distribution.
    pub salary_log_mean: f64,

    /// `sigma` of the log-normal salary distribution.
    pub salary_log_sigma: f64,

    /// Maximum number of counterparties a seeker evaluates per round.
    pub candidate_pool: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            contentment_threshold:    0.6,
            materialism:              0.2,
            noise:                    0.0,
            housing_growth_rate:      1.01,
            population_growth_rate:   1.01,
            native_cash_multiplier:   2.0,
            newcomer_cash_multiplier: 1.0,
            housing_fraction:         0.01,
            initial_occupancy:        0.95,
            salary_log_mean:          10.3,
            salary_log_sigma:         0.4,
            candidate_pool:           100,
        }
    }
}

impl ModelConfig {
    /// Reject parameter combinations the model cannot run with.
    pub fn validate(&self) -> HmResult<()> {
        let finite = [
            ("contentment_threshold", self.contentment_threshold),
            ("materialism", self.materialism),
            ("noise", self.noise),
            ("housing_growth_rate", self.housing_growth_rate),
            ("population_growth_rate", self.population_growth_rate),
            ("native_cash_multiplier", self.native_cash_multiplier),
            ("newcomer_cash_multiplier", self.newcomer_cash_multiplier),
            ("housing_fraction", self.housing_fraction),
            ("initial_occupancy", self.initial_occupancy),
            ("salary_log_mean", self.salary_log_mean),
            ("salary_log_sigma", self.salary_log_sigma),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(HmError::Config(format!("{name} must be finite")));
        }
        if !(0.0..=1.0).contains(&self.materialism) {
            return Err(HmError::Config(format!(
                "materialism must be in [0, 1], got {}",
                self.materialism
            )));
        }
        if self.noise < 0.0 {
            return Err(HmError::Config("noise must be non-negative".into()));
        }
        if self.housing_growth_rate < 1.0 || self.population_growth_rate < 1.0 {
            // Units and residents are never deleted, so shrinking is meaningless.
            return Err(HmError::Config("growth rates must be >= 1.0".into()));
        }
        if self.native_cash_multiplier < 0.0 || self.newcomer_cash_multiplier < 0.0 {
            return Err(HmError::Config("cash multipliers must be non-negative".into()));
        }
        if self.housing_fraction <= 0.0 {
            return Err(HmError::Config("housing_fraction must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.initial_occupancy) {
            return Err(HmError::Config("initial_occupancy must be in [0, 1]".into()));
        }
        if self.salary_log_sigma < 0.0 {
            return Err(HmError::Config("salary_log_sigma must be non-negative".into()));
        }
        if self.candidate_pool == 0 {
            return Err(HmError::Config("candidate_pool must be at least 1".into()));
        }
        Ok(())
    }

    /// `true` when neither growth nor noise perturbs the system between
    /// rounds, i.e. a zero-deal round is a genuine equilibrium.
    pub fn is_static(&self) -> bool {
        self.housing_growth_rate == 1.0 && self.population_growth_rate == 1.0 && self.noise == 0.0
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// When a run stops advancing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopCondition {
    /// Run exactly `max_rounds` rounds.
    #[default]
    FixedRounds,
    /// Stop after `quiet_rounds` consecutive rounds without a deal (or at
    /// `max_rounds`, whichever comes first).  Only meaningful for a static
    /// model; with growth or noise it behaves like `FixedRounds`.
    Quiescent { quiet_rounds: u32 },
}

/// Run control: seed, length, output cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Upper bound on the number of rounds.
    pub max_rounds: u64,

    /// Emit a neighbourhood snapshot every N rounds.  `0` disables snapshots.
    pub output_interval: u64,

    pub stop: StopCondition,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed:            42,
            max_rounds:      50,
            output_interval: 1,
            stop:            StopCondition::FixedRounds,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> HmResult<()> {
        if let StopCondition::Quiescent { quiet_rounds: 0 } = self.stop {
            return Err(HmError::Config("quiet_rounds must be at least 1".into()));
        }
        Ok(())
    }
}
