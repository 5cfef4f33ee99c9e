//! The contentment (utility) function.
//!
//! ```text
//! H = Σ w_i · q_i                                   (neighbourhood score)
//! M = w_house · (price  / ref_price)^0.6
//!   + w_sal   · (salary / ref_salary)^0.4
//!   + w_cash  · (cash   / ref_cash)^0.4             (wealth score)
//!
//! contentment = H^(1 − materialism) · M^materialism
//! ```
//!
//! Every base is clamped to `≥ 0` before exponentiation, so the result is
//! real by construction: a resident in debt simply gets no utility from cash.

use serde::{Deserialize, Serialize};

use crate::{Preferences, QualityIndex};

pub const HOUSE_EXPONENT:  f64 = 0.6;
pub const SALARY_EXPONENT: f64 = 0.4;
pub const CASH_EXPONENT:   f64 = 0.4;

/// Population-level means the wealth terms are normalised by.  Fixed at
/// setup so scores stay comparable across rounds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WealthReference {
    pub salary: f64,
    pub cash:   f64,
    pub price:  f64,
}

impl WealthReference {
    /// `cash` reference is `(native_cash_multiplier + 1) × mean_salary`.
    pub fn new(mean_salary: f64, native_cash_multiplier: f64, mean_price: f64) -> Self {
        Self {
            salary: mean_salary,
            cash:   (native_cash_multiplier + 1.0) * mean_salary,
            price:  mean_price,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UtilityModel {
    pub materialism: f64,
    pub reference:   WealthReference,
}

impl UtilityModel {
    pub fn new(materialism: f64, reference: WealthReference) -> Self {
        Self { materialism: materialism.clamp(0.0, 1.0), reference }
    }

    /// Weighted sum of the quality indices.
    pub fn neighbourhood_score(&self, prefs: &Preferences, quality: &QualityIndex) -> f64 {
        prefs
            .neighbourhood
            .iter()
            .zip(quality.as_array())
            .map(|(w, q)| w * q)
            .sum::<f64>()
            .max(0.0)
    }

    /// Diminishing-returns wealth score.
    pub fn wealth_score(&self, prefs: &Preferences, dwelling_value: f64, salary: f64, cash: f64) -> f64 {
        let r = &self.reference;
        prefs.house * normalised(dwelling_value, r.price).powf(HOUSE_EXPONENT)
            + prefs.salary * normalised(salary, r.salary).powf(SALARY_EXPONENT)
            + prefs.cash * normalised(cash, r.cash).powf(CASH_EXPONENT)
    }

    /// Contentment of a resident with `prefs`, `salary` and `cash` living in a
    /// dwelling worth `dwelling_value` in a neighbourhood with `quality`.
    pub fn contentment(
        &self,
        prefs:          &Preferences,
        quality:        &QualityIndex,
        dwelling_value: f64,
        salary:         f64,
        cash:           f64,
    ) -> f64 {
        let h = self.neighbourhood_score(prefs, quality);
        let m = self.wealth_score(prefs, dwelling_value, salary, cash);
        h.powf(1.0 - self.materialism) * m.powf(self.materialism)
    }
}

/// `value / reference`, clamped to `[0, ∞)`.  A non-positive reference
/// contributes nothing.
#[inline]
fn normalised(value: f64, reference: f64) -> f64 {
    if reference > 0.0 && value.is_finite() {
        (value / reference).max(0.0)
    } else {
        0.0
    }
}
