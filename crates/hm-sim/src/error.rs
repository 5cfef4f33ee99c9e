use hm_core::HmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("market setup failed: {0}")]
    Setup(#[from] HmError),

    #[error("the city has no dwellings; every neighbourhood has zero capacity")]
    EmptyCity,
}

pub type SimResult<T> = Result<T, SimError>;
