//! §7 error handling design: invalid input, numerical underflow and resource
//! failures are structured and propagated; infeasibility at a given γ is an
//! internal signal between the solver and the driver and never surfaces here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("point set is empty")]
    EmptyPointSet,

    #[error("quota for color {0} ({1}) exceeds available points ({2})")]
    QuotaExceedsAvailable(String, u32, usize),

    #[error("total quota k={0} exceeds point count N={1}")]
    QuotaExceedsTotal(usize, usize),

    #[error("total quota k must be at least 2 (mu = k - 1 is used as a divisor throughout the solver)")]
    QuotaBelowMinimum,

    #[error("epsilon must lie in (0, 1), got {0}")]
    EpsilonOutOfRange(f64),

    #[error("falloff epsilon must lie in (0, 1), got {0}")]
    FalloffEpsilonOutOfRange(f64),

    #[error("gamma_upper must be strictly positive, got {0}")]
    NonPositiveGamma(f64),

    #[error("non-finite feature value at point {0}, dimension {1}")]
    NonFiniteFeature(usize, usize),

    #[error("sum of MWU weights underflowed below the numerical floor before renormalization")]
    WeightUnderflow,

    #[error(transparent)]
    Spatial(#[from] fairdiv_spatial::SpatialError),
}
