//! # Solver errors

use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Error returned when a [`crate::config::SolverConfig`] is rejected at construction time.
///
/// This is the only `Result`-shaped failure surfaced anywhere in the public API: once
/// a config is accepted, [`crate::solve`] always succeeds and reports the outcome through
/// its `status`/`violations`/`conflicts` fields instead (see the crate-level docs).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// `epsilon` must be strictly positive.
    NonPositiveEpsilon,
    /// `mu` must be strictly positive.
    NonPositiveMu,
    /// `epsilon` must be strictly smaller than `mu`, or strict inequalities and
    /// minimum-duration constraints become indistinguishable.
    EpsilonNotSmallerThanMu,
    /// `scale` must be strictly positive.
    NonPositiveScale,
    /// `2*pad` must leave a usable, non-empty range inside `scale`.
    PaddingExceedsScale,
    /// `minimum_display_width` must be strictly positive.
    NonPositiveMinimumWidth,
    /// the relaxer must be allowed at least one iteration.
    ZeroIterationCap,
}

impl Error for ConfigError {}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigError::NonPositiveEpsilon => "epsilon must be strictly positive",
            ConfigError::NonPositiveMu => "mu must be strictly positive",
            ConfigError::EpsilonNotSmallerThanMu => "epsilon must be strictly smaller than mu",
            ConfigError::NonPositiveScale => "scale must be strictly positive",
            ConfigError::PaddingExceedsScale => "pad leaves no usable range inside scale",
            ConfigError::NonPositiveMinimumWidth => "minimum_display_width must be strictly positive",
            ConfigError::ZeroIterationCap => "relaxer_iteration_cap must be at least 1",
        })
    }
}

/// A convenient alias for `Result<X, ConfigError>`.
pub type ConfigResult<X> = Result<X, ConfigError>;
