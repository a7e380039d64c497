//! # Tuning constants
//!
//! The distilled spec lists epsilon, mu, display scale, padding, minimum display width
//! and the relaxer iteration cap as "compile-time, not request-time" constants. Grouping
//! them into one validated value rather than scattering `const`s lets tests exercise
//! alternate configurations (a coarser epsilon, a wider canvas) without touching globals,
//! while [`SolverConfig::new`] still fails closed on anything that would make the rest of
//! the pipeline misbehave.

use crate::error::{ConfigError, ConfigResult};

/// Tunable constants for a single [`crate::solve`] invocation.
///
/// `0 < epsilon < mu` is enforced at construction time, matching the design note that an
/// implementation "should expose them as tuning constants and assert at startup that
/// `0 < ε < μ`".
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Slack subtracted from the bound of a strict inequality (`<`).
    pub epsilon: f64,
    /// Minimum duration enforced for interval events (`end - start >= mu`).
    pub mu: f64,
    /// Width of the display range coordinates are normalized into.
    pub scale: f64,
    /// Padding reserved at each edge of the display range.
    pub pad: f64,
    /// Minimum visual width enforced for interval events at placement time.
    pub minimum_display_width: f64,
    /// Upper bound on the number of relaxation iterations.
    pub relaxer_iteration_cap: usize,
}

impl SolverConfig {
    /// Builds a config from explicit values, rejecting anything that would make the
    /// pipeline unsound (see [`ConfigError`] for the individual checks).
    pub fn new(
        epsilon: f64,
        mu: f64,
        scale: f64,
        pad: f64,
        minimum_display_width: f64,
        relaxer_iteration_cap: usize,
    ) -> ConfigResult<Self> {
        if epsilon <= 0.0 {
            return Err(ConfigError::NonPositiveEpsilon);
        }
        if mu <= 0.0 {
            return Err(ConfigError::NonPositiveMu);
        }
        if epsilon >= mu {
            return Err(ConfigError::EpsilonNotSmallerThanMu);
        }
        if scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale);
        }
        if pad < 0.0 || 2.0 * pad >= scale {
            return Err(ConfigError::PaddingExceedsScale);
        }
        if minimum_display_width <= 0.0 {
            return Err(ConfigError::NonPositiveMinimumWidth);
        }
        if relaxer_iteration_cap == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        Ok(Self {
            epsilon,
            mu,
            scale,
            pad,
            minimum_display_width,
            relaxer_iteration_cap,
        })
    }

    #[inline]
    pub(crate) fn usable_range(&self) -> f64 {
        self.scale - 2.0 * self.pad
    }

    #[inline]
    pub(crate) fn midpoint(&self) -> f64 {
        self.scale / 2.0
    }
}

impl Default for SolverConfig {
    /// The defaults named throughout the spec: `epsilon = 2^-20`, `mu = 1.0`,
    /// `scale = 1000`, `pad = 50`, `minimum_display_width = 20`, iteration cap `100`.
    fn default() -> Self {
        Self::new(2f64.powi(-20), 1.0, 1000.0, 50.0, 20.0, 100)
            .expect("built-in default configuration is always valid")
    }
}
