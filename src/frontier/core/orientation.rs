//! Frontier orientation: production (output shortfall) or cost (excess).
//!
//! The composed error is `ε = v - u` for a production frontier and
//! `ε = v + u` for a cost frontier. Every density and efficiency formula in
//! the crate is written for the production case; a cost frontier is handled
//! by evaluating it at `ε = s · e` with `s = -1`.
use crate::frontier::errors::{SFAError, SFAResult};
use std::fmt;
use std::str::FromStr;

/// Which side of the frontier inefficiency pushes observations to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierKind {
    /// `y = xβ + v - u`: observations lie below the frontier.
    #[default]
    Production,
    /// `y = xβ + v + u`: observations lie above the frontier.
    Cost,
}

impl FrontierKind {
    /// Multiplier `s` mapping a regression residual `e` to the production
    /// form `ε = s · e`.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            FrontierKind::Production => 1.0,
            FrontierKind::Cost => -1.0,
        }
    }

    /// Decode the host convention `1 = production`, `-1 = cost`.
    ///
    /// # Errors
    /// [`SFAError::UnsupportedSelector`] for any other integer.
    pub fn from_sign(sign: i64) -> SFAResult<Self> {
        match sign {
            1 => Ok(FrontierKind::Production),
            -1 => Ok(FrontierKind::Cost),
            other => Err(SFAError::UnsupportedSelector { tag: other.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FrontierKind::Production => "production",
            FrontierKind::Cost => "cost",
        }
    }
}

impl fmt::Display for FrontierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrontierKind {
    type Err = SFAError;

    /// Accepts `"production"`/`"prod"` and `"cost"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(FrontierKind::Production),
            "cost" => Ok(FrontierKind::Cost),
            _ => Err(SFAError::UnsupportedSelector { tag: s.to_string() }),
        }
    }
}
