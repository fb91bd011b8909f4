//! Aggregation settings.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// How the running balance behaves at a month boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceMode {
    /// Every month starts accumulating from zero.
    #[default]
    Reset,

    /// A month starts from the ending balance of the customer's
    /// previous month with activity.
    CarryForward,
}

impl FromStr for BalanceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reset" => Ok(BalanceMode::Reset),
            "carry-forward" | "carry_forward" | "carry" => Ok(BalanceMode::CarryForward),
            other => Err(ConfigError::UnknownBalanceMode(other.to_string())),
        }
    }
}

impl fmt::Display for BalanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceMode::Reset => f.write_str("reset"),
            BalanceMode::CarryForward => f.write_str("carry-forward"),
        }
    }
}

/// Settings for the fold pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatorConfig {
    pub mode: BalanceMode,
}

impl AggregatorConfig {
    pub fn new(mode: BalanceMode) -> Self {
        AggregatorConfig { mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_reset() {
        assert_eq!(AggregatorConfig::default().mode, BalanceMode::Reset);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("reset".parse(), Ok(BalanceMode::Reset));
        assert_eq!(" Carry-Forward ".parse(), Ok(BalanceMode::CarryForward));
        assert_eq!("carry_forward".parse(), Ok(BalanceMode::CarryForward));
        assert_eq!(
            "rolling".parse::<BalanceMode>(),
            Err(ConfigError::UnknownBalanceMode("rolling".into()))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        for mode in [BalanceMode::Reset, BalanceMode::CarryForward] {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }
}
