use thiserror::Error;

/// Rejected configuration.  Raised before any game state exists, so a bad
/// value never reaches the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("play area {width}x{height} cannot hold a {min}px entity")]
    PlayAreaTooSmall { width: f32, height: f32, min: f32 },

    #[error("play area {width}x{height} must have finite dimensions")]
    PlayAreaNotFinite { width: f32, height: f32 },

    #[error("{name} must be positive and finite (got {value})")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} interval must be at least 1ms")]
    ZeroInterval { name: &'static str },

    #[error("damage per hit must be at least 1")]
    ZeroDamage,

    #[error("winning score must be at least 1")]
    ZeroWinningScore,
}
