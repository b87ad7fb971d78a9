use thiserror::Error;

/// Reasons a [`MotionParams`](crate::MotionParams) set is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle pool must hold at least one particle")]
    EmptyPool,

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} range is inverted or empty: [{min}, {max})")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("respawn probability must lie in (0, 1], got {0}")]
    InvalidProbability(f32),

    #[error("target surface has no latitude bands")]
    EmptyBands,

    #[error("latitude band weights must be non-negative and sum to a positive value")]
    InvalidBandWeights,

    #[error("torus tube (minor scale {minor}) must be thinner than its ring (major scale {major})")]
    InvalidTorus { major: f32, minor: f32 },
}
