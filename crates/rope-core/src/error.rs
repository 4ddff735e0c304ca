/// Rejected simulation configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("a rope needs at least 3 particles, got {0}")]
    TooFewParticles(usize),
    #[error("segment length must be positive and finite, got {0}")]
    SegmentLength(f32),
    #[error("damping must lie in [0, 1], got {0}")]
    Damping(f32),
    #[error("timestep must be positive and finite, got {0}")]
    Timestep(f32),
    #[error("gravity must be a non-negative magnitude, got {0}")]
    Gravity(f32),
    #[error("display scale must be positive, got {0}")]
    DisplayScale(f32),
    #[error("aspect correction must be positive, got {0}")]
    Aspect(f32),
    #[error("{0} must be non-zero")]
    ZeroRate(&'static str),
    #[error("unknown rope size {0:?}, expected 1, 2, 3, small, medium or large")]
    UnknownSize(String),
}
