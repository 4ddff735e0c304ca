use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Gravity that felt right for the 100-particle rope.
pub const BASE_GRAVITY: f32 = 9.81;

/// Glyphs per depth band, nearest first.
pub const DEFAULT_GLYPHS: [char; 5] = ['O', 'o', '*', '"', '.'];

/// Discrete rope sizes offered to the host.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RopeSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl RopeSize {
    pub fn particle_count(self) -> usize {
        match self {
            RopeSize::Small => 100,
            RopeSize::Medium => 250,
            RopeSize::Large => 400,
        }
    }

    /// Gravity grows with the square of the length ratio to the small rope.
    pub fn gravity(self) -> f32 {
        let ratio = self.particle_count() as f32 / RopeSize::Small.particle_count() as f32;
        ratio * ratio * BASE_GRAVITY
    }
}

impl fmt::Display for RopeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RopeSize::Small => "small",
            RopeSize::Medium => "medium",
            RopeSize::Large => "large",
        };
        f.write_str(name)
    }
}

impl FromStr for RopeSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "small" | "s" => Ok(RopeSize::Small),
            "2" | "medium" | "m" => Ok(RopeSize::Medium),
            "3" | "large" | "l" => Ok(RopeSize::Large),
            other => Err(ConfigError::UnknownSize(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RopeConfig {
    pub particle_count: usize,
    /// Magnitude of gravity, applied along -z.
    pub gravity: f32,
    pub dt: f32,
    pub damping: f32,
    /// Kept below one grid cell so truncation leaves no gaps.
    pub segment_length: f32,
    pub solver_iterations: u32,
    pub initial_spacing: f32,
    pub display_scale: f32,
    /// Vertical correction for non-square character cells.
    pub aspect: f32,
    /// Emitted frames per wall-clock second.
    pub frame_rate: u32,
    /// Physics ticks per wall-clock second.
    pub tick_rate: u32,
    pub max_ticks_per_update: u32,
    pub glyphs: [char; 5],
}

impl Default for RopeConfig {
    fn default() -> Self {
        Self {
            particle_count: RopeSize::Small.particle_count(),
            gravity: BASE_GRAVITY,
            dt: 1.0 / 200.0,
            damping: 0.9925,
            segment_length: 0.75,
            solver_iterations: 80,
            initial_spacing: 1.0 / 1.5,
            display_scale: 2.0,
            aspect: 1.0,
            frame_rate: 90,
            tick_rate: 600,
            max_ticks_per_update: 32,
            glyphs: DEFAULT_GLYPHS,
        }
    }
}

impl RopeConfig {
    pub fn for_size(size: RopeSize) -> Self {
        Self {
            particle_count: size.particle_count(),
            gravity: size.gravity(),
            ..Self::default()
        }
    }

    /// Camera position on the x axis, half a rope length in front of the
    /// projection plane.
    pub fn camera_x(&self) -> f32 {
        -((self.particle_count / 2) as f32)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count < 3 {
            return Err(ConfigError::TooFewParticles(self.particle_count));
        }
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return Err(ConfigError::SegmentLength(self.segment_length));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::Damping(self.damping));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::Timestep(self.dt));
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(ConfigError::Gravity(self.gravity));
        }
        if !(self.display_scale.is_finite() && self.display_scale > 0.0) {
            return Err(ConfigError::DisplayScale(self.display_scale));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(ConfigError::Aspect(self.aspect));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroRate("tick_rate"));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroRate("frame_rate"));
        }
        Ok(())
    }
}
