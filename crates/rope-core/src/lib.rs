//! Hanging rope simulation rendered onto a character grid.
//!
//! One end follows an externally driven anchor, the other is pinned. Each
//! tick integrates gravity, relaxes segment lengths, projects through a
//! pinhole camera and, when the frame throttle allows, rasterizes glyphs.

pub mod config;
pub mod constraints;
pub mod error;
pub mod integrator;
pub mod particle;
pub mod ports;
pub mod projection;
pub mod raster;
pub mod schedule;
pub mod simulation;

pub use config::{RopeConfig, RopeSize};
pub use error::ConfigError;
pub use ports::{AnchorSource, FixedAnchor, FrameSink};
pub use raster::{DrawCell, DrawCommand, Frame, GridSize};
pub use simulation::Simulation;
