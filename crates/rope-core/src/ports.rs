use glam::Vec3;

use crate::raster::Frame;

/// Supplies the anchor position for each tick, already in simulation units.
pub trait AnchorSource {
    fn anchor(&mut self) -> Vec3;
}

/// An anchor that never moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAnchor(pub Vec3);

impl AnchorSource for FixedAnchor {
    fn anchor(&mut self) -> Vec3 {
        self.0
    }
}

impl<F: FnMut() -> Vec3> AnchorSource for F {
    fn anchor(&mut self) -> Vec3 {
        self()
    }
}

/// Receives emitted frames.
pub trait FrameSink {
    type Error;

    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

impl FrameSink for Vec<Frame> {
    type Error = std::convert::Infallible;

    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.push(frame.clone());
        Ok(())
    }
}
