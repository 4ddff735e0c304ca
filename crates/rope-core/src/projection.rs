use glam::Vec3;

use crate::config::RopeConfig;
use crate::raster::GridSize;

/// A particle mapped onto the screen plane.
///
/// `depth` is the particle's simulation-space x coordinate before projection.
/// It drives occlusion and glyph choice and is not a screen quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub screen_x: i32,
    pub screen_y: i32,
    pub depth: f32,
}

impl ProjectedPoint {
    pub fn new(screen_x: i32, screen_y: i32, depth: f32) -> Self {
        Self { screen_x, screen_y, depth }
    }
}

/// Pinhole camera on the x axis looking toward +x.
///
/// The projection plane is `x = 0`; screen x is simulation y and screen y is
/// simulation z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub display_scale: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn from_config(config: &RopeConfig) -> Self {
        Self {
            x: config.camera_x(),
            display_scale: config.display_scale,
            aspect: config.aspect,
        }
    }

    /// Intersect the line from `p` toward the camera with the plane `x = 0`.
    ///
    /// With direction `(a, b, c) = camera - p`, the hit is at `t = -p.x / a`.
    /// Points at or behind the camera (`a >= 0`) have no forward intersection
    /// and are reported as off-screen with `None`.
    pub fn project(&self, p: Vec3) -> Option<ProjectedPoint> {
        let a = self.x - p.x;
        if !(a < 0.0) {
            return None;
        }
        let b = -p.y;
        let c = -p.z;
        let t = -p.x / a;

        let sx = (p.y + t * b) * self.display_scale;
        let sy = (p.z + t * c) * self.display_scale * self.aspect;
        if !(sx.is_finite() && sy.is_finite()) {
            return None;
        }

        // `as` truncates toward zero and saturates far-off points.
        Some(ProjectedPoint::new(sx as i32, sy as i32, p.x))
    }

    pub fn project_all(&self, positions: &[Vec3], out: &mut Vec<Option<ProjectedPoint>>) {
        out.clear();
        out.extend(positions.iter().map(|&p| self.project(p)));
    }

    /// Turn a grid cell into an anchor position on the projection plane.
    ///
    /// Inverse of the rasterizer's cell mapping at `x = 0`, where the
    /// perspective term vanishes.
    pub fn anchor_from_cell(&self, column: u16, row: u16, grid: GridSize) -> Vec3 {
        let y = (column as f32 - grid.shift() as f32) / self.display_scale;
        let z = (grid.horizon() as f32 - row as f32) / (self.display_scale * self.aspect);
        Vec3::new(0.0, y, z)
    }
}
