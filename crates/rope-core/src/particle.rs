use glam::Vec3;

/// Structural role of a particle, derived from its index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParticleRole {
    /// Index 0: driven by the host every tick, never integrated.
    Anchor,
    /// Indices 1..N-2: governed by integration and constraints.
    Free,
    /// Index N-1: pinned at its initial position for the whole run.
    Tail,
}

/// SoA particle storage for a single rope.
///
/// Adjacency is implicit: particle `i` is linked to `i + 1`. The buffers are
/// allocated once and never resized.
pub struct RopeParticles {
    pub count: usize,
    pub position: Vec<Vec3>,
    pub previous: Vec<Vec3>,
}

impl RopeParticles {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            previous: vec![Vec3::ZERO; count],
        }
    }

    /// Lay the rope out along +x with `spacing` between neighbours.
    ///
    /// A spacing shorter than the segment length leaves slack in the rope.
    pub fn slack_line(count: usize, spacing: f32) -> Self {
        let mut particles = Self::new(count);
        for i in 0..count {
            let p = Vec3::new(i as f32 * spacing, 0.0, 0.0);
            particles.position[i] = p;
            particles.previous[i] = p;
        }
        particles
    }

    /// Build a rope from explicit positions, at rest.
    pub fn from_positions(positions: &[Vec3]) -> Self {
        Self {
            count: positions.len(),
            position: positions.to_vec(),
            previous: positions.to_vec(),
        }
    }

    pub fn role(&self, index: usize) -> ParticleRole {
        if index == 0 {
            ParticleRole::Anchor
        } else if index + 1 == self.count {
            ParticleRole::Tail
        } else {
            ParticleRole::Free
        }
    }

    #[inline]
    pub fn is_free(&self, index: usize) -> bool {
        self.role(index) == ParticleRole::Free
    }

    /// `None` for an empty rope.
    #[inline]
    pub fn anchor(&self) -> Option<Vec3> {
        self.position.first().copied()
    }

    #[inline]
    pub fn tail(&self) -> Option<Vec3> {
        self.position.last().copied()
    }

    /// Move the anchor to the host-supplied position. No-op on an empty rope.
    pub fn set_anchor(&mut self, anchor: Vec3) {
        if let (Some(pos), Some(prev)) = (self.position.first_mut(), self.previous.first_mut()) {
            *prev = *pos;
            *pos = anchor;
        }
    }

    /// Largest deviation of any segment from `segment_length`.
    pub fn max_segment_deviation(&self, segment_length: f32) -> f32 {
        self.position
            .windows(2)
            .map(|w| ((w[1] - w[0]).length() - segment_length).abs())
            .fold(0.0, f32::max)
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|p| p.is_finite())
            && self.previous.iter().all(|p| p.is_finite())
    }
}
