use glam::Vec3;

use crate::particle::{ParticleRole, RopeParticles};

/// Jakobsen relaxation of the rope's segment lengths.
///
/// Each pass walks the segments `(i, i + 1)` in increasing index order and
/// corrects them in place, so later segments see corrections already made
/// earlier in the same pass (Gauss-Seidel). The order is part of the
/// behaviour: a Jacobi variant converges differently.
///
/// For a segment with `delta = p[i+1] - p[i]` the correction is
/// `delta * (d - |delta|) / |delta|`:
/// - the segment touching the anchor applies all of it to `i + 1`,
/// - the segment touching the tail applies all of it (negated) to `i`,
/// - every other segment splits it evenly between both ends.
///
/// Coincident particles have no defined direction and are skipped for that
/// pair; the next pass usually separates them through a neighbour.
pub fn relax_segments(particles: &mut RopeParticles, segment_length: f32, iterations: u32) {
    for _ in 0..iterations {
        relax_pass(particles, segment_length);
    }
}

/// One sequential pass over every segment.
pub fn relax_pass(particles: &mut RopeParticles, segment_length: f32) {
    let count = particles.count;
    if count < 2 {
        return;
    }
    for i in 0..count - 1 {
        let touches_anchor = particles.role(i) == ParticleRole::Anchor;
        let touches_tail = particles.role(i + 1) == ParticleRole::Tail;
        // A two-particle rope is pinned at both ends.
        if touches_anchor && touches_tail {
            continue;
        }

        let Some(correction) = segment_correction(
            particles.position[i],
            particles.position[i + 1],
            segment_length,
        ) else {
            continue;
        };

        if touches_anchor {
            particles.position[i + 1] += correction;
        } else if touches_tail {
            particles.position[i] -= correction;
        } else {
            let half = correction * 0.5;
            particles.position[i] -= half;
            particles.position[i + 1] += half;
        }
    }
}

/// Full correction that would bring `b` to distance `segment_length` from `a`
/// along the current segment direction.
///
/// Returns `None` for coincident or non-finite segments.
#[inline]
pub fn segment_correction(a: Vec3, b: Vec3, segment_length: f32) -> Option<Vec3> {
    let delta = b - a;
    let dist = delta.length();
    if !(dist > 0.0) || !dist.is_finite() {
        return None;
    }
    let diff = (segment_length - dist) / dist;
    Some(delta * diff)
}
