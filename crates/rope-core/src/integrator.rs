use glam::Vec3;

use crate::particle::RopeParticles;

/// Position Verlet with velocity damping.
///
/// ```text
/// x(t + dt) = x(t) + (x(t) - x(t - dt)) * damping + a * dt^2
/// ```
///
/// Only free particles move: the anchor is owned by the host and the tail is
/// pinned. Gravity acts along -z; the other two axes carry no acceleration.
/// `dt` is a fixed simulation step and is never derived from wall-clock time.
pub fn verlet_step(particles: &mut RopeParticles, gravity: f32, dt: f32, damping: f32) {
    let accel_dt_sq = Vec3::new(0.0, 0.0, -gravity) * dt * dt;
    let count = particles.count;

    for i in 0..count {
        if !particles.is_free(i) {
            continue;
        }
        let pos = particles.position[i];
        let velocity = pos - particles.previous[i];
        particles.previous[i] = pos;
        particles.position[i] = pos + velocity * damping + accel_dt_sq;
    }
}
