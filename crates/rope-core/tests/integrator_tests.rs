use glam::Vec3;
use rope_core::integrator::verlet_step;
use rope_core::particle::RopeParticles;

const DT: f32 = 1.0 / 200.0;

#[test]
fn test_free_particle_falls_along_negative_z() {
    let mut particles = RopeParticles::slack_line(3, 1.0);

    verlet_step(&mut particles, 9.81, DT, 0.9925);

    let p = particles.position[1];
    assert_eq!(p.x, 1.0);
    assert_eq!(p.y, 0.0);
    assert!((p.z - (-9.81 * DT * DT)).abs() < 1e-9, "z after one step: {}", p.z);
    assert_eq!(particles.previous[1], Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_endpoints_are_not_integrated() {
    let mut particles = RopeParticles::slack_line(5, 1.0);
    // Give the endpoints a fake velocity that integration would pick up.
    particles.previous[0] = Vec3::new(-1.0, 0.0, 0.0);
    particles.previous[4] = Vec3::new(3.0, 0.0, 0.0);
    let anchor = particles.position[0];
    let tail = particles.position[4];

    for _ in 0..50 {
        verlet_step(&mut particles, 9.81, DT, 0.9925);
    }

    assert_eq!(particles.position[0], anchor);
    assert_eq!(particles.position[4], tail);
}

#[test]
fn test_damping_bleeds_velocity() {
    let mut particles = RopeParticles::slack_line(3, 1.0);
    particles.previous[1] = Vec3::new(0.9, 0.0, 0.0); // moving +x at 0.1 per step

    verlet_step(&mut particles, 0.0, DT, 0.5);

    let moved = particles.position[1].x - particles.previous[1].x;
    assert!((moved - 0.05).abs() < 1e-6, "damped displacement: {moved}");
}

#[test]
fn test_no_damping_preserves_velocity() {
    let mut particles = RopeParticles::slack_line(3, 1.0);
    particles.previous[1] = Vec3::new(1.0, -0.2, 0.0);

    for _ in 0..10 {
        verlet_step(&mut particles, 0.0, DT, 1.0);
    }

    assert!((particles.position[1].y - 2.0).abs() < 1e-5, "y = {}", particles.position[1].y);
}
