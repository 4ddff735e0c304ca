use glam::Vec3;
use rope_core::constraints::distance::{relax_pass, relax_segments, segment_correction};
use rope_core::integrator::verlet_step;
use rope_core::particle::RopeParticles;

fn segment_lengths(particles: &RopeParticles) -> Vec<f32> {
    particles
        .position
        .windows(2)
        .map(|w| (w[1] - w[0]).length())
        .collect()
}

#[test]
fn test_segment_correction_restores_length() {
    let a = Vec3::ZERO;
    let b = Vec3::new(2.0, 0.0, 0.0);
    let c = segment_correction(a, b, 0.75).expect("non-degenerate segment");
    assert!((((b + c) - a).length() - 0.75).abs() < 1e-6);
    assert!(segment_correction(a, a, 0.75).is_none());
}

#[test]
fn test_segment_at_rest_length_does_not_move() {
    let mut particles = RopeParticles::from_positions(&[
        Vec3::ZERO,
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(1.5, 0.0, 0.0),
        Vec3::new(2.25, 0.0, 0.0),
    ]);
    let before = particles.position.clone();

    relax_segments(&mut particles, 0.75, 10);

    for (i, (p, q)) in particles.position.iter().zip(&before).enumerate() {
        assert!((*p - *q).length() < 1e-6, "particle {i} moved from {q:?} to {p:?}");
    }
}

#[test]
fn test_anchor_segment_moves_only_the_neighbour() {
    let mut particles = RopeParticles::from_positions(&[
        Vec3::ZERO,
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(1.5, 0.0, 0.0),
        Vec3::new(2.25, 0.0, 0.0),
    ]);

    relax_pass(&mut particles, 0.75);

    assert_eq!(particles.position[0], Vec3::ZERO, "anchor must not be displaced");
    // The neighbour takes the whole correction and lands at rest length.
    assert!((particles.position[1].x - 0.75).abs() < 1e-5, "p1 = {:?}", particles.position[1]);
    let first = (particles.position[1] - particles.position[0]).length();
    assert!((first - 0.75).abs() < 1e-5, "first segment {first}");
}

#[test]
fn test_tail_segment_moves_only_the_inner_particle() {
    let tail = Vec3::new(5.0, 0.0, 0.0);
    let mut particles = RopeParticles::from_positions(&[
        Vec3::ZERO,
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(1.5, 0.0, 0.0),
        tail,
    ]);

    relax_segments(&mut particles, 0.75, 80);

    assert_eq!(particles.position[3], tail, "tail must not be displaced");
    assert_eq!(particles.position[0], Vec3::ZERO);
}

#[test]
fn test_inner_segment_splits_correction_evenly() {
    // Anchor and tail segments already at rest; only segment (1, 2) is stretched.
    let mut particles = RopeParticles::from_positions(&[
        Vec3::new(-0.75, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::new(1.75, 0.0, 0.0),
        Vec3::new(2.5, 0.0, 0.0),
        Vec3::new(3.25, 0.0, 0.0),
    ]);

    relax_pass(&mut particles, 0.75);

    // Segment (1, 2) is 1.75 long with a 0.75 target: each end moves 0.5.
    // Particle 1 is not touched again in this pass.
    assert!((particles.position[1].x - 0.5).abs() < 1e-5, "p1 = {:?}", particles.position[1]);
    assert_eq!(particles.position[0], Vec3::new(-0.75, 0.0, 0.0));
}

#[test]
fn test_pass_is_sequential() {
    // Segment (1, 2) is corrected first; the following segment must see the
    // updated particle 2, not its value at the start of the pass.
    let mut gauss_seidel = RopeParticles::from_positions(&[
        Vec3::ZERO,
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(2.75, 0.0, 0.0),
        Vec3::new(3.5, 0.0, 0.0),
        Vec3::new(4.25, 0.0, 0.0),
    ]);
    relax_pass(&mut gauss_seidel, 0.75);

    // Segment (1, 2): 2.0 long, each end moves 0.625 -> p2 = 2.125.
    // Segment (2, 3) then sees 3.5 - 2.125 = 1.375, each end moves 0.3125
    // -> p2 = 2.4375. A simultaneous update would leave p2 at 2.125.
    let p2 = gauss_seidel.position[2].x;
    assert!((p2 - 2.4375).abs() < 1e-5, "p2 = {p2}");
    // The tail segment sees the updated p3 and pulls it back to rest length.
    let p3 = gauss_seidel.position[3].x;
    assert!((p3 - 3.5).abs() < 1e-5, "p3 = {p3}");
}

#[test]
fn test_coincident_particles_stay_finite() {
    let mut particles = RopeParticles::from_positions(&[
        Vec3::ZERO,
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(1.2, 0.0, 0.0),
    ]);

    relax_pass(&mut particles, 0.75);

    assert!(particles.is_finite(), "positions: {:?}", particles.position);
}

#[test]
fn test_fully_collapsed_rope_stays_finite() {
    let mut particles = RopeParticles::from_positions(&[Vec3::ZERO; 6]);

    relax_segments(&mut particles, 0.75, 80);

    assert!(particles.is_finite(), "positions: {:?}", particles.position);
}

#[test]
fn test_two_particle_rope_is_untouched() {
    let mut particles = RopeParticles::from_positions(&[Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)]);

    relax_segments(&mut particles, 0.75, 5);

    assert_eq!(particles.position[0], Vec3::ZERO);
    assert_eq!(particles.position[1], Vec3::new(3.0, 0.0, 0.0));
}

#[test]
fn test_three_particle_scenario() {
    let mut particles = RopeParticles::from_positions(&[
        Vec3::ZERO,
        Vec3::new(0.67, 0.0, 0.0),
        Vec3::new(1.33, 0.0, 0.0),
    ]);

    particles.set_anchor(Vec3::ZERO);
    verlet_step(&mut particles, 9.81, 1.0 / 200.0, 0.9925);
    relax_segments(&mut particles, 0.75, 80);

    for (i, len) in segment_lengths(&particles).into_iter().enumerate() {
        assert!((len - 0.75).abs() < 0.1, "segment {i} length {len}");
    }
    assert_eq!(particles.position[0], Vec3::ZERO);
    assert_eq!(particles.position[2], Vec3::new(1.33, 0.0, 0.0));
    // The slack has to go somewhere: the middle particle drops below the line.
    assert!(particles.position[1].z < 0.0, "middle particle {:?}", particles.position[1]);
}

#[test]
fn test_more_iterations_reduce_deviation() {
    let start = RopeParticles::slack_line(40, 1.0 / 1.5);

    let mut few = RopeParticles::from_positions(&start.position);
    for p in few.position[1..39].iter_mut() {
        p.z -= 0.3;
    }
    let mut many = RopeParticles::from_positions(&few.position);

    relax_segments(&mut few, 0.75, 2);
    relax_segments(&mut many, 0.75, 80);

    let few_dev = few.max_segment_deviation(0.75);
    let many_dev = many.max_segment_deviation(0.75);
    assert!(many_dev <= few_dev, "80 passes ({many_dev}) should beat 2 passes ({few_dev})");
}
