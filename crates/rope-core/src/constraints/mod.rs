/// Length constraints between neighbouring rope particles.
pub mod distance;
