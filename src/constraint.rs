//! Structural distance constraints between grid neighbours.

use crate::particle::Particle;

/// Keeps two particles of the owning grid at `rest_distance` from each other.
/// `a` and `b` index into the grid's particle array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceConstraint {
    pub a: usize,
    pub b: usize,
    pub rest_distance: f64,
}

impl DistanceConstraint {
    pub fn new(a: usize, b: usize, rest_distance: f64) -> Self {
        DistanceConstraint { a, b, rest_distance }
    }

    /// Relaxes this constraint once against `particles`.
    pub fn solve(&self, particles: &mut [Particle]) {
        if self.a == self.b {
            return;
        }
        let (first, second) = if self.a < self.b { (self.a, self.b) } else { (self.b, self.a) };
        if second >= particles.len() {
            return;
        }
        let (head, tail) = particles.split_at_mut(second);
        let (pa, pb) = if self.a < self.b {
            (&mut head[first], &mut tail[0])
        } else {
            (&mut tail[0], &mut head[first])
        };
        satisfy_constraints(pa, pb, self.rest_distance);
    }
}

/// Moves `a` and `b` halfway each toward `rest_distance` along the line
/// joining them. Coincident particles are left untouched.
pub fn satisfy_constraints(a: &mut Particle, b: &mut Particle, rest_distance: f64) {
    let delta = b.position - a.position;
    let current = delta.length();
    if current == 0.0 {
        return;
    }
    let correction_half = delta * (1.0 - rest_distance / current) * 0.5;
    a.position += correction_half;
    b.position -= correction_half;
}
