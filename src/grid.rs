//! Cloth grid: particles laid out by a shape function, joined by structural
//! constraints between axis-aligned neighbours.

use alloc::vec::Vec;
use glam::DVec3;

use crate::config::ClothConfig;
use crate::constraint::DistanceConstraint;
use crate::error::ClothError;
use crate::particle::Particle;
use crate::shape::ShapeFunction;

/// Particles and constraints of one cloth.
///
/// Particle `(u, v)` lives at index `v * (resolution_w + 1) + u`. Constraints
/// are stored in relaxation order: row-major over `(u, v)`, and for each
/// particle the edge to `(u, v + 1)` before the edge to `(u + 1, v)`.
#[derive(Clone, Debug)]
pub struct ClothGrid {
    particles: Vec<Particle>,
    constraints: Vec<DistanceConstraint>,
    resolution_w: usize,
    resolution_h: usize,
}

impl ClothGrid {
    pub fn new<S: ShapeFunction + ?Sized>(config: &ClothConfig, shape: &S) -> Result<Self, ClothError> {
        config.validate()?;
        let ClothConfig { resolution_w, resolution_h, particle_mass, rest_distance, .. } = *config;

        let mut particles = Vec::with_capacity(config.particle_count());
        for v in 0..=resolution_h {
            for u in 0..=resolution_w {
                let position = shape.position(normalized(u, resolution_w), normalized(v, resolution_h));
                particles.push(Particle::new(position, particle_mass)?);
            }
        }

        let index = |u: usize, v: usize| v * (resolution_w + 1) + u;
        let mut constraints = Vec::with_capacity(config.constraint_count());
        for v in 0..=resolution_h {
            for u in 0..=resolution_w {
                if v < resolution_h {
                    constraints.push(DistanceConstraint::new(index(u, v), index(u, v + 1), rest_distance));
                }
                if u < resolution_w {
                    constraints.push(DistanceConstraint::new(index(u, v), index(u + 1, v), rest_distance));
                }
            }
        }

        log::debug!(
            "built {}x{} cloth grid: {} particles, {} constraints",
            resolution_w,
            resolution_h,
            particles.len(),
            constraints.len()
        );

        Ok(ClothGrid { particles, constraints, resolution_w, resolution_h })
    }

    pub fn index(&self, u: usize, v: usize) -> usize {
        v * (self.resolution_w + 1) + u
    }

    /// Runs `passes` sequential relaxation sweeps over every constraint,
    /// calling `on_pass` after each one.
    pub fn relax(&mut self, passes: usize, mut on_pass: impl FnMut(usize)) {
        for pass in 0..passes {
            for c in self.constraints.iter() {
                c.solve(&mut self.particles);
            }
            on_pass(pass);
        }
    }

    pub fn positions(&self) -> Vec<DVec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn position_at(&self, u: usize, v: usize) -> DVec3 {
        self.particles[self.index(u, v)].position
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    pub fn resolution_w(&self) -> usize { self.resolution_w }
    pub fn resolution_h(&self) -> usize { self.resolution_h }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
}

fn normalized(i: usize, resolution: usize) -> f64 {
    if resolution == 0 {
        0.0
    } else {
        i as f64 / resolution as f64
    }
}
