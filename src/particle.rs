//! Verlet particles with position-based dynamics.

use glam::DVec3;

use crate::error::{require_positive, ClothError};

/// A Verlet particle: velocity is implied by `position - previous`.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec3,
    pub previous: DVec3,
    /// Sum of `force / mass` queued for the next integration step.
    pub acceleration: DVec3,
    original: DVec3,
    mass: f64,
    inv_mass: f64,
}

impl Particle {
    /// Creates a particle at rest at `position`.
    ///
    /// Fails with [`ClothError::InvalidParameter`] unless `mass` is finite and
    /// positive, since every force application divides by it.
    pub fn new(position: DVec3, mass: f64) -> Result<Self, ClothError> {
        let mass = require_positive("particle_mass", mass)?;
        Ok(Particle {
            position,
            previous: position,
            acceleration: DVec3::ZERO,
            original: position,
            mass,
            inv_mass: 1.0 / mass,
        })
    }

    pub fn add_force(&mut self, force: DVec3) {
        self.acceleration += force * self.inv_mass;
    }

    /// One position-Verlet step. `damping` removes that fraction of the
    /// implied velocity; `timestep_sq` must not be negative.
    pub fn integrate(&mut self, timestep_sq: f64, damping: f64) {
        let displacement =
            (self.position - self.previous) * (1.0 - damping) + self.acceleration * timestep_sq;
        self.previous = self.position;
        self.position += displacement;
        self.acceleration = DVec3::ZERO;
    }

    pub fn velocity_raw(&self) -> DVec3 {
        self.position - self.previous
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Where the shape function placed this particle.
    pub fn original(&self) -> DVec3 {
        self.original
    }
}
