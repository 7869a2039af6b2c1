//! Construction and runtime configuration for cloth simulations.

use glam::DVec3;

use crate::error::{require_non_negative, require_positive, ClothError};

/// Mass given to every grid particle unless overridden.
pub const DEFAULT_PARTICLE_MASS: f64 = 0.1;
/// Rest distance of every structural constraint unless overridden.
pub const DEFAULT_REST_DISTANCE: f64 = 0.1;
/// Fraction of the implicit velocity removed on each integration step.
pub const DEFAULT_DAMPING: f64 = 0.33;
/// Fixed timestep, in seconds, squared on every tick.
pub const DEFAULT_TIMESTEP: f64 = 18.0 / 1000.0;
/// Per-tick multiplier applied to each impulse slot.
pub const DEFAULT_FORCE_ATTENUATION: f64 = 0.9;

/// Shape of the cloth grid. Fixed for the lifetime of one grid; changing it
/// means rebuilding the simulation.
///
/// ```
/// use drape::ClothConfig;
///
/// let config = ClothConfig::new(1.0, 1.0, 10, 10).with_particle_mass(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig {
    /// Physical extent along the `u` axis, read by the shape function.
    pub width: f64,
    /// Physical extent along the `v` axis, read by the shape function.
    pub height: f64,
    /// Number of cells along `u`. Particles per row = `resolution_w + 1`.
    pub resolution_w: usize,
    /// Number of cells along `v`. Rows = `resolution_h + 1`.
    pub resolution_h: usize,
    pub particle_mass: f64,
    pub rest_distance: f64,
}

impl ClothConfig {
    pub fn new(width: f64, height: f64, resolution_w: usize, resolution_h: usize) -> Self {
        ClothConfig {
            width,
            height,
            resolution_w,
            resolution_h,
            particle_mass: DEFAULT_PARTICLE_MASS,
            rest_distance: DEFAULT_REST_DISTANCE,
        }
    }

    pub fn with_particle_mass(mut self, mass: f64) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_rest_distance(mut self, distance: f64) -> Self {
        self.rest_distance = distance;
        self
    }

    pub fn with_resolution(mut self, resolution_w: usize, resolution_h: usize) -> Self {
        self.resolution_w = resolution_w;
        self.resolution_h = resolution_h;
        self
    }

    /// Checks every float parameter. Resolutions are unconstrained: zero
    /// degenerates to a single row or column.
    pub fn validate(&self) -> Result<(), ClothError> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_positive("particle_mass", self.particle_mass)?;
        require_positive("rest_distance", self.rest_distance)?;
        Ok(())
    }

    pub fn particle_count(&self) -> usize {
        (self.resolution_w + 1) * (self.resolution_h + 1)
    }

    pub fn constraint_count(&self) -> usize {
        self.resolution_w * (self.resolution_h + 1) + self.resolution_h * (self.resolution_w + 1)
    }
}

impl Default for ClothConfig {
    fn default() -> Self {
        ClothConfig::new(1.0, 1.0, 10, 10)
    }
}

/// Runtime-tunable solver parameters. Every field is plain and public so a
/// control surface can edit them between ticks.
///
/// # Builder Pattern
/// ```
/// use drape::SolverConfig;
/// use glam::DVec3;
///
/// let config = SolverConfig::new()
///     .with_gravity(DVec3::new(0.0, -0.5, 0.0))
///     .with_relaxation_passes(4)
///     .with_force_attenuation(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Force added to every particle each tick. Default: `(0, -0.2, 0)`.
    pub gravity: DVec3,
    /// Velocity damping in [0, 1]. 0.0 = no damping. Default: 0.33.
    pub damping: f64,
    /// Fixed timestep. Only its square enters the integrator. Default: 0.018.
    pub timestep: f64,
    /// Relaxation passes over the constraint list per tick. Default: 1.
    pub relaxation_passes: usize,
    /// Per-tick decay of each impulse slot. Default: 0.9.
    pub force_attenuation: f64,
    /// Strength used by `ClothSimulation::strike`. Default: 5.0.
    pub impulse_magnitude: f64,
    /// Minimum `y` of any particle after integration. Default: 0.0.
    pub ground_height: f64,
}

impl SolverConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SolverConfig {
            gravity: DVec3::new(0.0, -0.2, 0.0),
            damping: DEFAULT_DAMPING,
            timestep: DEFAULT_TIMESTEP,
            relaxation_passes: 1,
            force_attenuation: DEFAULT_FORCE_ATTENUATION,
            impulse_magnitude: 5.0,
            ground_height: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity: DVec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_relaxation_passes(mut self, passes: usize) -> Self {
        self.relaxation_passes = passes;
        self
    }

    pub fn with_force_attenuation(mut self, attenuation: f64) -> Self {
        self.force_attenuation = attenuation;
        self
    }

    pub fn with_impulse_magnitude(mut self, magnitude: f64) -> Self {
        self.impulse_magnitude = magnitude;
        self
    }

    pub fn with_ground_height(mut self, height: f64) -> Self {
        self.ground_height = height;
        self
    }

    pub fn timestep_squared(&self) -> f64 {
        self.timestep * self.timestep
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        require_non_negative("timestep", self.timestep)?;
        require_non_negative("damping", self.damping)?;
        require_non_negative("force_attenuation", self.force_attenuation)?;
        if !self.gravity.is_finite() {
            return Err(ClothError::invalid("gravity", f64::NAN));
        }
        if !self.ground_height.is_finite() {
            return Err(ClothError::invalid("ground_height", self.ground_height));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
