//! Frame-by-frame cloth simulation: forces, integration, ground clamp,
//! relaxation and impulse decay.

use alloc::vec::Vec;
use glam::DVec3;

use crate::config::{ClothConfig, SolverConfig};
use crate::error::ClothError;
use crate::grid::ClothGrid;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::publish::{PositionSink, RenderHints};
use crate::shape::{FlatShape, ShapeFunction};

/// Number of localized impulse slots.
pub const IMPULSE_SLOTS: usize = 4;

/// A cloth grid together with the solver state that drives it.
///
/// ```
/// use drape::{ClothConfig, ClothSimulation, NoOpStepObserver, PositionBuffer};
///
/// let mut sim = ClothSimulation::new(ClothConfig::new(1.0, 1.0, 10, 10)).unwrap();
/// let mut buffer = PositionBuffer::new();
/// sim.tick(0.0, &mut NoOpStepObserver);
/// sim.publish(&mut buffer);
/// assert_eq!(buffer.len(), 121);
/// ```
pub struct ClothSimulation<S: ShapeFunction = FlatShape> {
    grid: ClothGrid,
    cloth_config: ClothConfig,
    shape: S,
    /// Solver parameters, read at the start of every tick.
    pub config: SolverConfig,
    pub render_hints: RenderHints,
    impulses: [DVec3; IMPULSE_SLOTS],
    elapsed: f64,
    frame: u64,
}

impl ClothSimulation<FlatShape> {
    /// Builds a flat cloth of `width × height` on the ground plane.
    pub fn new(cloth_config: ClothConfig) -> Result<Self, ClothError> {
        let shape = FlatShape::new(cloth_config.width, cloth_config.height);
        Self::with_shape(cloth_config, shape)
    }
}

impl<S: ShapeFunction> ClothSimulation<S> {
    pub fn with_shape(cloth_config: ClothConfig, shape: S) -> Result<Self, ClothError> {
        let grid = ClothGrid::new(&cloth_config, &shape)?;
        Ok(ClothSimulation {
            grid,
            cloth_config,
            shape,
            config: SolverConfig::default(),
            render_hints: RenderHints::default(),
            impulses: [DVec3::ZERO; IMPULSE_SLOTS],
            elapsed: 0.0,
            frame: 0,
        })
    }

    /// Replaces the solver config after checking it. The public `config`
    /// field skips this check; callers editing it directly keep it valid.
    pub fn with_solver_config(mut self, config: SolverConfig) -> Result<Self, ClothError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Advances the cloth by one fixed timestep.
    ///
    /// `elapsed` is recorded but does not enter the numerics. The phases run
    /// in a fixed order: impulses and gravity, integration with ground clamp,
    /// constraint relaxation, impulse decay.
    pub fn tick<O: StepObserver>(&mut self, elapsed: f64, observer: &mut O) {
        let SolverConfig {
            gravity,
            damping,
            relaxation_passes,
            force_attenuation,
            ground_height,
            ..
        } = self.config;
        let timestep_sq = self.config.timestep_squared();

        let targets = self.impulse_targets();
        let particles = self.grid.particles_mut();
        for (&target, &impulse) in targets.iter().zip(self.impulses.iter()) {
            if let Some(p) = particles.get_mut(target) {
                p.add_force(impulse);
            }
        }

        for p in particles.iter_mut() {
            p.add_force(gravity);
            p.integrate(timestep_sq, damping);
            if p.position.y < ground_height {
                p.position.y = ground_height;
            }
        }
        observer.on_integrate();

        self.grid.relax(relaxation_passes, |pass| observer.on_relaxation_pass(pass));

        for impulse in self.impulses.iter_mut() {
            *impulse *= force_attenuation;
        }

        self.elapsed = elapsed;
        self.frame += 1;
        log::trace!("cloth tick {} at t={}", self.frame, elapsed);
        observer.on_step_complete();
    }

    /// Sizes `sink` to the particle count, writes every particle position in
    /// index order, forwards the render hints and flags the sink as changed.
    pub fn publish<P: PositionSink + ?Sized>(&self, sink: &mut P) {
        sink.begin(self.grid.particle_count());
        for (i, p) in self.grid.particles().iter().enumerate() {
            sink.set_position(i, p.position);
        }
        sink.set_render_hints(self.render_hints);
        sink.mark_changed();
    }

    /// Replaces the first `forces.len()` impulse slots. Remaining slots keep
    /// their current, decaying value.
    pub fn shoot(&mut self, forces: &[DVec3]) -> Result<(), ClothError> {
        if forces.len() > IMPULSE_SLOTS {
            return Err(ClothError::TooManyImpulses { given: forces.len(), slots: IMPULSE_SLOTS });
        }
        self.impulses[..forces.len()].copy_from_slice(forces);
        Ok(())
    }

    /// Fires every slot straight up with `config.impulse_magnitude`.
    pub fn strike(&mut self) {
        let impulse = DVec3::Y * self.config.impulse_magnitude;
        self.impulses = [impulse; IMPULSE_SLOTS];
    }

    pub fn clear_impulses(&mut self) {
        self.impulses = [DVec3::ZERO; IMPULSE_SLOTS];
    }

    pub fn impulses(&self) -> &[DVec3; IMPULSE_SLOTS] {
        &self.impulses
    }

    /// Particle indices receiving each impulse slot.
    ///
    /// With `q = particle_count / 4` and `r = resolution_w / 4` these are
    /// `q - r`, `q + r`, `3q - r` and `3q + r`, always in range since
    /// `resolution_w < particle_count`.
    pub fn impulse_targets(&self) -> [usize; IMPULSE_SLOTS] {
        let q = self.grid.particle_count() / 4;
        let r = self.grid.resolution_w() / 4;
        [q.saturating_sub(r), q + r, (3 * q).saturating_sub(r), 3 * q + r]
    }

    /// Throws away all particles and constraints and rebuilds them from the
    /// current cloth config and shape.
    pub fn reset(&mut self) -> Result<(), ClothError> {
        let grid = ClothGrid::new(&self.cloth_config, &self.shape)?;
        self.install(grid);
        Ok(())
    }

    /// Rebuilds with a new cloth config, e.g. a new resolution. On error the
    /// running cloth is left as it was.
    pub fn rebuild(&mut self, cloth_config: ClothConfig) -> Result<(), ClothError> {
        if let Err(err) = cloth_config.validate() {
            log::warn!("rejected cloth rebuild: {}", err);
            return Err(err);
        }
        self.shape.set_extent(cloth_config.width, cloth_config.height);
        let grid = ClothGrid::new(&cloth_config, &self.shape)?;
        self.cloth_config = cloth_config;
        self.install(grid);
        Ok(())
    }

    fn install(&mut self, grid: ClothGrid) {
        log::debug!(
            "cloth reset after {} frames: {} particles",
            self.frame,
            grid.particle_count()
        );
        self.grid = grid;
        self.clear_impulses();
        self.elapsed = 0.0;
        self.frame = 0;
    }

    pub fn positions(&self) -> Vec<DVec3> {
        self.grid.positions()
    }

    pub fn particles(&self) -> &[Particle] {
        self.grid.particles()
    }

    pub fn grid(&self) -> &ClothGrid {
        &self.grid
    }

    pub fn cloth_config(&self) -> &ClothConfig {
        &self.cloth_config
    }

    /// The injected shape function, for tessellating the rendered surface.
    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn elapsed(&self) -> f64 { self.elapsed }
    pub fn frame(&self) -> u64 { self.frame }
    pub fn particle_count(&self) -> usize { self.grid.particle_count() }
    pub fn constraint_count(&self) -> usize { self.grid.constraint_count() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpStepObserver;

    fn sim() -> ClothSimulation {
        ClothSimulation::new(ClothConfig::new(1.0, 1.0, 10, 10)).unwrap()
    }

    #[test]
    fn impulse_targets_for_reference_grid() {
        // 121 particles -> q = 30, resolution 10 -> r = 2
        assert_eq!(sim().impulse_targets(), [28, 32, 88, 92]);
    }

    #[test]
    fn impulse_targets_in_range_for_degenerate_grids() {
        for (w, h) in [(0, 0), (1, 0), (0, 5), (7, 1), (31, 2)] {
            let s = ClothSimulation::new(ClothConfig::new(1.0, 1.0, w, h)).unwrap();
            for t in s.impulse_targets() {
                assert!(t < s.particle_count(), "target {} for {}x{}", t, w, h);
            }
        }
    }

    #[test]
    fn shoot_rejects_extra_forces() {
        let mut s = sim();
        let forces = [DVec3::X; 5];
        assert_eq!(
            s.shoot(&forces),
            Err(ClothError::TooManyImpulses { given: 5, slots: IMPULSE_SLOTS })
        );
    }

    #[test]
    fn shoot_keeps_uncovered_slots() {
        let mut s = sim();
        s.strike();
        s.shoot(&[DVec3::X, DVec3::Z]).unwrap();
        let up = DVec3::Y * s.config.impulse_magnitude;
        assert_eq!(s.impulses(), &[DVec3::X, DVec3::Z, up, up]);
    }

    #[test]
    fn impulses_decay_each_tick() {
        let mut s = sim().with_solver_config(SolverConfig::new().with_force_attenuation(0.5)).unwrap();
        s.shoot(&[DVec3::new(0.0, 8.0, 0.0)]).unwrap();
        s.tick(0.0, &mut NoOpStepObserver);
        s.tick(16.0, &mut NoOpStepObserver);
        assert_eq!(s.impulses()[0], DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(s.frame(), 2);
        assert_eq!(s.elapsed(), 16.0);
    }

    #[test]
    fn with_solver_config_rejects_nan_damping() {
        let result = sim().with_solver_config(SolverConfig::new().with_damping(f64::NAN));
        assert!(matches!(result, Err(ClothError::InvalidParameter { name: "damping", .. })));
        let result = sim().with_solver_config(SolverConfig::new().with_timestep(-1.0));
        assert!(matches!(result, Err(ClothError::InvalidParameter { name: "timestep", .. })));
    }

    #[test]
    fn reset_restores_layout_and_clears_impulses() {
        let mut s = sim();
        let initial = s.positions();
        s.strike();
        for i in 0..20 {
            s.tick(i as f64, &mut NoOpStepObserver);
        }
        assert_ne!(s.positions(), initial);
        s.reset().unwrap();
        assert_eq!(s.positions(), initial);
        assert_eq!(s.impulses(), &[DVec3::ZERO; IMPULSE_SLOTS]);
        assert_eq!(s.frame(), 0);
    }
}
