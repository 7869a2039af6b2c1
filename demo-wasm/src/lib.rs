use drape::{
    ClothConfig, ClothSimulation, NoOpStepObserver, PositionBuffer, ShapeFunction,
};
use glam::DVec3;
use wasm_bindgen::prelude::*;

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    sim: ClothSimulation,
    buffer: PositionBuffer,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, resolution_w: usize, resolution_h: usize) -> Result<ClothDemo, JsError> {
        let sim = ClothSimulation::new(ClothConfig::new(width, height, resolution_w, resolution_h))?;
        let buffer = PositionBuffer::with_capacity(sim.particle_count());
        Ok(ClothDemo { sim, buffer })
    }

    /// Advances one frame and refreshes the vertex buffer.
    pub fn tick(&mut self, elapsed_ms: f64) {
        self.sim.tick(elapsed_ms, &mut NoOpStepObserver);
        self.sim.publish(&mut self.buffer);
    }

    /// Returns flat [x0, y0, z0, x1, ...] in grid order.
    pub fn positions(&self) -> Vec<f32> {
        self.buffer.as_flat().to_vec()
    }

    /// True once after every tick; the caller should recompute normals.
    pub fn take_changed(&mut self) -> bool {
        self.buffer.take_changed()
    }

    /// Fires all four impulse slots upward.
    pub fn strike(&mut self) {
        self.sim.strike();
    }

    /// Sets the impulse slots from flat [x0, y0, z0, x1, ...] triples.
    pub fn shoot(&mut self, forces: &[f64]) -> Result<(), JsError> {
        let forces: Vec<DVec3> = forces.chunks_exact(3).map(DVec3::from_slice).collect();
        self.sim.shoot(&forces)?;
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), JsError> {
        self.sim.reset()?;
        Ok(())
    }

    pub fn set_resolution(&mut self, resolution_w: usize, resolution_h: usize) -> Result<(), JsError> {
        let config = self.sim.cloth_config().with_resolution(resolution_w, resolution_h);
        self.sim.rebuild(config)?;
        Ok(())
    }

    pub fn set_gravity(&mut self, y: f64) {
        self.sim.config.gravity = DVec3::new(0.0, y, 0.0);
    }

    pub fn set_force_attenuation(&mut self, attenuation: f64) {
        self.sim.config.force_attenuation = attenuation;
    }

    pub fn set_impulse_magnitude(&mut self, magnitude: f64) {
        self.sim.config.impulse_magnitude = magnitude;
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.sim.render_hints.wireframe = wireframe;
    }

    pub fn set_depth_test(&mut self, depth_test: bool) {
        self.sim.render_hints.depth_test = depth_test;
    }

    pub fn wireframe(&self) -> bool {
        self.buffer.hints().wireframe
    }

    pub fn depth_test(&self) -> bool {
        self.buffer.hints().depth_test
    }

    /// Evaluates the rest surface at arbitrary (u, v) for tessellation.
    pub fn surface_point(&self, u: f64, v: f64) -> Vec<f64> {
        self.sim.shape().position(u, v).to_array().to_vec()
    }

    pub fn particle_count(&self) -> usize {
        self.sim.particle_count()
    }

    pub fn resolution_w(&self) -> usize {
        self.sim.grid().resolution_w()
    }

    pub fn resolution_h(&self) -> usize {
        self.sim.grid().resolution_h()
    }
}
