//! Handing simulated positions to a renderer.

use alloc::vec::Vec;
use glam::DVec3;

/// Flags the core forwards to the renderer without reading them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderHints {
    pub wireframe: bool,
    pub depth_test: bool,
}

impl Default for RenderHints {
    fn default() -> Self {
        RenderHints { wireframe: true, depth_test: false }
    }
}

/// Receiver of per-frame positions, implemented by the rendering side.
pub trait PositionSink {
    /// Called first on every publish with the number of positions that follow.
    fn begin(&mut self, _count: usize) {}

    /// Stores the position of particle `index`. Indices arrive in ascending
    /// order, matching the grid's particle order.
    fn set_position(&mut self, index: usize, position: DVec3);

    /// Positions were rewritten; normals and GPU copies are stale.
    fn mark_changed(&mut self) {}

    fn set_render_hints(&mut self, _hints: RenderHints) {}
}

/// A vertex buffer of `[x, y, z]` single-precision triples plus a dirty flag.
#[derive(Clone, Debug, Default)]
pub struct PositionBuffer {
    vertices: Vec<[f32; 3]>,
    hints: RenderHints,
    changed: bool,
}

impl PositionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(particles: usize) -> Self {
        PositionBuffer { vertices: Vec::with_capacity(particles), ..Self::default() }
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// The buffer as `[x0, y0, z0, x1, ...]`, ready for upload.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn hints(&self) -> RenderHints {
        self.hints
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns the dirty flag and clears it.
    pub fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl PositionSink for PositionBuffer {
    fn begin(&mut self, count: usize) {
        self.vertices.resize(count, [0.0; 3]);
    }

    fn set_position(&mut self, index: usize, position: DVec3) {
        if index >= self.vertices.len() {
            self.vertices.resize(index + 1, [0.0; 3]);
        }
        self.vertices[index] = position.as_vec3().to_array();
    }

    fn mark_changed(&mut self) {
        self.changed = true;
    }

    fn set_render_hints(&mut self, hints: RenderHints) {
        self.hints = hints;
    }
}
