//! Shape functions: normalized grid coordinates to rest positions.

use glam::DVec3;

/// Maps `(u, v)` in `[0, 1]²` to a rest position.
///
/// Used to seed the grid and, by renderers, to tessellate the surface at
/// resolutions other than the simulated one. Must be pure.
pub trait ShapeFunction {
    fn position(&self, u: f64, v: f64) -> DVec3;

    /// Called when the cloth is rebuilt with a new physical extent. Shapes
    /// that do not depend on the extent can ignore it.
    fn set_extent(&mut self, _width: f64, _height: f64) {}
}

/// A flat `width × height` rectangle on the `y = 0` plane, centred on the
/// origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatShape {
    pub width: f64,
    pub height: f64,
}

impl FlatShape {
    pub fn new(width: f64, height: f64) -> Self {
        FlatShape { width, height }
    }
}

impl ShapeFunction for FlatShape {
    fn position(&self, u: f64, v: f64) -> DVec3 {
        DVec3::new((u - 0.5) * self.width, 0.0, (v - 0.5) * self.height)
    }

    fn set_extent(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl<F> ShapeFunction for F
where
    F: Fn(f64, f64) -> DVec3,
{
    fn position(&self, u: f64, v: f64) -> DVec3 {
        self(u, v)
    }
}
