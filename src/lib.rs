//! Verlet cloth simulation.
//!
//! `drape` animates a rectangular grid of particles joined by structural
//! distance constraints so that it behaves like fabric: it sags under gravity,
//! reacts to short decaying impulses, and rests on a ground plane.
//!
//! # Features
//!
//! - **Verlet integration**: position-based dynamics with implicit velocity
//! - **Structural constraints**: axis-aligned neighbours only, relaxed
//!   sequentially in a fixed order
//! - **Injected shape function**: any `Fn(u, v) -> DVec3` seeds the rest layout
//! - **Impulses**: four localized force slots with per-tick attenuation
//! - **Renderer-agnostic**: `tick` computes, `publish` hands positions to a
//!   `PositionSink`
//! - **Observable**: monitor tick phases via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`

#![no_std]

extern crate alloc;

pub mod config;
pub mod constraint;
pub mod error;
pub mod grid;
pub mod observer;
pub mod particle;
pub mod publish;
pub mod shape;
pub mod simulation;

// Re-export primary API
pub use config::{ClothConfig, SolverConfig};
pub use constraint::{satisfy_constraints, DistanceConstraint};
pub use error::ClothError;
pub use grid::ClothGrid;
pub use observer::{CountingObserver, NoOpStepObserver, StepObserver};
pub use particle::Particle;
pub use publish::{PositionBuffer, PositionSink, RenderHints};
pub use shape::{FlatShape, ShapeFunction};
pub use simulation::{ClothSimulation, IMPULSE_SLOTS};
