//! Step observer trait for watching the phases of a cloth tick.

/// Hooks called at fixed points inside `ClothSimulation::tick`.
///
/// All methods default to no-ops. Useful for profiling, debugging, or for a
/// renderer that wants to know when positions changed without polling.
pub trait StepObserver {
    /// Called after forces were applied and every particle was integrated and
    /// clamped to the ground.
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass over the constraint list.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Called once the tick is complete and positions are final for the frame.
    fn on_step_complete(&mut self) {}
}

/// Observer that ignores every hook.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Counts hook invocations. Handy for tests and frame statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountingObserver {
    pub integrations: usize,
    pub relaxation_passes: usize,
    pub completed_steps: usize,
}

impl StepObserver for CountingObserver {
    fn on_integrate(&mut self) {
        self.integrations += 1;
    }

    fn on_relaxation_pass(&mut self, _pass: usize) {
        self.relaxation_passes += 1;
    }

    fn on_step_complete(&mut self) {
        self.completed_steps += 1;
    }
}
