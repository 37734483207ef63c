//! Tick observers for monitoring the cable pipeline.

/// Trait for observing cable ticks.
///
/// Hooks fire in pipeline order: anchors pinned, integration finished, one call
/// per relaxation pass, tick complete. All methods default to no-ops.
pub trait StepObserver {
    /// Called after both endpoints have been snapped to their anchors.
    fn on_anchors_pinned(&mut self) {}

    /// Called after every free particle has been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass over all segments.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Called once the positions for this tick have been published.
    fn on_tick_complete(&mut self) {}
}

/// A no-op observer. Use when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards pipeline stages to the `log` facade.
///
/// Stages are logged at `trace`, the tick summary at `debug`. Nothing is
/// printed unless the host installs a logger.
#[derive(Debug, Default)]
pub struct LogStepObserver {
    ticks: u64,
    passes: usize,
}

impl LogStepObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl StepObserver for LogStepObserver {
    fn on_anchors_pinned(&mut self) {
        self.passes = 0;
        log::trace!("tick {}: anchors pinned", self.ticks);
    }

    fn on_integrate(&mut self) {
        log::trace!("tick {}: integrated", self.ticks);
    }

    fn on_relaxation_pass(&mut self, pass: usize) {
        self.passes += 1;
        log::trace!("tick {}: relaxation pass {}", self.ticks, pass);
    }

    fn on_tick_complete(&mut self) {
        log::debug!("tick {} complete after {} relaxation passes", self.ticks, self.passes);
        self.ticks += 1;
    }
}

/// Counts hook invocations. Handy for checking stage ordering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountingObserver {
    pub anchors_pinned: usize,
    pub integrations: usize,
    pub relaxation_passes: usize,
    pub ticks: usize,
    /// Set if a relaxation pass was seen before the integration of the same tick.
    pub out_of_order: bool,
    integrated_this_tick: bool,
}

impl StepObserver for CountingObserver {
    fn on_anchors_pinned(&mut self) {
        self.anchors_pinned += 1;
        self.integrated_this_tick = false;
    }

    fn on_integrate(&mut self) {
        self.integrations += 1;
        self.integrated_this_tick = true;
    }

    fn on_relaxation_pass(&mut self, _pass: usize) {
        if !self.integrated_this_tick {
            self.out_of_order = true;
        }
        self.relaxation_passes += 1;
    }

    fn on_tick_complete(&mut self) {
        self.ticks += 1;
    }
}
