//! Host-side lifecycle wrapper: start, fixed update, destroy.
//!
//! Engines usually own a cable as a component with creation and teardown
//! hooks and a fixed-rate update. `CableComponent` maps those hooks onto a
//! [`CableSimulation`] and samples the anchors every update.

use crate::anchor::AnchorSource;
use crate::cable::CableSimulation;
use crate::config::CableConfig;
use crate::error::CableError;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::vec::Vec;

pub struct CableComponent<V: Vec, S, E> {
    config: CableConfig<V>,
    start_anchor: S,
    end_anchor: E,
    simulation: Option<CableSimulation<V>>,
}

impl<V, S, E> CableComponent<V, S, E>
where
    V: Vec,
    S: AnchorSource<V>,
    E: AnchorSource<V>,
{
    /// Create a component that is not yet running.
    pub fn new(config: CableConfig<V>, start_anchor: S, end_anchor: E) -> Self {
        CableComponent {
            config,
            start_anchor,
            end_anchor,
            simulation: None,
        }
    }

    /// Build the cable between the anchors' current positions.
    ///
    /// Starting a running component restarts it from a straight layout.
    pub fn start(&mut self) -> Result<(), CableError> {
        if let Some(old) = self.simulation.take() {
            log::debug!("restarting running cable");
            old.teardown();
        }
        let start = self.start_anchor.anchor_position();
        let end = self.end_anchor.anchor_position();
        self.simulation = Some(CableSimulation::new(self.config.clone(), start, end)?);
        Ok(())
    }

    /// Advance one fixed tick.
    pub fn fixed_update(&mut self, dt: V::Scalar) -> Result<(), CableError> {
        self.fixed_update_observed(dt, &mut NoOpStepObserver)
    }

    pub fn fixed_update_observed<O: StepObserver>(
        &mut self,
        dt: V::Scalar,
        observer: &mut O,
    ) -> Result<(), CableError> {
        let Some(simulation) = self.simulation.as_mut() else {
            log::error!("cable updated while not running");
            return Err(CableError::NotInitialized);
        };
        let start = self.start_anchor.anchor_position();
        let end = self.end_anchor.anchor_position();
        simulation.tick_observed(start, end, dt, observer)
    }

    /// Tear the cable down. Later updates fail until `start` is called again.
    pub fn destroy(&mut self) {
        match self.simulation.take() {
            Some(simulation) => simulation.teardown(),
            None => log::warn!("destroying a cable that is not running"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.simulation.is_some()
    }

    /// Positions from the last update; empty when not running.
    pub fn positions(&self) -> &[V] {
        match &self.simulation {
            Some(simulation) => simulation.positions(),
            None => &[],
        }
    }

    /// Segment count matching `positions()`, for sizing renderer buffers.
    ///
    /// While running this is the live cable's count; a pending `set_config`
    /// only shows up after the next `start`.
    pub fn segment_count(&self) -> usize {
        match &self.simulation {
            Some(simulation) => simulation.segment_count(),
            None => self.config.segment_count,
        }
    }

    pub fn config(&self) -> &CableConfig<V> {
        &self.config
    }

    /// Replace the configuration. Applied on the next `start`.
    pub fn set_config(&mut self, config: CableConfig<V>) {
        self.config = config;
    }

    pub fn simulation(&self) -> Option<&CableSimulation<V>> {
        self.simulation.as_ref()
    }

    pub fn start_anchor_mut(&mut self) -> &mut S {
        &mut self.start_anchor
    }

    pub fn end_anchor_mut(&mut self) -> &mut E {
        &mut self.end_anchor
    }
}
