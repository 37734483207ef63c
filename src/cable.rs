//! A cable strung between two anchors, advanced one fixed tick at a time.

use crate::config::CableConfig;
use crate::error::CableError;
use crate::float::Float;
use crate::integrator::{gravity_displacement, integrate};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::CableParticle;
use crate::solver::{solve, squared_length_error};
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Particle count above which integration is spread over the rayon pool.
#[cfg(feature = "parallel")]
const PARALLEL_INTEGRATION_THRESHOLD: usize = 1024;

/// A simulated cable: `segment_count + 1` particles whose two ends follow
/// externally supplied anchor positions.
///
/// Each [`tick`](Self::tick) pins the ends, integrates the free particles,
/// relaxes the distance constraints and publishes a snapshot of the
/// positions for rendering.
#[derive(Clone, Debug)]
pub struct CableSimulation<V: Vec> {
    config: CableConfig<V>,
    particles: AllocVec<CableParticle<V>>,
    published: AllocVec<V>,
}

impl<V: Vec> CableSimulation<V> {
    /// Lay out a cable in a straight line from `start` to `end`.
    ///
    /// Interior particles are spaced evenly and start at rest; both ends are
    /// bound. Fails if the configuration is unusable.
    pub fn new(config: CableConfig<V>, start: V, end: V) -> Result<Self, CableError> {
        if let Err(e) = config.validate() {
            log::warn!("rejecting cable configuration: {}", e);
            return Err(e);
        }

        let segments = config.segment_count;
        let count = V::Scalar::from_usize(segments);
        let mut particles = AllocVec::with_capacity(segments + 1);
        particles.push(CableParticle::bound(start));
        for i in 1..segments {
            let t = V::Scalar::from_usize(i) / count;
            particles.push(CableParticle::free(start.lerp(end, t)));
        }
        particles.push(CableParticle::bound(end));

        let published = particles.iter().map(|p| p.position).collect();

        log::debug!(
            "cable initialized: {} particles, rest length {:?} per segment, {} relaxation passes",
            particles.len(),
            config.segment_length(),
            config.solver_iterations,
        );

        Ok(CableSimulation { config, particles, published })
    }

    /// Advance one fixed tick with the anchors at `start` and `end`.
    pub fn tick(&mut self, start: V, end: V, dt: V::Scalar) -> Result<(), CableError> {
        self.tick_observed(start, end, dt, &mut NoOpStepObserver)
    }

    /// [`tick`](Self::tick), reporting each stage to `observer`.
    pub fn tick_observed<O: StepObserver>(
        &mut self,
        start: V,
        end: V,
        dt: V::Scalar,
        observer: &mut O,
    ) -> Result<(), CableError> {
        if !dt.is_positive_finite() {
            return Err(CableError::InvalidTimeStep);
        }

        self.pin_anchors(start, end);
        observer.on_anchors_pinned();

        let displacement = gravity_displacement(self.config.gravity, dt);
        self.integrate(displacement);
        observer.on_integrate();

        // Rest length is derived every tick so length changes apply immediately.
        solve(
            &mut self.particles,
            self.config.segment_length(),
            self.config.solver_iterations,
            observer,
        );

        self.publish();
        observer.on_tick_complete();
        Ok(())
    }

    fn pin_anchors(&mut self, start: V, end: V) {
        let last = self.particles.len() - 1;
        self.particles[0].pin_to(start);
        self.particles[last].pin_to(end);
    }

    #[cfg(not(feature = "parallel"))]
    fn integrate(&mut self, displacement: V) {
        integrate(&mut self.particles, displacement);
    }

    #[cfg(feature = "parallel")]
    fn integrate(&mut self, displacement: V) {
        if self.particles.len() >= PARALLEL_INTEGRATION_THRESHOLD {
            crate::integrator::integrate_parallel(&mut self.particles, displacement);
        } else {
            integrate(&mut self.particles, displacement);
        }
    }

    fn publish(&mut self) {
        for (out, p) in self.published.iter_mut().zip(self.particles.iter()) {
            *out = p.position;
        }
    }

    /// Positions published by the last tick, first anchor to last.
    pub fn positions(&self) -> &[V] {
        &self.published
    }

    /// Number of constraint links.
    pub fn segment_count(&self) -> usize {
        self.config.segment_count
    }

    /// Number of particles, always `segment_count() + 1`.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Current rest length of one segment.
    pub fn segment_length(&self) -> V::Scalar {
        self.config.segment_length()
    }

    pub fn config(&self) -> &CableConfig<V> {
        &self.config
    }

    pub fn particles(&self) -> &[CableParticle<V>] {
        &self.particles
    }

    /// Panics if `index` is out of bounds; see [`try_particle`](Self::try_particle).
    pub fn particle(&self, index: usize) -> &CableParticle<V> {
        &self.particles[index]
    }

    pub fn try_particle(&self, index: usize) -> Result<&CableParticle<V>, CableError> {
        self.particles.get(index).ok_or(CableError::ParticleOutOfBounds {
            index,
            count: self.particles.len(),
        })
    }

    /// Change the total rest length. Takes effect on the next tick.
    pub fn set_cable_length(&mut self, cable_length: V::Scalar) -> Result<(), CableError> {
        if !cable_length.is_positive_finite() {
            return Err(CableError::InvalidCableLength);
        }
        self.config.cable_length = cable_length;
        Ok(())
    }

    /// Change the number of relaxation passes per tick.
    pub fn set_solver_iterations(&mut self, iterations: usize) -> Result<(), CableError> {
        if iterations < 1 {
            return Err(CableError::InvalidSolverIterations);
        }
        self.config.solver_iterations = iterations;
        Ok(())
    }

    /// Sum of squared segment-length errors of the current particle state.
    pub fn squared_length_error(&self) -> V::Scalar {
        squared_length_error(&self.particles, self.config.segment_length())
    }

    /// Release the particle buffers.
    pub fn teardown(self) {
        log::debug!("cable torn down after holding {} particles", self.particles.len());
    }
}

/// Advance many independent cables by one tick, one rayon task per cable.
///
/// `anchors(i)` supplies the anchor positions for cable `i`.
#[cfg(feature = "parallel")]
pub fn tick_all<V, A>(
    cables: &mut [CableSimulation<V>],
    dt: V::Scalar,
    anchors: A,
) -> Result<(), CableError>
where
    V: Vec,
    A: Fn(usize) -> (V, V) + Sync,
{
    use rayon::prelude::*;

    if !dt.is_positive_finite() {
        return Err(CableError::InvalidTimeStep);
    }
    cables
        .par_iter_mut()
        .enumerate()
        .try_for_each(|(i, cable)| {
            let (start, end) = anchors(i);
            cable.tick(start, end, dt)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CountingObserver;
    use crate::vec::Vec3;

    fn straight(segments: usize) -> CableSimulation<Vec3<f32>> {
        let config = CableConfig::new()
            .with_cable_length(segments as f32)
            .with_segment_count(segments);
        CableSimulation::new(config, Vec3::new(0.0, 0.0, 0.0), Vec3::new(segments as f32, 0.0, 0.0))
            .unwrap()
    }

    #[test]
    fn layout_is_linear_with_bound_ends() {
        let cable = straight(4);
        assert_eq!(cable.particle_count(), 5);
        assert_eq!(cable.positions().len(), 5);
        for (i, p) in cable.particles().iter().enumerate() {
            assert_eq!(p.position, Vec3::new(i as f32, 0.0, 0.0));
            assert_eq!(p.bound, i == 0 || i == 4);
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config: CableConfig<Vec3<f32>> = CableConfig::new().with_segment_count(1);
        let err = CableSimulation::new(config, Vec3::zero(), Vec3::new(1.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err, CableError::InsufficientSegments { count: 1 });
    }

    #[test]
    fn rejects_bad_time_step() {
        let mut cable = straight(3);
        let end = Vec3::new(3.0, 0.0, 0.0);
        assert_eq!(cable.tick(Vec3::zero(), end, 0.0), Err(CableError::InvalidTimeStep));
        assert_eq!(cable.tick(Vec3::zero(), end, f32::NAN), Err(CableError::InvalidTimeStep));
    }

    #[test]
    fn stages_run_in_order() {
        let mut cable = straight(3);
        cable.set_solver_iterations(3).unwrap();
        let mut observer = CountingObserver::default();
        for _ in 0..4 {
            cable
                .tick_observed(Vec3::zero(), Vec3::new(3.0, 0.0, 0.0), 0.02, &mut observer)
                .unwrap();
        }
        assert_eq!(observer.anchors_pinned, 4);
        assert_eq!(observer.integrations, 4);
        assert_eq!(observer.relaxation_passes, 12);
        assert_eq!(observer.ticks, 4);
        assert!(!observer.out_of_order);
    }

    #[test]
    fn checked_particle_access() {
        let cable = straight(2);
        assert!(cable.try_particle(2).is_ok());
        assert_eq!(
            cable.try_particle(3).unwrap_err(),
            CableError::ParticleOutOfBounds { index: 3, count: 3 }
        );
    }

    #[test]
    fn runtime_setters_validate() {
        let mut cable = straight(2);
        assert_eq!(cable.set_cable_length(0.0), Err(CableError::InvalidCableLength));
        assert_eq!(cable.set_solver_iterations(0), Err(CableError::InvalidSolverIterations));
        cable.set_cable_length(4.0).unwrap();
        assert_eq!(cable.segment_length(), 2.0);
        assert_eq!(cable.segment_count(), 2);
    }
}
