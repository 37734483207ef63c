//! Cable configuration.

use crate::error::CableError;
use crate::float::Float;
use crate::vec::Vec;

/// Standard gravity, in units per second squared.
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Configuration for a cable.
///
/// # Builder Pattern
/// ```
/// use tether::config::CableConfig;
/// use tether::vec::Vec3;
///
/// let config: CableConfig<Vec3<f32>> = CableConfig::new()
///     .with_cable_length(5.0)
///     .with_segment_count(10)
///     .with_solver_iterations(2)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.segment_length(), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: serde::Serialize, V::Scalar: serde::Serialize",
        deserialize = "V: serde::Deserialize<'de>, V::Scalar: serde::Deserialize<'de>"
    ))
)]
pub struct CableConfig<V: Vec> {
    /// Rest length of the whole cable. Default: 5.
    pub cable_length: V::Scalar,
    /// Number of links; the cable has `segment_count + 1` particles. Default: 5.
    pub segment_count: usize,
    /// Relaxation passes per tick. Fewer passes give a stretchier cable. Default: 2.
    pub solver_iterations: usize,
    /// Constant acceleration applied to free particles. Default: 9.81 along -Y.
    pub gravity: V,
}

impl<V: Vec> CableConfig<V> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        CableConfig {
            cable_length: V::Scalar::from_f32(5.0),
            segment_count: 5,
            solver_iterations: 2,
            gravity: V::up().scale(V::Scalar::from_f32(-STANDARD_GRAVITY)),
        }
    }

    /// Size a cable to span two anchors.
    ///
    /// The rest length is the anchor distance and there are two segments per
    /// whole unit of length, never fewer than two. This is a setup helper; a
    /// running cable keeps whatever it was created with.
    pub fn from_anchor_distance(start: V, end: V) -> Self {
        let cable_length = start.distance(end);
        let segment_count = cable_length.floor().to_usize().saturating_mul(2).max(2);
        CableConfig {
            cable_length,
            segment_count,
            ..Self::new()
        }
    }

    /// Set the total rest length.
    pub fn with_cable_length(mut self, cable_length: V::Scalar) -> Self {
        self.cable_length = cable_length;
        self
    }

    /// Set the number of segments.
    pub fn with_segment_count(mut self, segment_count: usize) -> Self {
        self.segment_count = segment_count;
        self
    }

    /// Set the number of relaxation passes per tick.
    pub fn with_solver_iterations(mut self, solver_iterations: usize) -> Self {
        self.solver_iterations = solver_iterations;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: V) -> Self {
        self.gravity = gravity;
        self
    }

    /// Reject configurations the simulation cannot run.
    pub fn validate(&self) -> Result<(), CableError> {
        if !self.cable_length.is_positive_finite() {
            return Err(CableError::InvalidCableLength);
        }
        if self.segment_count < 2 {
            return Err(CableError::InsufficientSegments { count: self.segment_count });
        }
        if self.solver_iterations < 1 {
            return Err(CableError::InvalidSolverIterations);
        }
        Ok(())
    }

    /// Rest length of one segment.
    pub fn segment_length(&self) -> V::Scalar {
        self.cable_length / V::Scalar::from_usize(self.segment_count)
    }

    /// Number of particles a cable built from this config holds.
    pub fn particle_count(&self) -> usize {
        self.segment_count + 1
    }
}

impl<V: Vec> Default for CableConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}
