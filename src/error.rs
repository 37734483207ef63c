//! Error types for cable setup and lifecycle.

use core::fmt;

/// Errors surfaced by the cable simulation.
///
/// Configuration problems are reported when a cable is created, never mid-tick.
/// Degenerate geometry (coincident particles) is not an error; the solver
/// absorbs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CableError {
    /// Cable length must be positive and finite.
    InvalidCableLength,
    /// A cable needs at least two segments.
    InsufficientSegments { count: usize },
    /// At least one relaxation pass per tick is required.
    InvalidSolverIterations,
    /// The tick duration must be positive and finite.
    InvalidTimeStep,
    /// The cable was ticked before it started or after it was destroyed.
    NotInitialized,
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for CableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CableError::InvalidCableLength => write!(f, "cable length must be positive and finite"),
            CableError::InsufficientSegments { count } => {
                write!(f, "cable needs at least 2 segments (got {})", count)
            }
            CableError::InvalidSolverIterations => write!(f, "solver iterations must be at least 1"),
            CableError::InvalidTimeStep => write!(f, "tick duration must be positive and finite"),
            CableError::NotInitialized => write!(f, "cable simulation is not running"),
            CableError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CableError {}
