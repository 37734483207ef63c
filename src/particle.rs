//! Cable particles: point masses with implicit (Verlet) velocity.

use crate::vec::Vec;

/// One point mass in the cable.
///
/// Velocity is never stored. It is the displacement since the previous tick,
/// `position - previous_position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CableParticle<V: Vec> {
    pub position: V,
    pub previous_position: V,
    /// Endpoint particles are bound to an anchor and never moved by physics.
    pub bound: bool,
}

impl<V: Vec> CableParticle<V> {
    /// A free particle at rest.
    pub fn free(position: V) -> Self {
        CableParticle {
            position,
            previous_position: position,
            bound: false,
        }
    }

    /// A bound (anchored) particle at rest.
    pub fn bound(position: V) -> Self {
        CableParticle {
            position,
            previous_position: position,
            bound: true,
        }
    }

    /// Displacement over the last tick.
    pub fn velocity(&self) -> V {
        self.position - self.previous_position
    }

    /// Bind the particle to an anchor position.
    ///
    /// The old position becomes `previous_position`, so a bound particle's
    /// velocity follows its anchor.
    pub fn pin_to(&mut self, anchor: V) {
        self.bound = true;
        self.previous_position = self.position;
        self.position = anchor;
    }
}
