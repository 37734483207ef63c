//! Distance-constraint relaxation along the cable.
//!
//! Passes are Gauss-Seidel: pairs are corrected in ascending order and each
//! correction sees the positions written by the one before it. A pass is
//! therefore sequential; only separate cables can be solved concurrently.

use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::CableParticle;
use crate::vec::Vec;

/// Below this separation a pair is treated as coincident and left alone.
const DEGENERATE_LENGTH: f32 = 1e-12;

/// Pull one adjacent pair toward `target_length`.
///
/// Two free particles split the correction evenly. If one end is bound the
/// other absorbs all of it; if both are bound nothing moves. Coincident
/// particles have no direction to correct along and are skipped.
pub fn solve_pair<V: Vec>(
    a: &mut CableParticle<V>,
    b: &mut CableParticle<V>,
    target_length: V::Scalar,
) {
    if a.bound && b.bound {
        return;
    }

    let delta = b.position - a.position;
    let current_length = delta.length();
    if !current_length.is_finite()
        || current_length.is_near_zero(V::Scalar::from_f32(DEGENERATE_LENGTH))
    {
        return; // degenerate
    }

    let error_factor = (current_length - target_length) / current_length;

    if !a.bound && !b.bound {
        let correction = delta.scale(error_factor * V::Scalar::half());
        a.position = a.position + correction;
        b.position = b.position - correction;
    } else if !a.bound {
        a.position = a.position + delta.scale(error_factor);
    } else {
        b.position = b.position - delta.scale(error_factor);
    }
}

/// One relaxation pass over every adjacent pair, index ascending.
pub fn relax<V: Vec>(particles: &mut [CableParticle<V>], target_length: V::Scalar) {
    for i in 1..particles.len() {
        let (head, tail) = particles.split_at_mut(i);
        solve_pair(&mut head[i - 1], &mut tail[0], target_length);
    }
}

/// Run `iterations` relaxation passes.
pub fn solve<V: Vec, O: StepObserver>(
    particles: &mut [CableParticle<V>],
    target_length: V::Scalar,
    iterations: usize,
    observer: &mut O,
) {
    for pass in 0..iterations {
        relax(particles, target_length);
        observer.on_relaxation_pass(pass);
    }
}

/// Sum of squared differences between each segment's length and `target_length`.
pub fn squared_length_error<V: Vec>(particles: &[CableParticle<V>], target_length: V::Scalar) -> V::Scalar {
    particles
        .windows(2)
        .map(|pair| {
            let error = pair[0].position.distance(pair[1].position) - target_length;
            error * error
        })
        .fold(V::Scalar::zero(), |acc, e| acc + e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpStepObserver;
    use crate::vec::Vec3;

    fn v(x: f32, y: f32, z: f32) -> Vec3<f32> {
        Vec3::new(x, y, z)
    }

    #[test]
    fn free_pair_splits_correction() {
        let mut a = CableParticle::free(v(0.0, 0.0, 0.0));
        let mut b = CableParticle::free(v(4.0, 0.0, 0.0));
        solve_pair(&mut a, &mut b, 2.0);
        assert_eq!(a.position, v(1.0, 0.0, 0.0));
        assert_eq!(b.position, v(3.0, 0.0, 0.0));
    }

    #[test]
    fn bound_end_absorbs_nothing() {
        let mut a = CableParticle::bound(v(0.0, 0.0, 0.0));
        let mut b = CableParticle::free(v(0.0, 4.0, 0.0));
        solve_pair(&mut a, &mut b, 1.0);
        assert_eq!(a.position, v(0.0, 0.0, 0.0));
        assert_eq!(b.position, v(0.0, 1.0, 0.0));

        let mut a = CableParticle::free(v(0.0, 0.0, 3.0));
        let mut b = CableParticle::bound(v(0.0, 0.0, 0.0));
        solve_pair(&mut a, &mut b, 1.0);
        assert_eq!(a.position, v(0.0, 0.0, 1.0));
        assert_eq!(b.position, v(0.0, 0.0, 0.0));
    }

    #[test]
    fn both_bound_is_untouched() {
        let mut a = CableParticle::bound(v(0.0, 0.0, 0.0));
        let mut b = CableParticle::bound(v(9.0, 0.0, 0.0));
        solve_pair(&mut a, &mut b, 1.0);
        assert_eq!(a.position, v(0.0, 0.0, 0.0));
        assert_eq!(b.position, v(9.0, 0.0, 0.0));
    }

    #[test]
    fn compressed_pair_is_pushed_apart() {
        let mut a = CableParticle::free(v(0.0, 0.0, 0.0));
        let mut b = CableParticle::free(v(1.0, 0.0, 0.0));
        solve_pair(&mut a, &mut b, 3.0);
        assert_eq!(a.position, v(-1.0, 0.0, 0.0));
        assert_eq!(b.position, v(2.0, 0.0, 0.0));
    }

    #[test]
    fn coincident_pair_is_skipped() {
        let mut a = CableParticle::free(v(1.0, 1.0, 1.0));
        let mut b = CableParticle::free(v(1.0, 1.0, 1.0));
        solve_pair(&mut a, &mut b, 0.5);
        assert_eq!(a.position, v(1.0, 1.0, 1.0));
        assert_eq!(b.position, v(1.0, 1.0, 1.0));
    }

    #[test]
    fn pass_is_sequential() {
        // Pair (0,1) moves particle 1 before pair (1,2) reads it.
        let mut particles = [
            CableParticle::bound(v(0.0, 0.0, 0.0)),
            CableParticle::free(v(2.0, 0.0, 0.0)),
            CableParticle::free(v(3.0, 0.0, 0.0)),
        ];
        relax(&mut particles, 1.0);
        assert_eq!(particles[1].position, v(1.5, 0.0, 0.0));
        assert_eq!(particles[2].position, v(2.5, 0.0, 0.0));
    }

    #[test]
    fn zero_iterations_is_noop() {
        let mut particles = [
            CableParticle::bound(v(0.0, 0.0, 0.0)),
            CableParticle::free(v(5.0, 0.0, 0.0)),
            CableParticle::bound(v(6.0, 0.0, 0.0)),
        ];
        let before = particles;
        solve(&mut particles, 1.0, 0, &mut NoOpStepObserver);
        assert_eq!(particles, before);
    }

    #[test]
    fn error_measure() {
        let particles = [
            CableParticle::bound(v(0.0, 0.0, 0.0)),
            CableParticle::free(v(2.0, 0.0, 0.0)),
            CableParticle::bound(v(2.0, 3.0, 0.0)),
        ];
        assert_eq!(squared_length_error(&particles, 1.0), 1.0 + 4.0);
        assert_eq!(squared_length_error(&particles[..1], 1.0), 0.0);
    }
}
