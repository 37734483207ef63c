//! Verlet integration of free cable particles.
//!
//! Each particle reads and writes only its own slot, so the stage can run in
//! any order or in parallel. The constraint solver must not start until every
//! particle has been integrated.

use crate::particle::CableParticle;
use crate::vec::Vec;

/// Displacement gravity contributes over one fixed tick: `gravity * dt²`.
///
/// `dt` must be the fixed tick duration, not a measured frame time.
pub fn gravity_displacement<V: Vec>(gravity: V, dt: V::Scalar) -> V {
    gravity.scale(dt * dt)
}

/// Advance one particle. Bound particles are left alone.
#[inline]
pub fn integrate_particle<V: Vec>(particle: &mut CableParticle<V>, gravity_displacement: V) {
    if particle.bound {
        return;
    }
    let new_position = particle.position + particle.velocity() + gravity_displacement;
    particle.previous_position = particle.position;
    particle.position = new_position;
}

/// Advance every free particle by one tick.
pub fn integrate<V: Vec>(particles: &mut [CableParticle<V>], gravity_displacement: V) {
    for p in particles.iter_mut() {
        integrate_particle(p, gravity_displacement);
    }
}

/// Same as [`integrate`], spread over the rayon pool.
///
/// Returns once every particle has been advanced.
#[cfg(feature = "parallel")]
pub fn integrate_parallel<V: Vec>(particles: &mut [CableParticle<V>], gravity_displacement: V) {
    use rayon::prelude::*;

    particles
        .par_iter_mut()
        .for_each(|p| integrate_particle(p, gravity_displacement));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn displacement_uses_dt_squared() {
        let d = gravity_displacement(Vec3::new(0.0f64, -10.0, 0.0), 0.1);
        assert!((d.y + 0.1).abs() < 1e-12);
        assert_eq!(d.x, 0.0);
    }

    #[test]
    fn carries_velocity_and_adds_gravity() {
        let mut p = CableParticle::free(Vec3::new(1.0f32, 0.0, 0.0));
        p.previous_position = Vec3::new(0.5, 0.0, 0.0);
        integrate_particle(&mut p, Vec3::new(0.0, -0.25, 0.0));
        assert_eq!(p.position, Vec3::new(1.5, -0.25, 0.0));
        assert_eq!(p.previous_position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn bound_particles_do_not_move() {
        let mut particles = [
            CableParticle::bound(Vec3::new(0.0f32, 0.0, 0.0)),
            CableParticle::free(Vec3::new(1.0, 0.0, 0.0)),
            CableParticle::bound(Vec3::new(2.0, 0.0, 0.0)),
        ];
        particles[0].previous_position = Vec3::new(-1.0, 0.0, 0.0);
        integrate(&mut particles, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(particles[0].position, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(particles[2].position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(particles[1].position, Vec3::new(1.0, -1.0, 0.0));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let mut a: alloc::vec::Vec<_> = (0..257)
            .map(|i| {
                let mut p = CableParticle::free(Vec3::new(i as f32, 0.0, 0.0));
                p.previous_position = Vec3::new(i as f32 - 0.01, 0.02, 0.0);
                p.bound = i % 64 == 0;
                p
            })
            .collect();
        let mut b = a.clone();
        let g = Vec3::new(0.0, -0.0039, 0.0);
        integrate(&mut a, g);
        integrate_parallel(&mut b, g);
        assert_eq!(a, b);
    }
}
