//! Real-time cable simulation with Verlet integration.
//!
//! `tether` simulates a flexible, nearly inextensible cable hanging between two
//! anchor points. The cable is a chain of point masses advanced by
//! velocity-free Verlet integration and held together by distance constraints
//! relaxed Gauss-Seidel style a fixed number of times per tick.
//!
//! # Features
//!
//! - **Fixed-tick pipeline**: pin anchors, integrate, relax, publish
//! - **Moving anchors**: endpoints snap to their anchors every tick
//! - **Tunable stiffness**: relaxation passes trade cost for stretch
//! - **Observable**: monitor ticks via the `StepObserver` trait or the `log` facade
//! - **`parallel`**: rayon-backed integration and multi-cable stepping
//! - **`no_std` compatible**: disable the default `std` feature
//!
//! ```
//! use tether::{CableConfig, CableSimulation, Vec3};
//!
//! let config = CableConfig::new()
//!     .with_cable_length(5.0)
//!     .with_segment_count(10)
//!     .with_solver_iterations(2);
//! let start = Vec3::new(0.0f32, 0.0, 0.0);
//! let end = Vec3::new(5.0, 0.0, 0.0);
//! let mut cable = CableSimulation::new(config, start, end).unwrap();
//!
//! cable.tick(start, end, 0.02).unwrap();
//! assert_eq!(cable.positions().len(), 11);
//! assert_eq!(cable.positions()[0], start);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod config;
pub mod error;
pub mod observer;
pub mod integrator;
pub mod solver;
pub mod cable;
pub mod anchor;
pub mod component;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2, Vec3};
pub use particle::CableParticle;
pub use config::CableConfig;
pub use error::CableError;
pub use observer::{StepObserver, NoOpStepObserver, LogStepObserver, CountingObserver};
pub use cable::CableSimulation;
#[cfg(feature = "parallel")]
pub use cable::tick_all;
pub use anchor::{AnchorSource, StaticAnchor, FnAnchor};
pub use component::CableComponent;
