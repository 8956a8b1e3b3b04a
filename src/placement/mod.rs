//! Statistical placement of grass blades.
//!
//! A field is a fixed-size set of rigid transforms generated once from an
//! injected [`UniformSource`]. Blade pitch is biased toward upright through
//! the heavy-tailed [`orientation::pseudo_normal`] transform; yaw and roll
//! are free.

/// Uniform-to-pseudo-normal orientation sampling.
pub mod orientation;
/// Uniform random sources (seeded and replayed).
pub mod uniform;

mod generator;

pub use generator::{
    BladePose, InstancePlacementGenerator, InstanceTransform, PitchProfile,
    MAX_INSTANCES,
};
pub use orientation::pseudo_normal;
pub use uniform::{SeededUniform, UniformSequence, UniformSource};
