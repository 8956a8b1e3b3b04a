//! Shared blade primitive referenced by every instance.

mod blade;

pub use blade::{BladeGeometry, BladeVertex, BLADE_INDICES};
