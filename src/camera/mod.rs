//! Camera system for viewing the field.
//!
//! A perspective camera mounted on a pivot at the world origin. The pivot
//! turns about world `+Y` by the frame driver's yaw; the camera's own pose
//! relative to the pivot never changes.

/// Orbit rig controller owning the camera and its GPU uniform.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
