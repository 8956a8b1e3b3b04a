//! Rendering subsystems.
//!
//! Contains the instanced blade pass and shared pipeline state.

pub mod grass;
pub(crate) mod pipeline_util;
