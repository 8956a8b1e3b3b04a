// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Instanced grass field renderer built on wgpu.
//!
//! Meadow scatters a large number of copies of one flat triangle across a
//! square field, each with a random position and an orientation biased
//! toward upright, then draws them in a single instanced call. Blades are
//! shaded with a cheap two-sided model: reflective on the lit face,
//! translucent when lit from behind.
//!
//! # Key entry points
//!
//! - [`placement::InstancePlacementGenerator`] - statistical blade placement
//! - [`geometry::BladeGeometry`] - the shared blade primitive
//! - [`shading::shade`] - CPU reference of the fragment shading model
//! - [`frame::FrameDriver`] - per-frame camera orbit driver
//! - [`engine::MeadowEngine`] - GPU engine drawing the field
//! - [`options::Options`] - runtime configuration with TOML presets

pub mod camera;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gpu;
pub mod options;
pub mod placement;
pub mod renderer;
pub mod shading;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::MeadowEngine;
pub use error::{ConfigError, MeadowError};
pub use options::Options;
