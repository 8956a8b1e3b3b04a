//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the shading uniform, render
//! targets, and shader composition.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// GPU shading uniform and bind group management.
pub mod shading;
/// Depth and multisample render-target textures.
pub mod texture;
