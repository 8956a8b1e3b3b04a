//! Two-sided translucent blade shading.
//!
//! [`shade`] is the CPU reference of the fragment program in
//! `assets/shaders/modules/grass_shading.wgsl`; both evaluate the same
//! model:
//!
//! - the normal is flipped to face the camera, so single-sided geometry
//!   shades from either side;
//! - a front-lit face gets Lambert diffuse blended toward a Blinn-Phong
//!   highlight by a Fresnel-like factor;
//! - a back-lit face gets light transmitted through the blade, tinted by the
//!   subsurface color and cut by a thin pseudo-shadow band;
//! - a constant ambient term (plus an optional sky-hemisphere term) keeps
//!   shadowed faces off black;
//! - the sum is gamma encoded.
//!
//! [`vertex`] mirrors the vertex stage so tests can drive the model from
//! blade vertices and instance transforms.

mod model;
pub mod vertex;

pub use model::{
    gamma_encode, shade, shade_linear, FragmentInput, LitSide,
    ShadingParameters, ShadingTerms,
};
