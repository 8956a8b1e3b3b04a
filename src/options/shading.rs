use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `normalize(0.12, 0.8, 0.1) * 0.05`, a dim saturated green.
const DEFAULT_ALBEDO: [f32; 3] = [0.007_361_0, 0.049_073_3, 0.006_134_2];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Shading", inline)]
#[serde(default)]
/// Material and light parameters shared by every blade.
pub struct ShadingOptions {
    /// Front-face diffuse reflectance (linear RGB).
    #[schemars(skip)]
    pub albedo: [f32; 3],
    /// Subsurface tint as a multiple of the albedo.
    #[schemars(title = "Translucency", range(min = 0.0, max = 4.0), extend("step" = 0.05))]
    pub subsurface_scale: f32,
    /// Specular reflectance (linear RGB).
    #[schemars(skip)]
    pub specular_color: [f32; 3],
    /// Specular exponent.
    #[schemars(title = "Glossiness", range(min = 1.0, max = 256.0), extend("step" = 1.0))]
    pub glossiness: f32,
    /// Base of the Fresnel-like blend toward specular.
    #[schemars(title = "Metalness", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub metalness: f32,
    /// Directional light radiance (linear RGB, unbounded).
    #[schemars(skip)]
    pub light_color: [f32; 3],
    /// World-space direction toward the light (normalized on use).
    #[schemars(skip)]
    pub light_direction: [f32; 3],
    /// Ambient sky radiance (linear RGB).
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Weight of the upward-facing hemisphere ambient term.
    ///
    /// The term adds `ambient_color` unscaled by the albedo, so at 1.0 the
    /// tops of upward-facing blades wash out to a pale sky tint. Set 0 for
    /// the darker look where only `ambient_color * albedo` fills shadows
    /// (see the `unlit_sky` preset).
    #[schemars(title = "Sky Fill", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub hemisphere_weight: f32,
    /// Half-width of the back-lit shadow band.
    #[schemars(skip)]
    pub shadow_band: f32,
    /// Display gamma used for output encoding.
    #[schemars(title = "Gamma", range(min = 1.0, max = 3.0), extend("step" = 0.1))]
    pub gamma: f32,
}

impl Default for ShadingOptions {
    fn default() -> Self {
        Self {
            albedo: DEFAULT_ALBEDO,
            subsurface_scale: 0.8,
            specular_color: [1.0, 1.0, 1.0],
            glossiness: 30.0,
            metalness: 0.0,
            light_color: [10.0, 9.5, 5.0],
            light_direction: [1.0, 1.0, 0.0],
            ambient_color: [1.3, 1.4, 2.0],
            hemisphere_weight: 1.0,
            shadow_band: 0.08,
            gamma: 2.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_albedo_is_scaled_unit_green() {
        let [r, g, b] = [0.12_f32, 0.8, 0.1];
        let len = (r * r + g * g + b * b).sqrt();
        let expected = [r / len * 0.05, g / len * 0.05, b / len * 0.05];
        for (a, e) in DEFAULT_ALBEDO.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{a} vs {e}");
        }
    }
}
