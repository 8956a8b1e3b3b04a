use glam::{Mat4, Vec3, Vec4};

use crate::error::ConfigError;
use crate::options::ShadingOptions;

/// Constant material and light parameters shared by every fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParameters {
    /// Front-face diffuse reflectance.
    pub albedo: Vec3,
    /// Tint of light transmitted through the blade.
    pub subsurface: Vec3,
    /// Specular reflectance.
    pub specular_color: Vec3,
    /// Specular exponent.
    pub glossiness: f32,
    /// Fresnel blend at normal incidence.
    pub metalness: f32,
    /// Directional light radiance.
    pub light_color: Vec3,
    /// Unit world-space direction toward the light.
    pub light_direction: Vec3,
    /// Ambient sky radiance.
    pub ambient_color: Vec3,
    /// Weight of the hemisphere ambient term.
    pub hemisphere_weight: f32,
    /// Half-width of the back-lit pseudo-shadow band.
    pub shadow_band: f32,
    /// Output gamma.
    pub gamma: f32,
}

impl Default for ShadingParameters {
    fn default() -> Self {
        Self::resolve(&ShadingOptions::default())
    }
}

impl ShadingParameters {
    /// Validate options and resolve them into shader-ready parameters. The
    /// light direction is normalized (falling back to straight up if it has
    /// no length) and the subsurface tint is derived from the albedo.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Shading`] naming the first option that is not
    /// finite, is a negative color or weight, has `glossiness < 0`,
    /// `gamma <= 0`, or `metalness` outside `[0, 1]`.
    pub fn from_options(options: &ShadingOptions) -> Result<Self, ConfigError> {
        validate(options)?;
        Ok(Self::resolve(options))
    }

    fn resolve(options: &ShadingOptions) -> Self {
        let albedo = Vec3::from(options.albedo);
        Self {
            albedo,
            subsurface: albedo * options.subsurface_scale,
            specular_color: Vec3::from(options.specular_color),
            glossiness: options.glossiness,
            metalness: options.metalness,
            light_color: Vec3::from(options.light_color),
            light_direction: Vec3::from(options.light_direction)
                .try_normalize()
                .unwrap_or(Vec3::Y),
            ambient_color: Vec3::from(options.ambient_color),
            hemisphere_weight: options.hemisphere_weight,
            shadow_band: options.shadow_band,
            gamma: options.gamma,
        }
    }
}

fn validate(options: &ShadingOptions) -> Result<(), ConfigError> {
    let reject = |field, value| Err(ConfigError::Shading { field, value });

    let colors = [
        ("albedo", options.albedo),
        ("specular_color", options.specular_color),
        ("light_color", options.light_color),
        ("ambient_color", options.ambient_color),
    ];
    for (field, color) in colors {
        if let Some(&bad) = color.iter().find(|c| !(c.is_finite() && **c >= 0.0)) {
            return reject(field, bad);
        }
    }
    if let Some(&bad) = options.light_direction.iter().find(|c| !c.is_finite()) {
        return reject("light_direction", bad);
    }

    let non_negative = [
        ("subsurface_scale", options.subsurface_scale),
        ("glossiness", options.glossiness),
        ("hemisphere_weight", options.hemisphere_weight),
        ("shadow_band", options.shadow_band),
    ];
    for (field, value) in non_negative {
        if !(value.is_finite() && value >= 0.0) {
            return reject(field, value);
        }
    }
    if !(0.0..=1.0).contains(&options.metalness) {
        return reject("metalness", options.metalness);
    }
    if !(options.gamma.is_finite() && options.gamma > 0.0) {
        return reject("gamma", options.gamma);
    }
    Ok(())
}

/// Interpolated per-fragment inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentInput {
    /// World-space position.
    pub world_position: Vec3,
    /// View-space normal (not necessarily unit length).
    pub view_normal: Vec3,
    /// View-space position; the camera sits at the origin.
    pub view_position: Vec3,
}

/// Which face of the blade the directional light reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitSide {
    /// Light strikes the camera-facing side.
    Front,
    /// Light strikes the far side and is transmitted toward the camera.
    Back,
}

/// Linear-space contributions before gamma encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingTerms {
    /// Branch taken for the directional light.
    pub side: LitSide,
    /// Directional light contribution.
    pub directional: Vec3,
    /// Ambient contribution.
    pub ambient: Vec3,
}

impl ShadingTerms {
    /// Sum of all linear contributions.
    #[must_use]
    pub fn linear(&self) -> Vec3 {
        self.directional + self.ambient
    }
}

/// Evaluate the shading model in linear space.
///
/// `view` is the world-to-view transform; only its rotational part is
/// applied to the light direction.
#[must_use]
pub fn shade_linear(
    params: &ShadingParameters,
    input: &FragmentInput,
    view: &Mat4,
) -> ShadingTerms {
    let light_dir = view.transform_vector3(params.light_direction);
    let camera_dir = (-input.view_position).normalize_or_zero();

    let normal = input.view_normal.normalize_or_zero();
    let front_normal = if input.view_normal.dot(camera_dir) > 0.0 {
        normal
    } else {
        -normal
    };

    let lambert_front = light_dir.dot(front_normal);
    let (side, directional) = if lambert_front > 0.0 {
        let lambert = lambert_front.clamp(0.0, 1.0);
        let diffuse = params.light_color * lambert * params.albedo;

        let halfway = (light_dir + camera_dir).normalize_or_zero();
        let highlight = halfway.dot(front_normal).max(0.0).powf(params.glossiness);
        let specular = params.light_color
            * lambert
            * highlight
            * params.glossiness.sqrt()
            * params.specular_color;

        let fresnel = lerp(params.metalness, 1.0, (1.0 - lambert).powi(5));
        (LitSide::Front, diffuse.lerp(specular, fresnel))
    } else {
        let lambert = (-lambert_front).clamp(0.0, 1.0);
        // The normal's x component stands in for a per-blade shadow height.
        let shadow_y = input.view_normal.x;
        let shadow_mask =
            if (input.world_position.y - shadow_y).abs() < params.shadow_band {
                0.0
            } else {
                1.0
            };
        let transmitted = params.light_color * shadow_mask * lambert;
        (LitSide::Back, transmitted * params.subsurface)
    };

    let hemisphere_halfway = (input.view_normal + Vec3::Y).normalize_or_zero();
    let hemisphere = input.view_normal.dot(hemisphere_halfway).powi(2);
    let ambient = params.ambient_color * params.albedo
        + params.ambient_color * hemisphere * params.hemisphere_weight;

    ShadingTerms {
        side,
        directional,
        ambient,
    }
}

/// Evaluate the shading model and return the display-encoded color with
/// alpha 1.
#[must_use]
pub fn shade(
    params: &ShadingParameters,
    input: &FragmentInput,
    view: &Mat4,
) -> Vec4 {
    let linear = shade_linear(params, input, view).linear();
    gamma_encode(linear, params.gamma).extend(1.0)
}

/// Component-wise `color^(1/gamma)`. Negative components encode to 0.
#[must_use]
pub fn gamma_encode(color: Vec3, gamma: f32) -> Vec3 {
    color.max(Vec3::ZERO).powf(gamma.recip())
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
