use crate::error::ConfigError;
use crate::geometry::BladeGeometry;
use crate::options::Options;
use crate::placement::{
    InstancePlacementGenerator, InstanceTransform, SeededUniform,
    UniformSource,
};
use crate::shading::ShadingParameters;

/// CPU-side field data: the shared blade, one transform per instance, and
/// the resolved shading parameters.
///
/// Built once at startup. Nothing mutates it afterwards; the renderer
/// uploads it and the frame loop only moves the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct GrassField {
    blade: BladeGeometry,
    instances: Vec<InstanceTransform>,
    shading: ShadingParameters,
    seed: Option<u64>,
}

impl GrassField {
    /// Validate options and generate the field. Uses the configured seed,
    /// or OS entropy when none is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the placement, blade, or shading options
    /// are invalid. Validation happens before any draw is consumed.
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut rng = SeededUniform::from_option(options.placement.seed);
        let seed = rng.seed();
        let mut field = Self::with_source(options, &mut rng)?;
        field.seed = seed;
        Ok(field)
    }

    /// Validate options and generate the field from `rng`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GrassField::from_options`].
    pub fn with_source(
        options: &Options,
        rng: &mut impl UniformSource,
    ) -> Result<Self, ConfigError> {
        let blade = BladeGeometry::from_options(&options.geometry)?;
        let shading = ShadingParameters::from_options(&options.shading)?;
        let generator =
            InstancePlacementGenerator::from_options(&options.placement)?;
        Ok(Self {
            blade,
            instances: generator.generate(rng),
            shading,
            seed: None,
        })
    }

    /// Shared blade primitive.
    pub fn blade(&self) -> &BladeGeometry {
        &self.blade
    }

    /// Instance transforms in index order.
    pub fn instances(&self) -> &[InstanceTransform] {
        &self.instances
    }

    /// Material and light parameters for the field.
    pub fn shading(&self) -> &ShadingParameters {
        &self.shading
    }

    /// Seed the field was generated from, if it was seeded explicitly.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
