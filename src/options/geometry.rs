use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Blade primitive dimensions.
pub struct GeometryOptions {
    /// Distance from the blade root to its tip.
    #[schemars(title = "Blade Length", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub blade_length: f32,
    /// Half the width of the blade base.
    #[schemars(title = "Blade Half Width", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub blade_half_width: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            blade_length: 1.0,
            blade_half_width: 0.1,
        }
    }
}
