use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye position before any orbit rotation.
    #[schemars(skip)]
    pub eye: [f32; 3],
    /// Look-at target before any orbit rotation. The orbit pivot is the world
    /// origin.
    #[schemars(skip)]
    pub target: [f32; 3],
    /// Orbit rate about world up, radians per second.
    #[schemars(title = "Orbit Speed", range(min = -1.0, max = 1.0), extend("step" = 0.01))]
    pub orbit_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 40.0,
            znear: 0.1,
            zfar: 1000.0,
            eye: [0.0, 10.0, 30.0],
            target: [0.0, 0.0, 0.0],
            orbit_speed: 0.1,
        }
    }
}
