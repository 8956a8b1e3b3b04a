use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Placement", inline)]
#[serde(default)]
/// Field size, blade count, seed, and pitch distribution.
pub struct PlacementOptions {
    /// Number of blades in the field.
    #[schemars(title = "Blades", range(min = 1, max = 4_000_000))]
    pub instance_count: u32,
    /// Edge length of the square field centered on the origin.
    #[schemars(title = "Field Size", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub field_size: f32,
    /// Seed for the placement generator (absent = OS entropy).
    #[schemars(skip)]
    pub seed: Option<u64>,
    /// Pitch the distribution concentrates around, degrees.
    #[schemars(skip)]
    pub pitch_center_deg: f32,
    /// Scale applied to the pseudo-normal draw, degrees.
    #[schemars(title = "Pitch Spread", range(min = 0.0, max = 90.0), extend("step" = 1.0))]
    pub pitch_spread_deg: f32,
    /// Lowest pitch a blade may take, degrees.
    #[schemars(title = "Min Pitch", range(min = 0.0, max = 90.0), extend("step" = 1.0))]
    pub pitch_min_deg: f32,
    /// Highest pitch a blade may take, degrees.
    #[schemars(skip)]
    pub pitch_max_deg: f32,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            instance_count: 100_000,
            field_size: 50.0,
            seed: None,
            pitch_center_deg: 90.0,
            pitch_spread_deg: 30.0,
            pitch_min_deg: 10.0,
            pitch_max_deg: 90.0,
        }
    }
}
