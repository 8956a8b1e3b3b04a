use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Window and framebuffer settings.
pub struct DisplayOptions {
    /// Background color, written to the surface as-is.
    #[schemars(skip)]
    pub clear_color: [f32; 3],
    /// Multisample count for antialiasing (1 disables it).
    #[schemars(title = "MSAA Samples", range(min = 1, max = 4))]
    pub msaa_samples: u32,
    /// Window title.
    #[schemars(skip)]
    pub title: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.02, 0.1, 0.02],
            msaa_samples: 4,
            title: "Meadow".to_owned(),
        }
    }
}

impl DisplayOptions {
    /// Sample count the pipeline can use: 4 when requested above 1, else 1.
    ///
    /// wgpu guarantees support for 1 and 4 samples on every adapter.
    pub fn sample_count(&self) -> u32 {
        if self.msaa_samples > 1 {
            4
        } else {
            1
        }
    }
}
