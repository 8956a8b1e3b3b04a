//! Centralized field/shading/display options with TOML preset support.
//!
//! All tweakable settings (placement, blade geometry, shading, camera,
//! display) are consolidated here. Options serialize to/from TOML for presets
//! stored in `assets/view_presets/`.

mod camera;
mod display;
mod geometry;
mod placement;
mod shading;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use geometry::GeometryOptions;
pub use placement::PlacementOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use shading::ShadingOptions;

use crate::error::MeadowError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[shading]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Blade count, field extent, seed, and pitch distribution.
    pub placement: PlacementOptions,
    /// Blade primitive dimensions.
    pub geometry: GeometryOptions,
    /// Material and light parameters.
    pub shading: ShadingOptions,
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Framebuffer and window settings.
    pub display: DisplayOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MeadowError> {
        let content = std::fs::read_to_string(path).map_err(MeadowError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| MeadowError::OptionsParse(e.to_string()))?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MeadowError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MeadowError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MeadowError::Io)?;
        }
        std::fs::write(path, content).map_err(MeadowError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[placement]
instance_count = 2500
seed = 9
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.placement.instance_count, 2500);
        assert_eq!(opts.placement.seed, Some(9));
        // Everything else should be default
        assert_eq!(opts.placement.field_size, 50.0);
        assert_eq!(opts.shading.glossiness, 30.0);
        assert_eq!(opts.camera.fovy, 40.0);
        assert_eq!(opts.display.msaa_samples, 4);
    }

    #[test]
    fn reference_defaults() {
        let opts = Options::default();
        assert_eq!(opts.placement.instance_count, 100_000);
        assert_eq!(opts.placement.seed, None);
        assert_eq!(opts.camera.eye, [0.0, 10.0, 30.0]);
        assert_eq!(opts.camera.orbit_speed, 0.1);
        assert_eq!(opts.display.clear_color, [0.02, 0.1, 0.02]);
        assert_eq!(opts.shading.light_direction, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn save_then_load_and_list() {
        let dir = std::env::temp_dir()
            .join(format!("meadow-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.placement.seed = Some(31);
        opts.shading.metalness = 0.25;
        opts.save(&dir.join("dusk.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("dusk.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["dusk".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn shipped_presets_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/view_presets");
        let names = Options::list_presets(&dir);
        assert!(names.contains(&"sparse_meadow".to_owned()));
        for name in &names {
            let opts = Options::load(&dir.join(format!("{name}.toml"))).unwrap();
            assert!(opts.placement.instance_count > 0, "{name}");
            assert!(
                crate::shading::ShadingParameters::from_options(&opts.shading)
                    .is_ok(),
                "{name}"
            );
        }
        let unlit = Options::load(&dir.join("unlit_sky.toml")).unwrap();
        assert_eq!(unlit.shading.hemisphere_weight, 0.0);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let path = std::env::temp_dir()
            .join(format!("meadow-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[placement\ninstance_count = ").unwrap();
        let err = Options::load(&path).unwrap_err();
        assert!(matches!(err, MeadowError::OptionsParse(_)));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in ["placement", "geometry", "shading", "camera", "display"]
        {
            assert!(props.contains_key(section), "missing {section}");
        }

        // Shading should expose scalar knobs but not raw colors
        let shading = &props["shading"]["properties"];
        assert!(shading.get("glossiness").is_some());
        assert!(shading.get("metalness").is_some());
        assert!(shading.get("albedo").is_none());
        assert!(shading.get("light_direction").is_none());

        let placement = &props["placement"]["properties"];
        assert!(placement.get("instance_count").is_some());
        assert!(placement.get("seed").is_none());
    }
}
