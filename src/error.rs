//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Invalid field, blade, or shading configuration, rejected before any
/// transform is generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Instance count is zero.
    EmptyField,
    /// Instance count exceeds the per-field upload budget.
    InstanceBudget(u32),
    /// Field edge length is not a finite positive number.
    FieldSize(f32),
    /// Pitch clamp bounds (degrees) are inverted or outside `[0, 90]`.
    PitchRange {
        /// Lower clamp bound in degrees.
        min: f32,
        /// Upper clamp bound in degrees.
        max: f32,
    },
    /// Blade triangle has no area or a vertex normal has no length.
    DegenerateBlade,
    /// A shading parameter is out of range or not finite.
    Shading {
        /// Name of the offending `[shading]` option.
        field: &'static str,
        /// Value that was rejected.
        value: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField => write!(f, "instance count must be positive"),
            Self::InstanceBudget(n) => {
                write!(f, "instance count {n} exceeds the upload budget")
            }
            Self::FieldSize(size) => {
                write!(f, "field size must be finite and positive, got {size}")
            }
            Self::PitchRange { min, max } => write!(
                f,
                "pitch range [{min}, {max}] degrees is not within [0, 90]"
            ),
            Self::DegenerateBlade => {
                write!(f, "blade geometry is degenerate")
            }
            Self::Shading { field, value } => {
                write!(f, "shading option `{field}` is out of range: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors produced by the meadow crate.
#[derive(Debug)]
pub enum MeadowError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Field or geometry configuration rejected.
    Config(ConfigError),
    /// WGSL composition failure.
    Shader(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for MeadowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for MeadowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for MeadowError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ConfigError> for MeadowError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for MeadowError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_surfaces_as_source() {
        let err = MeadowError::from(ConfigError::EmptyField);
        assert_eq!(
            err.to_string(),
            "configuration error: instance count must be positive"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn pitch_range_message_names_bounds() {
        let err = ConfigError::PitchRange {
            min: 95.0,
            max: 10.0,
        };
        assert!(err.to_string().contains("[95, 10]"));
    }

    #[test]
    fn shading_message_names_field() {
        let err = ConfigError::Shading {
            field: "gamma",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "shading option `gamma` is out of range: 0");
    }
}
