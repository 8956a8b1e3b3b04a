use glam::Vec3;

use crate::error::ConfigError;
use crate::options::GeometryOptions;

/// Triangle winding shared by every blade.
pub const BLADE_INDICES: [u16; 3] = [0, 1, 2];

/// Per-vertex data for the blade primitive.
/// Must match the WGSL `BladeVertex` input locations 0 and 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BladeVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
}

impl BladeVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex-step layout for buffer slot 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One flat triangle lying in the ground plane with its tip along `-Z`.
///
/// All normals point along local `+Y`. Immutable once built; every instance
/// references the same vertex and index data.
#[derive(Debug, Clone, PartialEq)]
pub struct BladeGeometry {
    vertices: [BladeVertex; 3],
}

impl Default for BladeGeometry {
    fn default() -> Self {
        Self {
            vertices: Self::vertices_for(1.0, 0.1),
        }
    }
}

impl BladeGeometry {
    /// Blade with the tip `length` units along `-Z` and a base `2 *
    /// half_width` wide along `X`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DegenerateBlade`] when either dimension is not
    /// a finite positive number.
    pub fn new(length: f32, half_width: f32) -> Result<Self, ConfigError> {
        if !(length > 0.0 && half_width > 0.0) {
            return Err(ConfigError::DegenerateBlade);
        }
        Self::from_vertices(Self::vertices_for(length, half_width))
    }

    /// Blade sized from geometry options.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BladeGeometry::new`].
    pub fn from_options(options: &GeometryOptions) -> Result<Self, ConfigError> {
        Self::new(options.blade_length, options.blade_half_width)
    }

    /// Blade from explicit vertices.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DegenerateBlade`] if the triangle has no area,
    /// a coordinate is not finite, or a normal has zero length.
    pub fn from_vertices(vertices: [BladeVertex; 3]) -> Result<Self, ConfigError> {
        let [a, b, c] = vertices.map(|v| Vec3::from(v.position));
        let area2 = (b - a).cross(c - a).length();
        let finite = vertices.iter().all(|v| {
            Vec3::from(v.position).is_finite() && Vec3::from(v.normal).is_finite()
        });
        let normals_ok = vertices
            .iter()
            .all(|v| Vec3::from(v.normal).length_squared() > f32::EPSILON);
        if !finite || !normals_ok || !(area2 > 1e-8) {
            return Err(ConfigError::DegenerateBlade);
        }
        Ok(Self { vertices })
    }

    fn vertices_for(length: f32, half_width: f32) -> [BladeVertex; 3] {
        let up = [0.0, 1.0, 0.0];
        [
            BladeVertex {
                position: [0.0, 0.0, -length],
                normal: up,
            },
            BladeVertex {
                position: [-half_width, 0.0, 0.0],
                normal: up,
            },
            BladeVertex {
                position: [half_width, 0.0, 0.0],
                normal: up,
            },
        ]
    }

    /// The three vertices.
    pub fn vertices(&self) -> &[BladeVertex; 3] {
        &self.vertices
    }

    /// Triangle indices.
    pub fn indices(&self) -> &'static [u16; 3] {
        &BLADE_INDICES
    }

    /// Number of indices drawn per instance.
    pub fn index_count(&self) -> u32 {
        BLADE_INDICES.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blade_matches_reference_layout() {
        let blade = BladeGeometry::default();
        let positions: Vec<[f32; 3]> =
            blade.vertices().iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[0.0, 0.0, -1.0], [-0.1, 0.0, 0.0], [0.1, 0.0, 0.0]]
        );
        for v in blade.vertices() {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
        assert_eq!(blade.indices(), &[0, 1, 2]);
        assert_eq!(blade.index_count(), 3);
    }

    #[test]
    fn default_equals_new_with_reference_dimensions() {
        assert_eq!(BladeGeometry::new(1.0, 0.1).unwrap(), BladeGeometry::default());
    }

    #[test]
    fn rejects_zero_width() {
        assert_eq!(
            BladeGeometry::new(1.0, 0.0),
            Err(ConfigError::DegenerateBlade)
        );
    }

    #[test]
    fn rejects_nan_length() {
        assert_eq!(
            BladeGeometry::new(f32::NAN, 0.1),
            Err(ConfigError::DegenerateBlade)
        );
    }

    #[test]
    fn rejects_zero_normal() {
        let mut vertices = *BladeGeometry::default().vertices();
        vertices[2].normal = [0.0; 3];
        assert_eq!(
            BladeGeometry::from_vertices(vertices),
            Err(ConfigError::DegenerateBlade)
        );
    }

    #[test]
    fn vertex_stride_is_six_floats() {
        assert_eq!(BladeVertex::layout().array_stride, 24);
    }
}
