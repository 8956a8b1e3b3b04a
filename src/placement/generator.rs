use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use super::orientation::pseudo_normal;
use super::uniform::UniformSource;
use crate::error::ConfigError;
use crate::options::PlacementOptions;

/// Upper bound on instances in one field (one instance buffer upload).
pub const MAX_INSTANCES: u32 = 4_000_000;

/// Pitch mapping: `clamp(center - spread * s, min, max)` in degrees, where
/// `s` is a pseudo-normal draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchProfile {
    /// Pitch the distribution concentrates around (90 = upright).
    pub center_deg: f32,
    /// Scale applied to the pseudo-normal draw.
    pub spread_deg: f32,
    /// Lower clamp bound.
    pub min_deg: f32,
    /// Upper clamp bound.
    pub max_deg: f32,
}

impl Default for PitchProfile {
    fn default() -> Self {
        Self {
            center_deg: 90.0,
            spread_deg: 30.0,
            min_deg: 10.0,
            max_deg: 90.0,
        }
    }
}

impl PitchProfile {
    /// Pitch in degrees for a uniform draw `u`. Always within
    /// `[min_deg, max_deg]`, including when the pseudo-normal draw is
    /// infinite.
    #[must_use]
    pub fn pitch_deg(&self, u: f32) -> f32 {
        let offset = self.spread_deg * pseudo_normal(u);
        // 0 · ∞ when the spread is zero.
        let offset = if offset.is_nan() { 0.0 } else { offset };
        (self.center_deg - offset).clamp(self.min_deg, self.max_deg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |deg: f32| (0.0..=90.0).contains(&deg);
        if in_range(self.min_deg)
            && in_range(self.max_deg)
            && self.min_deg <= self.max_deg
            && self.center_deg.is_finite()
            && self.spread_deg.is_finite()
        {
            Ok(())
        } else {
            Err(ConfigError::PitchRange {
                min: self.min_deg,
                max: self.max_deg,
            })
        }
    }
}

/// Sampled placement of one blade, before it is composed into a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladePose {
    /// Root position on the ground plane (`y = 0`).
    pub translation: Vec3,
    /// Elevation of the blade above the ground plane, radians.
    pub pitch: f32,
    /// Heading about world up, radians in `[0, 2π)`.
    pub yaw: f32,
    /// Spin about the blade's own axis, radians in `[0, 2π)`.
    pub roll: f32,
}

impl BladePose {
    /// Rotation `R_y(yaw) · R_x(pitch) · R_z(roll)`.
    ///
    /// Roll spins the blade about its length axis, pitch raises it off the
    /// ground, yaw turns it about world up. With this order the blade's
    /// elevation angle equals `pitch`.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
            * Quat::from_rotation_x(self.pitch)
            * Quat::from_rotation_z(self.roll)
    }

    /// Rigid transform with unit scale.
    #[must_use]
    pub fn transform(&self) -> InstanceTransform {
        InstanceTransform {
            translation: self.translation,
            rotation: self.rotation(),
            scale: Vec3::ONE,
        }
    }
}

/// Translation, rotation and scale of one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    /// World-space translation.
    pub translation: Vec3,
    /// Unit rotation quaternion.
    pub rotation: Quat,
    /// Always `(1, 1, 1)` for generated fields.
    pub scale: Vec3,
}

impl InstanceTransform {
    /// Compose `T · R · S`.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }

    /// Column-major matrix as uploaded to the instance buffer.
    #[must_use]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.to_matrix().to_cols_array_2d()
    }
}

/// Produces a fixed-size field of blade transforms.
///
/// Draw order per instance is `x, z, pitch, yaw, roll`; a seeded
/// [`UniformSource`] therefore reproduces the same field on every run.
#[derive(Debug, Clone, PartialEq)]
pub struct InstancePlacementGenerator {
    count: u32,
    field_size: f32,
    pitch: PitchProfile,
}

impl InstancePlacementGenerator {
    /// Generator for `count` blades in a `field_size × field_size` square
    /// centered on the origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero or oversized count, a non-positive
    /// field size, or an invalid pitch range.
    pub fn new(
        count: u32,
        field_size: f32,
        pitch: PitchProfile,
    ) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if count > MAX_INSTANCES {
            return Err(ConfigError::InstanceBudget(count));
        }
        if !field_size.is_finite() || field_size <= 0.0 {
            return Err(ConfigError::FieldSize(field_size));
        }
        pitch.validate()?;
        Ok(Self {
            count,
            field_size,
            pitch,
        })
    }

    /// Generator configured from placement options.
    ///
    /// # Errors
    ///
    /// Same conditions as [`InstancePlacementGenerator::new`].
    pub fn from_options(options: &PlacementOptions) -> Result<Self, ConfigError> {
        Self::new(
            options.instance_count,
            options.field_size,
            PitchProfile {
                center_deg: options.pitch_center_deg,
                spread_deg: options.pitch_spread_deg,
                min_deg: options.pitch_min_deg,
                max_deg: options.pitch_max_deg,
            },
        )
    }

    /// Number of instances generated.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Edge length of the square field.
    pub fn field_size(&self) -> f32 {
        self.field_size
    }

    /// Draw one pose. Consumes exactly five draws.
    pub fn sample_pose(&self, rng: &mut impl UniformSource) -> BladePose {
        let x = (rng.next_uniform() - 0.5) * self.field_size;
        let z = (rng.next_uniform() - 0.5) * self.field_size;
        let pitch = self.pitch.pitch_deg(rng.next_uniform()).to_radians();
        let yaw = rng.next_uniform() * TAU;
        let roll = rng.next_uniform() * TAU;
        BladePose {
            translation: Vec3::new(x, 0.0, z),
            pitch,
            yaw,
            roll,
        }
    }

    /// Draw every pose in index order.
    pub fn generate_poses(&self, rng: &mut impl UniformSource) -> Vec<BladePose> {
        (0..self.count).map(|_| self.sample_pose(rng)).collect()
    }

    /// Draw the full field as rigid transforms, index `i` holding instance
    /// `i`.
    pub fn generate(&self, rng: &mut impl UniformSource) -> Vec<InstanceTransform> {
        let transforms: Vec<InstanceTransform> = (0..self.count)
            .map(|_| self.sample_pose(rng).transform())
            .collect();
        log::info!(
            "generated {} blades over a {}x{} field",
            transforms.len(),
            self.field_size,
            self.field_size
        );
        transforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::uniform::{SeededUniform, UniformSequence};

    fn default_generator(count: u32) -> InstancePlacementGenerator {
        InstancePlacementGenerator::new(count, 50.0, PitchProfile::default())
            .unwrap()
    }

    /// Elevation of the blade tip direction above the ground plane.
    fn elevation_deg(transform: &InstanceTransform) -> f32 {
        let tip = transform.rotation * Vec3::NEG_Z;
        tip.y.clamp(-1.0, 1.0).asin().to_degrees()
    }

    #[test]
    fn rejects_empty_field() {
        assert_eq!(
            InstancePlacementGenerator::new(0, 50.0, PitchProfile::default()),
            Err(ConfigError::EmptyField)
        );
    }

    #[test]
    fn rejects_bad_field_size() {
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                InstancePlacementGenerator::new(
                    10,
                    size,
                    PitchProfile::default()
                ),
                Err(ConfigError::FieldSize(_))
            ));
        }
    }

    #[test]
    fn rejects_inverted_pitch_range() {
        let pitch = PitchProfile {
            min_deg: 80.0,
            max_deg: 20.0,
            ..PitchProfile::default()
        };
        assert!(matches!(
            InstancePlacementGenerator::new(10, 50.0, pitch),
            Err(ConfigError::PitchRange { .. })
        ));
    }

    #[test]
    fn rejects_oversized_field() {
        assert_eq!(
            InstancePlacementGenerator::new(
                MAX_INSTANCES + 1,
                50.0,
                PitchProfile::default()
            ),
            Err(ConfigError::InstanceBudget(MAX_INSTANCES + 1))
        );
    }

    #[test]
    fn pitch_is_clamped_at_sampler_extremes() {
        let profile = PitchProfile::default();
        assert_eq!(profile.pitch_deg(0.0), 90.0);
        assert_eq!(profile.pitch_deg(1.0), 10.0);
        assert_eq!(profile.pitch_deg(0.5), 90.0);
        assert_eq!(profile.pitch_deg(0.999_999), 10.0);
    }

    #[test]
    fn zero_spread_stays_at_center() {
        let profile = PitchProfile {
            center_deg: 70.0,
            spread_deg: 0.0,
            ..PitchProfile::default()
        };
        assert_eq!(profile.pitch_deg(0.0), 70.0);
        assert_eq!(profile.pitch_deg(0.3), 70.0);
    }

    #[test]
    fn pitch_and_position_bounds_hold() {
        let generator = default_generator(20_000);
        let mut rng = SeededUniform::new(1234);
        for pose in generator.generate_poses(&mut rng) {
            let deg = pose.pitch.to_degrees();
            assert!((10.0 - 1e-3..=90.0 + 1e-3).contains(&deg));
            assert!((-25.0..=25.0).contains(&pose.translation.x));
            assert!((-25.0..=25.0).contains(&pose.translation.z));
            assert_eq!(pose.translation.y, 0.0);
        }
    }

    #[test]
    fn blade_elevation_matches_pitch() {
        let generator = default_generator(2_000);
        let mut rng = SeededUniform::new(99);
        for pose in generator.generate_poses(&mut rng) {
            let elevation = elevation_deg(&pose.transform());
            assert!(
                (elevation - pose.pitch.to_degrees()).abs() < 0.2,
                "elevation {elevation} vs pitch {}",
                pose.pitch.to_degrees()
            );
            assert!((10.0 - 0.2..=90.0 + 0.2).contains(&elevation));
        }
    }

    #[test]
    fn scale_is_unit() {
        let generator = default_generator(100);
        let mut rng = SeededUniform::new(5);
        for t in generator.generate(&mut rng) {
            assert_eq!(t.scale, Vec3::ONE);
            let m = t.to_matrix();
            assert!((m.x_axis.truncate().length() - 1.0).abs() < 1e-5);
            assert!((m.y_axis.truncate().length() - 1.0).abs() < 1e-5);
            assert!((m.z_axis.truncate().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn yaw_and_roll_are_uniform() {
        const BINS: usize = 16;
        const SAMPLES: usize = 32_000;
        let generator = default_generator(SAMPLES as u32);
        let mut rng = SeededUniform::new(2024);
        let poses = generator.generate_poses(&mut rng);

        let chi_squared = |angles: &mut dyn Iterator<Item = f32>| -> f32 {
            let mut counts = [0usize; BINS];
            for a in angles {
                assert!((0.0..TAU).contains(&a));
                let bin = ((a / TAU) * BINS as f32) as usize;
                counts[bin.min(BINS - 1)] += 1;
            }
            let expected = SAMPLES as f32 / BINS as f32;
            counts
                .iter()
                .map(|&c| {
                    let d = c as f32 - expected;
                    d * d / expected
                })
                .sum()
        };

        // 15 degrees of freedom; 42.6 is the 0.0001 critical value.
        let yaw = chi_squared(&mut poses.iter().map(|p| p.yaw));
        let roll = chi_squared(&mut poses.iter().map(|p| p.roll));
        assert!(yaw < 42.6, "yaw chi-squared {yaw}");
        assert!(roll < 42.6, "roll chi-squared {roll}");
    }

    #[test]
    fn pitch_concentrates_near_upright() {
        let generator = default_generator(10_000);
        let mut rng = SeededUniform::new(3);
        let poses = generator.generate_poses(&mut rng);
        let upright = poses
            .iter()
            .filter(|p| p.pitch.to_degrees() >= 80.0)
            .count();
        // Pitch >= 80 whenever the draw is below ~0.58.
        assert!(upright > poses.len() / 2);
    }

    #[test]
    fn replayed_draws_give_known_transforms() {
        let generator = default_generator(3);
        let draws = vec![0.1, 0.5, 0.9, 0.5, 0.5, 0.5];
        let poses =
            generator.generate_poses(&mut UniformSequence::new(draws.clone()));

        let first = poses[0];
        assert!((first.translation.x - -20.0).abs() < 1e-4);
        assert_eq!(first.translation.z, 0.0);
        // 0.9 -> s = 0.8 / 0.6 -> 90 - 40 = 50 degrees
        assert!((first.pitch.to_degrees() - 50.0).abs() < 1e-3);
        assert!((first.yaw - std::f32::consts::PI).abs() < 1e-6);
        assert!((first.roll - std::f32::consts::PI).abs() < 1e-6);

        let again =
            generator.generate(&mut UniformSequence::new(draws.clone()));
        let once_more = generator.generate(&mut UniformSequence::new(draws));
        assert_eq!(again, once_more);
        assert_eq!(again[0], first.transform());
    }

    #[test]
    fn same_seed_same_field() {
        let generator = default_generator(500);
        let a = generator.generate(&mut SeededUniform::new(77));
        let b = generator.generate(&mut SeededUniform::new(77));
        let c = generator.generate(&mut SeededUniform::new(78));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
