use bevy::prelude::*;

use crate::components::particle::{Layer, Projected};
use crate::resources::config::CameraConfig;

/// Transformation 3D -> 2D pour une orientation de caméra figée
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub yaw: f32,
    pub pitch: f32,
    pub focal_length: f32,
    pub center: Vec2,
    pub depth_alpha_bias: f32,
    pub background_alpha: f32,
}

impl Projector {
    pub fn new(yaw: f32, pitch: f32, center: Vec2, config: &CameraConfig) -> Self {
        Self {
            yaw,
            pitch,
            focal_length: config.focal_length,
            center,
            depth_alpha_bias: config.depth_alpha_bias,
            background_alpha: config.background_alpha,
        }
    }

    /// Rotation autour de X (tangage) puis autour de Y (lacet)
    pub fn rotate(&self, position: Vec3) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();

        let x1 = position.x;
        let y1 = position.y * cos_p - position.z * sin_p;
        let z1 = position.y * sin_p + position.z * cos_p;

        Vec3::new(x1 * cos_y + z1 * sin_y, y1, -x1 * sin_y + z1 * cos_y)
    }

    /// Projette une position. Un point derrière le plan focal donne alpha = 0.
    pub fn project(&self, position: Vec3, layer: Layer) -> Projected {
        let rotated = self.rotate(position);
        let denominator = self.focal_length + rotated.z;
        let perspective = self.focal_length / denominator;

        if !(denominator > 0.0) || !perspective.is_finite() || !rotated.is_finite() {
            return Projected {
                screen: self.center,
                depth: if rotated.z.is_finite() { rotated.z } else { 0.0 },
                perspective: 0.0,
                alpha: 0.0,
            };
        }

        let alpha = match layer {
            Layer::Background => self.background_alpha,
            _ => (perspective - self.depth_alpha_bias).clamp(0.0, 1.0),
        };

        Projected {
            screen: Vec2::new(rotated.x, rotated.y) * perspective + self.center,
            depth: rotated.z,
            perspective,
            alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector(yaw: f32, pitch: f32) -> Projector {
        Projector::new(yaw, pitch, Vec2::new(640.0, 360.0), &CameraConfig::default())
    }

    #[test]
    fn projection_is_idempotent() {
        let p = projector(0.13, 0.52);
        let position = Vec3::new(120.0, -35.0, 410.0);

        let first = p.project(position, Layer::Core);
        let second = p.project(position, Layer::Core);
        assert_eq!(first, second);
    }

    #[test]
    fn origin_lands_on_viewport_center() {
        let projected = projector(0.3, 0.5).project(Vec3::ZERO, Layer::Core);
        assert_eq!(projected.screen, Vec2::new(640.0, 360.0));
        assert_eq!(projected.perspective, 1.0);
        assert!((projected.alpha - 0.6).abs() < 1e-6);
    }

    #[test]
    fn near_points_are_opaque_and_far_points_fade() {
        let p = projector(0.0, 0.0);
        let near = p.project(Vec3::new(0.0, 0.0, -600.0), Layer::Foreground);
        let far = p.project(Vec3::new(0.0, 0.0, 1500.0), Layer::Foreground);

        assert_eq!(near.alpha, 1.0);
        assert_eq!(far.alpha, 0.0);
        assert!(near.depth < far.depth);
    }

    #[test]
    fn behind_focal_plane_is_invisible() {
        let p = projector(0.0, 0.0);
        for z in [-1000.0, -1500.0, -1e30] {
            let projected = p.project(Vec3::new(10.0, 10.0, z), Layer::Background);
            assert_eq!(projected.alpha, 0.0);
            assert_eq!(projected.perspective, 0.0);
            assert!(projected.screen.is_finite());
        }
    }

    #[test]
    fn background_alpha_is_constant() {
        let p = projector(0.2, 0.4);
        let a = p.project(Vec3::new(0.0, 0.0, -300.0), Layer::Background);
        let b = p.project(Vec3::new(500.0, 200.0, 700.0), Layer::Background);
        assert_eq!(a.alpha, CameraConfig::default().background_alpha);
        assert_eq!(a.alpha, b.alpha);
    }

    #[test]
    fn rotation_preserves_length() {
        let p = projector(1.1, -0.7);
        let position = Vec3::new(30.0, -80.0, 200.0);
        assert!((p.rotate(position).length() - position.length()).abs() < 1e-3);
    }
}
