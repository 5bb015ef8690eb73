use bevy::prelude::*;

use crate::resources::config::CameraConfig;

/// Point de vue unique piloté par le pointeur.
/// Les angles courants suivent les angles cibles par interpolation exponentielle.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub smoothing: f32,
    yaw_range: f32,
    pitch_range: f32,
    base_pitch: f32,
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: config.base_pitch,
            target_yaw: 0.0,
            target_pitch: config.base_pitch,
            smoothing: config.smoothing,
            yaw_range: config.yaw_range,
            pitch_range: config.pitch_range,
            base_pitch: config.base_pitch,
        }
    }

    /// Oriente la cible d'après la position normalisée du pointeur (0..1 sur chaque axe)
    pub fn aim_at_pointer(&mut self, normalized: Vec2) {
        if !normalized.is_finite() {
            return;
        }
        self.target_yaw = (normalized.x - 0.5) * self.yaw_range;
        self.target_pitch = (normalized.y - 0.5) * self.pitch_range + self.base_pitch;
    }

    /// Rapproche les angles courants de la cible
    pub fn smooth(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * self.smoothing;
        self.pitch += (self.target_pitch - self.pitch) * self.smoothing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_at_center_targets_base_pitch() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        rig.aim_at_pointer(Vec2::new(0.5, 0.5));

        assert_eq!(rig.target_yaw, 0.0);
        assert_eq!(rig.target_pitch, config.base_pitch);
    }

    #[test]
    fn pointer_at_corner_reaches_ranges() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        rig.aim_at_pointer(Vec2::new(1.0, 0.0));

        assert!((rig.target_yaw - config.yaw_range * 0.5).abs() < 1e-6);
        assert!((rig.target_pitch - (config.base_pitch - config.pitch_range * 0.5)).abs() < 1e-6);
    }

    #[test]
    fn pointer_input_leaves_current_angles() {
        let mut rig = CameraRig::new(&CameraConfig::default());
        let (yaw, pitch) = (rig.yaw, rig.pitch);
        rig.aim_at_pointer(Vec2::new(0.9, 0.1));

        assert_eq!((rig.yaw, rig.pitch), (yaw, pitch));
    }

    #[test]
    fn smoothing_converges_exponentially() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        rig.pitch = 0.5;
        rig.target_pitch = 0.0;
        rig.target_yaw = 0.0;

        for _ in 0..200 {
            rig.smooth();
        }
        let expected = 0.5 * (1.0 - config.smoothing).powi(200);
        assert!((rig.pitch - expected).abs() < 1e-5);
        assert!(rig.pitch.abs() < 1.2e-3);
        assert_eq!(rig.yaw, 0.0);

        for _ in 0..50 {
            rig.smooth();
        }
        assert!(rig.pitch.abs() < 1e-3);
    }
}
