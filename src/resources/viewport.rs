use bevy::prelude::*;

/// Dimensions logiques de la zone de rendu et rapport de pixels de l'écran
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            scale_factor: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            scale_factor: if scale_factor.is_finite() && scale_factor > 0.0 {
                scale_factor
            } else {
                1.0
            },
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Taille physique (pixels réels) de la surface
    pub fn physical_size(&self) -> UVec2 {
        UVec2::new(
            (self.width * self.scale_factor).round().max(1.0) as u32,
            (self.height * self.scale_factor).round().max(1.0) as u32,
        )
    }

    /// Position du pointeur ramenée dans 0..1
    pub fn normalize(&self, position: Vec2) -> Vec2 {
        position / self.size()
    }
}
