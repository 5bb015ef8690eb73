use bevy::prelude::*;
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point, RadialGradient, Rect, Shader,
    SpreadMode, Stroke, Transform,
};

use crate::resources::config::Rgb;
use crate::resources::viewport::Viewport;

/// Part du halo occupée par le cœur lumineux avant la décroissance
const GLOW_CORE_ALPHA: f32 = 0.6;

fn skia_color(rgb: Rgb, alpha: f32) -> Color {
    let mut color = Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255);
    color.set_alpha(alpha.clamp(0.0, 1.0));
    color
}

fn solid(rgb: Rgb, alpha: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(rgb, alpha));
    paint.anti_alias = true;
    paint
}

/// Surface raster en mémoire, dessinée par le compositeur puis copiée dans la texture.
///
/// Les primitives prennent des coordonnées logiques ; la transformation d'échelle
/// ramène tout en pixels physiques. Le fond est opaque, les octets du pixmap sont donc
/// directement du RGBA8.
#[derive(Resource, Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
    scale: f32,
    background: Rgb,
}

impl Surface {
    pub fn new(viewport: &Viewport, background: Rgb) -> Result<Self, String> {
        let size = viewport.physical_size();
        let pixmap = Pixmap::new(size.x, size.y)
            .ok_or_else(|| format!("Surface impossible à allouer: {}x{}", size.x, size.y))?;

        let mut surface = Self {
            pixmap,
            scale: viewport.scale_factor,
            background,
        };
        surface.pixmap.fill(skia_color(background, 1.0));
        Ok(surface)
    }

    /// Réalloue le pixmap à la taille physique du viewport et efface l'image
    pub fn resize(&mut self, viewport: &Viewport) -> Result<(), String> {
        *self = Self::new(viewport, self.background)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let pixel = self.pixmap.pixel(x, y)?;
        Some([pixel.red(), pixel.green(), pixel.blue()])
    }

    /// Octets RGBA de l'image courante
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    /// Recouvre toute l'image par la couleur de fond à faible opacité (effet de traînée)
    pub fn fade(&mut self, alpha: f32) {
        let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32) else {
            return;
        };
        let paint = solid(self.background, alpha);
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &solid(color, alpha), FillRule::Winding, transform, None);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgb, alpha: f32) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        let stroke = Stroke {
            width: line_width,
            ..Default::default()
        };
        let transform = self.transform();
        self.pixmap
            .stroke_path(&path, &solid(color, alpha), &stroke, transform, None);
    }

    /// Halo radial qui imite le flou d'ombre d'un canvas
    pub fn glow(&mut self, center: Vec2, radius: f32, blur: f32, color: Rgb, alpha: f32) {
        let reach = radius + blur;
        if !(reach > 0.0) || !center.is_finite() {
            return;
        }
        let Some(path) = PathBuilder::from_circle(center.x, center.y, reach) else {
            return;
        };

        let origin = Point::from_xy(center.x, center.y);
        let stops = vec![
            GradientStop::new(0.0, skia_color(color, alpha)),
            GradientStop::new(radius / reach, skia_color(color, alpha * GLOW_CORE_ALPHA)),
            GradientStop::new(1.0, skia_color(color, 0.0)),
        ];
        let Some(shader) = RadialGradient::new(origin, 0.0, origin, reach, stops, SpreadMode::Pad, Transform::identity())
        else {
            return;
        };

        let paint = Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgb, alpha: f32) {
        let Some(rect) = Rect::from_xywh(origin.x, origin.y, size.x, size.y) else {
            return;
        };
        let transform = self.transform();
        self.pixmap.fill_rect(rect, &solid(color, alpha), transform, None);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Rgb, alpha: f32) {
        self.stroke_segment(from, to, line_width, &solid(color, alpha));
    }

    /// Segment dont l'opacité suit des arrêts `(position 0..1, alpha)`, comme un
    /// `addColorStop` de canvas
    pub fn gradient_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Rgb, stops: &[(f32, f32)]) {
        let stops: Vec<GradientStop> = stops
            .iter()
            .map(|&(position, alpha)| GradientStop::new(position, skia_color(color, alpha)))
            .collect();
        let Some(shader) = LinearGradient::new(
            Point::from_xy(from.x, from.y),
            Point::from_xy(to.x, to.y),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };
        // Un dégradé dégénéré retombe sur une couleur unie : rien à tracer
        if matches!(shader, Shader::SolidColor(_)) {
            return;
        }

        let paint = Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };
        self.stroke_segment(from, to, line_width, &paint);
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, line_width: f32, paint: &Paint) {
        if !from.is_finite() || !to.is_finite() {
            return;
        }
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let Some(path) = builder.finish() else {
            return;
        };

        let stroke = Stroke {
            width: line_width,
            ..Default::default()
        };
        let transform = self.transform();
        self.pixmap.stroke_path(&path, paint, &stroke, transform, None);
    }
}
