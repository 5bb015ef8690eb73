use bevy::prelude::*;
use bevy::render::render_resource::Extent3d;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::components::canvas::FieldCanvas;
use crate::resources::surface::Surface;
use crate::resources::viewport::Viewport;

/// Suit les redimensionnements : viewport, surface, texture et sprite.
/// Les particules ne sont pas touchées.
pub fn track_resize(
    mut resize_events: EventReader<WindowResized>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
    mut surface: ResMut<Surface>,
    mut images: ResMut<Assets<Image>>,
    mut canvas: Query<&mut Sprite, With<FieldCanvas>>,
) {
    let Some(event) = resize_events.read().last() else {
        return;
    };

    let resized = Viewport::new(event.width, event.height, window.scale_factor());
    if resized == *viewport {
        return;
    }
    *viewport = resized;
    if let Err(e) = surface.resize(&viewport) {
        warn!("Redimensionnement de la surface impossible: {}", e);
        return;
    }

    let Ok(mut sprite) = canvas.single_mut() else {
        warn!("Sprite du champ introuvable au redimensionnement");
        return;
    };
    sprite.custom_size = Some(viewport.size());

    let Some(image) = images.get_mut(&sprite.image) else {
        warn!("Texture du champ introuvable au redimensionnement");
        return;
    };
    let size = viewport.physical_size();
    image.resize(Extent3d {
        width: size.x,
        height: size.y,
        depth_or_array_layers: 1,
    });

    debug!(
        "Viewport redimensionné: {}x{} (x{})",
        viewport.width, viewport.height, viewport.scale_factor
    );
}
