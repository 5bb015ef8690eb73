use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::PrimaryWindow;

use crate::components::canvas::FieldCanvas;
use crate::resources::config::FieldConfig;
use crate::resources::connections::ConnectionGraph;
use crate::resources::field::ParticleField;
use crate::resources::render_context::RenderContext;
use crate::resources::surface::Surface;
use crate::resources::viewport::Viewport;
use crate::states::field::FieldState;

/// Crée une texture RGBA de la taille physique du viewport, remplie avec la couleur de fond
pub fn canvas_image(viewport: &Viewport, config: &FieldConfig) -> Image {
    let size = viewport.physical_size();
    let [r, g, b] = config.palette.background;
    Image::new_fill(
        Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[r, g, b, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

/// Vrai une fois que `mount_field` a inséré tout l'état de rendu
pub fn field_mounted(
    context: Option<Res<RenderContext>>,
    field: Option<Res<ParticleField>>,
    graph: Option<Res<ConnectionGraph>>,
    surface: Option<Res<Surface>>,
) -> bool {
    context.is_some() && field.is_some() && graph.is_some() && surface.is_some()
}

/// Monte le champ : particules, surface, texture et sprite d'affichage
pub fn mount_field(
    mut commands: Commands,
    config: Res<FieldConfig>,
    window: Option<Single<&Window, With<PrimaryWindow>>>,
    mut images: ResMut<Assets<Image>>,
    mut next_state: ResMut<NextState<FieldState>>,
) {
    let Some(window) = window else {
        warn!("Fenêtre introuvable au montage, le champ reste démonté");
        next_state.set(FieldState::Disabled);
        return;
    };

    let viewport = Viewport::new(window.width(), window.height(), window.scale_factor());
    let mut context = RenderContext::new(&config);
    let field = match ParticleField::new(&config, &mut context.rng) {
        Ok(field) => field,
        Err(e) => {
            error!("Impossible de créer le champ de particules: {}", e);
            next_state.set(FieldState::Disabled);
            return;
        }
    };
    let surface = match Surface::new(&viewport, config.palette.background) {
        Ok(surface) => surface,
        Err(e) => {
            error!("{}", e);
            next_state.set(FieldState::Disabled);
            return;
        }
    };

    let image = images.add(canvas_image(&viewport, &config));
    commands.spawn((
        Sprite {
            image,
            custom_size: Some(viewport.size()),
            ..default()
        },
        FieldCanvas,
    ));

    info!(
        "🧠 Champ monté: {} particules, surface {}x{} (x{})",
        field.len(),
        surface.width(),
        surface.height(),
        viewport.scale_factor
    );

    commands.insert_resource(viewport);
    commands.insert_resource(context);
    commands.insert_resource(field);
    commands.insert_resource(ConnectionGraph::default());
    commands.insert_resource(surface);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_matches_the_physical_viewport() {
        let config = FieldConfig::default();
        let viewport = Viewport::new(640.0, 360.0, 2.0);
        let image = canvas_image(&viewport, &config);
        let surface = Surface::new(&viewport, config.palette.background).unwrap();

        assert_eq!(image.width(), surface.width());
        assert_eq!(image.height(), surface.height());

        let data = image.data.as_ref().map(Vec::len);
        assert_eq!(data, Some((1280 * 720 * 4) as usize));
    }
}
