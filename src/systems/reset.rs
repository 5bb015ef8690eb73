use bevy::prelude::*;

use crate::components::canvas::FieldCanvas;
use crate::resources::connections::ConnectionGraph;
use crate::resources::field::ParticleField;
use crate::resources::render_context::RenderContext;
use crate::resources::surface::Surface;
use crate::states::field::FieldState;

/// Démonte le champ : le sprite, la texture et tout l'état de rendu sont libérés
pub fn teardown_field(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    canvas: Query<(Entity, &Sprite), With<FieldCanvas>>,
) {
    for (entity, sprite) in canvas.iter() {
        images.remove(&sprite.image);
        commands.entity(entity).despawn();
    }

    commands.remove_resource::<RenderContext>();
    commands.remove_resource::<ParticleField>();
    commands.remove_resource::<ConnectionGraph>();
    commands.remove_resource::<Surface>();

    info!("Champ démonté");
}

/// Espace : monte ou démonte le champ
pub fn toggle_mount(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<FieldState>>,
    mut next_state: ResMut<NextState<FieldState>>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }

    match state.get() {
        FieldState::Running => next_state.set(FieldState::Disabled),
        FieldState::Disabled => next_state.set(FieldState::Probing),
        FieldState::Probing => {}
    }
}
