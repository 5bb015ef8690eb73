use bevy::prelude::*;

use crate::resources::render_context::RenderContext;
use crate::resources::viewport::Viewport;

/// Le pointeur ne modifie que les angles cibles de la caméra
pub fn track_pointer(
    mut cursor_events: EventReader<CursorMoved>,
    viewport: Res<Viewport>,
    mut context: ResMut<RenderContext>,
) {
    let Some(event) = cursor_events.read().last() else {
        return;
    };
    context.camera.aim_at_pointer(viewport.normalize(event.position));
}
