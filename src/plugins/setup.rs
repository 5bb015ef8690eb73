use bevy::prelude::*;

use crate::resources::config::FieldConfig;
use crate::resources::viewport::Viewport;

pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldConfig>();
        app.init_resource::<Viewport>();
        app.add_systems(Startup, apply_clear_color);
    }
}

/// Le fond de la fenêtre reprend la couleur de fond de la palette
fn apply_clear_color(mut commands: Commands, config: Res<FieldConfig>) {
    let [r, g, b] = config.palette.background;
    commands.insert_resource(ClearColor(Color::srgb_u8(r, g, b)));
}
