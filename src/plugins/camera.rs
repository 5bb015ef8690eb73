use bevy::prelude::*;

use crate::states::field::FieldState;
use crate::systems::camera::track_pointer;
use crate::systems::spawning::field_mounted;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
        app.add_systems(
            Update,
            track_pointer
                .run_if(in_state(FieldState::Running))
                .run_if(field_mounted),
        );
    }
}

/// Caméra 2D qui affiche le sprite du champ
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
