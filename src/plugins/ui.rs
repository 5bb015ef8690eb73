use bevy::prelude::*;
use bevy_egui::{EguiContextPass, EguiPlugin};

use crate::ui::hud::{HudState, field_hud, toggle_hud};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        });
        app.init_resource::<HudState>();

        app.add_systems(Update, toggle_hud);
        app.add_systems(
            EguiContextPass,
            field_hud.run_if(|hud: Res<HudState>| hud.visible),
        );
    }
}
