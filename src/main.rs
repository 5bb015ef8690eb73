use bevy::diagnostic::{FrameCount, FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::PresentMode;

mod components;
mod globals;
mod plugins;
mod resources;
mod states;
mod systems;
mod ui;

use crate::globals::WINDOW_REVEAL_FRAME;
use crate::plugins::camera::CameraPlugin;
use crate::plugins::ui::UIPlugin;
use crate::resources::config::FieldConfig;
use plugins::{field::FieldPlugin, setup::SetupPlugin};

fn main() {
    let config = match FieldConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Erreur lors du chargement de la configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Configuration invalide: {}", e);
        std::process::exit(1);
    }

    App::new()
        // Plugins Bevy de base
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Neuro core".into(),
                    resolution: (1600., 900.).into(),
                    present_mode: PresentMode::AutoVsync,
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    visible: false,
                    ..default()
                }),
                ..default()
            }),
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
        ))
        .insert_resource(config)
        .add_plugins((SetupPlugin, FieldPlugin, CameraPlugin, UIPlugin))
        .add_systems(Update, (reveal_window, quit_on_escape))
        .run();
}

/// La fenêtre reste cachée le temps que la première surface soit envoyée
fn reveal_window(mut window: Single<&mut Window>, frames: Res<FrameCount>) {
    if frames.0 == WINDOW_REVEAL_FRAME && !window.visible {
        window.visible = true;
    }
}

fn quit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Fermeture demandée");
        exit.write(AppExit::Success);
    }
}
