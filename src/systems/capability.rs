use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::resources::capability::{DeviceProfile, LastVerdict, ProbeVerdict};
use crate::resources::config::FieldConfig;
use crate::states::field::FieldState;

/// Sonde de capacités : décide si le champ est monté
pub fn probe_capabilities(
    mut commands: Commands,
    config: Res<FieldConfig>,
    window: Option<Single<&Window, With<PrimaryWindow>>>,
    mut next_state: ResMut<NextState<FieldState>>,
) {
    let Some(window) = window else {
        warn!("Aucune fenêtre principale, le champ reste démonté");
        commands.insert_resource(LastVerdict(ProbeVerdict::NarrowViewport));
        next_state.set(FieldState::Disabled);
        return;
    };

    let profile = DeviceProfile::detect(window.width(), &config.probe);
    let verdict = ProbeVerdict::evaluate(&profile, &config.probe);
    commands.insert_resource(LastVerdict(verdict));

    if verdict.allows_mount() {
        info!(
            "✅ Sonde OK ({}px, {} cœurs), montage du champ",
            profile.viewport_width, profile.cpu_cores
        );
        next_state.set(FieldState::Running);
    } else {
        info!("Champ non monté: {:?} ({:?})", verdict, profile);
        next_state.set(FieldState::Disabled);
    }
}

/// Relance la sonde quand une fenêtre trop étroite est agrandie
pub fn reprobe_on_resize(
    mut resize_events: EventReader<WindowResized>,
    verdict: Option<Res<LastVerdict>>,
    mut next_state: ResMut<NextState<FieldState>>,
) {
    if resize_events.is_empty() {
        return;
    }
    resize_events.clear();

    if let Some(verdict) = verdict {
        if verdict.0 == ProbeVerdict::NarrowViewport {
            next_state.set(FieldState::Probing);
        }
    }
}

/// Pendant le rendu, un redimensionnement relance la sonde avec la nouvelle largeur
/// et démonte le champ si elle refuse
pub fn recheck_on_resize(
    mut commands: Commands,
    config: Res<FieldConfig>,
    mut resize_events: EventReader<WindowResized>,
    mut next_state: ResMut<NextState<FieldState>>,
) {
    let Some(event) = resize_events.read().last() else {
        return;
    };

    let profile = DeviceProfile::detect(event.width, &config.probe);
    let verdict = ProbeVerdict::evaluate(&profile, &config.probe);
    if verdict.allows_mount() {
        return;
    }

    info!("Champ démonté après redimensionnement: {:?} ({}px)", verdict, event.width);
    commands.insert_resource(LastVerdict(verdict));
    next_state.set(FieldState::Disabled);
}
