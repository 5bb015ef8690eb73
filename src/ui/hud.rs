use std::path::Path;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::globals::CONFIG_PATH;
use crate::resources::capability::LastVerdict;
use crate::resources::config::FieldConfig;
use crate::resources::render_context::RenderContext;
use crate::states::field::FieldState;

/// Visibilité du HUD de développement
#[derive(Resource, Default)]
pub struct HudState {
    pub visible: bool,
}

/// F1 : affiche ou masque le HUD
pub fn toggle_hud(keyboard: Res<ButtonInput<KeyCode>>, mut hud: ResMut<HudState>) {
    if keyboard.just_pressed(KeyCode::F1) {
        hud.visible = !hud.visible;
    }
}

pub fn field_hud(
    mut contexts: EguiContexts,
    state: Res<State<FieldState>>,
    verdict: Option<Res<LastVerdict>>,
    mut config: ResMut<FieldConfig>,
    context: Option<ResMut<RenderContext>>,
) {
    let ctx = contexts.ctx_mut();

    egui::Window::new("Noyau neuronal")
        .default_width(260.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("État: {:?}", state.get()));
            if let Some(verdict) = &verdict {
                ui.label(format!("Sonde: {:?}", verdict.0));
            }

            let Some(mut context) = context else {
                ui.separator();
                ui.label("Champ démonté (Espace pour monter)");
                return;
            };

            ui.separator();
            ui.heading("Instabilité");
            let instability = context.instability.value();
            ui.add(egui::ProgressBar::new(instability).text(format!("{:.3}", instability)));
            ui.label(format!("Pics: {}", context.stats.spikes));
            ui.horizontal(|ui| {
                if ui.button("⚡ Déstabiliser").clicked() {
                    context.instability.destabilize();
                }
                if ui.button("Calmer").clicked() {
                    context.instability.reset();
                }
            });

            ui.separator();
            ui.heading("Caméra");
            ui.label(format!(
                "Lacet {:.3} → {:.3}",
                context.camera.yaw, context.camera.target_yaw
            ));
            ui.label(format!(
                "Tangage {:.3} → {:.3}",
                context.camera.pitch, context.camera.target_pitch
            ));
            let mut smoothing = context.camera.smoothing;
            if ui
                .add(egui::Slider::new(&mut smoothing, 0.005..=0.2).text("Lissage"))
                .changed()
            {
                context.camera.smoothing = smoothing;
                config.camera.smoothing = smoothing;
            }

            ui.separator();
            ui.heading("Frame");
            ui.label(format!("Pulse: {}", context.pulse));
            ui.label(format!("Particules dessinées: {}", context.stats.drawn_particles));
            ui.label(format!("Arcs du noyau: {}", context.stats.proximity_edges));
            ui.label(format!("Liens structurels: {}", context.stats.structural_edges));

            ui.separator();
            if ui.button("💾 Sauvegarder la configuration").clicked() {
                match config.save_to(Path::new(CONFIG_PATH)) {
                    Ok(()) => info!("Configuration sauvegardée dans {}", CONFIG_PATH),
                    Err(e) => error!("Erreur lors de la sauvegarde: {}", e),
                }
            }
        });
}
