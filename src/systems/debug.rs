use bevy::prelude::*;

use crate::resources::render_context::RenderContext;

pub fn log_field_stats(time: Res<Time>, mut timer: Local<Timer>, context: Res<RenderContext>) {
    // Initialiser le timer la première fois
    if timer.duration() == std::time::Duration::ZERO {
        *timer = Timer::from_seconds(5.0, TimerMode::Repeating);
    }

    timer.tick(time.delta());

    if timer.just_finished() {
        let stats = &context.stats;
        info!("=== Champ neuronal ===");
        info!(
            "Instabilité {:.3} | pulse {} | {} pics",
            context.instability.value(),
            context.pulse,
            stats.spikes
        );
        info!(
            "{} particules dessinées, {} arcs, {} liens structurels",
            stats.drawn_particles, stats.proximity_edges, stats.structural_edges
        );
    }
}
