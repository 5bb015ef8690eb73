use bevy::prelude::*;

use crate::components::canvas::FieldCanvas;
use crate::resources::config::FieldConfig;
use crate::resources::connections::ConnectionGraph;
use crate::resources::field::ParticleField;
use crate::resources::projection::Projector;
use crate::resources::render_context::RenderContext;
use crate::resources::surface::Surface;
use crate::resources::viewport::Viewport;
use crate::systems::compositor::composite;

/// Exécute une frame complète : instabilité, caméra, mouvement, projection,
/// tri en profondeur, connexions puis composition sur la surface.
pub fn advance_frame(
    context: &mut RenderContext,
    field: &mut ParticleField,
    graph: &mut ConnectionGraph,
    surface: &mut Surface,
    viewport: &Viewport,
    config: &FieldConfig,
    time_ms: f64,
) {
    if context.instability.step(&mut context.rng) {
        context.stats.spikes += 1;
        debug!("Déstabilisation déclenchée (pulse {})", context.pulse);
    }
    context.pulse = context.pulse.wrapping_add(1);
    context.camera.smooth();

    let instability = context.instability.value();
    let pitch = context.camera.pitch + context.instability.tilt(time_ms);
    let projector = Projector::new(context.camera.yaw, pitch, viewport.center(), &config.camera);

    field.update(instability, time_ms, &config.instability);
    field.project(&projector);
    field.sort_by_depth();

    graph.rebuild(
        field.particles(),
        field.draw_order(),
        context.pulse,
        viewport,
        &config.connections,
    );

    let drawn = composite(surface, field, graph, viewport, config);

    context.stats.drawn_particles = drawn;
    context.stats.proximity_edges = graph.proximity.len();
    context.stats.structural_edges = graph.spokes.len() + graph.web.len();
}

/// Système principal appelé une fois par frame tant que le champ est monté
pub fn render_frame(
    time: Res<Time>,
    config: Res<FieldConfig>,
    viewport: Res<Viewport>,
    mut context: ResMut<RenderContext>,
    mut field: ResMut<ParticleField>,
    mut graph: ResMut<ConnectionGraph>,
    mut surface: ResMut<Surface>,
) {
    let time_ms = time.elapsed_secs_f64() * 1000.0;
    advance_frame(
        &mut context,
        &mut field,
        &mut graph,
        &mut surface,
        &viewport,
        &config,
        time_ms,
    );
}

/// Copie la surface dans la texture affichée par le sprite
pub fn upload_frame(
    surface: Res<Surface>,
    mut images: ResMut<Assets<Image>>,
    canvas: Query<&Sprite, With<FieldCanvas>>,
) {
    let Ok(sprite) = canvas.single() else {
        return;
    };
    let Some(image) = images.get_mut(&sprite.image) else {
        warn!("Texture du champ introuvable");
        return;
    };

    let bytes = surface.data();
    let Some(data) = image.data.as_mut() else {
        return;
    };
    if data.len() != bytes.len() {
        warn!(
            "Taille de texture inattendue: {} octets au lieu de {}",
            data.len(),
            bytes.len()
        );
        return;
    }
    data.copy_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        config: FieldConfig,
        viewport: Viewport,
        context: RenderContext,
        field: ParticleField,
        graph: ConnectionGraph,
        surface: Surface,
    }

    impl Harness {
        fn new(config: FieldConfig) -> Self {
            let viewport = Viewport::new(320.0, 200.0, 1.0);
            let mut context = RenderContext::new(&config);
            let field = ParticleField::new(&config, &mut context.rng).unwrap();
            let surface = Surface::new(&viewport, config.palette.background).unwrap();
            Self {
                config,
                viewport,
                context,
                field,
                graph: ConnectionGraph::default(),
                surface,
            }
        }

        fn run(&mut self, frames: usize) {
            for frame in 0..frames {
                advance_frame(
                    &mut self.context,
                    &mut self.field,
                    &mut self.graph,
                    &mut self.surface,
                    &self.viewport,
                    &self.config,
                    frame as f64 * 16.67,
                );
            }
        }
    }

    fn seeded(config: FieldConfig) -> FieldConfig {
        FieldConfig {
            seed: Some(99),
            ..config
        }
    }

    #[test]
    fn frames_draw_particles_and_edges() {
        let mut harness = Harness::new(seeded(FieldConfig::default()));
        harness.run(30);

        let stats = harness.context.stats;
        assert_eq!(harness.context.pulse, 30);
        assert!(stats.drawn_particles > 0);
        assert_eq!(stats.structural_edges, 8 + 16);

        let background = harness.config.palette.background;
        let surface = &harness.surface;
        let lit = (0..surface.height())
            .flat_map(|y| (0..surface.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) != Some(background))
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn same_seed_renders_same_frames() {
        let mut a = Harness::new(seeded(FieldConfig::default()));
        let mut b = Harness::new(seeded(FieldConfig::default()));
        a.run(20);
        b.run(20);

        assert_eq!(a.field.particles(), b.field.particles());
        assert_eq!(a.surface.data(), b.surface.data());
    }

    #[test]
    fn tiny_field_without_core_keeps_running() {
        let config = seeded(FieldConfig {
            particle_count: 8,
            ..Default::default()
        });
        let mut harness = Harness::new(config);
        harness.run(10);

        assert_eq!(harness.context.stats.proximity_edges, 0);
    }

    #[test]
    fn pointer_target_is_followed_across_frames() {
        let mut harness = Harness::new(seeded(FieldConfig::default()));
        harness.context.camera.aim_at_pointer(Vec2::new(1.0, 0.5));
        harness.run(300);

        let camera = &harness.context.camera;
        assert!((camera.yaw - camera.target_yaw).abs() < 1e-3);
    }
}
