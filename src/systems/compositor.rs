use bevy::prelude::*;

use crate::components::particle::Layer;
use crate::resources::config::FieldConfig;
use crate::resources::connections::ConnectionGraph;
use crate::resources::field::ParticleField;
use crate::resources::surface::Surface;
use crate::resources::viewport::Viewport;

const ARC_WIDTH: f32 = 0.5;
const SPOKE_WIDTH: f32 = 0.6;
const WEB_WIDTH: f32 = 0.6;
const FEATURE_RING_SCALE: f32 = 2.5;
const FEATURE_RING_WIDTH: f32 = 1.5;
const FEATURE_GLOW_BLUR: f32 = 15.0;
const FOREGROUND_GLOW_BLUR: f32 = 10.0;
const MARKER_SIZE: f32 = 2.0;

/// Dessine une frame complète sur la surface.
/// Retourne le nombre de particules effectivement dessinées.
pub fn composite(
    surface: &mut Surface,
    field: &ParticleField,
    graph: &ConnectionGraph,
    viewport: &Viewport,
    config: &FieldConfig,
) -> usize {
    let palette = &config.palette;
    let silver = palette.silver;
    let slate = palette.slate;
    let white = palette.highlight;
    let min_alpha = config.render.min_render_alpha;
    let particles = field.particles();

    // 1. Traînée
    surface.fade(config.render.trail_fade_alpha);

    // 2. Arcs neuronaux du noyau
    for edge in &graph.proximity {
        if edge.alpha <= min_alpha {
            continue;
        }
        let a = particles[edge.a].projected.screen;
        let b = particles[edge.b].projected.screen;
        surface.line(a, b, ARC_WIDTH, silver, edge.alpha);
    }

    // 3. Rayons et anneau des nœuds FEATURE
    let center = viewport.center();
    let peak = config.connections.spoke_peak_stop;
    for spoke in &graph.spokes {
        if spoke.opacity <= min_alpha {
            continue;
        }
        let node = particles[spoke.node].projected.screen;
        let stops = [(0.0, 0.0), (peak, spoke.opacity), (1.0, 0.0)];
        surface.gradient_line(center, node, SPOKE_WIDTH, silver, &stops);
    }
    for edge in &graph.web {
        if edge.alpha <= min_alpha {
            continue;
        }
        let a = particles[edge.a].projected.screen;
        let b = particles[edge.b].projected.screen;
        surface.line(a, b, WEB_WIDTH, slate, edge.alpha);
    }

    // 4. Particules, de la plus lointaine à la plus proche
    let mut drawn = 0;
    for &index in field.draw_order() {
        let particle = &particles[index];
        let projected = &particle.projected;
        if projected.alpha <= min_alpha {
            continue;
        }

        let color = particle.color;
        let position = projected.screen;
        let alpha = projected.alpha;

        match particle.layer() {
            Layer::Feature => {
                surface.stroke_circle(
                    position,
                    particle.size * FEATURE_RING_SCALE,
                    FEATURE_RING_WIDTH,
                    silver,
                    alpha * 0.8,
                );
                surface.glow(position, particle.size, FEATURE_GLOW_BLUR, silver, alpha);
                surface.fill_circle(position, particle.size, color, alpha);
                surface.fill_rect(
                    position + Vec2::new(particle.size * 3.0, -1.0),
                    Vec2::splat(MARKER_SIZE),
                    white,
                    alpha,
                );
            }
            Layer::Foreground => {
                surface.fill_circle(position, particle.size, color, alpha);
                surface.glow(position, particle.size, FOREGROUND_GLOW_BLUR, color, 0.5 * alpha);
                surface.fill_circle(position, particle.size, color, alpha);
            }
            Layer::Core | Layer::Background => {
                surface.fill_circle(position, particle.size, color, alpha);
            }
        }
        drawn += 1;
    }

    drawn
}
