use bevy::prelude::*;

use crate::components::particle::{Layer, Particle};
use crate::resources::config::ConnectionConfig;
use crate::resources::viewport::Viewport;

/// Arête éphémère entre deux particules (indices dans le champ)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

/// Rayon d'un nœud FEATURE vers le centre de la scène
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spoke {
    pub node: usize,
    pub opacity: f32,
}

/// Graphe de connexions recalculé à chaque frame.
/// Les tampons sont réutilisés d'une frame à l'autre, leur contenu jamais.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConnectionGraph {
    candidates: Vec<usize>,
    features: Vec<usize>,
    pub proximity: Vec<Edge>,
    pub spokes: Vec<Spoke>,
    pub web: Vec<Edge>,
}

impl ConnectionGraph {
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.features.clear();
        self.proximity.clear();
        self.spokes.clear();
        self.web.clear();
    }

    /// Reconstruit toutes les arêtes à partir des positions projetées courantes
    pub fn rebuild(
        &mut self,
        particles: &[Particle],
        draw_order: &[usize],
        pulse: u64,
        viewport: &Viewport,
        config: &ConnectionConfig,
    ) {
        self.clear();
        self.build_proximity(particles, draw_order, pulse, config);
        self.build_structural(particles, viewport, config);
    }

    /// Arcs neuronaux du noyau, limités à une fenêtre glissante de candidats
    fn build_proximity(&mut self, particles: &[Particle], draw_order: &[usize], pulse: u64, config: &ConnectionConfig) {
        self.candidates.extend(draw_order.iter().copied().filter(|&i| {
            let particle = &particles[i];
            particle.layer() == Layer::Core && particle.projected.alpha > config.min_alpha
        }));

        let count = self.candidates.len();
        if count == 0 {
            return;
        }

        let window = config.window.min(count);
        let start = (pulse % count as u64) as usize;
        let max_distance = config.distance;

        for i in 0..window {
            let a = self.candidates[(start + i) % count];
            let pa = &particles[a].projected;
            for j in (i + 1)..window {
                let b = self.candidates[(start + j) % count];
                let pb = &particles[b].projected;

                let distance = pa.screen.distance(pb.screen);
                if distance < max_distance {
                    let alpha = (1.0 - distance / max_distance) * pa.alpha.min(pb.alpha) * config.opacity;
                    self.proximity.push(Edge { a, b, alpha });
                }
            }
        }
    }

    /// Rayons vers le centre et anneau entre nœuds FEATURE consécutifs
    fn build_structural(&mut self, particles: &[Particle], viewport: &Viewport, config: &ConnectionConfig) {
        self.features.extend(
            particles
                .iter()
                .filter(|p| p.layer() == Layer::Feature)
                .map(Particle::index),
        );

        let center = viewport.center();
        let reach = viewport.width.max(viewport.height) * 0.5;
        let count = self.features.len();

        for (i, &node) in self.features.iter().enumerate() {
            let projected = &particles[node].projected;

            let falloff = (1.0 - projected.screen.distance(center) / reach).max(0.0);
            self.spokes.push(Spoke {
                node,
                opacity: falloff * projected.alpha * config.opacity,
            });

            for step in 1..=2 {
                let neighbor = self.features[(i + step) % count];
                if neighbor == node {
                    continue;
                }
                self.web.push(Edge {
                    a: node,
                    b: neighbor,
                    alpha: projected.alpha * config.opacity,
                });
            }
        }
    }
}
