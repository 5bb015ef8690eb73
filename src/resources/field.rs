use bevy::prelude::*;
use rand::Rng;

use crate::components::particle::{Layer, LayerBounds, Particle};
use crate::resources::config::{FieldConfig, InstabilityConfig};
use crate::resources::projection::Projector;

/// Ensemble de taille fixe des particules d'un montage, stocké de façon contiguë.
///
/// `particles` reste dans l'ordre des indices ; `draw_order` contient les indices
/// triés du plus lointain au plus proche après chaque projection.
#[derive(Resource, Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    draw_order: Vec<usize>,
}

impl ParticleField {
    pub fn new(config: &FieldConfig, rng: &mut impl Rng) -> Result<Self, String> {
        config.validate()?;

        let bounds = LayerBounds::from_config(config);
        let particles: Vec<Particle> = (0..config.particle_count)
            .map(|index| Particle::spawn(index, &bounds, config, rng))
            .collect();
        let draw_order = (0..particles.len()).collect();

        Ok(Self {
            particles,
            draw_order,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Indices des particules, du plus lointain au plus proche
    pub fn draw_order(&self) -> &[usize] {
        &self.draw_order
    }

    pub fn layer_count(&self, layer: Layer) -> usize {
        self.particles.iter().filter(|p| p.layer() == layer).count()
    }

    pub fn update(&mut self, instability: f32, time_ms: f64, tuning: &InstabilityConfig) {
        for particle in self.particles.iter_mut() {
            particle.update(instability, time_ms, tuning);
        }
    }

    pub fn project(&mut self, projector: &Projector) {
        for particle in self.particles.iter_mut() {
            particle.projected = projector.project(particle.position, particle.layer());
        }
    }

    /// Trie `draw_order` par profondeur décroissante.
    /// En cas d'égalité, l'indice le plus petit passe en premier.
    pub fn sort_by_depth(&mut self) {
        let particles = &self.particles;
        self.draw_order.sort_unstable_by(|&a, &b| {
            particles[b]
                .projected
                .depth
                .total_cmp(&particles[a].projected.depth)
                .then(a.cmp(&b))
        });
    }
}
