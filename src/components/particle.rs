use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::globals::*;
use crate::resources::config::{FieldConfig, InstabilityConfig, Rgb};

/// Couche de profondeur d'une particule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Nœuds d'ancrage stables (liens vers le contenu)
    Feature,
    /// Champ lointain et calme
    Background,
    /// Noyau neuronal en spirale
    Core,
    /// Signaux rapides au premier plan
    Foreground,
}

/// Bornes d'indices de chaque couche, fixées pour toute la durée d'un montage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerBounds {
    pub feature_end: usize,
    pub background_end: usize,
    pub core_end: usize,
    pub count: usize,
}

impl LayerBounds {
    pub fn new(count: usize, feature_count: usize, background_percent: usize, core_percent: usize) -> Self {
        let feature_end = feature_count.min(count);
        let background_end = (count * background_percent / 100).clamp(feature_end, count);
        let core_end = (count * (background_percent + core_percent) / 100).clamp(background_end, count);

        Self {
            feature_end,
            background_end,
            core_end,
            count,
        }
    }

    pub fn from_config(config: &FieldConfig) -> Self {
        Self::new(
            config.particle_count,
            config.feature_count,
            config.background_percent,
            config.core_percent,
        )
    }

    pub fn layer_of(&self, index: usize) -> Layer {
        if index < self.feature_end {
            Layer::Feature
        } else if index < self.background_end {
            Layer::Background
        } else if index < self.core_end {
            Layer::Core
        } else {
            Layer::Foreground
        }
    }
}

/// Paramètres de mouvement propres à chaque couche
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Feature { base_radius: f32, speed: f32 },
    Background { base_radius: f32, speed: f32, spin: f32 },
    Core { base_radius: f32, speed: f32 },
    Foreground { base_radius: f32, speed: f32 },
}

impl Motion {
    pub fn layer(&self) -> Layer {
        match self {
            Motion::Feature { .. } => Layer::Feature,
            Motion::Background { .. } => Layer::Background,
            Motion::Core { .. } => Layer::Core,
            Motion::Foreground { .. } => Layer::Foreground,
        }
    }

    pub fn base_radius(&self) -> f32 {
        match *self {
            Motion::Feature { base_radius, .. }
            | Motion::Background { base_radius, .. }
            | Motion::Core { base_radius, .. }
            | Motion::Foreground { base_radius, .. } => base_radius,
        }
    }

    pub fn speed(&self) -> f32 {
        match *self {
            Motion::Feature { speed, .. }
            | Motion::Background { speed, .. }
            | Motion::Core { speed, .. }
            | Motion::Foreground { speed, .. } => speed,
        }
    }
}

/// Résultat de la projection d'une particule pour la frame courante
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projected {
    pub screen: Vec2,
    /// z après rotation (plus grand = plus loin)
    pub depth: f32,
    pub perspective: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    index: usize,
    motion: Motion,
    pub angle: f32,
    pub position: Vec3,
    /// Rayon orbital courant (après contraction pour le noyau)
    radius: f32,
    pub size: f32,
    pub color: Rgb,
    pub projected: Projected,
}

impl Particle {
    /// Crée une particule et tire ses paramètres selon sa couche
    pub fn spawn(index: usize, bounds: &LayerBounds, config: &FieldConfig, rng: &mut impl Rng) -> Self {
        let palette = &config.palette;
        let layer = bounds.layer_of(index);

        let (motion, angle, position, size, color) = match layer {
            Layer::Feature => {
                let r = FEATURE_RADIUS_MIN + rng.random::<f32>() * FEATURE_RADIUS_SPREAD;
                // Angles répartis uniformément pour structurer l'anneau
                let angle = index as f32 / bounds.feature_end.max(1) as f32 * TAU;
                let position = Vec3::new(
                    angle.cos() * r,
                    (rng.random::<f32>() - 0.5) * 60.0,
                    angle.sin() * r,
                );
                (
                    Motion::Feature { base_radius: r, speed: FEATURE_SPEED },
                    angle,
                    position,
                    FEATURE_SIZE,
                    palette.highlight,
                )
            }
            Layer::Background => {
                let r = BACKGROUND_RADIUS_MIN + rng.random::<f32>() * BACKGROUND_RADIUS_SPREAD;
                let position = Vec3::new(
                    (rng.random::<f32>() - 0.5) * r * 2.0,
                    (rng.random::<f32>() - 0.5) * r * 2.0,
                    (rng.random::<f32>() - 0.5) * r * 2.0,
                );
                (
                    Motion::Background {
                        base_radius: r,
                        speed: BACKGROUND_SPEED,
                        spin: BACKGROUND_SPIN,
                    },
                    rng.random::<f32>() * TAU,
                    position,
                    rng.random::<f32>() * 1.5,
                    palette.steel,
                )
            }
            Layer::Core => {
                // Spirale : l'angle avance d'un pas fixe par indice
                let angle = index as f32 * CORE_SPIRAL_STEP;
                let r = CORE_RADIUS_MIN + index as f32 * CORE_RADIUS_STEP;
                let position = Vec3::new(
                    angle.cos() * r,
                    (rng.random::<f32>() - 0.5) * 45.0,
                    angle.sin() * r,
                );
                let speed = CORE_SPEED_MIN + rng.random::<f32>() * CORE_SPEED_MIN;
                let size = rng.random::<f32>() * 1.5 + 0.5;
                let draw = rng.random::<f32>();
                let color = if draw > 0.85 {
                    palette.highlight
                } else if draw > 0.6 {
                    palette.silver
                } else if draw > 0.4 {
                    palette.slate
                } else {
                    palette.steel
                };
                (Motion::Core { base_radius: r, speed }, angle, position, size, color)
            }
            Layer::Foreground => {
                let r = FOREGROUND_RADIUS_MIN + rng.random::<f32>() * FOREGROUND_RADIUS_MIN;
                let angle = rng.random::<f32>() * TAU;
                let position = Vec3::new(
                    angle.cos() * r,
                    (rng.random::<f32>() - 0.5) * 60.0,
                    angle.sin() * r,
                );
                (
                    Motion::Foreground { base_radius: r, speed: FOREGROUND_SPEED },
                    angle,
                    position,
                    rng.random::<f32>() * 3.0 + 1.0,
                    palette.highlight,
                )
            }
        };

        Self {
            index,
            motion,
            angle,
            position,
            radius: motion.base_radius(),
            size,
            color,
            projected: Projected::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn layer(&self) -> Layer {
        self.motion.layer()
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Avance la particule d'une frame.
    /// `instability` est ramenée dans [0, 1], `time_ms` est le temps écoulé en millisecondes.
    pub fn update(&mut self, instability: f32, time_ms: f64, tuning: &InstabilityConfig) {
        let instability = instability.clamp(0.0, 1.0);
        let entropy = match self.motion {
            Motion::Core { .. } => instability,
            Motion::Foreground { .. } => instability * 2.0,
            _ => 0.0,
        };

        self.angle += self.motion.speed() * (1.0 + entropy);
        let phase = self.index as f64;

        match self.motion {
            Motion::Feature { base_radius, .. } => {
                self.position.x = self.angle.cos() * base_radius;
                self.position.z = self.angle.sin() * base_radius;
                self.position.y = (time_ms * 0.0005 + phase).sin() as f32 * 20.0;
            }
            Motion::Background { spin, .. } => {
                // Le fond tourne comme un repère rigide autour de Y
                let (sin, cos) = spin.sin_cos();
                let (x, z) = (self.position.x, self.position.z);
                self.position.x = x * cos - z * sin;
                self.position.z = x * sin + z * cos;
            }
            Motion::Core { base_radius, .. } => {
                let contraction = (entropy * tuning.max_core_contraction).min(tuning.max_core_contraction);
                self.radius = base_radius * (1.0 - contraction);
                let drift = (time_ms * 0.002 + phase).sin() as f32 * entropy * tuning.drift_amplitude;
                self.position.x = self.angle.cos() * self.radius + drift;
                self.position.z = self.angle.sin() * self.radius;
            }
            Motion::Foreground { base_radius, .. } => {
                self.position.x = self.angle.cos() * base_radius;
                self.position.z = self.angle.sin() * base_radius;
                self.position.y += (time_ms * 0.01 + phase).sin() as f32 * 0.5;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn spawn_all(config: &FieldConfig, seed: u64) -> Vec<Particle> {
        let bounds = LayerBounds::from_config(config);
        let mut rng = StdRng::seed_from_u64(seed);
        (0..config.particle_count)
            .map(|i| Particle::spawn(i, &bounds, config, &mut rng))
            .collect()
    }

    #[test]
    fn layer_bounds_for_six_hundred_particles() {
        let bounds = LayerBounds::new(600, 8, 20, 75);
        assert_eq!(bounds.feature_end, 8);
        assert_eq!(bounds.background_end, 120);
        assert_eq!(bounds.core_end, 570);

        let particles = spawn_all(&FieldConfig::default(), 1);
        let count = |layer| particles.iter().filter(|p| p.layer() == layer).count();
        assert_eq!(count(Layer::Feature), 8);
        assert_eq!(count(Layer::Background), 112);
        assert_eq!(count(Layer::Core), 450);
        assert_eq!(count(Layer::Foreground), 30);

        assert!(particles[..8].iter().all(|p| p.layer() == Layer::Feature));
        assert!(particles[8..120].iter().all(|p| p.layer() == Layer::Background));
        assert!(particles[120..570].iter().all(|p| p.layer() == Layer::Core));
        assert!(particles[570..].iter().all(|p| p.layer() == Layer::Foreground));
    }

    #[test]
    fn small_counts_clamp_boundaries() {
        let bounds = LayerBounds::new(10, 8, 20, 75);
        assert_eq!(bounds.feature_end, 8);
        assert_eq!(bounds.background_end, 8);
        assert_eq!(bounds.core_end, 9);
        assert_eq!(bounds.layer_of(8), Layer::Core);
        assert_eq!(bounds.layer_of(9), Layer::Foreground);
    }

    #[test]
    fn layer_never_changes_across_updates() {
        let config = FieldConfig::default();
        let mut particles = spawn_all(&config, 3);
        let before: Vec<Layer> = particles.iter().map(Particle::layer).collect();

        for frame in 0..500 {
            let instability = (frame % 7) as f32 / 6.0;
            for particle in particles.iter_mut() {
                particle.update(instability, frame as f64 * 16.0, &config.instability);
            }
        }

        let bounds = LayerBounds::from_config(&config);
        for (particle, layer) in particles.iter().zip(before) {
            assert_eq!(particle.layer(), layer);
            assert_eq!(particle.layer(), bounds.layer_of(particle.index()));
        }
    }

    #[test]
    fn core_radius_never_collapses_past_bound() {
        let config = FieldConfig::default();
        let max = config.instability.max_core_contraction;
        let mut particles = spawn_all(&config, 5);

        for instability in [-3.0, 0.0, 0.25, 0.5, 0.99, 1.0, 4.0] {
            for particle in particles.iter_mut().filter(|p| p.layer() == Layer::Core) {
                particle.update(instability, 1234.0, &config.instability);
                let floor = particle.motion().base_radius() * (1.0 - max);
                assert!(particle.radius() >= floor - 1e-3);
                assert!(particle.radius() > 0.0);
            }
        }
    }

    #[test]
    fn feature_nodes_ignore_instability() {
        let config = FieldConfig::default();
        let particles = spawn_all(&config, 9);
        let feature = particles[2].clone();

        let mut calm = feature.clone();
        let mut shaken = feature;
        calm.update(0.0, 5000.0, &config.instability);
        shaken.update(1.0, 5000.0, &config.instability);

        assert_eq!(calm.position, shaken.position);
        assert_eq!(calm.angle, shaken.angle);
    }

    #[test]
    fn background_rotation_keeps_horizontal_distance() {
        let config = FieldConfig::default();
        let mut particles = spawn_all(&config, 11);
        let particle = &mut particles[50];
        assert_eq!(particle.layer(), Layer::Background);

        let before = Vec2::new(particle.position.x, particle.position.z).length();
        let y = particle.position.y;
        for _ in 0..1000 {
            particle.update(1.0, 0.0, &config.instability);
        }
        let after = Vec2::new(particle.position.x, particle.position.z).length();

        assert!((before - after).abs() < 1e-2 * before.max(1.0));
        assert_eq!(particle.position.y, y);
    }

    #[test]
    fn update_is_deterministic() {
        let config = FieldConfig::default();
        let mut a = spawn_all(&config, 21);
        let mut b = a.clone();

        for frame in 0..50 {
            for (pa, pb) in a.iter_mut().zip(b.iter_mut()) {
                pa.update(0.4, frame as f64 * 16.7, &config.instability);
                pb.update(0.4, frame as f64 * 16.7, &config.instability);
            }
        }
        assert_eq!(a, b);
    }
}
