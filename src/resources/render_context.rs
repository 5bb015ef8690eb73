use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::resources::camera::CameraRig;
use crate::resources::config::FieldConfig;
use crate::resources::instability::InstabilityController;

/// Compteurs de la dernière frame rendue
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub drawn_particles: usize,
    pub proximity_edges: usize,
    pub structural_edges: usize,
    pub spikes: u64,
}

/// État de rendu global d'un montage : instabilité, caméra, compteurs et générateur aléatoire
#[derive(Resource, Debug, Clone)]
pub struct RenderContext {
    pub instability: InstabilityController,
    pub camera: CameraRig,
    /// Compteur de frames qui fait glisser la fenêtre des arcs neuronaux
    pub pulse: u64,
    pub rng: StdRng,
    pub stats: FrameStats,
}

impl RenderContext {
    pub fn new(config: &FieldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            instability: InstabilityController::new(&config.instability),
            camera: CameraRig::new(&config.camera),
            pulse: 0,
            rng,
            stats: FrameStats::default(),
        }
    }
}
