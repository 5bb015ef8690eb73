use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::globals::*;

/// Couleur sRGB sur 8 bits par canal
pub type Rgb = [u8; 3];

/// Palette monochrome du noyau
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub silver: Rgb,
    pub slate: Rgb,
    pub steel: Rgb,
    pub highlight: Rgb,
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            silver: [226, 232, 240],
            slate: [148, 163, 184],
            steel: [71, 85, 105],
            highlight: [255, 255, 255],
            background: BACKGROUND_RGB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstabilityConfig {
    pub decay: f32,
    pub threshold: f32,
    pub trigger_probability: f64,
    pub spike: f32,
    pub max_core_contraction: f32,
    pub drift_amplitude: f32,
    pub tilt_wobble: f32,
}

impl Default for InstabilityConfig {
    fn default() -> Self {
        Self {
            decay: INSTABILITY_DECAY,
            threshold: INSTABILITY_THRESHOLD,
            trigger_probability: INSTABILITY_TRIGGER_PROBABILITY,
            spike: INSTABILITY_SPIKE,
            max_core_contraction: MAX_CORE_CONTRACTION,
            drift_amplitude: CORE_DRIFT_AMPLITUDE,
            tilt_wobble: TILT_WOBBLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub focal_length: f32,
    pub smoothing: f32,
    pub yaw_range: f32,
    pub pitch_range: f32,
    pub base_pitch: f32,
    /// Décalage soustrait à la perspective pour obtenir l'alpha
    pub depth_alpha_bias: f32,
    pub background_alpha: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            focal_length: FOCAL_LENGTH,
            smoothing: CAMERA_SMOOTHING,
            yaw_range: YAW_RANGE,
            pitch_range: PITCH_RANGE,
            base_pitch: BASE_PITCH,
            depth_alpha_bias: DEPTH_ALPHA_BIAS,
            background_alpha: BACKGROUND_ALPHA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Distance écran maximale (px logiques) d'un arc neuronal
    pub distance: f32,
    pub window: usize,
    pub min_alpha: f32,
    pub opacity: f32,
    /// Position (0..1) du pic d'opacité le long d'un rayon
    pub spoke_peak_stop: f32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            distance: CONNECTION_DISTANCE,
            window: CONNECTION_WINDOW,
            min_alpha: CONNECTION_MIN_ALPHA,
            opacity: CONNECTION_OPACITY,
            spoke_peak_stop: SPOKE_PEAK_STOP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub trail_fade_alpha: f32,
    pub min_render_alpha: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            trail_fade_alpha: TRAIL_FADE_ALPHA,
            min_render_alpha: MIN_RENDER_ALPHA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Désactive complètement la détection (toujours monter le rendu)
    pub bypass: bool,
    pub min_viewport_width: f32,
    pub min_cpu_cores: usize,
    /// Mémoire minimale en Go, ignorée quand elle ne peut pas être lue
    pub min_memory_gb: f32,
    pub reduced_motion: bool,
    pub save_data: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            bypass: false,
            min_viewport_width: MIN_VIEWPORT_WIDTH,
            min_cpu_cores: MIN_CPU_CORES,
            min_memory_gb: MIN_MEMORY_GB,
            reduced_motion: false,
            save_data: false,
        }
    }
}

/// Configuration statique du champ de particules, fournie au montage
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub feature_count: usize,
    pub background_percent: usize,
    pub core_percent: usize,
    /// Graine du générateur aléatoire (aléatoire si absente)
    pub seed: Option<u64>,
    pub palette: Palette,
    pub instability: InstabilityConfig,
    pub camera: CameraConfig,
    pub connections: ConnectionConfig,
    pub render: RenderConfig,
    pub probe: ProbeConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            feature_count: DEFAULT_FEATURE_COUNT,
            background_percent: DEFAULT_BACKGROUND_PERCENT,
            core_percent: DEFAULT_CORE_PERCENT,
            seed: None,
            palette: Palette::default(),
            instability: InstabilityConfig::default(),
            camera: CameraConfig::default(),
            connections: ConnectionConfig::default(),
            render: RenderConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Vérifie la cohérence de la configuration avant la construction du champ
    pub fn validate(&self) -> Result<(), String> {
        if self.particle_count == 0 {
            return Err("Le nombre de particules doit être strictement positif".to_string());
        }
        if self.feature_count > self.particle_count {
            return Err(format!(
                "Nombre de nœuds FEATURE ({}) supérieur au nombre de particules ({})",
                self.feature_count, self.particle_count
            ));
        }
        if self.background_percent + self.core_percent > 100 {
            return Err(format!(
                "Pourcentages de couches invalides: {} + {} > 100",
                self.background_percent, self.core_percent
            ));
        }

        let instability = &self.instability;
        if !(instability.decay > 0.0 && instability.decay < 1.0) {
            return Err(format!("Facteur de décroissance hors limites: {}", instability.decay));
        }
        if !(0.0..=1.0).contains(&instability.trigger_probability) {
            return Err(format!(
                "Probabilité de déclenchement hors limites: {}",
                instability.trigger_probability
            ));
        }
        if !(0.0..=1.0).contains(&instability.spike) || !(0.0..=1.0).contains(&instability.threshold) {
            return Err(format!(
                "Seuil ({}) ou pic ({}) d'instabilité hors de [0, 1]",
                instability.threshold, instability.spike
            ));
        }
        if !(0.0..1.0).contains(&instability.max_core_contraction) {
            return Err(format!(
                "Contraction maximale du noyau hors de [0, 1): {}",
                instability.max_core_contraction
            ));
        }

        if self.camera.focal_length <= 0.0 {
            return Err(format!("Focale non positive: {}", self.camera.focal_length));
        }
        if !(0.0..=1.0).contains(&self.camera.smoothing) {
            return Err(format!("Lissage caméra hors de [0, 1]: {}", self.camera.smoothing));
        }

        if self.connections.window == 0 {
            return Err("La fenêtre de connexions doit être strictement positive".to_string());
        }
        if self.connections.distance <= 0.0 {
            return Err(format!("Distance de connexion non positive: {}", self.connections.distance));
        }
        if !(0.0..=1.0).contains(&self.connections.spoke_peak_stop) {
            return Err(format!(
                "Arrêt du dégradé des rayons hors de [0, 1]: {}",
                self.connections.spoke_peak_stop
            ));
        }

        if !(0.0..=1.0).contains(&self.render.trail_fade_alpha) {
            return Err(format!("Alpha de traînée hors de [0, 1]: {}", self.render.trail_fade_alpha));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Charge la configuration depuis `NEURO_CORE_CONFIG` ou le chemin par défaut.
    /// Un fichier absent donne la configuration par défaut.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_PATH));

        if !path.exists() {
            info!("Aucun fichier de configuration ({:?}), valeurs par défaut", path);
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Configuration chargée depuis {:?}", path);
        Ok(config)
    }

    /// Écrit la configuration courante au format JSON
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
