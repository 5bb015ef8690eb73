pub const DEFAULT_PARTICLE_COUNT: usize = 600;
pub const DEFAULT_FEATURE_COUNT: usize = 8;
pub const DEFAULT_BACKGROUND_PERCENT: usize = 20;
pub const DEFAULT_CORE_PERCENT: usize = 75;

// Paramètres de création des couches
pub const FEATURE_RADIUS_MIN: f32 = 350.0;
pub const FEATURE_RADIUS_SPREAD: f32 = 200.0;
pub const FEATURE_SPEED: f32 = 0.0008;
pub const FEATURE_SIZE: f32 = 2.0;
pub const BACKGROUND_RADIUS_MIN: f32 = 400.0;
pub const BACKGROUND_RADIUS_SPREAD: f32 = 400.0;
pub const BACKGROUND_SPEED: f32 = 0.0003;
pub const BACKGROUND_SPIN: f32 = 0.001; // radians par frame
pub const CORE_RADIUS_MIN: f32 = 220.0;
pub const CORE_RADIUS_STEP: f32 = 0.3;
pub const CORE_SPIRAL_STEP: f32 = 0.5;
pub const CORE_SPEED_MIN: f32 = 0.002;
pub const FOREGROUND_RADIUS_MIN: f32 = 40.0;
pub const FOREGROUND_SPEED: f32 = 0.02;

// Instabilité
pub const INSTABILITY_DECAY: f32 = 0.97;
pub const INSTABILITY_THRESHOLD: f32 = 0.1;
pub const INSTABILITY_TRIGGER_PROBABILITY: f64 = 0.002;
pub const INSTABILITY_SPIKE: f32 = 0.6;
pub const MAX_CORE_CONTRACTION: f32 = 0.3;
pub const CORE_DRIFT_AMPLITUDE: f32 = 40.0;
pub const TILT_WOBBLE: f32 = 0.05;

// Caméra et projection
pub const FOCAL_LENGTH: f32 = 1000.0;
pub const CAMERA_SMOOTHING: f32 = 0.03;
pub const YAW_RANGE: f32 = 0.4;
pub const PITCH_RANGE: f32 = 0.1;
pub const BASE_PITCH: f32 = 0.5;
pub const DEPTH_ALPHA_BIAS: f32 = 0.4;
pub const BACKGROUND_ALPHA: f32 = 0.15;

// Connexions
pub const CONNECTION_DISTANCE: f32 = 110.0;
pub const CONNECTION_WINDOW: usize = 40;
pub const CONNECTION_MIN_ALPHA: f32 = 0.1;
pub const CONNECTION_OPACITY: f32 = 0.4;
pub const SPOKE_PEAK_STOP: f32 = 0.55;

// Rendu
pub const MIN_RENDER_ALPHA: f32 = 0.01;
pub const TRAIL_FADE_ALPHA: f32 = 0.25;
pub const BACKGROUND_RGB: [u8; 3] = [2, 6, 23];

// Détection des capacités
pub const MIN_VIEWPORT_WIDTH: f32 = 1024.0;
pub const MIN_CPU_CORES: usize = 4;
pub const MIN_MEMORY_GB: f32 = 4.0;

// Fenêtre
pub const WINDOW_REVEAL_FRAME: u32 = 3;

// Fichier de configuration
pub const CONFIG_PATH: &str = "assets/field_config.json";
pub const CONFIG_ENV_VAR: &str = "NEURO_CORE_CONFIG";
pub const REDUCED_MOTION_ENV_VAR: &str = "NEURO_REDUCED_MOTION";
