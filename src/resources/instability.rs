use rand::Rng;

use crate::resources::config::InstabilityConfig;

/// Processus scalaire de déstabilisation / auto-correction du noyau.
///
/// La valeur décroît à chaque frame et, lorsqu'elle passe sous le seuil,
/// un tirage aléatoire peut la relancer au niveau du pic.
#[derive(Debug, Clone, PartialEq)]
pub struct InstabilityController {
    value: f32,
    decay: f32,
    threshold: f32,
    trigger_probability: f64,
    spike: f32,
    tilt_wobble: f32,
}

impl InstabilityController {
    pub fn new(config: &InstabilityConfig) -> Self {
        Self {
            value: 0.0,
            decay: config.decay,
            threshold: config.threshold,
            trigger_probability: config.trigger_probability.clamp(0.0, 1.0),
            spike: config.spike.clamp(0.0, 1.0),
            tilt_wobble: config.tilt_wobble,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Avance d'une frame. Retourne `true` si un pic a été déclenché.
    pub fn step(&mut self, rng: &mut impl Rng) -> bool {
        // Sous les flottants normaux le produit cesse de diminuer : on passe à zéro
        let decayed = (self.value * self.decay).clamp(0.0, 1.0);
        self.value = if decayed < f32::MIN_POSITIVE || decayed >= self.value {
            0.0
        } else {
            decayed
        };

        if self.value < self.threshold && rng.random_bool(self.trigger_probability) {
            self.value = self.spike;
            return true;
        }

        false
    }

    /// Force un pic immédiat
    pub fn destabilize(&mut self) {
        self.value = self.spike;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Oscillation de l'inclinaison du système pendant l'instabilité
    pub fn tilt(&self, time_ms: f64) -> f32 {
        (time_ms * 0.0008).sin() as f32 * self.tilt_wobble * self.value
    }
}
