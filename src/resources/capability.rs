use bevy::prelude::*;

use crate::globals::REDUCED_MOTION_ENV_VAR;
use crate::resources::config::ProbeConfig;

/// Caractéristiques de la machine relevées avant le montage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub viewport_width: f32,
    pub reduced_motion: bool,
    pub cpu_cores: usize,
    /// Mémoire totale en Go, `None` si le système ne l'expose pas
    pub memory_gb: Option<f32>,
    pub save_data: bool,
}

impl DeviceProfile {
    /// Relève le profil courant : largeur de fenêtre, préférence de mouvement réduit
    /// (configuration ou variable d'environnement), cœurs logiques et mémoire.
    pub fn detect(viewport_width: f32, config: &ProbeConfig) -> Self {
        let cpu_cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            viewport_width,
            reduced_motion: config.reduced_motion || reduced_motion_requested(),
            cpu_cores,
            memory_gb: system_memory_gb(),
            save_data: config.save_data,
        }
    }
}

const MEMINFO_PATH: &str = "/proc/meminfo";

fn system_memory_gb() -> Option<f32> {
    let meminfo = std::fs::read_to_string(MEMINFO_PATH).ok()?;
    parse_mem_total(&meminfo)
}

/// Lit la ligne `MemTotal: <n> kB` et la convertit en Go
fn parse_mem_total(meminfo: &str) -> Option<f32> {
    let line = meminfo.lines().find(|line| line.starts_with("MemTotal:"))?;
    let kilobytes: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some((kilobytes / (1024.0 * 1024.0)) as f32)
}

fn reduced_motion_requested() -> bool {
    std::env::var(REDUCED_MOTION_ENV_VAR)
        .map(|value| env_flag(&value))
        .unwrap_or(false)
}

fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "reduce"
    )
}

/// Décision de la sonde de capacités
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVerdict {
    Mount,
    NarrowViewport,
    ReducedMotion,
    LowEndDevice,
}

impl ProbeVerdict {
    pub fn evaluate(profile: &DeviceProfile, config: &ProbeConfig) -> Self {
        if config.bypass {
            return ProbeVerdict::Mount;
        }
        if profile.viewport_width <= config.min_viewport_width {
            return ProbeVerdict::NarrowViewport;
        }
        if profile.reduced_motion {
            return ProbeVerdict::ReducedMotion;
        }
        let low_memory = profile
            .memory_gb
            .is_some_and(|memory| memory < config.min_memory_gb);
        if profile.cpu_cores < config.min_cpu_cores || low_memory || profile.save_data {
            return ProbeVerdict::LowEndDevice;
        }
        ProbeVerdict::Mount
    }

    pub fn allows_mount(self) -> bool {
        self == ProbeVerdict::Mount
    }
}

/// Dernier verdict rendu, consulté par le HUD et lors des redimensionnements
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastVerdict(pub ProbeVerdict);

#[cfg(test)]
mod tests {
    use super::*;

    fn capable() -> DeviceProfile {
        DeviceProfile {
            viewport_width: 1920.0,
            reduced_motion: false,
            cpu_cores: 8,
            memory_gb: Some(16.0),
            save_data: false,
        }
    }

    #[test]
    fn capable_device_mounts() {
        let verdict = ProbeVerdict::evaluate(&capable(), &ProbeConfig::default());
        assert!(verdict.allows_mount());
    }

    #[test]
    fn viewport_of_exactly_1024_is_refused() {
        let profile = DeviceProfile {
            viewport_width: 1024.0,
            ..capable()
        };
        assert_eq!(
            ProbeVerdict::evaluate(&profile, &ProbeConfig::default()),
            ProbeVerdict::NarrowViewport
        );

        let wider = DeviceProfile {
            viewport_width: 1025.0,
            ..capable()
        };
        assert_eq!(ProbeVerdict::evaluate(&wider, &ProbeConfig::default()), ProbeVerdict::Mount);
    }

    #[test]
    fn reduced_motion_is_refused() {
        let profile = DeviceProfile {
            reduced_motion: true,
            ..capable()
        };
        assert_eq!(
            ProbeVerdict::evaluate(&profile, &ProbeConfig::default()),
            ProbeVerdict::ReducedMotion
        );
    }

    #[test]
    fn low_end_devices_are_refused() {
        let few_cores = DeviceProfile {
            cpu_cores: 2,
            ..capable()
        };
        let saver = DeviceProfile {
            save_data: true,
            ..capable()
        };
        let config = ProbeConfig::default();
        assert_eq!(ProbeVerdict::evaluate(&few_cores, &config), ProbeVerdict::LowEndDevice);
        assert_eq!(ProbeVerdict::evaluate(&saver, &config), ProbeVerdict::LowEndDevice);
    }

    #[test]
    fn low_memory_is_refused_unless_unknown() {
        let config = ProbeConfig::default();
        let small = DeviceProfile {
            memory_gb: Some(2.0),
            ..capable()
        };
        let unknown = DeviceProfile {
            memory_gb: None,
            ..capable()
        };
        assert_eq!(ProbeVerdict::evaluate(&small, &config), ProbeVerdict::LowEndDevice);
        assert_eq!(ProbeVerdict::evaluate(&unknown, &config), ProbeVerdict::Mount);
    }

    #[test]
    fn mem_total_is_read_in_gigabytes() {
        let meminfo = "MemTotal:       16384000 kB\nMemFree:         3000000 kB\n";
        let memory = parse_mem_total(meminfo).unwrap();
        assert!((memory - 15.625).abs() < 1e-3);
        assert_eq!(parse_mem_total("MemFree: 12 kB"), None);
        assert_eq!(parse_mem_total("MemTotal: beaucoup kB"), None);
    }

    #[test]
    fn bypass_always_mounts() {
        let config = ProbeConfig {
            bypass: true,
            ..Default::default()
        };
        let profile = DeviceProfile {
            viewport_width: 300.0,
            reduced_motion: true,
            cpu_cores: 1,
            memory_gb: Some(0.5),
            save_data: true,
        };
        assert_eq!(ProbeVerdict::evaluate(&profile, &config), ProbeVerdict::Mount);
    }

    #[test]
    fn env_flag_values() {
        assert!(env_flag("1"));
        assert!(env_flag(" True "));
        assert!(env_flag("reduce"));
        assert!(!env_flag("0"));
        assert!(!env_flag("no-preference"));
    }
}
