use bevy::prelude::*;

/// Cycle de vie du champ de particules
#[derive(States, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum FieldState {
    /// Sonde de capacités en attente de la fenêtre
    #[default]
    Probing,
    /// Champ monté, une frame par tick
    Running,
    /// Démonté ou refusé par la sonde
    Disabled,
}
