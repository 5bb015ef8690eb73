use bevy::prelude::*;

/// Marqueur du sprite plein écran qui affiche la surface du champ
#[derive(Component)]
pub struct FieldCanvas;
