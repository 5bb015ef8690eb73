use bevy::prelude::*;

use crate::states::field::FieldState;
use crate::systems::camera::track_pointer;
use crate::systems::capability::{probe_capabilities, recheck_on_resize, reprobe_on_resize};
use crate::systems::debug::log_field_stats;
use crate::systems::frame::{render_frame, upload_frame};
use crate::systems::reset::{teardown_field, toggle_mount};
use crate::systems::spawning::{field_mounted, mount_field};
use crate::systems::viewport::track_resize;

pub struct FieldPlugin;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<FieldState>();

        app.add_systems(OnEnter(FieldState::Running), mount_field);
        app.add_systems(OnExit(FieldState::Running), teardown_field);

        app.add_systems(
            Update,
            (
                probe_capabilities.run_if(in_state(FieldState::Probing)),
                reprobe_on_resize.run_if(in_state(FieldState::Disabled)),
                recheck_on_resize.run_if(in_state(FieldState::Running)),
                toggle_mount,
            ),
        );

        // Une frame : entrées, calcul, composition puis envoi vers la texture.
        // Un montage raté laisse l'état Running jusqu'à la transition suivante,
        // d'où la garde sur les ressources.
        app.add_systems(
            Update,
            (track_resize, render_frame, upload_frame)
                .chain()
                .after(track_pointer)
                .run_if(in_state(FieldState::Running))
                .run_if(field_mounted),
        );

        app.add_systems(
            Update,
            log_field_stats
                .after(render_frame)
                .run_if(in_state(FieldState::Running))
                .run_if(field_mounted),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use bevy::window::{PrimaryWindow, WindowResized};

    use crate::resources::capability::{LastVerdict, ProbeVerdict};
    use crate::resources::config::{FieldConfig, ProbeConfig};
    use crate::resources::field::ParticleField;
    use crate::resources::viewport::Viewport;

    fn app(config: FieldConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, AssetPlugin::default()))
            .init_asset::<Image>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Viewport>()
            .add_event::<WindowResized>()
            .insert_resource(config)
            .add_plugins(FieldPlugin);
        app
    }

    fn state(app: &App) -> FieldState {
        *app.world().resource::<State<FieldState>>().get()
    }

    fn permissive() -> FieldConfig {
        FieldConfig {
            seed: Some(5),
            probe: ProbeConfig {
                min_cpu_cores: 1,
                min_memory_gb: 0.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn failed_mount_stays_unmounted_without_running_frames() {
        let mut app = app(FieldConfig::default());
        app.update();
        app.update();
        assert_eq!(state(&app), FieldState::Disabled);

        // Sans fenêtre le montage échoue pendant le tick où l'état vaut encore Running
        app.world_mut()
            .resource_mut::<NextState<FieldState>>()
            .set(FieldState::Running);
        app.update();
        app.update();

        assert_eq!(state(&app), FieldState::Disabled);
        assert!(!app.world().contains_resource::<ParticleField>());
    }

    #[test]
    fn shrinking_a_running_field_unmounts_it() {
        let mut app = app(permissive());
        let window = app
            .world_mut()
            .spawn((
                Window {
                    resolution: (1600., 900.).into(),
                    ..default()
                },
                PrimaryWindow,
            ))
            .id();

        app.update();
        app.update();
        assert_eq!(state(&app), FieldState::Running);
        assert!(app.world().contains_resource::<ParticleField>());

        app.world_mut().send_event(WindowResized {
            window,
            width: 900.0,
            height: 700.0,
        });
        app.update();
        app.update();

        assert_eq!(state(&app), FieldState::Disabled);
        assert!(!app.world().contains_resource::<ParticleField>());
        assert_eq!(
            app.world().resource::<LastVerdict>().0,
            ProbeVerdict::NarrowViewport
        );
    }
}
