//! Sylvie save demo - headless walk that saves on area changes and reloads.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::time::Duration;

use sylvie_save::save::startup_load_system;
use sylvie_save::settings::load_settings;
use sylvie_save::{DialogueValue, DialogueVariables, Feature, SaveLoadRequest, Sylvie, VisitedAreas};

/// Frames to run before exiting.
const DEMO_FRAMES: u32 = 240;
/// World units per area band along x.
const AREA_WIDTH: f32 = 10.0;
const AREAS: [&str; 4] = ["village", "meadow", "cave", "summit"];

fn main() {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
        LogPlugin::default(),
    ));
    app.insert_resource(load_settings());

    // Wire up save resources + systems
    sylvie_save::build_app(&mut app);

    app.add_systems(Startup, spawn_sylvie.before(startup_load_system));
    app.add_systems(Update, (walk_system, area_system, finish_system).chain());

    info!("sylvie-save demo (build {})", env!("BUILD_COMMIT"));
    app.run();
}

fn spawn_sylvie(mut commands: Commands) {
    commands.spawn((Sylvie, Transform::default()));
}

/// Walk along +x at four units per second.
fn walk_system(time: Res<Time>, mut query: Query<&mut Transform, With<Sylvie>>) {
    for mut transform in query.iter_mut() {
        transform.translation.x += time.delta_secs() * 4.0;
    }
}

/// Visited areas change far less often than position, so they are only
/// saved on a transition into a new area.
fn area_system(
    query: Query<&Transform, With<Sylvie>>,
    mut visited: ResMut<VisitedAreas>,
    mut dialogue: ResMut<DialogueVariables>,
    mut request: ResMut<SaveLoadRequest>,
) {
    let Ok(transform) = query.single() else { return };
    let band = (transform.translation.x / AREA_WIDTH).max(0.0) as usize;
    let area = AREAS[band.min(AREAS.len() - 1)];

    if visited.visit(area) {
        info!("Entered {area}");
        dialogue.set("last_area", DialogueValue::Text(area.to_string()));
        request.request_save(&[Feature::VisitedAreas, Feature::DialogueVariables]);
    }
}

/// Save position and exit once the demo has run its course.
fn finish_system(
    mut frames: Local<u32>,
    mut request: ResMut<SaveLoadRequest>,
    mut app_exit: MessageWriter<AppExit>,
) {
    *frames += 1;
    if *frames == DEMO_FRAMES {
        request.request_save(&[Feature::SylviePosition]);
    } else if *frames > DEMO_FRAMES + 30 {
        app_exit.write(AppExit::Success);
    }
}
