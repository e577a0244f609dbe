//! Scenario tests - whole save/load flows against a real `World` and a temp dir.
//!
//! Each file covers one behavior: file round trips, selective updates,
//! committing records, and the app-level systems.

mod roundtrip;

use bevy::prelude::*;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

use crate::components::Sylvie;
use crate::resources::{DialogueVariables, LoadedSave, VisitedAreas};
use crate::settings::SaveSettings;

// ============================================================================
// HELPERS
// ============================================================================

/// World with one avatar at `at`, empty registries, and saves under `dir`.
pub fn test_world(at: Vec3, dir: &Path) -> World {
    let mut world = World::new();
    world.spawn((Sylvie, Transform::from_translation(at)));
    world.init_resource::<VisitedAreas>();
    world.init_resource::<DialogueVariables>();
    world.init_resource::<LoadedSave>();
    world.insert_resource(SaveSettings::in_dir(dir));
    world
}

pub fn temp_saves() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn sylvie_translation(world: &mut World) -> Vec3 {
    world
        .query_filtered::<&Transform, With<Sylvie>>()
        .single(world)
        .expect("one avatar")
        .translation
}

pub fn set_sylvie_translation(world: &mut World, to: Vec3) {
    world
        .query_filtered::<&mut Transform, With<Sylvie>>()
        .single_mut(world)
        .expect("one avatar")
        .translation = to;
}

pub fn visited(world: &World) -> Vec<String> {
    let mut areas: Vec<String> = world.resource::<VisitedAreas>().0.iter().cloned().collect();
    areas.sort();
    areas
}

/// Block until `path` exists. Background writes rename into place, so an
/// existing file is a complete one.
pub fn wait_for_file(path: &Path) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !path.is_file() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", path.display());
        std::thread::sleep(Duration::from_millis(10));
    }
}
