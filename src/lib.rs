//! Sylvie save system - feature-tagged incremental save/load for a Bevy world.
//!
//! A save request names the features (world-state slices) that changed; only
//! those are re-extracted into the running record, the record is written to
//! disk off the main thread, and a load replays the tagged features back into
//! the world.

// ============================================================================
// MODULES
// ============================================================================

pub mod components;
pub mod constants;
pub mod error;
pub mod feature;
pub mod record;
pub mod resources;
pub mod save;
pub mod settings;

#[cfg(test)]
mod tests;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use components::Sylvie;
pub use error::{SaveError, SaveResult};
pub use feature::{Feature, FeaturePayload};
pub use record::{SaveRecord, generate_save};
pub use resources::{DialogueValue, DialogueVariables, LoadedSave, SaveLoadRequest, VisitedAreas};
pub use save::{load_from_file, load_save, save_game, save_to_file, spawn_save_task, try_load_game};
pub use settings::SaveSettings;

use bevy::prelude::*;

// ============================================================================
// BEVY APP
// ============================================================================

/// Register save resources and systems. Resources already inserted by the
/// host (settings loaded from disk, a pre-filled dialogue store) are kept.
pub fn build_app(app: &mut App) {
    app.init_resource::<SaveSettings>()
       .init_resource::<LoadedSave>()
       .init_resource::<SaveLoadRequest>()
       .init_resource::<resources::AutosaveTimer>()
       .init_resource::<VisitedAreas>()
       .init_resource::<DialogueVariables>()
       .add_systems(Startup, save::startup_load_system)
       .add_systems(Update, (
           save::autosave_system,
           save::save_load_request_system,
       ).chain());
}
