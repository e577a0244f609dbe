//! ECS Resources - World-state slices and save bookkeeping shared by systems

use bevy::prelude::*;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::feature::Feature;
use crate::record::SaveRecord;

// ============================================================================
// WORLD STATE (sources/sinks for the feature codec)
// ============================================================================

/// Registry of area identifiers the player has entered. Read and written as a unit.
#[derive(Resource, Default, Clone, Debug)]
pub struct VisitedAreas(pub HashSet<String>);

impl VisitedAreas {
    /// Record a visit. Returns true the first time an area is seen, which is
    /// the moment a host should request a `VisitedAreas` save.
    pub fn visit(&mut self, area: impl Into<String>) -> bool {
        self.0.insert(area.into())
    }

    pub fn contains(&self, area: &str) -> bool {
        self.0.contains(area)
    }
}

/// A single dialogue variable value.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum DialogueValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Text(String),
}

/// Variable store the dialogue runner reads from and writes to.
#[derive(Resource, Default, Clone, Debug)]
pub struct DialogueVariables(pub BTreeMap<String, DialogueValue>);

impl DialogueVariables {
    pub fn set(&mut self, name: impl Into<String>, value: DialogueValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&DialogueValue> {
        self.0.get(name)
    }
}

// ============================================================================
// SAVE BOOKKEEPING
// ============================================================================

/// Most recently saved-from or loaded-into record. None until the first save
/// or successful load of the session. Only touched through `&mut World`.
#[derive(Resource, Default)]
pub struct LoadedSave(pub Option<SaveRecord>);

/// Trigger resource for save/load operations, serviced once per frame.
#[derive(Resource, Default, Debug)]
pub struct SaveLoadRequest {
    /// Features to save this frame, in request order. Empty = no save.
    pub save_features: Vec<Feature>,
    pub load_requested: bool,
}

impl SaveLoadRequest {
    /// Queue features for the next save. Repeats are ignored so the record
    /// never lists a tag twice.
    pub fn request_save(&mut self, features: &[Feature]) {
        for &feature in features {
            if !self.save_features.contains(&feature) {
                self.save_features.push(feature);
            }
        }
    }

    pub fn request_load(&mut self) {
        self.load_requested = true;
    }
}

/// Seconds accumulated toward the next autosave.
#[derive(Resource, Default, Debug)]
pub struct AutosaveTimer(pub f32);
