//! Save record + builder.
//!
//! A record accumulates payloads across saves. `features` only says which
//! payloads are current as of the last save; the others physically remain
//! but may be stale.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::DEFAULT_SAVE_NAME;
use crate::feature::{self, Feature, FeaturePayload};
use crate::resources::DialogueValue;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SaveRecord {
    /// Valid tags, in the order of the save request that produced them.
    pub features: Vec<Feature>,
    /// File stem under the save directory.
    pub path_name: String,

    // One payload per feature
    pub sylvie_position: [f32; 3],
    pub visited_areas: BTreeSet<String>,
    pub dialogue_variables: BTreeMap<String, DialogueValue>,
}

impl SaveRecord {
    pub fn new(path_name: impl Into<String>) -> Self {
        Self {
            features: Vec::new(),
            path_name: path_name.into(),
            sylvie_position: [0.0; 3],
            visited_areas: BTreeSet::new(),
            dialogue_variables: BTreeMap::new(),
        }
    }

    pub fn has(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Overwrite the payload field the value belongs to. Does not touch `features`.
    pub fn store(&mut self, payload: FeaturePayload) {
        match payload {
            FeaturePayload::SylviePosition(p) => self.sylvie_position = p,
            FeaturePayload::VisitedAreas(a) => self.visited_areas = a,
            FeaturePayload::DialogueVariables(v) => self.dialogue_variables = v,
        }
    }

    /// Copy of the payload field for `feature`, whether or not it is tagged.
    pub fn payload(&self, feature: Feature) -> FeaturePayload {
        match feature {
            Feature::SylviePosition => FeaturePayload::SylviePosition(self.sylvie_position),
            Feature::VisitedAreas => FeaturePayload::VisitedAreas(self.visited_areas.clone()),
            Feature::DialogueVariables => {
                FeaturePayload::DialogueVariables(self.dialogue_variables.clone())
            }
        }
    }
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_NAME)
    }
}

/// Build the next record from `base` (or a fresh one) by extracting each
/// requested feature from the world, in request order.
///
/// `features` becomes exactly the requested tags (repeats collapsed). A tag
/// whose live source is missing is dropped and its old payload kept, so every
/// listed tag has a current payload.
pub fn generate_save(base: Option<SaveRecord>, requested: &[Feature], world: &mut World) -> SaveRecord {
    let mut record = base.unwrap_or_default();
    record.features.clear();

    for &feature in requested {
        if record.has(feature) {
            continue;
        }
        match feature::extract(feature, world) {
            Some(payload) => {
                record.store(payload);
                record.features.push(feature);
            }
            None => warn!("Skipping {} in save '{}'", feature.name(), record.path_name),
        }
    }

    record
}
