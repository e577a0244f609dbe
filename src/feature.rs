//! Feature codec - moves one slice of world state between the live `World`
//! and its serializable payload.
//!
//! Every match here is exhaustive over `Feature` / `FeaturePayload`, so adding
//! a variant does not compile until its extract and apply cases exist.

use bevy::prelude::*;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::components::Sylvie;
use crate::resources::{DialogueValue, DialogueVariables, VisitedAreas};

// ============================================================================
// VEC3 HELPERS
// ============================================================================

fn v3(v: Vec3) -> [f32; 3] { [v.x, v.y, v.z] }
fn to_vec3(a: [f32; 3]) -> Vec3 { Vec3::new(a[0], a[1], a[2]) }

// ============================================================================
// FEATURE TAGS + PAYLOADS
// ============================================================================

/// Independently saveable slice of world state.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Feature {
    SylviePosition,
    VisitedAreas,
    DialogueVariables,
}

impl Feature {
    pub const ALL: [Feature; 3] = [
        Feature::SylviePosition,
        Feature::VisitedAreas,
        Feature::DialogueVariables,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::SylviePosition => "SylviePosition",
            Feature::VisitedAreas => "VisitedAreas",
            Feature::DialogueVariables => "DialogueVariables",
        }
    }
}

/// A feature's value in its serializable form.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum FeaturePayload {
    SylviePosition([f32; 3]),
    VisitedAreas(BTreeSet<String>),
    DialogueVariables(BTreeMap<String, DialogueValue>),
}

impl FeaturePayload {
    pub fn feature(&self) -> Feature {
        match self {
            FeaturePayload::SylviePosition(_) => Feature::SylviePosition,
            FeaturePayload::VisitedAreas(_) => Feature::VisitedAreas,
            FeaturePayload::DialogueVariables(_) => Feature::DialogueVariables,
        }
    }
}

// ============================================================================
// EXTRACT (world -> payload)
// ============================================================================

/// Read the live source for `feature`. None when that source is missing from
/// the world (no avatar, several avatars, resource never inserted).
pub fn extract(feature: Feature, world: &mut World) -> Option<FeaturePayload> {
    match feature {
        Feature::SylviePosition => {
            let mut query = world.query_filtered::<&Transform, With<Sylvie>>();
            match query.single(world) {
                Ok(transform) => Some(FeaturePayload::SylviePosition(v3(transform.translation))),
                Err(e) => {
                    warn!("Cannot extract {}: {e}", feature.name());
                    None
                }
            }
        }
        Feature::VisitedAreas => match world.get_resource::<VisitedAreas>() {
            Some(registry) => Some(FeaturePayload::VisitedAreas(registry.0.iter().cloned().collect())),
            None => {
                warn!("Cannot extract {}: VisitedAreas resource missing", feature.name());
                None
            }
        },
        Feature::DialogueVariables => match world.get_resource::<DialogueVariables>() {
            Some(store) => Some(FeaturePayload::DialogueVariables(store.0.clone())),
            None => {
                warn!("Cannot extract {}: DialogueVariables resource missing", feature.name());
                None
            }
        },
    }
}

// ============================================================================
// APPLY (payload -> world)
// ============================================================================

/// Overwrite the live sink for the payload's feature. Touches nothing else,
/// and applying the same payload twice leaves the same state as once.
pub fn apply(payload: FeaturePayload, world: &mut World) {
    match payload {
        FeaturePayload::SylviePosition(position) => {
            let mut query = world.query_filtered::<&mut Transform, With<Sylvie>>();
            match query.single_mut(world) {
                // Only translation is saved; rotation and scale stay as they are.
                Ok(mut transform) => transform.translation = to_vec3(position),
                Err(e) => warn!("Cannot apply {}: {e}", Feature::SylviePosition.name()),
            }
        }
        FeaturePayload::VisitedAreas(areas) => {
            let areas: HashSet<String> = areas.into_iter().collect();
            match world.get_resource_mut::<VisitedAreas>() {
                Some(mut registry) => registry.0 = areas,
                None => world.insert_resource(VisitedAreas(areas)),
            }
        }
        FeaturePayload::DialogueVariables(vars) => {
            match world.get_resource_mut::<DialogueVariables>() {
                Some(mut store) => store.0 = vars,
                None => world.insert_resource(DialogueVariables(vars)),
            }
        }
    }
}
