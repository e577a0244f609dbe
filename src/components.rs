//! ECS Components - Markers the save system looks up in the world

use bevy::prelude::*;

/// Tags the single player-controlled avatar. Its `Transform` is what the
/// `SylviePosition` feature reads and writes. Exactly one entity should carry it.
#[derive(Component, Clone, Copy, Default, Debug)]
pub struct Sylvie;
