//! Save/Load system — feature-tagged records written as postcard binaries.
//! Writes run on the IO task pool; reads run on the caller.

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task, TaskPool};
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{SaveError, SaveResult};
use crate::feature::{self, Feature};
use crate::record::{SaveRecord, generate_save};
use crate::resources::{AutosaveTimer, LoadedSave, SaveLoadRequest};
use crate::settings::{SaveSettings, default_save_dir};

// ============================================================================
// SAVE PATH
// ============================================================================

/// `<dir>/<name>.sav`
pub fn save_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{SAVE_EXTENSION}"))
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension(format!("{SAVE_EXTENSION}.{TMP_SUFFIX}"))
}

/// Check if a save file exists for `name`.
pub fn has_save(name: &str, dir: &Path) -> bool {
    save_path(dir, name).is_file()
}

fn save_dir(world: &World) -> PathBuf {
    world
        .get_resource::<SaveSettings>()
        .map(|s| s.resolved_save_dir())
        .unwrap_or_else(default_save_dir)
}

// ============================================================================
// ENCODING
// ============================================================================

/// Magic header followed by the postcard-encoded record. Every field is
/// written, tagged or not.
pub fn encode_record(record: &SaveRecord) -> SaveResult<Vec<u8>> {
    let body = postcard::to_stdvec(record).map_err(SaveError::Encode)?;
    let mut bytes = Vec::with_capacity(SAVE_MAGIC.len() + body.len());
    bytes.extend_from_slice(SAVE_MAGIC);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// `path` is only used for error context.
pub fn decode_record(bytes: &[u8], path: &Path) -> SaveResult<SaveRecord> {
    let Some(body) = bytes.strip_prefix(SAVE_MAGIC.as_slice()) else {
        return Err(SaveError::BadMagic { path: path.to_path_buf() });
    };
    postcard::from_bytes(body).map_err(|source| SaveError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// WRITE
// ============================================================================

/// Write a record to a specific path. The bytes go to a sibling `.tmp` file
/// first and are renamed over `path`, so an interrupted write never leaves a
/// half-written save behind.
pub fn write_save_to(record: &SaveRecord, path: &Path) -> SaveResult<()> {
    let bytes = encode_record(record)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| SaveError::io(dir, e))?;
    }
    let tmp = tmp_path(path);
    std::fs::write(&tmp, &bytes).map_err(|e| SaveError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| SaveError::io(path, e))?;
    Ok(())
}

/// Write `record` to `<dir>/<path_name>.sav`, replacing any existing file.
/// Touches no shared state, so it can run on any thread.
pub fn save_to_file(record: &SaveRecord, dir: &Path) -> SaveResult<PathBuf> {
    let path = save_path(dir, &record.path_name);
    write_save_to(record, &path)?;
    info!("Game saved to {} ({} features)", path.display(), record.features.len());
    Ok(path)
}

// ============================================================================
// READ
// ============================================================================

/// Read a record from a specific path, keeping the failure reason.
pub fn read_save_from(path: &Path) -> SaveResult<SaveRecord> {
    let bytes = std::fs::read(path).map_err(|e| SaveError::io(path, e))?;
    decode_record(&bytes, path)
}

/// Read the save named `name`. Every failure (missing, unreadable, foreign or
/// truncated file) comes back as None; the reason is only logged.
pub fn load_from_file(name: &str, dir: &Path) -> Option<SaveRecord> {
    let path = save_path(dir, name);
    match read_save_from(&path) {
        Ok(record) => {
            info!("Loaded save {} ({} features)", path.display(), record.features.len());
            Some(record)
        }
        Err(e) => {
            warn!("Load failed: {e}");
            None
        }
    }
}

// ============================================================================
// COMMIT (record -> world)
// ============================================================================

/// Replay every tagged payload into the world, in tag order, then make the
/// record the loaded save. None is a no-op that leaves the loaded save alone.
pub fn load_save(world: &mut World, record: Option<SaveRecord>) {
    let Some(record) = record else {
        warn!("No save record to load");
        return;
    };

    for &tag in &record.features {
        feature::apply(record.payload(tag), world);
    }

    info!("Save '{}' applied: {:?}", record.path_name, record.features);
    world.insert_resource(LoadedSave(Some(record)));
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Build the next record from the loaded save, make it the loaded save, and
/// spawn its write on the IO task pool. The returned task resolves to the
/// written path; dropping it cancels the write, so detach it or await it.
///
/// The loaded save is updated even if the write later fails.
pub fn spawn_save_task(world: &mut World, features: &[Feature]) -> Task<SaveResult<PathBuf>> {
    let base = world
        .get_resource_mut::<LoadedSave>()
        .and_then(|mut loaded| loaded.0.take());
    let record = generate_save(base, features, world);
    let dir = save_dir(world);

    let snapshot = record.clone();
    world.insert_resource(LoadedSave(Some(record)));

    IoTaskPool::get_or_init(TaskPool::new).spawn(async move {
        let span = tracing::info_span!("save_write", name = %snapshot.path_name);
        span.in_scope(|| {
            save_to_file(&snapshot, &dir).inspect_err(|e| error!("Save failed: {e}"))
        })
    })
}

/// Fire-and-forget save. Write errors are logged, never returned.
pub fn save_game(world: &mut World, features: &[Feature]) {
    spawn_save_task(world, features).detach();
}

/// Load and commit the default save. A missing or broken file leaves the
/// world as it is.
pub fn try_load_game(world: &mut World) {
    let dir = save_dir(world);
    let record = load_from_file(DEFAULT_SAVE_NAME, &dir);
    load_save(world, record);
}

// ============================================================================
// BEVY SYSTEMS
// ============================================================================

/// Load the default save at startup when settings allow it.
pub fn startup_load_system(world: &mut World) {
    let enabled = world
        .get_resource::<SaveSettings>()
        .is_some_and(|s| s.load_on_startup);
    if enabled {
        try_load_game(world);
    }
}

/// Autosave on a fixed interval of real seconds.
pub fn autosave_system(
    time: Res<Time>,
    settings: Res<SaveSettings>,
    mut timer: ResMut<AutosaveTimer>,
    mut request: ResMut<SaveLoadRequest>,
) {
    if settings.autosave_secs <= 0.0 { return; }

    timer.0 += time.delta_secs();
    if timer.0 < settings.autosave_secs { return; }
    timer.0 = 0.0;

    request.request_save(&settings.autosave_features);
}

/// Service pending requests. A load is handled before a save queued in the
/// same frame, so that save starts from the freshly loaded record.
pub fn save_load_request_system(world: &mut World) {
    let Some(mut request) = world.get_resource_mut::<SaveLoadRequest>() else { return };
    let features = std::mem::take(&mut request.save_features);
    let load = std::mem::take(&mut request.load_requested);

    if load {
        try_load_game(world);
    }
    if !features.is_empty() {
        save_game(world, &features);
    }
}
