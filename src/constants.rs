//! Constants - File layout and timing defaults for the save system

/// Extension appended to every save file (`<path_name>.sav`).
pub const SAVE_EXTENSION: &str = "sav";

/// Logical name used when a record is built from scratch and by `try_load_game`.
pub const DEFAULT_SAVE_NAME: &str = "autosave";

/// First four bytes of every save file. Anything else is rejected on load.
pub const SAVE_MAGIC: &[u8; 4] = b"SYLV";

/// Suffix for the scratch file written before the atomic rename.
pub const TMP_SUFFIX: &str = "tmp";

/// Default autosave interval in seconds (0 = disabled).
pub const AUTOSAVE_INTERVAL_SECS: f32 = 60.0;
