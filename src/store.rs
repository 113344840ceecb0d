//! Sprite sheet store.
//!
//! Keeps loaded [`SpriteSheet`]s keyed by name so a game loads each sheet once
//! and looks frames up by `(sheet, animation)` afterwards.
//!
//! Note: raylib images own raw pixel memory, so the store is not `Send` and
//! must stay on the thread that created it.

use std::path::Path;

use log::info;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::frames::{SpriteSheet, load_frames_info};
use crate::geometry::{Rect, ScaleFactor};

/// Map of sheet keys to loaded sprite sheets.
#[derive(Debug, Default)]
pub struct SpriteSheetStore {
    sheets: FxHashMap<String, SpriteSheet>,
}

impl SpriteSheetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sheets: FxHashMap::default(),
        }
    }

    /// Load `<dir>/<name>.data` + `<dir>/<name>.png` and keep the result under `name`.
    ///
    /// On failure the store is left as it was.
    pub fn load(
        &mut self,
        dir: impl AsRef<Path>,
        name: &str,
        scale: ScaleFactor,
    ) -> Result<&SpriteSheet> {
        let sheet = load_frames_info(dir, name, scale)?;
        if self.sheets.contains_key(name) {
            info!("Replacing sprite sheet '{}'", name);
        }
        self.sheets.insert(name.to_string(), sheet);
        Ok(&self.sheets[name])
    }

    /// Add an already loaded sheet with the given key.
    pub fn add(&mut self, id: impl Into<String>, sheet: SpriteSheet) {
        self.sheets.insert(id.into(), sheet);
    }

    /// Get a sheet by its key.
    pub fn get(&self, id: impl AsRef<str>) -> Option<&SpriteSheet> {
        self.sheets.get(id.as_ref())
    }

    /// Frames of animation `anim` in sheet `id`.
    pub fn frames(&self, id: impl AsRef<str>, anim: impl AsRef<str>) -> Option<&[Rect]> {
        self.get(id).and_then(|sheet| sheet.frames.get(anim))
    }

    pub fn remove(&mut self, id: impl AsRef<str>) -> Option<SpriteSheet> {
        self.sheets.remove(id.as_ref())
    }

    /// Remove all loaded sheets.
    pub fn clear(&mut self) {
        self.sheets.clear();
    }

    /// Get the number of loaded sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
