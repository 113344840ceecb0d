//! Sprite sheet frame tables.
//!
//! A sheet named `hero` lives in two files side by side:
//!
//! - `hero.data` - JSON object mapping an animation/state name to a list of
//!   `[x, y, w, h]` rectangles inside the sheet
//! - `hero.png` - the sheet image itself
//!
//! ```json
//! { "idle": [[0, 0, 16, 16]], "walk": [[16, 0, 16, 16], [32, 0, 16, 16]] }
//! ```
//!
//! Both files are scaled by the same factor so the rectangles keep addressing
//! the right pixels of the scaled image.

use std::fmt;
use std::path::Path;

use log::{debug, info};
use raylib::prelude::Image;
use rustc_hash::FxHashMap;

use crate::error::{AssetError, Result};
use crate::geometry::{Rect, ScaleFactor};
use crate::surface::{ResizeFilter, load_image_with};

/// Extension of the frame sidecar file.
pub const FRAMES_EXT: &str = "data";
/// Extension of the sheet image file.
pub const IMAGE_EXT: &str = "png";

/// Sidecar contents before validation: numbers may be fractional and lists may
/// have any length.
type RawFrames = FxHashMap<String, Vec<Vec<f64>>>;

/// Frame rectangles grouped by animation/state name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTable {
    frames: FxHashMap<String, Vec<Rect>>,
}

impl FrameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the frames of `key`.
    pub fn insert(&mut self, key: impl Into<String>, rects: Vec<Rect>) {
        self.frames.insert(key.into(), rects);
    }

    /// All frames of `key`, in authored order.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&[Rect]> {
        self.frames.get(key.as_ref()).map(Vec::as_slice)
    }

    /// A single frame of `key`.
    pub fn frame(&self, key: impl AsRef<str>, index: usize) -> Option<Rect> {
        self.get(key).and_then(|rects| rects.get(index).copied())
    }

    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.frames.contains_key(key.as_ref())
    }

    /// Keys in lexical order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.frames.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total number of rectangles across every key.
    pub fn frame_count(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    fn from_raw(raw: RawFrames, scale: ScaleFactor) -> Result<Self> {
        let mut frames = FxHashMap::default();
        for (key, entries) in raw {
            let mut rects = Vec::with_capacity(entries.len());
            for (index, values) in entries.iter().enumerate() {
                let &[x, y, w, h] = values.as_slice() else {
                    return Err(AssetError::FrameArity {
                        key,
                        index,
                        len: values.len(),
                    });
                };
                rects.push(Rect::new(
                    scale.apply_raw(x),
                    scale.apply_raw(y),
                    scale.apply_raw(w),
                    scale.apply_raw(h),
                ));
            }
            frames.insert(key, rects);
        }
        Ok(Self { frames })
    }
}

/// Parse sidecar JSON into a frame table, scaling every value.
///
/// `source` only labels errors.
pub fn parse_frame_table(json: &str, source: &Path, scale: ScaleFactor) -> Result<FrameTable> {
    let raw: RawFrames = serde_json::from_str(json).map_err(|e| AssetError::Json {
        path: source.to_path_buf(),
        source: e,
    })?;
    FrameTable::from_raw(raw, scale)
}

/// A sheet image paired with the frame table describing it.
pub struct SpriteSheet {
    pub image: Image,
    pub frames: FrameTable,
}

impl SpriteSheet {
    pub fn into_parts(self) -> (Image, FrameTable) {
        (self.image, self.frames)
    }
}

impl fmt::Debug for SpriteSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpriteSheet")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("frames", &self.frames)
            .finish()
    }
}

/// Load `<dir>/<name>.data` and `<dir>/<name>.png`, both scaled by `scale`.
///
/// The image keeps its own alpha (no color key). Either file failing fails
/// the whole load.
pub fn load_frames_info(
    dir: impl AsRef<Path>,
    name: &str,
    scale: ScaleFactor,
) -> Result<SpriteSheet> {
    load_frames_info_with(dir, name, scale, ResizeFilter::Nearest)
}

/// [`load_frames_info`] with an explicit resize filter for the image.
pub fn load_frames_info_with(
    dir: impl AsRef<Path>,
    name: &str,
    scale: ScaleFactor,
    filter: ResizeFilter,
) -> Result<SpriteSheet> {
    let dir = dir.as_ref();
    let data_path = dir.join(format!("{}.{}", name, FRAMES_EXT));
    let json = std::fs::read_to_string(&data_path).map_err(|source| AssetError::Io {
        path: data_path.clone(),
        source,
    })?;
    let frames = parse_frame_table(&json, &data_path, scale)?;
    debug!(
        "Parsed {} frame keys ({} frames) from {}",
        frames.len(),
        frames.frame_count(),
        data_path.display()
    );

    let image = load_image_with(
        dir.join(format!("{}.{}", name, IMAGE_EXT)),
        None,
        scale,
        filter,
    )?;

    info!(
        "Loaded sprite sheet '{}' ({}x{}, {} frame keys)",
        name,
        image.width(),
        image.height(),
        frames.len()
    );
    Ok(SpriteSheet { image, frames })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str, scale: i32) -> Result<FrameTable> {
        parse_frame_table(json, Path::new("test.data"), ScaleFactor::from(scale))
    }

    #[test]
    fn test_parse_scales_every_component() {
        let table = parse(r#"{"idle":[[0,0,16,16]],"walk":[[16,0,16,16],[32,8,16,16]]}"#, 2)
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("idle").unwrap(), &[Rect::new(0, 0, 32, 32)]);
        assert_eq!(
            table.get("walk").unwrap(),
            &[Rect::new(32, 0, 32, 32), Rect::new(64, 16, 32, 32)]
        );
        assert_eq!(table.frame_count(), 3);
    }

    #[test]
    fn test_parse_keeps_authored_order() {
        let table = parse(r#"{"run":[[3,0,1,1],[1,0,1,1],[2,0,1,1]]}"#, 1).unwrap();
        let xs: Vec<i32> = table.get("run").unwrap().iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_fractional_values_truncate_after_scaling() {
        let table = parse(r#"{"a":[[1.5,2.5,3.9,0.5]]}"#, 2).unwrap();
        assert_eq!(table.frame("a", 0), Some(Rect::new(3, 5, 7, 1)));
    }

    #[test]
    fn test_parse_non_positive_scale_keeps_values() {
        let table = parse(r#"{"a":[[4,5,6,7]]}"#, 0).unwrap();
        assert_eq!(table.frame("a", 0), Some(Rect::new(4, 5, 6, 7)));
        let table = parse(r#"{"a":[[4,5,6,7]]}"#, -3).unwrap();
        assert_eq!(table.frame("a", 0), Some(Rect::new(4, 5, 6, 7)));
    }

    #[test]
    fn test_parse_wrong_arity_is_rejected() {
        let err = parse(r#"{"idle":[[0,0,16,16],[0,0,16]]}"#, 1).unwrap_err();
        match err {
            AssetError::FrameArity { key, index, len } => {
                assert_eq!(key, "idle");
                assert_eq!(index, 1);
                assert_eq!(len, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_malformed_json_is_rejected() {
        assert!(matches!(parse(r#"{"idle": [[0,0,16,16]"#, 1), Err(AssetError::Json { .. })));
        assert!(matches!(parse(r#"{"idle": [["a",0,16,16]]}"#, 1), Err(AssetError::Json { .. })));
        assert!(matches!(parse(r#"[[0,0,16,16]]"#, 1), Err(AssetError::Json { .. })));
    }

    #[test]
    fn test_parse_empty_object() {
        let table = parse("{}", 2).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.frame_count(), 0);
    }

    #[test]
    fn test_frame_lookup_misses() {
        let table = parse(r#"{"idle":[[0,0,16,16]]}"#, 1).unwrap();
        assert!(table.contains_key("idle"));
        assert!(table.get("jump").is_none());
        assert!(table.frame("idle", 1).is_none());
    }

    #[test]
    fn test_sorted_keys() {
        let mut table = FrameTable::new();
        table.insert("walk", vec![]);
        table.insert("attack", vec![]);
        table.insert("idle", vec![Rect::new(0, 0, 1, 1)]);
        assert_eq!(table.sorted_keys(), vec!["attack", "idle", "walk"]);
    }

    #[test]
    fn test_missing_sidecar_is_io_error() {
        let err = load_frames_info("does/not/exist", "sheet", ScaleFactor::IDENTITY);
        assert!(matches!(err, Err(AssetError::Io { .. })));
    }
}
