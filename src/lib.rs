//! Sprite asset helpers for 2D games built on raylib.
//!
//! Loads sprite sheet images and their frame tables, creates blank images and
//! scales sizes, positions and rectangles by a uniform factor.
//!
//! - [`geometry`] – `Rect`, positions and the `ScaleFactor` policy
//! - [`surface`] – image loading, creation and resizing
//! - [`frames`] – `<name>.data` frame tables paired with `<name>.png` sheets
//! - [`store`] – keyed cache of loaded sheets
//! - [`config`] – INI-backed loader settings
//! - [`error`] – the shared `AssetError` type

pub mod config;
pub mod error;
pub mod frames;
pub mod geometry;
pub mod store;
pub mod surface;

pub use error::{AssetError, Result};
pub use frames::{FrameTable, SpriteSheet, load_frames_info, parse_frame_table};
pub use geometry::{Pos, Rect, ScaleFactor, scale_pos, scale_rect, scale_rects};
pub use store::SpriteSheetStore;
pub use surface::{ResizeFilter, create_image, export_png, load_image, scale_image};
