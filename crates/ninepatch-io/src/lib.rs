//! # Nine-Patch I/O
//!
//! Document files, export settings, `.9.png` composition, and the density
//! export workflow that turns a nine-patch asset into Android
//! `drawable-<density>` resources.

pub mod project;
pub mod png;
pub mod export;

pub use project::{load_document, load_settings, save_document, ExportSettings, ProjectError, ResampleFilter};
pub use png::{compose_nine_patch, write_png};
pub use export::{export_nine_patch, BitmapRenderer, ContentRenderer, ExportError, ExportedImage};
