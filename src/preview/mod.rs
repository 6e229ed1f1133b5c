// src/preview/mod.rs
// Text and image views of a generated grid, for debugging and the CLI.
mod ascii;
mod png;

pub use ascii::{render_ascii, tile_glyph};
pub use png::{render_image, render_png, tile_color};
