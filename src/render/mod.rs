//! Rasterization for the raster surface.
//!
//! # Algorithms
//!
//! - **Wu's anti-aliased line** for hairline strokes
//! - **Scanline polygon fill** (even-odd) for filled paths and wide strokes
//! - **Bitmap glyphs** for text, 3x5 cells scaled to the font size
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

mod glyphs;
mod primitives;

pub use glyphs::{draw_glyphs, glyph_advance};
pub use primitives::{draw_line_aa, fill_polygons, stroke_polyline};
