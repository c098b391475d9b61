//! # canvasplot
//!
//! Coordinate-mapped figures with an interactive redraw loop, drawn through
//! a small 2D surface abstraction.
//!
//! A [`figure::Figure`] maps data onto a rectangular region through three
//! axes (x, primary y, secondary y), draws decorations derived from that
//! mapping (spines, tick marks, tick and category labels, grid), and redraws
//! itself on every pointer move with a crosshair, coordinate readouts,
//! interactive elements and a legend. A [`canvas::Canvas`] hosts several
//! figures on one [`surface::DrawingSurface`].
//!
//! ## Quick Start
//!
//! ```rust
//! use canvasplot::prelude::*;
//!
//! let data = Dataset::new().with("apples", 3.0).with("pears", 5.0);
//! let pie = pie_chart("fruit", data, 300.0, 300.0)?;
//!
//! let mut canvas = Canvas::new(RecordingSurface::new(300.0, 300.0), 300.0, 300.0);
//! canvas.add_figure(pie)?;
//! canvas.pointer_moved(200.0, 150.0)?;
//! assert!(canvas.surface().texts().any(|t| t == "apples: 3"));
//! # Ok::<(), canvasplot::Error>(())
//! ```
//!
//! ## Surfaces
//!
//! - [`surface::RecordingSurface`]: command log, for headless use and tests
//! - [`surface::SvgSurface`]: SVG document output
//! - [`surface::RasterSurface`]: software rasterizer with PNG output
//! - `WebCanvas` (feature `wasm`): browser `<canvas>` with pointer tracking
//!
//! ## Feature Flags
//!
//! - `serde`: (de)serialize settings, patches and [`figure::FigureConfig`]
//! - `wasm`: browser canvas surface and pointer listener

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and CSS color parsing.
pub mod color;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Labelled values consumed by charts and draw callbacks.
pub mod dataset;

/// RGBA pixel buffer with PNG encoding.
pub mod framebuffer;

// ============================================================================
// Coordinate Mapping
// ============================================================================

/// Axis ranges, tick spacing and pixel ratios.
pub mod axis;

/// Figure regions and plot areas.
pub mod region;

/// Data-space to pixel-space transform.
pub mod mapper;

// ============================================================================
// Drawing
// ============================================================================

/// Drawing surface trait and implementations.
pub mod surface;

/// Software rasterization primitives.
pub mod render;

/// Figures, decorations, series and interactive elements.
pub mod figure;

/// Canvas host for figures sharing one surface.
pub mod canvas;

/// Pie and bar chart factories.
pub mod charts;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for canvasplot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use canvasplot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axis::{AxisChoice, AxisIndex, AxisPatch};
    pub use crate::canvas::Canvas;
    pub use crate::charts::{bar_chart, pie_chart, BarChart, PieChart};
    pub use crate::color::{Hsla, Rgba};
    pub use crate::dataset::Dataset;
    pub use crate::error::{Error, Result};
    pub use crate::figure::{
        BezierParams, CursorPatch, EdgeSet, Figure, FigureBuilder, GridPatch, InteractiveElement,
        LegendPatch, PieFragment, SpinePatch, TickPatch,
    };
    pub use crate::geometry::{Point, Rect};
    pub use crate::mapper::CoordinateMapper;
    pub use crate::region::Region;
    pub use crate::surface::{
        DrawingSurface, FontStyle, RasterSurface, RecordingSurface, StrokeStyle, SvgSurface,
        TextPlacement,
    };
}
