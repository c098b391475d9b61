//! Canvas host: one drawing surface shared by an ordered list of figures.

use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::geometry::{Point, Rect};
use crate::surface::{DrawingSurface, FontStyle, TextPlacement};

/// Font size of the canvas title.
pub const TITLE_FONT_SIZE: f64 = 15.0;

/// A drawing surface plus the figures rendered onto it.
///
/// Figures redraw in registration order; each one clears and paints only
/// its own region, so later figures win where regions overlap.
#[derive(Debug)]
pub struct Canvas<S: DrawingSurface> {
    surface: S,
    width: f64,
    height: f64,
    origin: Point,
    title: Option<String>,
    figures: Vec<Figure>,
    pointer: Option<Point>,
}

impl<S: DrawingSurface> Canvas<S> {
    /// Wrap a surface of `width x height` CSS pixels.
    pub fn new(surface: S, width: f64, height: f64) -> Self {
        Self {
            surface,
            width,
            height,
            origin: Point::ORIGIN,
            title: None,
            figures: Vec::new(),
            pointer: None,
        }
    }

    /// Canvas width in CSS pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height in CSS pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Set and draw a title centred along the top edge.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
        self.draw_title();
    }

    /// Current title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Offset subtracted from raw pointer positions before they reach the
    /// figures.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = Point::new(x, y);
    }

    /// Register a figure. Ids must be unique.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFigure`] if a figure with the same id is
    /// already registered; the canvas is unchanged.
    pub fn add_figure(&mut self, figure: Figure) -> Result<()> {
        if self.figure(figure.id()).is_some() {
            tracing::warn!(id = figure.id(), "duplicate figure id rejected");
            return Err(Error::DuplicateFigure(figure.id().to_string()));
        }
        tracing::debug!(id = figure.id(), count = self.figures.len() + 1, "figure registered");
        self.figures.push(figure);
        Ok(())
    }

    /// Look up a figure by id.
    #[must_use]
    pub fn figure(&self, id: &str) -> Option<&Figure> {
        self.figures.iter().find(|f| f.id() == id)
    }

    /// Look up a figure by id for editing.
    pub fn figure_mut(&mut self, id: &str) -> Option<&mut Figure> {
        self.figures.iter_mut().find(|f| f.id() == id)
    }

    /// Registered figures in redraw order.
    #[must_use]
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Handle a pointer move at raw surface coordinates.
    ///
    /// # Errors
    ///
    /// Every figure is redrawn even if one fails; the first failure is
    /// returned.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Result<()> {
        self.pointer = Some(Point::new(x - self.origin.x, y - self.origin.y));
        self.draw_figures()
    }

    /// Clear the surface and redraw the title and every figure with the last
    /// pointer position.
    ///
    /// # Errors
    ///
    /// See [`Canvas::pointer_moved`].
    pub fn redraw(&mut self) -> Result<()> {
        self.surface.clear_region(Rect::new(0.0, 0.0, self.width, self.height));
        self.draw_title();
        self.draw_figures()
    }

    fn draw_title(&mut self) {
        if let Some(title) = &self.title {
            let font = FontStyle::sized(TITLE_FONT_SIZE);
            let anchor = Point::new(self.width / 2.0, 0.0);
            self.surface.draw_text(title, anchor, TextPlacement::BelowCentered, &font);
        }
    }

    fn draw_figures(&mut self) -> Result<()> {
        let mut first_error = None;
        for figure in &mut self.figures {
            if let Err(err) = figure.draw(&mut self.surface, self.pointer) {
                tracing::warn!(id = figure.id(), %err, "figure redraw failed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// The drawing surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The drawing surface, for direct drawing.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the canvas, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
