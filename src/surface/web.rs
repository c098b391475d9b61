//! Browser surface over `CanvasRenderingContext2d` (feature `wasm`).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

use super::{DrawingSurface, FontStyle, StrokeStyle};

fn js_error(context: &str, value: &JsValue) -> Error {
    Error::Rendering(format!("{context}: {value:?}"))
}

/// A `<canvas>` element and its 2D context.
///
/// The backing store is sized `css size * devicePixelRatio` and the context
/// is scaled so callers always draw in CSS pixels.
pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
}

impl WebCanvas {
    /// Wrap an existing canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] if the element has no 2D context.
    pub fn from_element(element: HtmlCanvasElement) -> Result<Self> {
        let ctx = element
            .get_context("2d")
            .map_err(|e| js_error("failed to get 2d context", &e))?
            .ok_or_else(|| Error::Rendering("no 2d context available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::Rendering("failed to cast to CanvasRenderingContext2d".to_string()))?;
        let pixel_ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        Ok(Self { element, ctx, pixel_ratio })
    }

    /// Create a canvas and append it to the element with id `container_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] if the document or container is missing.
    pub fn create_in(container_id: &str, width: f64, height: f64) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Rendering("no document".to_string()))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| Error::Rendering(format!("no element with id '{container_id}'")))?;
        let element = document
            .create_element("canvas")
            .map_err(|e| js_error("failed to create canvas", &e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::Rendering("created element is not a canvas".to_string()))?;
        container.append_child(&element).map_err(|e| js_error("failed to attach canvas", &e))?;

        let mut canvas = Self::from_element(element)?;
        canvas.set_size(width, height)?;
        Ok(canvas)
    }

    /// Resize to `width x height` CSS pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] if the style or transform cannot be set.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.element.set_width((width * self.pixel_ratio).round() as u32);
        self.element.set_height((height * self.pixel_ratio).round() as u32);
        let style = self.element.style();
        style
            .set_property("width", &format!("{width}px"))
            .map_err(|e| js_error("failed to set width", &e))?;
        style
            .set_property("height", &format!("{height}px"))
            .map_err(|e| js_error("failed to set height", &e))?;
        // Resizing resets the transform, so the scale is applied once here.
        self.ctx
            .scale(self.pixel_ratio, self.pixel_ratio)
            .map_err(|e| js_error("failed to scale context", &e))
    }

    /// The underlying element.
    #[must_use]
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }

    fn set_font(&self, font: &FontStyle) {
        self.ctx.set_font(&font.css());
        self.ctx.set_fill_style_str(&font.color.to_css());
    }
}

impl DrawingSurface for WebCanvas {
    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.stroke(stroke);
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &FontStyle) {
        self.set_font(font);
        self.ctx.fill_text(text, origin.x, origin.y).ok();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn measure_text_width(&self, text: &str, font: &FontStyle) -> f64 {
        self.ctx.set_font(&font.css());
        self.ctx.measure_text(text).map_or(0.0, |m| m.width())
    }

    fn clear_region(&mut self, bound: Rect) {
        self.ctx.clear_rect(bound.x, bound.y, bound.width, bound.height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, to: Point) {
        self.ctx.move_to(to.x, to.y);
    }

    fn line_to(&mut self, to: Point) {
        self.ctx.line_to(to.x, to.y);
    }

    fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.ctx.quadratic_curve_to(control.x, control.y, to.x, to.y);
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.ctx.arc(center.x, center.y, radius, start_angle, end_angle).ok();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self, stroke: &StrokeStyle) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke();
    }

    fn fill(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }
}

/// A live `mousemove` listener; removed from the element on drop.
pub struct PointerListener {
    element: HtmlCanvasElement,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for PointerListener {
    fn drop(&mut self) {
        self.element
            .remove_event_listener_with_callback(
                "mousemove",
                self.callback.as_ref().unchecked_ref::<js_sys::Function>(),
            )
            .ok();
    }
}

/// Redraw every figure of `canvas` whenever the pointer moves over it.
///
/// Positions are taken relative to the element's bounding box. Keep the
/// returned listener alive for as long as redraws should happen.
///
/// # Errors
///
/// Returns [`Error::Rendering`] if the listener cannot be attached.
pub fn install_pointer_listener(canvas: Rc<RefCell<Canvas<WebCanvas>>>) -> Result<PointerListener> {
    let element = canvas.borrow().surface().element().clone();
    let target = element.clone();
    let callback = Closure::new(move |e: MouseEvent| {
        let rect = target.get_bounding_client_rect();
        let x = f64::from(e.client_x()) - rect.left();
        let y = f64::from(e.client_y()) - rect.top();
        // A redraw already in progress owns the canvas; drop this event.
        let Ok(mut canvas) = canvas.try_borrow_mut() else {
            return;
        };
        if let Err(err) = canvas.pointer_moved(x, y) {
            tracing::warn!(%err, "redraw failed");
        }
    });
    element
        .add_event_listener_with_callback(
            "mousemove",
            callback.as_ref().unchecked_ref::<js_sys::Function>(),
        )
        .map_err(|e| js_error("failed to add mousemove listener", &e))?;
    Ok(PointerListener { element, callback })
}
