//! Pan/zoom transform between virtual canvas coordinates and screen pixels.
//!
//! `screen = virtual * scale + translate`. The scale is clamped to
//! [`MIN_SCALE`]..=[`MAX_SCALE`] at every mutation.

use crate::config::{MAX_SCALE, MIN_SCALE};
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl ViewportTransform {
    pub const IDENTITY: ViewportTransform = ViewportTransform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    transform: ViewportTransform,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// Replaces the transform, clamping its scale. Non-finite input is ignored.
    pub fn set_transform(&mut self, transform: ViewportTransform) {
        if !(transform.translate_x.is_finite()
            && transform.translate_y.is_finite()
            && transform.scale.is_finite())
        {
            return;
        }
        self.transform = ViewportTransform {
            scale: clamp_scale(transform.scale),
            ..transform
        };
    }

    pub fn to_virtual(&self, screen: Point) -> Point {
        let t = &self.transform;
        Point::new(
            (screen.x - t.translate_x) / t.scale,
            (screen.y - t.translate_y) / t.scale,
        )
    }

    pub fn to_screen(&self, virtual_point: Point) -> Point {
        let t = &self.transform;
        Point::new(
            virtual_point.x * t.scale + t.translate_x,
            virtual_point.y * t.scale + t.translate_y,
        )
    }

    pub fn rect_to_screen(&self, rect: &Rect) -> Rect {
        Rect::from_corners(self.to_screen(rect.min), self.to_screen(rect.max))
    }

    pub fn rect_to_virtual(&self, rect: &Rect) -> Rect {
        Rect::from_corners(self.to_virtual(rect.min), self.to_virtual(rect.max))
    }

    /// Translates by screen-space deltas; pan speed does not depend on zoom.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
    }

    /// Multiplies the scale by `factor`, keeping `pivot` (screen space) fixed
    /// over the same virtual point.
    pub fn zoom_by(&mut self, factor: f64, pivot: Point) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let anchor = self.to_virtual(pivot);
        let scale = clamp_scale(self.transform.scale * factor);
        self.transform = ViewportTransform {
            translate_x: pivot.x - anchor.x * scale,
            translate_y: pivot.y - anchor.y * scale,
            scale,
        };
    }

    /// Fits `bounds` into the viewport with `padding` screen pixels on every
    /// side, never zooming in past 100%, and centers it. With no bounds the
    /// transform is reset.
    pub fn zoom_to_fit(&mut self, bounds: Option<Rect>, viewport_size: Size, padding: f64) {
        let Some(bounds) = bounds else {
            self.reset();
            return;
        };
        let available_w = (viewport_size.width - 2.0 * padding).max(1.0);
        let available_h = (viewport_size.height - 2.0 * padding).max(1.0);
        let fit_w = if bounds.width() > 0.0 {
            available_w / bounds.width()
        } else {
            f64::INFINITY
        };
        let fit_h = if bounds.height() > 0.0 {
            available_h / bounds.height()
        } else {
            f64::INFINITY
        };
        let scale = clamp_scale(fit_w.min(fit_h).min(1.0));
        let center = bounds.center();
        self.transform = ViewportTransform {
            translate_x: viewport_size.width / 2.0 - center.x * scale,
            translate_y: viewport_size.height / 2.0 - center.y * scale,
            scale,
        };
        debug!(scale, "Zoomed to fit");
    }

    pub fn reset(&mut self) {
        self.transform = ViewportTransform::IDENTITY;
    }
}
