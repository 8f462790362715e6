// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the transform between image-centered coordinates
//! (vanishing points) and drawing-surface pixel coordinates. The renderer and
//! the pointer handlers both go through [`ViewTransform`], so a dragged point
//! always stays under its marker.

use crate::models::perspective::Point;

pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 3.0;
pub const DEFAULT_ZOOM: f64 = 0.6;

/// Wheel delta to zoom factor.
pub const ZOOM_SPEED: f64 = 0.001;

/// A position on the drawing surface, in pixels from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Current pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRect {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Edges count as inside.
    pub fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Pan and zoom of the workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    pan: ScreenPoint,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: ScreenPoint::default(),
        }
    }
}

impl ViewTransform {
    pub fn new(zoom: f64, pan: ScreenPoint) -> Self {
        let mut view = Self { zoom: DEFAULT_ZOOM, pan };
        view.set_zoom(zoom);
        view
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> ScreenPoint {
        self.pan
    }

    /// Set the zoom directly (slider), clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            DEFAULT_ZOOM
        };
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    pub fn reset(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.pan = ScreenPoint::default();
    }

    /// Screen position of the image center.
    pub fn origin(&self, surface: SurfaceSize) -> ScreenPoint {
        let c = surface.center();
        ScreenPoint::new(c.x + self.pan.x, c.y + self.pan.y)
    }

    /// Image-centered point to surface pixels.
    pub fn to_screen(&self, point: Point, surface: SurfaceSize) -> ScreenPoint {
        let origin = self.origin(surface);
        ScreenPoint::new(origin.x + point.x * self.zoom, origin.y + point.y * self.zoom)
    }

    /// Surface pixels to image-centered point.
    pub fn to_image(&self, screen: ScreenPoint, surface: SurfaceSize) -> Point {
        let origin = self.origin(surface);
        Point::new((screen.x - origin.x) / self.zoom, (screen.y - origin.y) / self.zoom)
    }

    /// Screen-space bounds of an image of the given pixel size.
    pub fn image_rect(&self, image_size: (u32, u32), surface: SurfaceSize) -> ScreenRect {
        let origin = self.origin(surface);
        let half_w = image_size.0 as f64 * self.zoom / 2.0;
        let half_h = image_size.1 as f64 * self.zoom / 2.0;
        ScreenRect {
            min: ScreenPoint::new(origin.x - half_w, origin.y - half_h),
            max: ScreenPoint::new(origin.x + half_w, origin.y + half_h),
        }
    }

    /// Zoom by a wheel `delta`, keeping the image point under `cursor` fixed.
    ///
    /// Returns `false` when the clamped zoom did not change.
    pub fn zoom_at(&mut self, cursor: ScreenPoint, surface: SurfaceSize, delta: f64) -> bool {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom + delta * ZOOM_SPEED).clamp(MIN_ZOOM, MAX_ZOOM);
        if new_zoom == old_zoom || !new_zoom.is_finite() {
            return false;
        }

        let center = surface.center();
        let dx = cursor.x - center.x;
        let dy = cursor.y - center.y;
        let ratio = new_zoom / old_zoom;

        self.pan = ScreenPoint::new(dx - (dx - self.pan.x) * ratio, dy - (dy - self.pan.y) * ratio);
        self.zoom = new_zoom;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: SurfaceSize = SurfaceSize::new(1280.0, 720.0);

    #[test]
    fn test_forward_inverse_roundtrip() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(-800.0, -160.0),
            Point::new(1234.5, -987.25),
        ];
        let pans = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(-300.0, 45.5),
            ScreenPoint::new(812.0, -77.0),
        ];

        for zoom in [MIN_ZOOM, 0.6, 1.0, 2.37, MAX_ZOOM] {
            for pan in pans {
                let view = ViewTransform::new(zoom, pan);
                for p in points {
                    let back = view.to_image(view.to_screen(p, SURFACE), SURFACE);
                    assert!((back.x - p.x).abs() < 1e-9);
                    assert!((back.y - p.y).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_forward_transform() {
        let view = ViewTransform::new(0.5, ScreenPoint::new(10.0, -20.0));
        let s = view.to_screen(Point::new(100.0, 40.0), SURFACE);
        assert_eq!(s, ScreenPoint::new(640.0 + 10.0 + 50.0, 360.0 - 20.0 + 20.0));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = ViewTransform::default();
        view.set_zoom(10.0);
        assert_eq!(view.zoom(), MAX_ZOOM);
        view.set_zoom(0.0);
        assert_eq!(view.zoom(), MIN_ZOOM);

        let cursor = SURFACE.center();
        assert!(!view.zoom_at(cursor, SURFACE, -500.0));
        assert_eq!(view.zoom(), MIN_ZOOM);

        assert!(view.zoom_at(cursor, SURFACE, 1_000_000.0));
        assert_eq!(view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_zoom_keeps_cursor_anchor() {
        let mut view = ViewTransform::new(0.6, ScreenPoint::new(25.0, -40.0));
        let cursor = ScreenPoint::new(900.0, 150.0);
        let before = view.to_image(cursor, SURFACE);

        assert!(view.zoom_at(cursor, SURFACE, 250.0));
        assert!((view.zoom() - 0.85).abs() < 1e-12);

        let after = view.to_image(cursor, SURFACE);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut view = ViewTransform::new(2.0, ScreenPoint::new(5.0, 5.0));
        view.pan_by(3.0, -1.0);
        assert_eq!(view.pan(), ScreenPoint::new(8.0, 4.0));
        view.reset();
        assert_eq!(view, ViewTransform::default());
    }

    #[test]
    fn test_image_rect_contains_edges() {
        let view = ViewTransform::new(1.0, ScreenPoint::default());
        let rect = view.image_rect((200, 100), SURFACE);
        assert_eq!(rect.width(), 200.0);
        assert_eq!(rect.height(), 100.0);
        assert!(rect.contains(ScreenPoint::new(540.0, 310.0)));
        assert!(rect.contains(ScreenPoint::new(740.0, 410.0)));
        assert!(!rect.contains(ScreenPoint::new(740.5, 360.0)));
    }
}
