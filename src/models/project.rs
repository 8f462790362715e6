// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Projection state management.
//!
//! This module owns the perspective mode, the vanishing points and the
//! display settings. It is the only place where points are (re)seeded.

use super::perspective::{PerspectiveMode, Point};
use super::style::GuideStyle;
use crate::io::config::GuideConfig;
use crate::util::geometry::ViewTransform;

/// Immutable view of what the renderer and exporter need to draw guides.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideSnapshot {
    pub points: Vec<Point>,
    pub style: GuideStyle,
}

/// Complete perspective guide state.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    mode: PerspectiveMode,
    vanishing_points: Vec<Point>,
    image_size: Option<(u32, u32)>,
    pub style: GuideStyle,
    pub view: ViewTransform,
    pub snapping: bool,
}

impl Default for ProjectionState {
    fn default() -> Self {
        Self::from_config(&GuideConfig::default())
    }
}

impl ProjectionState {
    /// Create an empty state (no image, no points) from startup settings.
    pub fn from_config(config: &GuideConfig) -> Self {
        let mut view = ViewTransform::default();
        view.set_zoom(config.workspace_zoom);

        Self {
            mode: config.mode,
            vanishing_points: Vec::new(),
            image_size: None,
            style: GuideStyle::new(config.line_density, config.line_color, config.line_width),
            view,
            snapping: config.enable_snapping,
        }
    }

    pub fn mode(&self) -> PerspectiveMode {
        self.mode
    }

    pub fn points(&self) -> &[Point] {
        &self.vanishing_points
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn has_image(&self) -> bool {
        self.image_size.is_some()
    }

    /// Register a newly decoded image and seed default points for the
    /// current mode. Replacing an image reseeds as well, since existing
    /// points are relative to the old image size.
    pub fn attach_image(&mut self, width: u32, height: u32) {
        self.image_size = Some((width, height));
        self.reseed();
    }

    /// Switch perspective mode. Returns `true` if the mode changed.
    pub fn set_mode(&mut self, mode: PerspectiveMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.reseed();
        log::info!("Perspective mode set to {}", mode.label());
        true
    }

    /// Replace the point at `index`. Out of range indices are ignored.
    pub fn set_point(&mut self, index: usize, point: Point) -> bool {
        match self.vanishing_points.get_mut(index) {
            Some(slot) if *slot != point => {
                *slot = point;
                true
            }
            _ => false,
        }
    }

    pub fn snapshot(&self) -> GuideSnapshot {
        GuideSnapshot {
            points: self.vanishing_points.clone(),
            style: self.style,
        }
    }

    fn reseed(&mut self) {
        self.vanishing_points = match self.image_size {
            Some((w, h)) => self.mode.default_points(w, h),
            None => Vec::new(),
        };
    }
}
