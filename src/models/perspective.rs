// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Vanishing points and perspective modes.
//!
//! Points are stored in image pixel units relative to the image center, so
//! they are independent of how the image is currently displayed.

use serde::{Deserialize, Serialize};

/// A vanishing point offset from the image center, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Number and layout of vanishing points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerspectiveMode {
    #[default]
    OnePoint,
    TwoPoint,
    ThreePoint,
    FourPoint,
}

impl PerspectiveMode {
    pub const ALL: [PerspectiveMode; 4] = [
        PerspectiveMode::OnePoint,
        PerspectiveMode::TwoPoint,
        PerspectiveMode::ThreePoint,
        PerspectiveMode::FourPoint,
    ];

    /// Number of vanishing points this mode uses.
    pub fn point_count(self) -> usize {
        match self {
            PerspectiveMode::OnePoint => 1,
            PerspectiveMode::TwoPoint => 2,
            PerspectiveMode::ThreePoint => 3,
            PerspectiveMode::FourPoint => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerspectiveMode::OnePoint => "1-Point",
            PerspectiveMode::TwoPoint => "2-Point",
            PerspectiveMode::ThreePoint => "3-Point",
            PerspectiveMode::FourPoint => "4-Point",
        }
    }

    /// Initial vanishing point layout for an image of `width` x `height` pixels.
    ///
    /// Points start near or beyond the image edges, which is where vanishing
    /// points usually sit for a natural-looking guide.
    pub fn default_points(self, width: u32, height: u32) -> Vec<Point> {
        let w = width as f64;
        let h = height as f64;

        match self {
            PerspectiveMode::OnePoint => vec![Point::new(0.0, 0.0)],
            PerspectiveMode::TwoPoint => vec![Point::new(-w * 0.8, 0.0), Point::new(w * 0.8, 0.0)],
            PerspectiveMode::ThreePoint => vec![
                Point::new(-w * 0.8, -h * 0.2),
                Point::new(w * 0.8, -h * 0.2),
                Point::new(0.0, h * 0.8),
            ],
            PerspectiveMode::FourPoint => vec![
                Point::new(-w * 1.2, 0.0),
                Point::new(w * 1.2, 0.0),
                Point::new(0.0, -h * 1.2),
                Point::new(0.0, h * 1.2),
            ],
        }
    }
}
