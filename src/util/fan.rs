// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Radial line fans around a vanishing point.
//!
//! Both the on-screen renderer and the PNG exporter build their lines from
//! [`line_fan`], which keeps the export identical to the overlay at 100% zoom.

use super::geometry::ScreenPoint;
use crate::models::style::{MAX_DENSITY, MIN_DENSITY};

/// Rays that are always drawn, whatever the density.
pub const CARDINAL_ANGLES: [u32; 4] = [0, 90, 180, 270];

/// Screen ray length multiplier over the largest surface/image extent.
pub const SCREEN_LENGTH_FACTOR: f64 = 5.0;

/// Export ray length multiplier over the largest image extent.
pub const EXPORT_LENGTH_FACTOR: f64 = 10.0;

/// A single guide line starting at a vanishing point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub angle: u32,
    pub start: ScreenPoint,
    pub end: ScreenPoint,
}

/// Angular step in degrees between the extra rays for a density.
pub fn angle_step(density: u8) -> u32 {
    let density = density.clamp(MIN_DENSITY, MAX_DENSITY) as u32;
    20 - density + 1
}

/// Ray angles in degrees: the cardinal cross followed by the density rays.
///
/// Multiples of 90 are left out of the density rays since the cross already
/// covers them.
pub fn ray_angles(density: u8) -> impl Iterator<Item = u32> + Clone {
    CARDINAL_ANGLES
        .iter()
        .copied()
        .chain((0..360).step_by(angle_step(density) as usize).filter(|a| a % 90 != 0))
}

/// Line segments radiating from `origin`, each `length` pixels long.
pub fn line_fan(origin: ScreenPoint, density: u8, length: f64) -> impl Iterator<Item = Ray> + Clone {
    ray_angles(density).map(move |angle| {
        let rad = (angle as f64).to_radians();
        Ray {
            angle,
            start: origin,
            end: ScreenPoint::new(origin.x + rad.cos() * length, origin.y + rad.sin() * length),
        }
    })
}

/// Ray length that reaches past every edge of the visible surface.
pub fn screen_ray_length(surface_w: f64, surface_h: f64, image_w: f64, image_h: f64) -> f64 {
    surface_w.max(surface_h).max(image_w).max(image_h) * SCREEN_LENGTH_FACTOR
}

/// Ray length for an export at native image resolution.
pub fn export_ray_length(image_w: u32, image_h: u32) -> f64 {
    image_w.max(image_h) as f64 * EXPORT_LENGTH_FACTOR
}
