// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Snap-to-alignment for dragged vanishing points.

use crate::models::perspective::Point;

/// Snap distance as perceived on screen, independent of zoom.
pub const SNAP_DISTANCE_PX: f64 = 12.0;

/// Pull `candidate` onto the x/y axis of another point or the image center.
///
/// Each axis snaps on its own. When several targets are in range the nearest
/// one wins, and exact ties go to the earlier target (other points in list
/// order, then the center axis).
pub fn snap_point(candidate: Point, points: &[Point], dragged: usize, zoom: f64) -> Point {
    let threshold = SNAP_DISTANCE_PX / zoom;
    let others = || {
        points
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != dragged)
            .map(|(_, p)| *p)
    };

    Point::new(
        snap_axis(candidate.x, others().map(|p| p.x), threshold),
        snap_axis(candidate.y, others().map(|p| p.y), threshold),
    )
}

fn snap_axis(value: f64, targets: impl Iterator<Item = f64>, threshold: f64) -> f64 {
    let mut best: Option<(f64, f64)> = None;

    for target in targets.chain(std::iter::once(0.0)) {
        let distance = (value - target).abs();
        if distance >= threshold {
            continue;
        }
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((target, distance)),
        }
    }

    best.map_or(value, |(target, _)| target)
}
