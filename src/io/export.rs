// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Guide export to a transparent PNG.
//!
//! The export replays the canvas line fans at the reference image's native
//! resolution: no pan, zoom 1, origin at the center of the output image.

use crate::error::{GuideError, Result};
use crate::models::project::GuideSnapshot;
use crate::util::fan::{export_ray_length, line_fan};
use crate::util::geometry::ScreenPoint;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

pub const EXPORT_FILE_NAME: &str = "perspective_guide_export.png";

const MARKER_RADIUS: f32 = 5.0;

/// Render the guide lines into a transparent image of `width` x `height`.
pub fn render_guides(snapshot: &GuideSnapshot, width: u32, height: u32) -> Result<RgbaImage> {
    let mut pixmap = Pixmap::new(width, height).ok_or(GuideError::Surface { width, height })?;

    let color = snapshot.style.color();
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: snapshot.style.width(),
        ..Stroke::default()
    };

    let center = ScreenPoint::new(width as f64 / 2.0, height as f64 / 2.0);
    let length = export_ray_length(width, height);

    for vp in &snapshot.points {
        let origin = ScreenPoint::new(center.x + vp.x, center.y + vp.y);

        let mut pb = PathBuilder::new();
        for ray in line_fan(origin, snapshot.style.density(), length) {
            pb.move_to(ray.start.x as f32, ray.start.y as f32);
            pb.line_to(ray.end.x as f32, ray.end.y as f32);
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        let inside = origin.x >= 0.0 && origin.x <= width as f64 && origin.y >= 0.0 && origin.y <= height as f64;
        if inside {
            if let Some(marker) = PathBuilder::from_circle(origin.x as f32, origin.y as f32, MARKER_RADIUS) {
                pixmap.fill_path(&marker, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }

    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}

/// Render the guides for an image of the given size and write them as PNG.
pub fn export_png(snapshot: &GuideSnapshot, image_size: Option<(u32, u32)>, path: &Path) -> Result<()> {
    let (width, height) = image_size.ok_or(GuideError::NoImage)?;
    let img = render_guides(snapshot, width, height)?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("Exported {}x{} guide to {}", width, height, path.display());
    Ok(())
}

/// Export scheduling.
///
/// A request is parked until a later frame so the UI can show that it is
/// busy, then run synchronously. Requests made while busy are dropped.
#[derive(Debug, Default)]
pub enum ExportJob {
    #[default]
    Idle,
    Pending { path: PathBuf, queued_frame: u64 },
}

impl ExportJob {
    pub fn is_busy(&self) -> bool {
        matches!(self, ExportJob::Pending { .. })
    }

    /// Queue an export during `frame`. Returns `false` if one is already in flight.
    pub fn request(&mut self, path: PathBuf, frame: u64) -> bool {
        if self.is_busy() {
            log::warn!("Export already in progress, ignoring request for {}", path.display());
            return false;
        }
        *self = ExportJob::Pending {
            path,
            queued_frame: frame,
        };
        true
    }

    /// Run the pending export and return to idle.
    ///
    /// Nothing happens while idle or during the frame the export was queued in.
    pub fn run(
        &mut self,
        frame: u64,
        snapshot: &GuideSnapshot,
        image_size: Option<(u32, u32)>,
    ) -> Option<Result<PathBuf>> {
        match self {
            ExportJob::Pending { queued_frame, .. } if *queued_frame < frame => {}
            _ => return None,
        }
        let ExportJob::Pending { path, .. } = std::mem::take(self) else {
            return None;
        };
        Some(export_png(snapshot, image_size, &path).map(|()| path))
    }
}
