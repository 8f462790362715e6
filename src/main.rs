// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Perspective Guide
//!
//! A cross-platform desktop application that overlays 1/2/3/4-point
//! perspective guide lines on a reference image and exports them as a
//! transparent PNG.

mod app;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::PerspectiveApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = io::config::load_or_default();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("Perspective Guide"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Perspective Guide",
        options,
        Box::new(move |_cc| Ok(Box::new(PerspectiveApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
