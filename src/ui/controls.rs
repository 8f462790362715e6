// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Guide settings panel.
//!
//! This module provides the side panel for choosing the perspective mode,
//! line appearance and workspace zoom, and for opening and exporting files.

use super::canvas::to_color32;
use crate::models::perspective::PerspectiveMode;
use crate::models::project::ProjectionState;
use crate::models::style::{GuideColor, MAX_DENSITY, MAX_LINE_WIDTH, MIN_DENSITY, MIN_LINE_WIDTH};

/// Slider range for the workspace zoom. Wheel zoom can go further.
const ZOOM_SLIDER_RANGE: std::ops::RangeInclusive<f64> = 0.1..=1.5;

/// Result of control panel interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsAction {
    None,
    SettingsChanged,
    OpenImage,
    Export,
}

/// Display the settings panel.
pub fn show(ui: &mut egui::Ui, state: &mut ProjectionState, exporting: bool) -> ControlsAction {
    let mut action = ControlsAction::None;
    let mut changed = false;

    ui.heading("Files");
    let open_label = if state.has_image() {
        "Replace Reference Image..."
    } else {
        "Open Reference Image..."
    };
    if ui.button(open_label).clicked() {
        action = ControlsAction::OpenImage;
    }

    ui.separator();
    ui.heading("Perspective");
    ui.horizontal_wrapped(|ui| {
        let mut mode = state.mode();
        for candidate in PerspectiveMode::ALL {
            ui.selectable_value(&mut mode, candidate, candidate.label());
        }
        changed |= state.set_mode(mode);
    });

    ui.separator();
    ui.heading("Lines");

    let mut density = state.style.density() as i64;
    if ui
        .add(egui::Slider::new(&mut density, MIN_DENSITY as i64..=MAX_DENSITY as i64).text("Density"))
        .changed()
    {
        state.style.set_density(density);
        changed = true;
    }

    let mut width = state.style.width();
    if ui
        .add(
            egui::Slider::new(&mut width, MIN_LINE_WIDTH..=MAX_LINE_WIDTH)
                .step_by(0.5)
                .text("Width"),
        )
        .changed()
    {
        state.style.set_width(width);
        changed = true;
    }

    ui.horizontal(|ui| {
        let color = state.style.color();
        let mut rgb = [color.r, color.g, color.b];
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            state.style.set_color(GuideColor::rgb(rgb[0], rgb[1], rgb[2]));
            changed = true;
        }
        ui.label(egui::RichText::new(state.style.color().to_string()).monospace().color(to_color32(state.style.color())));
    });

    ui.separator();
    ui.heading("View");

    let mut zoom = state.view.zoom();
    if ui
        .add(
            egui::Slider::new(&mut zoom, ZOOM_SLIDER_RANGE)
                .clamp_to_range(false)
                .step_by(0.05)
                .custom_formatter(|z, _| format!("{:.0}%", z * 100.0))
                .text("Zoom"),
        )
        .changed()
    {
        state.view.set_zoom(zoom);
        changed = true;
    }

    changed |= ui.checkbox(&mut state.snapping, "Snap to alignment").changed();

    if ui.button("Reset View (R)").clicked() {
        state.view.reset();
        changed = true;
    }

    ui.separator();
    ui.heading("Export");

    let label = if exporting { "Processing..." } else { "Export Guide PNG..." };
    if ui
        .add_enabled(state.has_image() && !exporting, egui::Button::new(label))
        .clicked()
    {
        action = ControlsAction::Export;
    }
    ui.label(
        egui::RichText::new("Exports only the guide lines on a transparent background at the image's native size.")
            .small()
            .weak(),
    );

    if action == ControlsAction::None && changed {
        ControlsAction::SettingsChanged
    } else {
        action
    }
}
