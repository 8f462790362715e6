// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the projection state, loads reference
//! images in the background, schedules exports and routes UI actions.

use crate::error::Result;
use crate::io::config::GuideConfig;
use crate::io::export::{ExportJob, EXPORT_FILE_NAME};
use crate::io::media::{self, LoadedImage, IMAGE_EXTENSIONS};
use crate::models::perspective::PerspectiveMode;
use crate::models::project::ProjectionState;
use crate::ui::{canvas, controls, interaction::Interaction};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Main application state.
pub struct PerspectiveApp {
    /// Mode, vanishing points and display settings
    state: ProjectionState,

    /// Pointer drag state for the canvas
    interaction: Interaction,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<(PathBuf, LoadedImage)>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Export waiting to run on the next frame
    export: ExportJob,

    /// Error shown to the user until dismissed
    error_message: Option<String>,

    /// State changed since the last repaint request
    dirty: bool,

    /// Largest texture side the renderer accepts
    max_texture_side: usize,
}

impl PerspectiveApp {
    /// Create a new application instance from startup settings.
    pub fn new(config: &GuideConfig) -> Self {
        Self {
            state: ProjectionState::from_config(config),
            interaction: Interaction::default(),
            image_texture: None,
            image_loader: None,
            loading_message: None,
            export: ExportJob::default(),
            error_message: None,
            dirty: false,
            max_texture_side: 2048,
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn report_error(&mut self, message: String) {
        log::error!("{}", message);
        self.error_message = Some(message);
    }

    /// Ask for an image file with the native picker.
    fn open_image_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.load_image_file(path);
        }
    }

    /// Load an image file in the background.
    pub fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        let max_side = u32::try_from(self.max_texture_side).unwrap_or(u32::MAX);
        self.image_loader = Some(receiver);
        self.loading_message = Some(format!("Loading {}...", path.display()));

        std::thread::spawn(move || {
            let result = media::load_image(&path, max_side).map(|img| (path, img));
            let _ = sender.send(result);
        });
    }

    /// Install a finished background load, if one is ready.
    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok((path, loaded)) => {
                let display = &loaded.display;
                let size = [display.width() as usize, display.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, display.as_raw());
                let texture = ctx.load_texture("reference_image", color_image, egui::TextureOptions::LINEAR);

                self.image_texture = Some(texture);
                self.interaction.pointer_up();
                self.state.attach_image(loaded.width, loaded.height);
                self.mark_dirty();
                log::info!("Loaded image: {} ({}x{})", path.display(), loaded.width, loaded.height);
            }
            Err(e) => self.report_error(format!("Failed to load image: {}", e)),
        }
    }

    /// Pick a destination and queue the export for the next frame.
    fn request_export(&mut self, ctx: &egui::Context) {
        if self.export.is_busy() {
            log::warn!("Export already in progress");
            return;
        }
        if !self.state.has_image() {
            self.report_error("Load a reference image before exporting".to_string());
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(EXPORT_FILE_NAME)
            .save_file()
        {
            self.export.request(path, ctx.frame_nr());
            self.mark_dirty();
        }
    }

    fn run_pending_export(&mut self, ctx: &egui::Context) {
        if !self.export.is_busy() {
            return;
        }
        let snapshot = self.state.snapshot();
        match self.export.run(ctx.frame_nr(), &snapshot, self.state.image_size()) {
            Some(Ok(_)) => self.mark_dirty(),
            Some(Err(e)) => {
                self.report_error(format!("Export failed: {}", e));
                self.mark_dirty();
            }
            None => {}
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.state.view.reset();
            self.mark_dirty();
        }

        let keys = [egui::Key::Num1, egui::Key::Num2, egui::Key::Num3, egui::Key::Num4];
        for (key, mode) in keys.into_iter().zip(PerspectiveMode::ALL) {
            if ctx.input(|i| i.key_pressed(key)) && self.state.set_mode(mode) {
                self.interaction.pointer_up();
                self.mark_dirty();
            }
        }
    }

    fn show_error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.error_message = None;
                }
            });
    }
}

impl eframe::App for PerspectiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.max_texture_side = ctx.input(|i| i.max_texture_side);

        // An export queued in an earlier frame runs now, after the busy label was shown
        self.run_pending_export(ctx);

        self.poll_image_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Files dropped onto the window
        if let Some(path) = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone())) {
            self.load_image_file(path);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.open_image_dialog();
                        ui.close_menu();
                    }
                    let can_export = self.state.has_image() && !self.export.is_busy();
                    if ui.add_enabled(can_export, egui::Button::new("Export Guide PNG...")).clicked() {
                        self.request_export(ctx);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Reset View").clicked() {
                        self.state.view.reset();
                        self.mark_dirty();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Mode", |ui| {
                    for mode in PerspectiveMode::ALL {
                        if ui.radio(self.state.mode() == mode, mode.label()).clicked() {
                            if self.state.set_mode(mode) {
                                self.interaction.pointer_up();
                                self.mark_dirty();
                            }
                            ui.close_menu();
                        }
                    }
                });
            });
        });

        // Settings panel (left side)
        let controls_action = egui::SidePanel::left("controls")
            .default_width(280.0)
            .show(ctx, |ui| controls::show(ui, &mut self.state, self.export.is_busy()))
            .inner;

        match controls_action {
            controls::ControlsAction::OpenImage => self.open_image_dialog(),
            controls::ControlsAction::Export => self.request_export(ctx),
            controls::ControlsAction::SettingsChanged => {
                // A mode switch may have replaced the point being dragged
                if self.interaction.drag().dragged_point().is_some_and(|i| i >= self.state.points().len()) {
                    self.interaction.pointer_up();
                }
                self.mark_dirty();
            }
            controls::ControlsAction::None => {}
        }

        self.handle_keyboard(ctx);

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    canvas::show(ui, &mut self.state, &mut self.interaction, self.image_texture.as_ref())
                }
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::StateChanged => self.mark_dirty(),
            canvas::CanvasAction::OpenImage => self.open_image_dialog(),
            canvas::CanvasAction::None => {}
        }

        self.show_error_window(ctx);

        if self.dirty {
            self.dirty = false;
            ctx.request_repaint();
        }
    }
}
