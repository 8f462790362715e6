// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the reference image and perspective guides.
//!
//! This module renders the dimmed reference image, the line fans and the
//! vanishing point markers, and feeds pointer input to [`Interaction`].
//! The whole surface is repainted every frame from the projection state.

use super::interaction::{DragState, Interaction};
use crate::models::project::ProjectionState;
use crate::models::style::GuideColor;
use crate::util::fan::{line_fan, screen_ray_length};
use crate::util::geometry::{ScreenPoint, ScreenRect, SurfaceSize};
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke};

const BACKGROUND: Color32 = Color32::from_rgb(0x0f, 0x17, 0x2a);
const IMAGE_BACKING: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
const IMAGE_BORDER: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);
const OUTSIDE_MARKER: Color32 = Color32::from_rgb(0xf4, 0x3f, 0x5e);

/// Reference image opacity, so the guides stay readable.
const IMAGE_ALPHA: u8 = 102;

const MARKER_RADIUS: f32 = 8.0;

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasAction {
    None,
    StateChanged,
    OpenImage,
}

pub fn to_color32(color: GuideColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Display the canvas and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    state: &mut ProjectionState,
    interaction: &mut Interaction,
    image_texture: Option<&egui::TextureHandle>,
) -> CanvasAction {
    let Some(image_size) = state.image_size() else {
        return show_welcome(ui);
    };

    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let rect = response.rect;
    let surface = SurfaceSize::new(rect.width() as f64, rect.height() as f64);

    let to_local = |p: Pos2| ScreenPoint::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);
    let to_pos = |s: ScreenPoint| egui::pos2(rect.min.x + s.x as f32, rect.min.y + s.y as f32);

    let reset_rect = Rect::from_min_size(rect.right_top() + egui::vec2(-96.0, 12.0), egui::vec2(84.0, 24.0));
    let reset_clicked = ui.put(reset_rect, egui::Button::new("⟲ Reset view")).clicked();

    let mut changed = false;
    if reset_clicked {
        state.view.reset();
        changed = true;
    }

    // Pointer input
    let (pressed, released, pointer, scroll) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
            i.raw_scroll_delta.y,
        )
    });
    let inside = pointer.filter(|p| rect.contains(*p) && !reset_rect.contains(*p));
    // Windows, popups and menus drawn over the surface take the pointer
    let on_surface = inside.filter(|_| response.contains_pointer());

    if pressed {
        if let Some(pos) = on_surface {
            interaction.pointer_down(state, surface, to_local(pos));
            changed = true;
        }
    }
    if interaction.drag() != DragState::Idle {
        match inside {
            Some(pos) => changed |= interaction.pointer_move(state, surface, to_local(pos)),
            None => changed |= interaction.pointer_up(),
        }
    }
    if released {
        changed |= interaction.pointer_up();
    }
    if scroll != 0.0 {
        if let Some(pos) = on_surface {
            changed |= interaction.scroll(state, surface, to_local(pos), scroll as f64);
        }
    }

    if response.hovered() {
        let icon = match interaction.drag() {
            DragState::Panning { .. } => egui::CursorIcon::Grabbing,
            DragState::DraggingPoint(_) => egui::CursorIcon::Move,
            DragState::Idle => egui::CursorIcon::Crosshair,
        };
        ui.ctx().set_cursor_icon(icon);
    }

    // Reference image
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let image_bounds = state.view.image_rect(image_size, surface);
    let image_rect = Rect::from_min_max(to_pos(image_bounds.min), to_pos(image_bounds.max));
    painter.rect_filled(image_rect, 0.0, IMAGE_BACKING);
    if let Some(texture) = image_texture {
        painter.image(
            texture.id(),
            image_rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::from_white_alpha(IMAGE_ALPHA),
        );
    }
    painter.rect_stroke(image_rect, 0.0, Stroke::new(1.0, IMAGE_BORDER));

    // Guides
    draw_guides(&painter, state, interaction.drag(), surface, image_bounds, &to_pos);

    draw_status(&painter, rect, state);

    if changed {
        CanvasAction::StateChanged
    } else {
        CanvasAction::None
    }
}

fn draw_guides(
    painter: &egui::Painter,
    state: &ProjectionState,
    drag: DragState,
    surface: SurfaceSize,
    image_bounds: ScreenRect,
    to_pos: &dyn Fn(ScreenPoint) -> Pos2,
) {
    let line_color = to_color32(state.style.color());
    let line_stroke = Stroke::new(state.style.width(), line_color);
    let length = screen_ray_length(surface.width, surface.height, image_bounds.width(), image_bounds.height());

    for (index, vp) in state.points().iter().enumerate() {
        let screen = state.view.to_screen(*vp, surface);

        for ray in line_fan(screen, state.style.density(), length) {
            painter.line_segment([to_pos(ray.start), to_pos(ray.end)], line_stroke);
        }

        let fill = marker_fill(drag, index, image_bounds, screen, line_color);

        let center = to_pos(screen);
        for (spread, alpha) in [(4.0, 30), (2.0, 50)] {
            painter.circle_filled(center + egui::vec2(0.0, 1.0), MARKER_RADIUS + spread, Color32::from_black_alpha(alpha));
        }
        painter.circle_filled(center, MARKER_RADIUS, fill);
        painter.circle_stroke(center, MARKER_RADIUS, Stroke::new(2.0, Color32::WHITE));
    }
}

/// Marker color: white while dragged, rose outside the image, else the line color.
fn marker_fill(
    drag: DragState,
    index: usize,
    image_bounds: ScreenRect,
    screen: ScreenPoint,
    line_color: Color32,
) -> Color32 {
    if drag.dragged_point() == Some(index) {
        Color32::WHITE
    } else if image_bounds.contains(screen) {
        line_color
    } else {
        OUTSIDE_MARKER
    }
}

fn draw_status(painter: &egui::Painter, rect: Rect, state: &ProjectionState) {
    let font = FontId::monospace(11.0);
    let pan = state.view.pan();
    painter.text(
        rect.right_bottom() + egui::vec2(-12.0, -12.0),
        Align2::RIGHT_BOTTOM,
        format!(
            "Zoom: {:.0}% | Offset: {:.0}, {:.0}",
            state.view.zoom() * 100.0,
            pan.x,
            pan.y
        ),
        font.clone(),
        Color32::from_gray(160),
    );

    let (dot, label) = if state.snapping {
        (Color32::from_rgb(0x22, 0xc5, 0x5e), "Snapping on")
    } else {
        (Color32::from_gray(100), "Snapping off")
    };
    let anchor = rect.center_bottom() + egui::vec2(0.0, -16.0);
    painter.circle_filled(anchor + egui::vec2(-52.0, 0.0), 3.0, dot);
    painter.text(anchor + egui::vec2(-44.0, 0.0), Align2::LEFT_CENTER, label, font, Color32::from_gray(200));
}

/// Shown while no reference image is loaded.
fn show_welcome(ui: &mut egui::Ui) -> CanvasAction {
    let mut action = CanvasAction::None;

    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Perspective Guide")
                    .size(32.0)
                    .color(Color32::from_gray(200)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open a reference image to start placing vanishing points")
                    .color(Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            if ui.button("Open Image...").clicked() {
                action = CanvasAction::OpenImage;
            }
        });
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::perspective::{PerspectiveMode, Point};
    use egui::{Event, Modifiers, PointerButton, RawInput};

    fn frame(
        ctx: &egui::Context,
        events: Vec<Event>,
        state: &mut ProjectionState,
        interaction: &mut Interaction,
    ) -> CanvasAction {
        run_frame(ctx, events, state, interaction, None)
    }

    /// Runs one frame, optionally with a button in a floating area at `overlay`.
    fn run_frame(
        ctx: &egui::Context,
        events: Vec<Event>,
        state: &mut ProjectionState,
        interaction: &mut Interaction,
        overlay: Option<Pos2>,
    ) -> CanvasAction {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))),
            events,
            ..Default::default()
        };
        let mut action = CanvasAction::None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| action = show(ui, state, interaction, None));
            if let Some(pos) = overlay {
                egui::Area::new(egui::Id::new("overlay")).fixed_pos(pos).show(ctx, |ui| {
                    ui.add(egui::Button::new("OK").min_size(egui::vec2(60.0, 40.0)));
                });
            }
        });
        action
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_mouse_drag_moves_point() {
        let ctx = egui::Context::default();
        let mut state = ProjectionState::default();
        state.set_mode(PerspectiveMode::TwoPoint);
        state.attach_image(500, 400);
        state.snapping = false;
        let mut interaction = Interaction::default();

        // Point 1 sits at (400, 0) in the image, (640, 300) on screen.
        let grab = egui::pos2(640.0, 300.0);
        frame(&ctx, vec![Event::PointerMoved(grab)], &mut state, &mut interaction);
        frame(&ctx, vec![button(grab, true)], &mut state, &mut interaction);
        assert_eq!(interaction.drag(), DragState::DraggingPoint(1));

        let action = frame(&ctx, vec![Event::PointerMoved(egui::pos2(670.0, 330.0))], &mut state, &mut interaction);
        assert_eq!(action, CanvasAction::StateChanged);
        let moved = state.points()[1];
        assert!((moved.x - 450.0).abs() < 1e-3);
        assert!((moved.y - 50.0).abs() < 1e-3);

        frame(&ctx, vec![button(egui::pos2(670.0, 330.0), false)], &mut state, &mut interaction);
        assert_eq!(interaction.drag(), DragState::Idle);
        assert_eq!(state.points()[0], Point::new(-400.0, 0.0));
    }

    #[test]
    fn test_leaving_surface_ends_pan() {
        let ctx = egui::Context::default();
        let mut state = ProjectionState::default();
        state.attach_image(100, 100);
        let mut interaction = Interaction::default();

        let start = egui::pos2(50.0, 50.0);
        frame(&ctx, vec![Event::PointerMoved(start)], &mut state, &mut interaction);
        frame(&ctx, vec![button(start, true)], &mut state, &mut interaction);
        assert!(interaction.drag().is_panning());

        frame(&ctx, vec![Event::PointerGone], &mut state, &mut interaction);
        assert_eq!(interaction.drag(), DragState::Idle);
    }

    #[test]
    fn test_press_on_overlapping_area_is_ignored() {
        let ctx = egui::Context::default();
        let mut state = ProjectionState::default();
        state.attach_image(500, 400);
        let mut interaction = Interaction::default();

        // Point 0 sits at the surface center, (400, 300), under the button.
        let overlay = Some(egui::pos2(380.0, 280.0));
        let press = egui::pos2(400.0, 300.0);
        for _ in 0..2 {
            run_frame(&ctx, vec![Event::PointerMoved(press)], &mut state, &mut interaction, overlay);
        }
        run_frame(&ctx, vec![button(press, true)], &mut state, &mut interaction, overlay);
        assert_eq!(interaction.drag(), DragState::Idle);

        let moved = egui::pos2(450.0, 330.0);
        run_frame(&ctx, vec![Event::PointerMoved(moved)], &mut state, &mut interaction, overlay);
        run_frame(&ctx, vec![button(moved, false)], &mut state, &mut interaction, overlay);
        assert_eq!(interaction.drag(), DragState::Idle);
        assert_eq!(state.points()[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_marker_fill() {
        let bounds = ScreenRect {
            min: ScreenPoint::new(100.0, 100.0),
            max: ScreenPoint::new(300.0, 250.0),
        };
        let line = Color32::from_rgb(0x3b, 0x82, 0xf6);
        let inside = ScreenPoint::new(200.0, 200.0);
        let outside = ScreenPoint::new(50.0, 200.0);

        assert_eq!(marker_fill(DragState::Idle, 0, bounds, inside, line), line);
        assert_eq!(marker_fill(DragState::Idle, 0, bounds, outside, line), OUTSIDE_MARKER);
        assert_eq!(OUTSIDE_MARKER, Color32::from_rgb(0xf4, 0x3f, 0x5e));

        // The dragged marker is white wherever it is; the others keep their rule.
        assert_eq!(marker_fill(DragState::DraggingPoint(0), 0, bounds, outside, line), Color32::WHITE);
        assert_eq!(marker_fill(DragState::DraggingPoint(0), 0, bounds, inside, line), Color32::WHITE);
        assert_eq!(marker_fill(DragState::DraggingPoint(1), 0, bounds, inside, line), line);

        // Edges of the image rectangle count as inside.
        assert_eq!(marker_fill(DragState::Idle, 0, bounds, ScreenPoint::new(300.0, 250.0), line), line);
        assert_eq!(marker_fill(DragState::Idle, 0, bounds, ScreenPoint::new(100.0, 175.0), line), line);
        assert_eq!(marker_fill(DragState::Idle, 0, bounds, ScreenPoint::new(300.5, 250.0), line), OUTSIDE_MARKER);
    }
}
