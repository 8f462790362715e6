// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer interaction on the canvas.
//!
//! A press either grabs a vanishing point or starts panning; the grab lasts
//! until the pointer is released or leaves the surface. Wheel zoom is
//! independent of the drag state.

use crate::models::project::ProjectionState;
use crate::util::geometry::{ScreenPoint, SurfaceSize};
use crate::util::snap::snap_point;

/// Grab distance around a point marker, in screen pixels.
pub const HIT_RADIUS_PX: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingPoint(usize),
    Panning { last: ScreenPoint },
}

impl DragState {
    pub fn dragged_point(&self) -> Option<usize> {
        match self {
            DragState::DraggingPoint(index) => Some(*index),
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, DragState::Panning { .. })
    }
}

/// Index of the first point whose marker is under `pos`.
pub fn hit_test(state: &ProjectionState, surface: SurfaceSize, pos: ScreenPoint) -> Option<usize> {
    state
        .points()
        .iter()
        .position(|p| state.view.to_screen(*p, surface).distance(pos) < HIT_RADIUS_PX)
}

/// Translates pointer events into state changes.
#[derive(Debug, Default)]
pub struct Interaction {
    drag: DragState,
}

impl Interaction {
    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn pointer_down(&mut self, state: &ProjectionState, surface: SurfaceSize, pos: ScreenPoint) {
        self.drag = match hit_test(state, surface, pos) {
            Some(index) => {
                log::debug!("Started dragging vanishing point {}", index);
                DragState::DraggingPoint(index)
            }
            None => DragState::Panning { last: pos },
        };
    }

    /// Apply a pointer move. Returns `true` if the state changed.
    pub fn pointer_move(&mut self, state: &mut ProjectionState, surface: SurfaceSize, pos: ScreenPoint) -> bool {
        match self.drag {
            DragState::Idle => false,
            DragState::DraggingPoint(index) => {
                let mut point = state.view.to_image(pos, surface);
                if state.snapping {
                    point = snap_point(point, state.points(), index, state.view.zoom());
                }
                state.set_point(index, point)
            }
            DragState::Panning { last } => {
                let (dx, dy) = (pos.x - last.x, pos.y - last.y);
                self.drag = DragState::Panning { last: pos };
                if dx == 0.0 && dy == 0.0 {
                    return false;
                }
                state.view.pan_by(dx, dy);
                true
            }
        }
    }

    /// Pointer released or left the surface.
    pub fn pointer_up(&mut self) -> bool {
        if let DragState::DraggingPoint(index) = self.drag {
            log::debug!("Stopped dragging vanishing point {}", index);
        }
        let was_active = self.drag != DragState::Idle;
        self.drag = DragState::Idle;
        was_active
    }

    /// Wheel zoom around the cursor. Returns `true` if the zoom changed.
    pub fn scroll(&mut self, state: &mut ProjectionState, surface: SurfaceSize, pos: ScreenPoint, delta: f64) -> bool {
        let changed = state.view.zoom_at(pos, surface, delta);
        if changed {
            log::debug!("Zoom {:.0}%", state.view.zoom() * 100.0);
        }
        changed
    }
}
