// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry shared by the canvas renderer and the exporter.

pub mod fan;
pub mod geometry;
pub mod snap;
