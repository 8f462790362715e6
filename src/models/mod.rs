// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for perspective guides.

pub mod perspective;
pub mod project;
pub mod style;
