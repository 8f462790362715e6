// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for reference images, settings and guide export.

pub mod config;
pub mod export;
pub mod media;
