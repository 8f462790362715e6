// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for image loading, configuration and guide export.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("No reference image is loaded")]
    NoImage,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cannot create a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GuideError>;
