// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Guide line appearance: density, color and stroke width.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_DENSITY: u8 = 1;
pub const MAX_DENSITY: u8 = 18;
pub const MIN_LINE_WIDTH: f32 = 0.5;
pub const MAX_LINE_WIDTH: f32 = 5.0;

/// An opaque sRGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuideColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl GuideColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for GuideColor {
    fn default() -> Self {
        Self::rgb(0x3b, 0x82, 0xf6)
    }
}

impl FromStr for GuideColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid color: {}", s));
        }
        let channel = |i: usize| -> Result<u8, String> {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| format!("Invalid color: {}", s))
        };

        match hex.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            3 => {
                let short: Vec<u8> = hex
                    .chars()
                    .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
                    .collect::<Option<_>>()
                    .filter(|digits: &Vec<u8>| digits.len() == 3)
                    .ok_or_else(|| format!("Invalid color: {}", s))?;
                Ok(Self::rgb(short[0], short[1], short[2]))
            }
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}

impl TryFrom<String> for GuideColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GuideColor> for String {
    fn from(color: GuideColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for GuideColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Appearance of the generated guide lines. Values are clamped on every write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideStyle {
    density: u8,
    color: GuideColor,
    width: f32,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            density: 10,
            color: GuideColor::default(),
            width: 1.0,
        }
    }
}

impl GuideStyle {
    pub fn new(density: i64, color: GuideColor, width: f32) -> Self {
        let mut style = Self::default();
        style.set_density(density);
        style.set_color(color);
        style.set_width(width);
        style
    }

    pub fn density(&self) -> u8 {
        self.density
    }

    pub fn color(&self) -> GuideColor {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_density(&mut self, density: i64) {
        self.density = density.clamp(MIN_DENSITY as i64, MAX_DENSITY as i64) as u8;
    }

    pub fn set_color(&mut self, color: GuideColor) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = if width.is_finite() {
            width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
        } else {
            1.0
        };
    }
}
