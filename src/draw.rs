/*
draw.rs

Copyright 2025 Hervé Quatremain

This file is part of Raven Matrix.

Raven Matrix is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Raven Matrix is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Raven Matrix. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Draw puzzle figures.
//!
//! Figures do not draw themselves. They turn a configuration into a list of [`Primitive`]
//! objects, in the order they must be painted, and hand that list to a [`Backend`].
//!
//! [`SvgBackend`] is the backend shipped with the crate. It produces in-memory SVG documents,
//! which the command-line interface writes to files.
//! Coordinates in primitives are normalized: the tile spans `0.0..1.0` on both axes.

use log::debug;
use std::f64::consts::PI;
use std::fmt::Write;

use crate::feature::Shape;

/// Drawing parameters of one drawable feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// Geometry.
    pub shape: Shape,

    /// Center of the shape, in normalized tile coordinates.
    pub center: (f64, f64),

    /// Radius of the circle that contains the shape.
    pub radius: f64,

    /// Rotation in radians, added to the resting position of the shape.
    pub rotation: f64,

    /// Stroke color. Components are integers between 0 and 255.
    pub stroke: (u8, u8, u8, u8),

    /// Fill color, or `None` for an outline.
    pub fill: Option<(u8, u8, u8, u8)>,

    /// Line width, in normalized tile coordinates.
    pub line_width: f64,
}

impl Primitive {
    /// Create a black outline centered in the tile.
    pub fn outline(shape: Shape, radius: f64) -> Self {
        Self {
            shape,
            center: (0.5, 0.5),
            radius,
            rotation: 0.0,
            stroke: (0, 0, 0, 255),
            fill: None,
            line_width: 0.02,
        }
    }

    /// Return the corners of the shape, or `None` for a circle.
    pub fn points(&self) -> Option<Vec<(f64, f64)>> {
        let corners: usize = self.shape.corners()?;
        let rotation: f64 = self.shape.base_rotation() + self.rotation;
        let (cx, cy) = self.center;
        let points: Vec<(f64, f64)> = (0..corners)
            .map(|i| {
                // Stars alternate between the outer radius and an inner one
                let r: f64 = if self.shape == Shape::Star && i % 2 == 1 {
                    self.radius * 0.45
                } else {
                    self.radius
                };
                // First corner points up
                let angle: f64 = rotation - PI / 2.0 + 2.0 * PI * i as f64 / corners as f64;
                (cx + r * angle.cos(), cy + r * angle.sin())
            })
            .collect();
        Some(points)
    }
}

/// Drawing backend.
///
/// Implementations must be pure: the same primitives always give the same image.
pub trait Backend {
    /// Image produced by the backend.
    type Image;

    /// Draw the primitives, in order, on a new tile.
    fn draw_tile(&self, primitives: &[Primitive]) -> Self::Image;

    /// Paste equal-size tiles into a grid of `columns` columns, row by row.
    /// `None` tiles are left blank.
    fn contact_sheet(&self, tiles: &[Option<Self::Image>], columns: usize) -> Self::Image;
}

/// SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgImage {
    pub width: u32,
    pub height: u32,

    /// Elements between the `<svg>` tags.
    body: String,
}

impl SvgImage {
    /// Return the complete SVG document.
    pub fn to_document(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// In-memory SVG backend.
#[derive(Debug, Clone, Copy)]
pub struct SvgBackend {
    /// Width and height of a tile, in pixels.
    pub tile_size: u32,
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TILE_SIZE)
    }
}

impl SvgBackend {
    /// Create a [`SvgBackend`] object.
    pub fn new(tile_size: u32) -> Self {
        Self { tile_size }
    }

    fn css_color(color: Option<(u8, u8, u8, u8)>) -> String {
        match color {
            None => "none".to_string(),
            Some((r, g, b, a)) => {
                format!("rgba({r},{g},{b},{:.3})", f64::from(a) / 255.0)
            }
        }
    }

    /// Write one primitive as an SVG element.
    fn write_primitive(&self, out: &mut String, p: &Primitive) {
        let size: f64 = f64::from(self.tile_size);
        let style: String = format!(
            "stroke=\"{}\" fill=\"{}\" stroke-width=\"{:.2}\"",
            Self::css_color(Some(p.stroke)),
            Self::css_color(p.fill),
            p.line_width * size
        );
        // Writing to a String cannot fail
        let _ = match p.points() {
            None => writeln!(
                out,
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {style}/>",
                p.center.0 * size,
                p.center.1 * size,
                p.radius * size
            ),
            Some(points) => {
                let points: Vec<String> = points
                    .iter()
                    .map(|(x, y)| format!("{:.2},{:.2}", x * size, y * size))
                    .collect();
                writeln!(out, "<polygon points=\"{}\" {style}/>", points.join(" "))
            }
        };
    }
}

impl Backend for SvgBackend {
    type Image = SvgImage;

    fn draw_tile(&self, primitives: &[Primitive]) -> SvgImage {
        let mut body: String = String::new();
        let _ = writeln!(
            body,
            "<rect width=\"{s}\" height=\"{s}\" fill=\"white\"/>",
            s = self.tile_size
        );
        for p in primitives {
            self.write_primitive(&mut body, p);
        }
        SvgImage {
            width: self.tile_size,
            height: self.tile_size,
            body,
        }
    }

    fn contact_sheet(&self, tiles: &[Option<SvgImage>], columns: usize) -> SvgImage {
        let columns: usize = columns.max(1);
        let rows: usize = tiles.len().div_ceil(columns);
        let width: u32 = self.tile_size * columns as u32;
        let height: u32 = self.tile_size * rows as u32;
        debug!("Contact sheet: {columns}x{rows} tiles, {width}x{height} pixels");

        let mut body: String = String::new();
        let _ = writeln!(body, "<rect width=\"{width}\" height=\"{height}\" fill=\"white\"/>");
        for (i, tile) in tiles.iter().enumerate() {
            let x: u32 = (i % columns) as u32 * self.tile_size;
            let y: u32 = (i / columns) as u32 * self.tile_size;
            let _ = writeln!(
                body,
                "<g transform=\"translate({x},{y})\">\n<rect width=\"{s}\" height=\"{s}\" fill=\"none\" stroke=\"black\"/>",
                s = self.tile_size
            );
            if let Some(tile) = tile {
                body.push_str(&tile.body);
            }
            body.push_str("</g>\n");
        }
        SvgImage {
            width,
            height,
            body,
        }
    }
}
