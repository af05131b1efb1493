/*
feature.rs

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

//! Atomic puzzle features.
//!
//! A [`Feature`] is an immutable trait value that belongs to exactly one [`Category`]: a shape,
//! a color, or an integer magnitude.
//! Shapes and colors carry drawing parameters, magnitudes only carry a value.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Feature category.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Shape,
    Color,
    Magnitude,
}

/// Drawable shape kinds.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Shape {
    Triangle,
    Square,
    Circle,
    Diamond,
    Pentagon,
    Hexagon,
    Star,
}

impl Shape {
    /// Number of corners of the shape, or `None` for the circle.
    ///
    /// The star is drawn with alternating outer and inner corners, so it counts ten.
    pub fn corners(self) -> Option<usize> {
        match self {
            Shape::Triangle => Some(3),
            Shape::Square | Shape::Diamond => Some(4),
            Shape::Pentagon => Some(5),
            Shape::Hexagon => Some(6),
            Shape::Star => Some(10),
            Shape::Circle => None,
        }
    }

    /// Rotation, in radians, that puts the shape in its resting position.
    pub fn base_rotation(self) -> f64 {
        match self {
            // Flat base for the square, corner on top for the diamond
            Shape::Square => std::f64::consts::FRAC_PI_4,
            _ => 0.0,
        }
    }
}

/// Named colors.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Color {
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Gray,
}

impl Color {
    /// Color components, as integers between 0 and 255.
    pub fn rgba(self) -> (u8, u8, u8, u8) {
        match self {
            Color::Black => (0, 0, 0, 255),
            Color::Red => (0xe0, 0x1b, 0x24, 255),
            Color::Green => (0x26, 0xa2, 0x69, 255),
            Color::Blue => (0x1c, 0x71, 0xd8, 255),
            Color::Yellow => (0xf6, 0xd3, 0x2d, 255),
            Color::Purple => (0x91, 0x41, 0xac, 255),
            Color::Orange => (0xff, 0x78, 0x00, 255),
            Color::Gray => (0x9a, 0x99, 0x96, 255),
        }
    }
}

/// Feature value.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Feature {
    Shape(Shape),
    Color(Color),
    Magnitude(u32),
}

impl Feature {
    /// Return the category of the feature.
    pub fn category(&self) -> Category {
        match self {
            Feature::Shape(_) => Category::Shape,
            Feature::Color(_) => Category::Color,
            Feature::Magnitude(_) => Category::Magnitude,
        }
    }

    /// Whether the feature carries drawing parameters.
    pub fn is_drawable(&self) -> bool {
        !matches!(self, Feature::Magnitude(_))
    }

    pub fn as_shape(&self) -> Option<Shape> {
        match self {
            Feature::Shape(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Feature::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_magnitude(&self) -> Option<u32> {
        match self {
            Feature::Magnitude(m) => Some(*m),
            _ => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Feature::Shape(s) => write!(f, "{s:?}"),
            Feature::Color(c) => write!(f, "{c:?}"),
            Feature::Magnitude(m) => write!(f, "{m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(Feature::Shape(Shape::Circle).category(), Category::Shape);
        assert_eq!(Feature::Color(Color::Red).category(), Category::Color);
        assert_eq!(Feature::Magnitude(4).category(), Category::Magnitude);
    }

    #[test]
    fn magnitudes_are_not_drawable() {
        assert!(Feature::Shape(Shape::Star).is_drawable());
        assert!(Feature::Color(Color::Blue).is_drawable());
        assert!(!Feature::Magnitude(1).is_drawable());
    }

    #[test]
    fn shapes_from_repr() {
        assert_eq!(Shape::from_repr(0), Some(Shape::Triangle));
        assert_eq!(Shape::from_repr(6), Some(Shape::Star));
        assert_eq!(Shape::from_repr(7), None);
        assert_eq!(Color::from_repr(7), Some(Color::Gray));
    }

    #[test]
    fn display() {
        assert_eq!(Feature::Shape(Shape::Hexagon).to_string(), "Hexagon");
        assert_eq!(Feature::Magnitude(3).to_string(), "3");
    }
}
