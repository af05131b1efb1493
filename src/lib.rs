/*
lib.rs

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

//! Raven's Progressive Matrices style puzzles.
//!
//! A puzzle is a 3x3 grid of figures. Each figure is described by a [`configuration::Configuration`],
//! one alphabet index per [`figure::Figure`] slot, and the grid evolves along one or two
//! [`configuration::Transition`] rules. The bottom right cell is the answer, hidden among
//! wrong answers generated by [`generator::distractors`].
//!
//! Puzzles are stateless: a [`puzzle::PuzzleSpec`] only stores registry positions and integers,
//! and [`codec`] turns it into a URL-safe identifier that rebuilds the exact same puzzle.
//!
//! ```
//! use raven_matrix::codec::PuzzleCodec;
//! use raven_matrix::generator::random_puzzle::{Mode, RandomPuzzle};
//! use raven_matrix::registry::Registry;
//!
//! let registry = Registry::builtin();
//! let spec = RandomPuzzle::new(&registry, Mode::Two)
//!     .generate(&mut rand::rng())
//!     .unwrap();
//! let codec = PuzzleCodec::new(&registry);
//! let id = codec.encode(&spec).unwrap();
//! assert_eq!(codec.decode(&id).unwrap(), spec);
//! ```

pub mod codec;
pub mod config;
pub mod configuration;
pub mod draw;
pub mod error;
pub mod feature;
pub mod feature_set;
pub mod figure;
pub mod generator;
pub mod puzzle;
pub mod registry;
