/*
generator.rs

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

//! Build puzzle grids, wrong answers, and random puzzles.
//!
//! A puzzle is built in two steps:
//!
//! * The grid, represented by a [`matrix::Matrix`] object, is built from a seed configuration
//!   and one or two transitions by using [`matrix::Matrix::from_one_transition`] or
//!   [`matrix::Matrix::from_two_transitions`].
//!   With two transitions, the grid is rejected if the transitions do not commute.
//!
//! * The wrong answers are collected by a [`distractors::Distractors`] object that walks from
//!   the seed with the puzzle transitions, and optionally with random ones.
//!
//! [`random_puzzle::RandomPuzzle`] draws complete puzzle specifications from a registry and only
//! returns the ones that can be built.

pub mod distractors;
pub mod matrix;
pub mod random_puzzle;
