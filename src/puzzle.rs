/*
puzzle.rs

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

//! Puzzle specifications and built puzzles.
//!
//! A [`PuzzleSpec`] only holds registry positions and integers, so it can be turned into a
//! compact identifier (see [`crate::codec`]).
//! A [`Puzzle`] is the specification resolved against a registry: the figure, the grid, and
//! the expected answer.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::configuration::{Configuration, Transition};
use crate::draw::Backend;
use crate::error::PuzzleError;
use crate::figure::Figure;
use crate::generator::distractors::Distractors;
use crate::generator::matrix::{GRID_SIZE, Matrix};
use crate::registry::Registry;

/// Puzzle specification.
///
/// Field names are kept short because they end up in puzzle identifiers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleSpec {
    /// Position of the figure kind in the registry.
    #[serde(rename = "g")]
    pub figure: usize,

    /// Position of the feature set kind of each slot.
    #[serde(rename = "s")]
    pub feature_sets: Vec<usize>,

    /// Positions of the features of each slot alphabet.
    #[serde(rename = "f")]
    pub alphabets: Vec<Vec<usize>>,

    /// Top left cell.
    #[serde(rename = "c")]
    pub seed: Configuration,

    /// One transition (chain) or two transitions (rows, then columns).
    #[serde(rename = "t")]
    pub transitions: Vec<Transition>,
}

/// Answer choices, as displayed under the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices {
    /// Shuffled configurations, the answer included.
    pub configurations: Vec<Configuration>,

    /// Position of the answer in [`Choices::configurations`].
    pub answer: usize,
}

/// Built puzzle.
#[derive(Debug, Clone)]
pub struct Puzzle {
    spec: PuzzleSpec,
    figure: Figure,
    matrix: Matrix,
}

impl Puzzle {
    /// Create a [`Puzzle`] object by resolving the specification against the registry.
    ///
    /// # Errors
    ///
    /// The method returns an error when a registry position is unknown, when an alphabet does
    /// not fit its feature set, when the seed is out of range, when the number of transitions
    /// is not one or two, when a ring amount is not smaller than its alphabet, or when the grid
    /// cannot be built.
    pub fn from_spec(registry: &Registry, spec: PuzzleSpec) -> Result<Self, PuzzleError> {
        let figure: Figure =
            registry.build_figure(spec.figure, &spec.feature_sets, &spec.alphabets)?;
        figure.check_configuration(&spec.seed)?;
        for t in &spec.transitions {
            figure.check_transition(t)?;
        }
        let matrix: Matrix = match spec.transitions.as_slice() {
            [t] => Matrix::from_one_transition(&figure, &spec.seed, t)?,
            [t1, t2] => Matrix::from_two_transitions(&figure, &spec.seed, t1, t2)?,
            other => return Err(PuzzleError::TransitionCount(other.len())),
        };
        debug!(
            "Puzzle {} with {} transition(s), answer {}",
            figure.kind().name(),
            spec.transitions.len(),
            matrix.answer()
        );
        Ok(Self {
            spec,
            figure,
            matrix,
        })
    }

    pub fn spec(&self) -> &PuzzleSpec {
        &self.spec
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Return the expected answer (bottom right cell).
    pub fn answer(&self) -> &Configuration {
        self.matrix.answer()
    }

    /// Return all the wrong answers found by walking from the seed.
    ///
    /// `extra_rounds` random legs are added to the walk, drawn from `rng`.
    pub fn distractors<R: Rng + ?Sized>(
        &self,
        extra_rounds: usize,
        rng: &mut R,
    ) -> Vec<Configuration> {
        Distractors::new(&self.figure)
            .with_extra_rounds(extra_rounds)
            .generate(
                &self.spec.seed,
                &self.spec.transitions[0],
                self.spec.transitions.get(1),
                self.answer(),
                rng,
            )
    }

    /// Return up to `count` answer choices: the answer and randomly selected decoys, shuffled.
    ///
    /// Decoys that are already displayed in the grid are avoided when there are enough others.
    pub fn choices<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Choices {
        let (mut hidden, mut visible): (Vec<Configuration>, Vec<Configuration>) = self
            .distractors(2, rng)
            .into_iter()
            .partition(|c| !self.matrix.cells().contains(c));
        hidden.shuffle(rng);
        visible.shuffle(rng);
        let mut decoys: Vec<Configuration> = hidden;
        decoys.extend(visible);
        decoys.truncate(count.saturating_sub(1));

        let mut configurations: Vec<Configuration> = decoys;
        configurations.push(self.answer().clone());
        configurations.shuffle(rng);
        let answer: usize = configurations
            .iter()
            .position(|c| c == self.answer())
            .unwrap_or(0);
        Choices {
            configurations,
            answer,
        }
    }

    /// Render the grid as a 3x3 contact sheet.
    ///
    /// When `blank_answer` is set, the bottom right cell is left empty.
    pub fn render<B: Backend>(
        &self,
        backend: &B,
        blank_answer: bool,
    ) -> Result<B::Image, PuzzleError> {
        let last: usize = GRID_SIZE * GRID_SIZE - 1;
        let mut tiles: Vec<Option<B::Image>> = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for (i, c) in self.matrix.cells().iter().enumerate() {
            if blank_answer && i == last {
                tiles.push(None);
            } else {
                tiles.push(Some(self.figure.render(backend, c)?));
            }
        }
        Ok(backend.contact_sheet(&tiles, GRID_SIZE))
    }
}
