/*
matrix.rs

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

//! Build the 3x3 grid of configurations.
//!
//! With one transition, the grid is a chain: the transition is applied eight times from the
//! seed and the nine values are laid out row by row.
//!
//! With two transitions, the first one moves left to right along the rows and the second one
//! moves top to bottom along the columns. The grid is only well defined when both orders reach
//! the same cells, so every column is rebuilt independently from the first row and compared to
//! the values filled by the rows.

use log::{Level, debug, log_enabled};

use crate::configuration::{Configuration, Transition};
use crate::error::PuzzleError;
use crate::figure::Figure;

/// Number of rows and columns.
pub const GRID_SIZE: usize = 3;

/// Grid of configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    /// Cells, row by row.
    cells: Vec<Configuration>,
}

impl Matrix {
    /// Build the grid by applying a single transition eight times from the seed.
    pub fn from_one_transition(
        figure: &Figure,
        seed: &Configuration,
        transition: &Transition,
    ) -> Result<Self, PuzzleError> {
        let mut cells: Vec<Configuration> = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        cells.push(seed.clone());
        for i in 1..GRID_SIZE * GRID_SIZE {
            let next: Configuration = figure.transform(&cells[i - 1], transition)?;
            cells.push(next);
        }
        let matrix: Matrix = Self { cells };
        matrix.debug();
        Ok(matrix)
    }

    /// Build the grid with `row_transition` along the rows and `column_transition` along the
    /// columns.
    ///
    /// # Errors
    ///
    /// Besides transform errors, the method returns [`PuzzleError::NotCommutative`] when a cell
    /// reached down the columns differs from the same cell reached along the rows. Such a
    /// combination of feature sets and transitions cannot produce a puzzle and must be rejected
    /// by the caller.
    pub fn from_two_transitions(
        figure: &Figure,
        seed: &Configuration,
        row_transition: &Transition,
        column_transition: &Transition,
    ) -> Result<Self, PuzzleError> {
        // First column
        let mut first_column: Vec<Configuration> = Vec::with_capacity(GRID_SIZE);
        first_column.push(seed.clone());
        for row in 1..GRID_SIZE {
            let next: Configuration = figure.transform(&first_column[row - 1], column_transition)?;
            first_column.push(next);
        }

        // Rows
        let mut cells: Vec<Configuration> = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for start in first_column {
            let mut current: Configuration = start;
            for _ in 1..GRID_SIZE {
                let next: Configuration = figure.transform(&current, row_transition)?;
                cells.push(current);
                current = next;
            }
            cells.push(current);
        }
        let matrix: Matrix = Self { cells };
        matrix.debug();

        // Rebuild the other columns from the first row and compare
        for column in 1..GRID_SIZE {
            let mut current: Configuration = matrix.get(0, column).clone();
            for row in 1..GRID_SIZE {
                current = figure.transform(&current, column_transition)?;
                if current != *matrix.get(row, column) {
                    debug!(
                        "Cell [{row}][{column}]: {} along the rows, {current} down the column",
                        matrix.get(row, column)
                    );
                    return Err(PuzzleError::NotCommutative { row, column });
                }
            }
        }
        Ok(matrix)
    }

    /// Return the cell at the given row and column.
    ///
    /// # Panics
    ///
    /// The method panics when the row or the column is not smaller than [`GRID_SIZE`].
    pub fn get(&self, row: usize, column: usize) -> &Configuration {
        assert!(row < GRID_SIZE && column < GRID_SIZE);
        &self.cells[row * GRID_SIZE + column]
    }

    /// Return the expected answer, which is the bottom right cell.
    pub fn answer(&self) -> &Configuration {
        self.get(GRID_SIZE - 1, GRID_SIZE - 1)
    }

    /// Return the cells, row by row.
    pub fn cells(&self) -> &[Configuration] {
        &self.cells
    }

    /// Return the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Configuration]> {
        self.cells.chunks(GRID_SIZE)
    }

    fn debug(&self) {
        if log_enabled!(Level::Debug) {
            for row in self.rows() {
                let row: Vec<String> = row.iter().map(|c| c.to_string()).collect();
                debug!("    {}", row.join(" "));
            }
        }
    }
}
