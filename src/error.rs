/*
error.rs

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

//! Errors raised while building and transforming puzzles.
//!
//! Every failure is synchronous and propagated to the immediate caller. Nothing is retried
//! internally, except by the random puzzle generator that rejects combinations and draws
//! new ones (see [`crate::generator::random_puzzle`]).

use thiserror::Error;

use crate::feature::Category;

/// Broad classes of puzzle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller provided values that do not satisfy an operation contract.
    Precondition,

    /// A grid could not be built because its two transitions do not commute.
    Invariant,

    /// A feature alphabet or a figure slot does not match its declared category.
    Membership,
}

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("slot {slot} cannot be transformed")]
    NotTransformable { slot: usize },

    #[error("slot {slot}: cannot transform index {index} by {amount}")]
    CannotTransform {
        slot: usize,
        index: usize,
        amount: i64,
    },

    #[error("slot {slot}: index {index} is out of range for an alphabet of {len} features")]
    IndexOutOfRange { slot: usize, index: usize, len: usize },

    #[error(
        "slot {slot}: ring amount {amount} must be smaller than the alphabet length ({len})"
    )]
    RingAmountTooLarge { slot: usize, amount: i64, len: usize },

    #[error("a puzzle needs one or two transitions, found {0}")]
    TransitionCount(usize),

    #[error("unknown {registry} entry {index}")]
    UnknownEntry { registry: &'static str, index: usize },

    #[error("cell [{row}][{column}] differs depending on the transition order")]
    NotCommutative { row: usize, column: usize },

    #[error("feature set {set}: feature {feature} does not belong to the {category:?} category")]
    Membership {
        set: String,
        feature: String,
        category: Category,
    },

    #[error("feature set {set}: feature {feature} cannot be drawn")]
    NotDrawable { set: String, feature: String },

    #[error("feature set {set} needs {expected} features, found {found}")]
    AlphabetLength {
        set: String,
        expected: usize,
        found: usize,
    },

    #[error("figure {figure}: slot {slot} expects {expected:?} features, found {found:?}")]
    SlotCategory {
        figure: String,
        slot: usize,
        expected: Category,
        found: Category,
    },

    #[error("no valid puzzle found after {attempts} attempts")]
    GenerationFailed { attempts: usize },
}

impl PuzzleError {
    /// Return the class of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PuzzleError::NotCommutative { .. } => ErrorKind::Invariant,
            PuzzleError::Membership { .. }
            | PuzzleError::NotDrawable { .. }
            | PuzzleError::AlphabetLength { .. }
            | PuzzleError::SlotCategory { .. } => ErrorKind::Membership,
            _ => ErrorKind::Precondition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_errors() {
        assert_eq!(
            PuzzleError::NotCommutative { row: 2, column: 2 }.kind(),
            ErrorKind::Invariant
        );
        assert_eq!(
            PuzzleError::AlphabetLength {
                set: "triple shape ring".to_string(),
                expected: 3,
                found: 2
            }
            .kind(),
            ErrorKind::Membership
        );
        assert_eq!(
            PuzzleError::NotTransformable { slot: 1 }.kind(),
            ErrorKind::Precondition
        );
    }

    #[test]
    fn error_messages() {
        let e: PuzzleError = PuzzleError::CannotTransform {
            slot: 0,
            index: 2,
            amount: 3,
        };
        assert_eq!(e.to_string(), "slot 0: cannot transform index 2 by 3");
    }
}
