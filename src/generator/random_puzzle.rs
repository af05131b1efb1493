/*
random_puzzle.rs

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

//! Generate random puzzle specifications.
//!
//! The generator draws a figure kind, a feature set and an alphabet for every slot, a seed, and
//! one or two transitions. Amounts are drawn so that ring slots stay below their alphabet
//! length and bounded slots stay inside their alphabet over the whole grid.
//!
//! Every drawn specification is built with [`Puzzle::from_spec`] before being returned.
//! Combinations that cannot be built (for example transitions that do not commute) are
//! rejected, and another combination is drawn.

use clap::ValueEnum;
use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_ALPHABET_LEN, MAX_ATTEMPTS};
use crate::configuration::{Configuration, Transition};
use crate::error::PuzzleError;
use crate::feature::Category;
use crate::feature_set::{FeatureSetKind, TransformRule};
use crate::figure::FigureKind;
use crate::puzzle::{Puzzle, PuzzleSpec};
use crate::registry::Registry;

/// Number of transitions in the generated puzzles.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum Mode {
    /// One transition applied along the reading order.
    One,

    /// A row transition and a column transition.
    #[default]
    Two,
}

impl Mode {
    /// Number of times a transition is applied between the seed and the last cell.
    fn steps(self) -> usize {
        match self {
            Mode::One => 8,
            Mode::Two => 2,
        }
    }

    fn num_transitions(self) -> usize {
        match self {
            Mode::One => 1,
            Mode::Two => 2,
        }
    }
}

/// Random puzzle generator.
pub struct RandomPuzzle<'a> {
    registry: &'a Registry,
    mode: Mode,

    /// Number of drawn combinations before giving up.
    max_attempts: usize,

    /// Number of combinations drawn by the last call to [`RandomPuzzle::generate`].
    pub iteration: usize,
}

impl<'a> RandomPuzzle<'a> {
    /// Create a [`RandomPuzzle`] object.
    pub fn new(registry: &'a Registry, mode: Mode) -> Self {
        Self {
            registry,
            mode,
            max_attempts: MAX_ATTEMPTS,
            iteration: 0,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Generate and return a random puzzle specification.
    ///
    /// # Errors
    ///
    /// The method returns [`PuzzleError::GenerationFailed`] when no valid combination is found
    /// after the maximum number of attempts, which happens when the registry cannot produce
    /// any puzzle for the mode.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PuzzleSpec, PuzzleError> {
        self.iteration = 0;
        while self.iteration < self.max_attempts {
            self.iteration += 1;
            let Some(spec) = self.draw(rng) else {
                continue;
            };
            match Puzzle::from_spec(self.registry, spec.clone()) {
                Ok(_) => {
                    info!(
                        "Puzzle generated after {} attempt(s): {spec:?}",
                        self.iteration
                    );
                    return Ok(spec);
                }
                Err(e) => debug!("    Rejected {spec:?}: {e}"),
            }
        }
        Err(PuzzleError::GenerationFailed {
            attempts: self.iteration,
        })
    }

    /// Draw a combination. Return `None` when the drawn figure cannot be completed.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PuzzleSpec> {
        let figure: usize = rng.random_range(0..self.registry.figures.len().max(1));
        let kind: FigureKind = *self.registry.figures.get(figure)?;
        debug!("Drawing a {} puzzle", kind.name());

        let num_slots: usize = kind.num_slots();
        let mut feature_sets: Vec<usize> = Vec::with_capacity(num_slots);
        let mut alphabets: Vec<Vec<usize>> = Vec::with_capacity(num_slots);
        let mut seed: Vec<usize> = Vec::with_capacity(num_slots);
        let mut transitions: Vec<Vec<i64>> =
            vec![Vec::with_capacity(num_slots); self.mode.num_transitions()];

        for category in kind.slot_categories() {
            let (set, alphabet) = self.draw_slot(*category, rng)?;
            let set_kind: &FeatureSetKind = &self.registry.feature_sets[set];
            let (start, amounts) = self.draw_amounts(set_kind.rule, alphabet.len(), rng);
            feature_sets.push(set);
            alphabets.push(alphabet);
            seed.push(start);
            for (t, a) in transitions.iter_mut().zip(amounts) {
                t.push(a);
            }
        }

        let transitions: Vec<Transition> = transitions.into_iter().map(Transition::new).collect();
        if transitions.iter().any(|t| t.is_identity()) {
            debug!("    Rejected: a transition does not change anything");
            return None;
        }
        Some(PuzzleSpec {
            figure,
            feature_sets,
            alphabets,
            seed: Configuration::new(seed),
            transitions,
        })
    }

    /// Draw a feature set kind and its alphabet for a slot of the given category.
    fn draw_slot<R: Rng + ?Sized>(
        &self,
        category: Category,
        rng: &mut R,
    ) -> Option<(usize, Vec<usize>)> {
        let set: usize = *self.registry.feature_sets_of(category).choose(rng)?;
        let set_kind: &FeatureSetKind = &self.registry.feature_sets[set];
        let features: Vec<usize> = self
            .registry
            .features_of(category)
            .into_iter()
            .filter(|i| !set_kind.drawable || self.registry.features[*i].is_drawable())
            .collect();

        let len: usize = match set_kind.length {
            Some(l) => l,
            None => {
                let max: usize = MAX_ALPHABET_LEN.min(features.len());
                if max < 2 {
                    max
                } else {
                    rng.random_range(2..=max)
                }
            }
        };
        if len == 0 || len > features.len() {
            return None;
        }
        let alphabet: Vec<usize> = features.choose_multiple(rng, len).copied().collect();
        Some((set, alphabet))
    }

    /// Draw the seed index and the amount of each transition for a slot.
    fn draw_amounts<R: Rng + ?Sized>(
        &self,
        rule: TransformRule,
        len: usize,
        rng: &mut R,
    ) -> (usize, Vec<i64>) {
        let num_transitions: usize = self.mode.num_transitions();
        match rule {
            TransformRule::Fixed => (rng.random_range(0..len), vec![0; num_transitions]),
            TransformRule::Ring => {
                let amounts: Vec<i64> = (0..num_transitions)
                    .map(|_| rng.random_range(0..len) as i64)
                    .collect();
                (rng.random_range(0..len), amounts)
            }
            TransformRule::Bounded => {
                // The last cell is reached after `steps` applications of each transition
                let steps: usize = self.mode.steps();
                let max: usize = (len - 1) / (steps * num_transitions);
                let amounts: Vec<usize> = (0..num_transitions)
                    .map(|_| rng.random_range(0..=max))
                    .collect();
                let total: usize = amounts.iter().sum::<usize>() * steps;
                let start: usize = rng.random_range(0..=(len - 1 - total));
                (start, amounts.into_iter().map(|a| a as i64).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_puzzles_build() {
        let registry = Registry::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        for mode in [Mode::One, Mode::Two] {
            let mut generator = RandomPuzzle::new(&registry, mode);
            for _ in 0..50 {
                let spec = generator.generate(&mut rng).unwrap();
                assert_eq!(spec.transitions.len(), mode.num_transitions());
                assert!(spec.transitions.iter().all(|t| !t.is_identity()));
                assert!(Puzzle::from_spec(&registry, spec).is_ok());
            }
        }
    }

    #[test]
    fn same_seed_same_puzzle() {
        let registry = Registry::builtin();
        let mut generator = RandomPuzzle::new(&registry, Mode::Two);
        let a = generator.generate(&mut StdRng::seed_from_u64(7)).unwrap();
        let b = generator.generate(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bounded_amounts_fit() {
        let registry = Registry::builtin();
        let generator = RandomPuzzle::new(&registry, Mode::Two);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let (start, amounts) = generator.draw_amounts(TransformRule::Bounded, 5, &mut rng);
            let end: i64 = start as i64 + 2 * amounts.iter().sum::<i64>();
            assert!(end < 5);
        }
    }

    #[test]
    fn empty_registry_fails() {
        let mut registry = Registry::builtin();
        registry.feature_sets.clear();
        let mut generator = RandomPuzzle::new(&registry, Mode::One).with_max_attempts(20);
        let err = generator.generate(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, PuzzleError::GenerationFailed { attempts: 20 });
    }
}
