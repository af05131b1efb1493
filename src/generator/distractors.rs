/*
distractors.rs

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

//! Generate wrong answers.
//!
//! Decoys are collected by walking from the seed configuration: the row transition is applied
//! [`crate::config::DISTRACTOR_WALK_LEN`] times, then the column transition the same number of
//! times, and optionally random transitions for a few more rounds. Every configuration met
//! along the walk is a candidate. Candidates are deduplicated by their canonical string, and
//! the answer is removed at the end.
//!
//! A leg of the walk stops early when its transition can no longer be applied (a bounded slot
//! reached the end of its alphabet); the next leg starts from where the previous one stopped.

use log::debug;
use rand::Rng;
use std::collections::HashSet;

use crate::config::DISTRACTOR_WALK_LEN;
use crate::configuration::{Configuration, Transition};
use crate::feature_set::TransformRule;
use crate::figure::Figure;

/// Distractor generator object.
pub struct Distractors<'a> {
    /// Figure that transforms the configurations.
    figure: &'a Figure,

    /// Number of transforms per leg of the walk.
    walk_len: usize,

    /// Number of extra legs with random transitions.
    extra_rounds: usize,

    /// Canonical strings of the collected configurations.
    seen: HashSet<String>,

    /// Collected configurations, in discovery order.
    pool: Vec<Configuration>,
}

impl<'a> Distractors<'a> {
    /// Create a [`Distractors`] object with no random rounds.
    pub fn new(figure: &'a Figure) -> Self {
        Self {
            figure,
            walk_len: DISTRACTOR_WALK_LEN,
            extra_rounds: 0,
            seen: HashSet::new(),
            pool: Vec::new(),
        }
    }

    /// Add `rounds` legs with random transitions to the walk.
    pub fn with_extra_rounds(mut self, rounds: usize) -> Self {
        self.extra_rounds = rounds;
        self
    }

    /// Change the number of transforms per leg.
    pub fn with_walk_len(mut self, walk_len: usize) -> Self {
        self.walk_len = walk_len;
        self
    }

    /// Generate and return the decoys.
    ///
    /// The returned configurations are pairwise distinct and never equal to `answer`.
    /// The random source is only used for the extra rounds, so without extra rounds the result
    /// only depends on the arguments.
    pub fn generate<R: Rng + ?Sized>(
        mut self,
        seed: &Configuration,
        row_transition: &Transition,
        column_transition: Option<&Transition>,
        answer: &Configuration,
        rng: &mut R,
    ) -> Vec<Configuration> {
        self.insert(seed.clone());

        let mut current: Configuration = self.walk(seed.clone(), row_transition);
        if let Some(t) = column_transition {
            current = self.walk(current, t);
        }
        for round in 0..self.extra_rounds {
            let t: Transition = self.random_transition(rng);
            debug!("Distractor round {round}: random transition {t:?}");
            current = self.walk(current, &t);
        }

        let answer_key: String = answer.key();
        let decoys: Vec<Configuration> = self
            .pool
            .into_iter()
            .filter(|c| c.key() != answer_key)
            .collect();
        debug!("{} distractors for the answer {answer}", decoys.len());
        decoys
    }

    /// Apply the transition repeatedly and collect the intermediate configurations.
    /// Return the last configuration reached.
    fn walk(&mut self, start: Configuration, transition: &Transition) -> Configuration {
        let mut current: Configuration = start;
        for step in 0..self.walk_len {
            match self.figure.transform(&current, transition) {
                Ok(next) => {
                    self.insert(next.clone());
                    current = next;
                }
                Err(e) => {
                    debug!("    Walk stopped after {step} steps: {e}");
                    break;
                }
            }
        }
        current
    }

    fn insert(&mut self, configuration: Configuration) {
        if self.seen.insert(configuration.key()) {
            self.pool.push(configuration);
        }
    }

    /// Draw a transition that moves every transformable slot by a random amount.
    ///
    /// Amounts stay below the alphabet length so that ring slots wrap correctly.
    fn random_transition<R: Rng + ?Sized>(&self, rng: &mut R) -> Transition {
        let amounts: Vec<i64> = self
            .figure
            .slots()
            .iter()
            .map(|set| match set.rule() {
                TransformRule::Fixed => 0,
                TransformRule::Bounded | TransformRule::Ring => {
                    if set.len() < 2 {
                        0
                    } else {
                        rng.random_range(1..set.len()) as i64
                    }
                }
            })
            .collect();
        Transition::new(amounts)
    }
}
