/*
configuration.rs

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

//! Configuration and transition vectors.
//!
//! A [`Configuration`] holds one alphabet index per figure slot, and a [`Transition`] holds one
//! signed amount per slot.
//! Both are free-standing values: transforms always return a new [`Configuration`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Puzzle state: one index per figure slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Configuration(Vec<usize>);

impl Configuration {
    /// Create a [`Configuration`] object.
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self) -> &[usize] {
        &self.0
    }

    /// Return the canonical string form, used to detect duplicates.
    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.key())
    }
}

/// One progression step: a signed amount per figure slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Transition(Vec<i64>);

impl Transition {
    /// Create a [`Transition`] object.
    pub fn new(amounts: Vec<i64>) -> Self {
        Self(amounts)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self) -> &[i64] {
        &self.0
    }

    /// Whether the transition leaves every slot unchanged.
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|a| *a == 0)
    }
}
