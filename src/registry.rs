/*
registry.rs

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

//! Versioned catalogs of known figures, feature sets, and features.
//!
//! Puzzle identifiers only store positions in these catalogs. A registry is built once, either
//! with [`Registry::builtin`] or by loading a JSON file with [`Registry::from_file`], and is
//! never modified afterwards.
//! Decoding an identifier requires the registry version that encoded it. Appending entries to a
//! catalog keeps old identifiers valid; reordering or removing entries requires a new version.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::PuzzleError;
use crate::feature::{Category, Color, Feature, Shape};
use crate::feature_set::{FeatureSet, FeatureSetKind, TransformRule};
use crate::figure::{Figure, FigureKind};

/// Version of the built-in registry.
pub const BUILTIN_VERSION: u16 = 1;

/// Registry object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    /// Registry version, stored in every puzzle identifier.
    pub version: u16,

    /// Known figure kinds.
    pub figures: Vec<FigureKind>,

    /// Known feature set kinds.
    pub feature_sets: Vec<FeatureSetKind>,

    /// Known features.
    pub features: Vec<Feature>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// Return the built-in registry.
    pub fn builtin() -> Self {
        let mut figures: Vec<FigureKind> = Vec::new();
        while let Some(kind) = FigureKind::from_repr(figures.len() as u8) {
            figures.push(kind);
        }

        let mut features: Vec<Feature> = Vec::new();
        let mut i: u8 = 0;
        while let Some(shape) = Shape::from_repr(i) {
            features.push(Feature::Shape(shape));
            i += 1;
        }
        i = 0;
        while let Some(color) = Color::from_repr(i) {
            features.push(Feature::Color(color));
            i += 1;
        }
        features.extend((1..=9).map(Feature::Magnitude));

        let feature_sets: Vec<FeatureSetKind> = vec![
            FeatureSetKind::new("triple shape ring", Category::Shape, TransformRule::Ring)
                .drawable()
                .with_length(3),
            FeatureSetKind::new("shape ring", Category::Shape, TransformRule::Ring).drawable(),
            FeatureSetKind::new("shape ladder", Category::Shape, TransformRule::Bounded)
                .drawable(),
            FeatureSetKind::new("triple color ring", Category::Color, TransformRule::Ring)
                .drawable()
                .with_length(3),
            FeatureSetKind::new("color ring", Category::Color, TransformRule::Ring).drawable(),
            FeatureSetKind::new("color", Category::Color, TransformRule::Fixed).drawable(),
            FeatureSetKind::new("count ladder", Category::Magnitude, TransformRule::Bounded),
            FeatureSetKind::new("count ring", Category::Magnitude, TransformRule::Ring),
        ];

        Self {
            version: BUILTIN_VERSION,
            figures,
            feature_sets,
            features,
        }
    }

    /// Load a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// The method returns an error when the file cannot be read or parsed, or when a feature set
    /// kind requires an empty alphabet.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let file: File = File::open(path.as_ref())?;
        let reader: BufReader<File> = BufReader::new(file);
        let registry: Registry = serde_json::from_reader(reader)?;
        if let Some(kind) = registry.feature_sets.iter().find(|k| k.length == Some(0)) {
            return Err(format!("Feature set {} requires an empty alphabet", kind.name).into());
        }
        debug!(
            "Registry {:?} version {}: {} figures, {} feature sets, {} features",
            path.as_ref(),
            registry.version,
            registry.figures.len(),
            registry.feature_sets.len(),
            registry.features.len()
        );
        Ok(registry)
    }

    pub fn figure(&self, index: usize) -> Result<FigureKind, PuzzleError> {
        self.figures
            .get(index)
            .copied()
            .ok_or(PuzzleError::UnknownEntry {
                registry: "figure",
                index,
            })
    }

    pub fn feature_set(&self, index: usize) -> Result<&FeatureSetKind, PuzzleError> {
        self.feature_sets.get(index).ok_or(PuzzleError::UnknownEntry {
            registry: "feature set",
            index,
        })
    }

    pub fn feature(&self, index: usize) -> Result<Feature, PuzzleError> {
        self.features
            .get(index)
            .copied()
            .ok_or(PuzzleError::UnknownEntry {
                registry: "feature",
                index,
            })
    }

    /// Return the positions of the features of the given category.
    pub fn features_of(&self, category: Category) -> Vec<usize> {
        self.features
            .iter()
            .enumerate()
            .filter(|(_, f)| f.category() == category)
            .map(|(i, _)| i)
            .collect()
    }

    /// Return the positions of the feature set kinds of the given category.
    pub fn feature_sets_of(&self, category: Category) -> Vec<usize> {
        self.feature_sets
            .iter()
            .enumerate()
            .filter(|(_, k)| k.category == category)
            .map(|(i, _)| i)
            .collect()
    }

    /// Build a figure from registry positions.
    ///
    /// `feature_sets` holds one feature set position per slot, and `alphabets` one list of
    /// feature positions per slot.
    pub fn build_figure(
        &self,
        figure: usize,
        feature_sets: &[usize],
        alphabets: &[Vec<usize>],
    ) -> Result<Figure, PuzzleError> {
        let kind: FigureKind = self.figure(figure)?;
        if feature_sets.len() != alphabets.len() {
            return Err(PuzzleError::LengthMismatch {
                expected: feature_sets.len(),
                found: alphabets.len(),
            });
        }
        let mut slots: Vec<FeatureSet> = Vec::with_capacity(feature_sets.len());
        for (set, alphabet) in feature_sets.iter().zip(alphabets) {
            let features: Vec<Feature> = alphabet
                .iter()
                .map(|i| self.feature(*i))
                .collect::<Result<Vec<Feature>, PuzzleError>>()?;
            slots.push(FeatureSet::new(self.feature_set(*set)?, features)?);
        }
        Figure::new(kind, slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalogs() {
        let r = Registry::builtin();
        assert_eq!(r.version, BUILTIN_VERSION);
        assert_eq!(r.figures.len(), 5);
        assert_eq!(r.figures[0], FigureKind::SimpleShape);
        assert_eq!(r.features_of(Category::Shape), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(r.features_of(Category::Color).len(), 8);
        assert_eq!(r.features_of(Category::Magnitude).len(), 9);
        assert_eq!(r.feature(2).unwrap(), Feature::Shape(Shape::Circle));
    }

    #[test]
    fn build_simple_figure() {
        let r = Registry::builtin();
        let f = r.build_figure(0, &[0], &[vec![0, 1, 2]]).unwrap();
        assert_eq!(f.kind(), FigureKind::SimpleShape);
        assert_eq!(f.slots()[0].len(), 3);
    }

    #[test]
    fn unknown_entries() {
        let r = Registry::builtin();
        assert_eq!(
            r.build_figure(42, &[0], &[vec![0, 1, 2]]).unwrap_err(),
            PuzzleError::UnknownEntry {
                registry: "figure",
                index: 42
            }
        );
        assert!(matches!(
            r.build_figure(0, &[0], &[vec![0, 1, 99]]),
            Err(PuzzleError::UnknownEntry {
                registry: "feature",
                ..
            })
        ));
    }

    #[test]
    fn membership_failure() {
        let r = Registry::builtin();
        // Colors in a shape set
        let err = r.build_figure(0, &[0], &[vec![7, 8, 9]]).unwrap_err();
        assert!(matches!(err, PuzzleError::Membership { .. }));
        // Two features in a triple set
        let err = r.build_figure(0, &[0], &[vec![0, 1]]).unwrap_err();
        assert!(matches!(err, PuzzleError::AlphabetLength { .. }));
    }

    #[test]
    fn load_from_file() {
        let mut r = Registry::builtin();
        r.version = 7;
        let path = std::env::temp_dir().join(format!("raven-registry-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(serde_json::to_string(&r).unwrap().as_bytes())
            .unwrap();
        drop(file);
        let loaded = Registry::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, r);
    }
}
