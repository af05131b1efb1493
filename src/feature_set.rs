/*
feature_set.rs

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

//! Feature sets and their transform rules.
//!
//! A [`FeatureSetKind`] is a registry entry: it declares the category of its members, whether
//! the members must be drawable, an optional fixed alphabet length, and the [`TransformRule`]
//! that moves an index through the alphabet.
//! A [`FeatureSet`] binds a kind to a concrete, validated alphabet of [`Feature`] values.
//!
//! Two rules are available:
//!
//! * [`TransformRule::Bounded`]: the index moves forward and must stay inside the alphabet.
//! * [`TransformRule::Ring`]: the index moves forward and wraps around the end of the alphabet.
//!   The wrap is a single subtraction of the alphabet length, which is only a modulo when the
//!   amount is smaller than the alphabet length. Transitions built for ring sets must keep
//!   their amounts below that length.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::feature::{Category, Feature};

/// How a feature set moves an index through its alphabet.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TransformRule {
    /// The set cannot be transformed. Slots using it must always get a zero amount.
    Fixed,

    /// Non-wrapping progression.
    Bounded,

    /// Cyclic progression.
    Ring,
}

/// Feature set type, as listed in a registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FeatureSetKind {
    /// Name of the kind, for messages and listings.
    pub name: String,

    /// Category all the members must belong to.
    pub category: Category,

    /// Transform rule.
    pub rule: TransformRule,

    /// Whether every member must carry drawing parameters.
    #[serde(default)]
    pub drawable: bool,

    /// Required number of members, if the kind imposes one (triples for example).
    #[serde(default)]
    pub length: Option<usize>,
}

impl FeatureSetKind {
    /// Create a [`FeatureSetKind`] object.
    pub fn new(name: &str, category: Category, rule: TransformRule) -> Self {
        Self {
            name: name.to_string(),
            category,
            rule,
            drawable: false,
            length: None,
        }
    }

    /// Require drawable members.
    pub fn drawable(mut self) -> Self {
        self.drawable = true;
        self
    }

    /// Require exactly `length` members.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Whether the kind supports the transform capability.
    pub fn is_transformable(&self) -> bool {
        self.rule != TransformRule::Fixed
    }
}

/// A feature set kind bound to its alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    kind: FeatureSetKind,
    alphabet: Vec<Feature>,
}

impl FeatureSet {
    /// Create a [`FeatureSet`] object.
    ///
    /// # Errors
    ///
    /// The method returns an error when the alphabet is empty, does not have the length the
    /// kind requires, or when a member does not belong to the declared category or cannot be
    /// drawn although the kind requires drawable members.
    pub fn new(kind: &FeatureSetKind, alphabet: Vec<Feature>) -> Result<Self, PuzzleError> {
        let expected: usize = kind.length.unwrap_or(1).max(1);
        if alphabet.is_empty() || kind.length.is_some_and(|l| l != alphabet.len()) {
            return Err(PuzzleError::AlphabetLength {
                set: kind.name.clone(),
                expected,
                found: alphabet.len(),
            });
        }
        for feature in &alphabet {
            if feature.category() != kind.category {
                return Err(PuzzleError::Membership {
                    set: kind.name.clone(),
                    feature: feature.to_string(),
                    category: kind.category,
                });
            }
            if kind.drawable && !feature.is_drawable() {
                return Err(PuzzleError::NotDrawable {
                    set: kind.name.clone(),
                    feature: feature.to_string(),
                });
            }
        }
        debug!("Feature set {}: {:?}", kind.name, alphabet);
        Ok(Self {
            kind: kind.clone(),
            alphabet,
        })
    }

    pub fn kind(&self) -> &FeatureSetKind {
        &self.kind
    }

    pub fn rule(&self) -> TransformRule {
        self.kind.rule
    }

    pub fn category(&self) -> Category {
        self.kind.category
    }

    /// Number of features in the alphabet.
    pub fn len(&self) -> usize {
        self.alphabet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alphabet.is_empty()
    }

    pub fn features(&self) -> &[Feature] {
        &self.alphabet
    }

    /// Return the feature at the given index.
    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.alphabet.get(index)
    }

    /// Whether moving `index` by `amount` is allowed.
    pub fn can_transform(&self, index: usize, amount: i64) -> bool {
        if amount <= 0 {
            return false;
        }
        match self.kind.rule {
            TransformRule::Fixed => false,
            TransformRule::Bounded => i64::try_from(index)
                .ok()
                .and_then(|i| i.checked_add(amount))
                .and_then(|target| usize::try_from(target).ok())
                .is_some_and(|target| target < self.alphabet.len()),
            // Ring sets accept any index, even outside the alphabet
            TransformRule::Ring => i64::try_from(index)
                .ok()
                .and_then(|i| i.checked_add(amount))
                .is_some(),
        }
    }

    /// Move `index` by `amount`.
    ///
    /// The caller verifies [`FeatureSet::can_transform`] first. A non-positive amount, or one
    /// that [`FeatureSet::can_transform`] rejects for overflowing, returns the index unchanged.
    pub fn transform(&self, index: usize, amount: i64) -> usize {
        let Some(target) = usize::try_from(amount)
            .ok()
            .and_then(|a| index.checked_add(a))
        else {
            return index;
        };
        match self.kind.rule {
            TransformRule::Fixed => index,
            TransformRule::Bounded => target,
            TransformRule::Ring => {
                if target < self.alphabet.len() {
                    target
                } else {
                    target - self.alphabet.len()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Color, Shape};

    fn shapes(n: usize) -> Vec<Feature> {
        (0..n)
            .map(|i| Feature::Shape(Shape::from_repr(i as u8).unwrap()))
            .collect()
    }

    fn ring(n: usize) -> FeatureSet {
        let kind = FeatureSetKind::new("shape ring", Category::Shape, TransformRule::Ring);
        FeatureSet::new(&kind, shapes(n)).unwrap()
    }

    fn bounded(n: usize) -> FeatureSet {
        let kind = FeatureSetKind::new("shape ladder", Category::Shape, TransformRule::Bounded);
        FeatureSet::new(&kind, shapes(n)).unwrap()
    }

    #[test]
    fn bounded_can_transform() {
        let set = bounded(5);
        for i in 0..5 {
            for a in -2..7_i64 {
                let expected = a > 0 && (i as i64 + a) < 5;
                assert_eq!(set.can_transform(i, a), expected, "i={i} a={a}");
                if expected {
                    assert_eq!(set.transform(i, a), i + a as usize);
                }
            }
        }
    }

    #[test]
    fn bounded_rejects_huge_amounts() {
        assert!(!bounded(3).can_transform(1, i64::MAX));
    }

    #[test]
    fn ring_transform_is_modulo() {
        let set = ring(3);
        assert_eq!(set.transform(1, 2), 0);
        assert_eq!(set.transform(1, 1), 2);
        assert_eq!(set.transform(2, 1), 0);
        assert_eq!(set.transform(2, 2), 1);
        for n in 1..7 {
            let set = ring(n);
            for i in 0..n {
                for a in 1..n {
                    assert_eq!(set.transform(i, a as i64), (i + a) % n);
                }
            }
        }
    }

    #[test]
    fn ring_repeated_application() {
        let set = ring(5);
        for i in 0..5 {
            for a in 1..5_usize {
                let mut index = i;
                for k in 1..10 {
                    index = set.transform(index, a as i64);
                    assert_eq!(index, (i + a * k) % 5);
                }
            }
        }
    }

    #[test]
    fn ring_can_transform() {
        let set = ring(3);
        assert!(set.can_transform(0, 1));
        assert!(set.can_transform(7, 2));
        assert!(!set.can_transform(0, 0));
        assert!(!set.can_transform(1, -1));
    }

    #[test]
    fn ring_rejects_overflowing_index() {
        let set = ring(3);
        assert!(!set.can_transform(usize::MAX, 1));
        assert!(!set.can_transform(i64::MAX as usize, 1));
        assert!(set.can_transform(i64::MAX as usize - 1, 1));
        assert_eq!(set.transform(usize::MAX, 1), usize::MAX);
    }

    #[test]
    fn fixed_sets_never_transform() {
        let kind = FeatureSetKind::new("background", Category::Color, TransformRule::Fixed);
        let set = FeatureSet::new(&kind, vec![Feature::Color(Color::Gray)]).unwrap();
        assert!(!kind.is_transformable());
        assert!(!set.can_transform(0, 1));
    }

    #[test]
    fn membership_checked_at_construction() {
        let kind = FeatureSetKind::new("color ring", Category::Color, TransformRule::Ring);
        let err = FeatureSet::new(
            &kind,
            vec![Feature::Color(Color::Red), Feature::Shape(Shape::Square)],
        )
        .unwrap_err();
        assert!(matches!(err, PuzzleError::Membership { .. }));
    }

    #[test]
    fn triples_need_three_features() {
        let kind = FeatureSetKind::new("triple shape ring", Category::Shape, TransformRule::Ring)
            .with_length(3);
        assert!(FeatureSet::new(&kind, shapes(3)).is_ok());
        assert_eq!(
            FeatureSet::new(&kind, shapes(2)).unwrap_err(),
            PuzzleError::AlphabetLength {
                set: "triple shape ring".to_string(),
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn drawable_sets_reject_magnitudes() {
        let kind = FeatureSetKind::new("count", Category::Magnitude, TransformRule::Bounded)
            .drawable();
        let err = FeatureSet::new(&kind, vec![Feature::Magnitude(1)]).unwrap_err();
        assert!(matches!(err, PuzzleError::NotDrawable { .. }));
    }

    #[test]
    fn empty_alphabet() {
        let kind = FeatureSetKind::new("shape ring", Category::Shape, TransformRule::Ring);
        assert!(FeatureSet::new(&kind, Vec::new()).is_err());
    }
}
