/*
figure.rs

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

//! Figures: composed feature sets that transform and render configurations.
//!
//! A [`FigureKind`] declares a fixed slot contract (number of slots and the category of each
//! slot) and the way its slots are composed into a drawing.
//! A [`Figure`] binds a kind to one [`FeatureSet`] per slot. The contract is checked once, when
//! the figure is built.

use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::FromRepr;

use crate::configuration::{Configuration, Transition};
use crate::draw::{Backend, Primitive};
use crate::error::PuzzleError;
use crate::feature::{Category, Color, Feature, Shape};
use crate::feature_set::{FeatureSet, TransformRule};

/// Figure layouts.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum FigureKind {
    /// One shape outline.
    SimpleShape,

    /// A shape filled with a color.
    ColoredShape,

    /// Three concentric shapes, from the outer to the inner one.
    NestedShapes,

    /// Several copies of a shape.
    ShapeCount,

    /// Several copies of a shape filled with a color.
    ColoredShapeCount,
}

impl FigureKind {
    /// Category of each slot, in slot order.
    pub fn slot_categories(self) -> &'static [Category] {
        match self {
            FigureKind::SimpleShape => &[Category::Shape],
            FigureKind::ColoredShape => &[Category::Shape, Category::Color],
            FigureKind::NestedShapes => &[Category::Shape, Category::Shape, Category::Shape],
            FigureKind::ShapeCount => &[Category::Shape, Category::Magnitude],
            FigureKind::ColoredShapeCount => {
                &[Category::Shape, Category::Color, Category::Magnitude]
            }
        }
    }

    pub fn num_slots(self) -> usize {
        self.slot_categories().len()
    }

    pub fn name(self) -> &'static str {
        match self {
            FigureKind::SimpleShape => "simple shape",
            FigureKind::ColoredShape => "colored shape",
            FigureKind::NestedShapes => "nested shapes",
            FigureKind::ShapeCount => "shape count",
            FigureKind::ColoredShapeCount => "colored shape count",
        }
    }
}

/// Figure object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    kind: FigureKind,
    slots: Vec<FeatureSet>,
}

impl Figure {
    /// Create a [`Figure`] object.
    ///
    /// # Errors
    ///
    /// The method returns an error when the number of feature sets does not match the number
    /// of slots of the kind, or when a feature set category does not match its slot.
    pub fn new(kind: FigureKind, slots: Vec<FeatureSet>) -> Result<Self, PuzzleError> {
        let categories: &[Category] = kind.slot_categories();
        if categories.len() != slots.len() {
            return Err(PuzzleError::LengthMismatch {
                expected: categories.len(),
                found: slots.len(),
            });
        }
        for (slot, (expected, set)) in categories.iter().zip(&slots).enumerate() {
            if *expected != set.category() {
                return Err(PuzzleError::SlotCategory {
                    figure: kind.name().to_string(),
                    slot,
                    expected: *expected,
                    found: set.category(),
                });
            }
        }
        Ok(Self { kind, slots })
    }

    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    pub fn slots(&self) -> &[FeatureSet] {
        &self.slots
    }

    /// Number of slots, which is also the length of the configurations.
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Verify that every index of the configuration is inside its slot alphabet.
    pub fn check_configuration(&self, configuration: &Configuration) -> Result<(), PuzzleError> {
        if configuration.len() != self.slots.len() {
            return Err(PuzzleError::LengthMismatch {
                expected: self.slots.len(),
                found: configuration.len(),
            });
        }
        for (slot, (index, set)) in configuration.get().iter().zip(&self.slots).enumerate() {
            if *index >= set.len() {
                return Err(PuzzleError::IndexOutOfRange {
                    slot,
                    index: *index,
                    len: set.len(),
                });
            }
        }
        Ok(())
    }

    /// Verify that the transition keeps ring amounts below the alphabet length.
    ///
    /// Ring sets wrap with a single subtraction, so larger amounts would leave the alphabet.
    pub fn check_transition(&self, transition: &Transition) -> Result<(), PuzzleError> {
        if transition.len() != self.slots.len() {
            return Err(PuzzleError::LengthMismatch {
                expected: self.slots.len(),
                found: transition.len(),
            });
        }
        for (slot, (amount, set)) in transition.get().iter().zip(&self.slots).enumerate() {
            let too_large: bool = usize::try_from(*amount).is_ok_and(|a| a >= set.len());
            if set.rule() == TransformRule::Ring && too_large {
                return Err(PuzzleError::RingAmountTooLarge {
                    slot,
                    amount: *amount,
                    len: set.len(),
                });
            }
        }
        Ok(())
    }

    /// Apply the transition to the configuration and return the new configuration.
    ///
    /// Slots with a zero amount are left unchanged. Every other slot must be transformable and
    /// accept its amount; otherwise the method fails before any slot is changed.
    pub fn transform(
        &self,
        configuration: &Configuration,
        transition: &Transition,
    ) -> Result<Configuration, PuzzleError> {
        if configuration.len() != self.slots.len() {
            return Err(PuzzleError::LengthMismatch {
                expected: self.slots.len(),
                found: configuration.len(),
            });
        }
        if transition.len() != self.slots.len() {
            return Err(PuzzleError::LengthMismatch {
                expected: self.slots.len(),
                found: transition.len(),
            });
        }

        let slots = configuration.get().iter().zip(transition.get()).zip(&self.slots);
        for (slot, ((index, amount), set)) in slots.clone().enumerate() {
            if *amount == 0 {
                continue;
            }
            if !set.kind().is_transformable() {
                return Err(PuzzleError::NotTransformable { slot });
            }
            if !set.can_transform(*index, *amount) {
                return Err(PuzzleError::CannotTransform {
                    slot,
                    index: *index,
                    amount: *amount,
                });
            }
        }

        let indices: Vec<usize> = slots
            .map(|((index, amount), set)| {
                if *amount == 0 {
                    *index
                } else {
                    set.transform(*index, *amount)
                }
            })
            .collect();
        Ok(Configuration::new(indices))
    }

    /// Return the feature selected by the configuration in each slot.
    pub fn features(&self, configuration: &Configuration) -> Result<Vec<Feature>, PuzzleError> {
        self.check_configuration(configuration)?;
        Ok(configuration
            .get()
            .iter()
            .zip(&self.slots)
            .filter_map(|(index, set)| set.get(*index).copied())
            .collect())
    }

    /// Return the primitives to draw for the configuration, in painting order.
    ///
    /// Slots are composed in slot order, later slots draw on top of earlier ones.
    pub fn primitives(&self, configuration: &Configuration) -> Result<Vec<Primitive>, PuzzleError> {
        let features: Vec<Feature> = self.features(configuration)?;
        let shape = |slot: usize| features[slot].as_shape().unwrap_or(Shape::Circle);
        let color = |slot: usize| features[slot].as_color().unwrap_or(Color::Black);
        let count = |slot: usize| features[slot].as_magnitude().unwrap_or(1) as usize;

        let primitives: Vec<Primitive> = match self.kind {
            FigureKind::SimpleShape => vec![Primitive::outline(shape(0), 0.35)],
            FigureKind::ColoredShape => {
                let mut p: Primitive = Primitive::outline(shape(0), 0.35);
                p.fill = Some(color(1).rgba());
                vec![p]
            }
            FigureKind::NestedShapes => [0.42, 0.28, 0.14]
                .iter()
                .enumerate()
                .map(|(slot, radius)| {
                    let mut p: Primitive = Primitive::outline(shape(slot), *radius);
                    p.fill = Some((255, 255, 255, 255));
                    p
                })
                .collect(),
            FigureKind::ShapeCount => Self::arrange(shape(0), None, count(1)),
            FigureKind::ColoredShapeCount => {
                Self::arrange(shape(0), Some(color(1).rgba()), count(2))
            }
        };
        Ok(primitives)
    }

    /// Lay out `count` copies of the shape in a square grid.
    fn arrange(shape: Shape, fill: Option<(u8, u8, u8, u8)>, count: usize) -> Vec<Primitive> {
        let mut columns: usize = 1;
        while columns * columns < count {
            columns += 1;
        }
        let cell: f64 = 0.9 / columns as f64;
        let rows: usize = count.div_ceil(columns);
        let top: f64 = 0.5 - cell * rows as f64 / 2.0;

        (0..count)
            .map(|i| {
                let row: usize = i / columns;
                // Center the last, incomplete row
                let in_row: usize = if row == rows - 1 {
                    count - row * columns
                } else {
                    columns
                };
                let left: f64 = 0.5 - cell * in_row as f64 / 2.0;
                let mut p: Primitive = Primitive::outline(shape, cell * 0.4);
                p.center = (
                    left + cell * ((i % columns) as f64 + 0.5),
                    top + cell * (row as f64 + 0.5),
                );
                p.fill = fill;
                p.line_width = 0.02 / columns as f64;
                p
            })
            .collect()
    }

    /// Render the configuration with the provided backend.
    pub fn render<B: Backend>(
        &self,
        backend: &B,
        configuration: &Configuration,
    ) -> Result<B::Image, PuzzleError> {
        let primitives: Vec<Primitive> = self.primitives(configuration)?;
        debug!(
            "Rendering {} {configuration}: {} primitives",
            self.kind.name(),
            primitives.len()
        );
        Ok(backend.draw_tile(&primitives))
    }
}
