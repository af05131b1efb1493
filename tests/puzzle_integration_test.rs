/*
puzzle_integration_test.rs

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

//! End-to-end tests: random puzzles, identifiers, and decoys.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

use raven_matrix::codec::{CodecError, PuzzleCodec};
use raven_matrix::configuration::{Configuration, Transition};
use raven_matrix::draw::SvgBackend;
use raven_matrix::error::{ErrorKind, PuzzleError};
use raven_matrix::generator::random_puzzle::{Mode, RandomPuzzle};
use raven_matrix::puzzle::{Puzzle, PuzzleSpec};
use raven_matrix::registry::Registry;

#[test]
fn random_puzzles_survive_their_identifiers() {
    let registry = Registry::builtin();
    let codec = PuzzleCodec::new(&registry);
    let mut rng = StdRng::seed_from_u64(2025);

    for mode in [Mode::One, Mode::Two] {
        let mut generator = RandomPuzzle::new(&registry, mode);
        for _ in 0..25 {
            let spec = generator.generate(&mut rng).unwrap();
            let id = codec.encode(&spec).unwrap();
            assert!(id.len() > 10);
            assert_eq!(codec.decode(&id).unwrap(), spec);

            let original = Puzzle::from_spec(&registry, spec).unwrap();
            let rebuilt = codec.puzzle(&id).unwrap();
            assert_eq!(original.matrix(), rebuilt.matrix());
        }
    }
}

#[test]
fn decoys_never_contain_the_answer() {
    let registry = Registry::builtin();
    let mut rng = StdRng::seed_from_u64(11);
    let mut generator = RandomPuzzle::new(&registry, Mode::Two);

    for _ in 0..25 {
        let spec = generator.generate(&mut rng).unwrap();
        let puzzle = Puzzle::from_spec(&registry, spec).unwrap();
        let decoys = puzzle.distractors(3, &mut rng);
        let keys: HashSet<String> = decoys.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), decoys.len());
        assert!(!keys.contains(&puzzle.answer().key()));
    }
}

#[test]
fn decoys_without_random_rounds_are_deterministic() {
    let registry = Registry::builtin();
    let spec = PuzzleSpec {
        figure: 2,
        feature_sets: vec![0, 0, 0],
        alphabets: vec![vec![0, 1, 2]; 3],
        seed: Configuration::new(vec![2, 1, 0]),
        transitions: vec![
            Transition::new(vec![1, 1, 1]),
            Transition::new(vec![2, 1, 2]),
        ],
    };
    let puzzle = Puzzle::from_spec(&registry, spec).unwrap();
    let a = puzzle.distractors(0, &mut StdRng::seed_from_u64(1));
    let b = puzzle.distractors(0, &mut StdRng::seed_from_u64(2));
    assert_eq!(a, b);
}

#[test]
fn identifier_from_another_registry() {
    let registry = Registry::builtin();
    let mut newer = Registry::builtin();
    newer.version += 1;

    let mut generator = RandomPuzzle::new(&registry, Mode::One);
    let spec = generator.generate(&mut StdRng::seed_from_u64(5)).unwrap();
    let id = PuzzleCodec::new(&registry).encode(&spec).unwrap();

    let err = PuzzleCodec::new(&newer).decode(&id).unwrap_err();
    assert!(matches!(err, CodecError::RegistryMismatch { .. }));
}

#[test]
fn corrupted_identifier() {
    let registry = Registry::builtin();
    let codec = PuzzleCodec::new(&registry);
    let mut generator = RandomPuzzle::new(&registry, Mode::Two);
    let spec = generator.generate(&mut StdRng::seed_from_u64(8)).unwrap();
    let id = codec.encode(&spec).unwrap();

    let middle = id.len() / 2;
    let flipped = if &id[middle..=middle] == "x" { "y" } else { "x" };
    let corrupted = format!("{}{}{}", &id[..middle], flipped, &id[middle + 1..]);
    assert!(matches!(
        codec.decode(&corrupted),
        Err(CodecError::Malformed(_))
    ));
}

#[test]
fn membership_errors_surface_at_construction() {
    let registry = Registry::builtin();
    // A magnitude in a shape alphabet
    let spec = PuzzleSpec {
        figure: 0,
        feature_sets: vec![1],
        alphabets: vec![vec![0, 1, 15]],
        seed: Configuration::new(vec![0]),
        transitions: vec![Transition::new(vec![1])],
    };
    let err = Puzzle::from_spec(&registry, spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Membership);
    assert!(matches!(err, PuzzleError::Membership { .. }));
}

#[test]
fn rendered_sheet_has_nine_tiles() {
    let registry = Registry::builtin();
    let mut generator = RandomPuzzle::new(&registry, Mode::Two);
    let spec = generator.generate(&mut StdRng::seed_from_u64(13)).unwrap();
    let puzzle = Puzzle::from_spec(&registry, spec).unwrap();
    let sheet = puzzle.render(&SvgBackend::new(100), true).unwrap();
    assert_eq!((sheet.width, sheet.height), (300, 300));
    assert_eq!(sheet.body().matches("<g ").count(), 9);
}
