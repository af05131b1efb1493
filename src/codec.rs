/*
codec.rs

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

//! Encode puzzle specifications into identifiers and decode them back.
//!
//! An identifier is the URL-safe base64 encoding, without padding, of:
//!
//! ```text
//! format version (1 byte) | registry version (2 bytes, big endian) | JSON payload | checksum
//! ```
//!
//! The checksum is the first four bytes of the SHA-256 digest of everything before it. It
//! detects corrupted identifiers, such as a mistyped character in a URL.
//!
//! The identifier only stores registry positions, never the definitions, so decoding requires
//! the registry version that encoded it. A well-formed identifier from another registry version
//! is reported as [`CodecError::RegistryMismatch`], distinct from [`CodecError::Malformed`].
//! An identifier with the right registry version whose positions do not fit the registry is
//! reported as [`CodecError::Incompatible`].

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::error::PuzzleError;
use crate::puzzle::{Puzzle, PuzzleSpec};
use crate::registry::Registry;

/// Version of the identifier layout.
const FORMAT_VERSION: u8 = 1;

/// Size of the format and registry versions.
const HEADER_LEN: usize = 3;

/// Size of the checksum.
const CHECKSUM_LEN: usize = 4;

/// Type of errors.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The identifier is corrupted or was not produced by this codec.
    #[error("malformed identifier: {0}")]
    Malformed(String),

    /// The identifier is intact but refers to another registry.
    #[error("identifier built for registry version {found}, expected version {expected}")]
    RegistryMismatch { expected: u16, found: u16 },

    /// The identifier is intact and has the right version, but its content does not fit the
    /// registry.
    #[error("identifier does not match the registry: {0}")]
    Incompatible(#[from] PuzzleError),

    /// The value cannot be serialized.
    #[error("cannot encode the value: {0}")]
    Encoding(#[from] serde_json::Error),
}

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(data);
    let mut sum: [u8; CHECKSUM_LEN] = [0; CHECKSUM_LEN];
    sum.copy_from_slice(&digest[..CHECKSUM_LEN]);
    sum
}

/// Codec object, tied to a registry version.
#[derive(Debug, Clone, Copy)]
pub struct Codec {
    registry_version: u16,
}

impl Codec {
    /// Create a [`Codec`] object for the given registry version.
    pub fn new(registry_version: u16) -> Self {
        Self { registry_version }
    }

    /// Create a [`Codec`] object for the given registry.
    pub fn for_registry(registry: &Registry) -> Self {
        Self::new(registry.version)
    }

    /// Encode any serializable value into an identifier.
    ///
    /// The identifier only depends on the value and on the registry version.
    pub fn encode<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, CodecError> {
        let payload: Vec<u8> = serde_json::to_vec(data)?;
        let mut bytes: Vec<u8> = Vec::with_capacity(HEADER_LEN + payload.len() + CHECKSUM_LEN);
        bytes.push(FORMAT_VERSION);
        bytes.extend_from_slice(&self.registry_version.to_be_bytes());
        bytes.extend_from_slice(&payload);
        let sum: [u8; CHECKSUM_LEN] = checksum(&bytes);
        bytes.extend_from_slice(&sum);
        Ok(URL_SAFE_NO_PAD.encode(&bytes))
    }

    /// Decode an identifier produced by [`Codec::encode`].
    ///
    /// # Errors
    ///
    /// The method returns [`CodecError::Malformed`] when the identifier is corrupted, and
    /// [`CodecError::RegistryMismatch`] when it was encoded for another registry version.
    pub fn decode<T: DeserializeOwned>(&self, id: &str) -> Result<T, CodecError> {
        let bytes: Vec<u8> = URL_SAFE_NO_PAD
            .decode(id.trim())
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
        if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
            return Err(CodecError::Malformed(format!(
                "{} bytes is too short",
                bytes.len()
            )));
        }

        let (content, sum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
        if checksum(content) != sum {
            debug!("Checksum mismatch for identifier {id}");
            return Err(CodecError::Malformed("checksum mismatch".to_string()));
        }
        if content[0] != FORMAT_VERSION {
            return Err(CodecError::Malformed(format!(
                "unknown format version {}",
                content[0]
            )));
        }
        let version: u16 = u16::from_be_bytes([content[1], content[2]]);
        if version != self.registry_version {
            return Err(CodecError::RegistryMismatch {
                expected: self.registry_version,
                found: version,
            });
        }
        serde_json::from_slice(&content[HEADER_LEN..])
            .map_err(|e| CodecError::Malformed(e.to_string()))
    }
}

/// Puzzle identifier codec, tied to a registry.
pub struct PuzzleCodec<'a> {
    registry: &'a Registry,
    codec: Codec,
}

impl<'a> PuzzleCodec<'a> {
    /// Create a [`PuzzleCodec`] object.
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            codec: Codec::for_registry(registry),
        }
    }

    /// Return the identifier of the puzzle specification.
    pub fn encode(&self, spec: &PuzzleSpec) -> Result<String, CodecError> {
        self.codec.encode(spec)
    }

    /// Decode the identifier into a puzzle specification.
    ///
    /// The specification is checked against the registry: every position must exist and every
    /// alphabet must fit its feature set.
    pub fn decode(&self, id: &str) -> Result<PuzzleSpec, CodecError> {
        let spec: PuzzleSpec = self.codec.decode(id)?;
        self.registry
            .build_figure(spec.figure, &spec.feature_sets, &spec.alphabets)?;
        Ok(spec)
    }

    /// Decode the identifier and build the puzzle.
    pub fn puzzle(&self, id: &str) -> Result<Puzzle, CodecError> {
        let spec: PuzzleSpec = self.decode(id)?;
        Ok(Puzzle::from_spec(self.registry, spec)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{Configuration, Transition};
    use serde_json::{Value, json};

    fn check_data_integrity(data: Value) {
        let codec = Codec::new(1);
        let id = codec.encode(&data).unwrap();
        let decoded: Value = codec.decode(&id).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn data_round_trip() {
        check_data_integrity(json!({}));
        check_data_integrity(json!({"moulanger": 3}));
        check_data_integrity(json!({"fg": 6}));
        check_data_integrity(json!({"fg": 6, "f": [4, 2, 6, 4, 7, 3, 2, 1]}));
        check_data_integrity(json!({"a": [4, 2, 6, 4, 7, 3, 2, 1]}));
    }

    #[test]
    fn identifiers_are_url_safe_and_stable() {
        let codec = Codec::new(1);
        let id = codec.encode(&json!({"a": [4, 2, 6, 4, 7, 3, 2, 1]})).unwrap();
        assert!(
            id.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(
            id,
            codec.encode(&json!({"a": [4, 2, 6, 4, 7, 3, 2, 1]})).unwrap()
        );
    }

    #[test]
    fn every_flipped_character_is_detected() {
        let codec = Codec::new(1);
        let id = codec.encode(&json!({"k": 3})).unwrap();
        for i in 0..id.len() {
            let mut chars: Vec<char> = id.chars().collect();
            chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
            let corrupted: String = chars.into_iter().collect();
            let err = codec.decode::<Value>(&corrupted).unwrap_err();
            assert!(matches!(err, CodecError::Malformed(_)), "position {i}: {err}");
        }
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = Codec::new(1);
        for id in ["", "abc", "not an id!", "AAAAAAAAAAAAAAAA"] {
            assert!(matches!(
                codec.decode::<Value>(id),
                Err(CodecError::Malformed(_))
            ));
        }
    }

    #[test]
    fn registry_version_mismatch() {
        let id = Codec::new(1).encode(&json!({"k": 3})).unwrap();
        let err = Codec::new(2).decode::<Value>(&id).unwrap_err();
        assert!(matches!(
            err,
            CodecError::RegistryMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn puzzle_spec_round_trip() {
        let registry = Registry::builtin();
        let codec = PuzzleCodec::new(&registry);
        let spec = PuzzleSpec {
            figure: 4,
            feature_sets: vec![1, 4, 6],
            alphabets: vec![vec![6, 2, 0, 3], vec![9, 7, 8], vec![15, 16, 17, 18, 19]],
            seed: Configuration::new(vec![3, 0, 0]),
            transitions: vec![
                Transition::new(vec![1, 0, 1]),
                Transition::new(vec![0, 2, 1]),
            ],
        };
        let id = codec.encode(&spec).unwrap();
        assert_eq!(codec.decode(&id).unwrap(), spec);
        let puzzle = codec.puzzle(&id).unwrap();
        assert_eq!(puzzle.answer(), &Configuration::new(vec![1, 1, 4]));
    }

    #[test]
    fn spec_outside_registry() {
        let registry = Registry::builtin();
        let spec = PuzzleSpec {
            figure: 0,
            feature_sets: vec![0],
            alphabets: vec![vec![0, 1, 200]],
            seed: Configuration::new(vec![0]),
            transitions: vec![Transition::new(vec![1])],
        };
        let id = Codec::for_registry(&registry).encode(&spec).unwrap();
        let err = PuzzleCodec::new(&registry).decode(&id).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Incompatible(PuzzleError::UnknownEntry { .. })
        ));
    }

    #[test]
    fn alphabet_outside_its_feature_set_is_incompatible() {
        let registry = Registry::builtin();
        // A color in a shape alphabet
        let spec = PuzzleSpec {
            figure: 0,
            feature_sets: vec![1],
            alphabets: vec![vec![0, 1, 7]],
            seed: Configuration::new(vec![0]),
            transitions: vec![Transition::new(vec![1])],
        };
        let id = Codec::for_registry(&registry).encode(&spec).unwrap();
        let err = PuzzleCodec::new(&registry).decode(&id).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Incompatible(PuzzleError::Membership { .. })
        ));
        assert!(!matches!(err, CodecError::RegistryMismatch { .. }));
    }

    #[test]
    fn wrong_payload_shape_is_malformed() {
        let registry = Registry::builtin();
        let id = Codec::for_registry(&registry)
            .encode(&json!({"k": 3}))
            .unwrap();
        assert!(matches!(
            PuzzleCodec::new(&registry).decode(&id),
            Err(CodecError::Malformed(_))
        ));
    }
}
