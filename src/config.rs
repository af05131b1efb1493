/*
config.rs

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

//! Application settings.

/// Application name.
pub const APPLICATION_NAME: &str = "Raven Matrix";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Displayed by `raven --version` in its long form.
pub const COPYRIGHT_NOTICE: &str = "
Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Environment variable that points to a registry file.
pub const REGISTRY_ENV: &str = "RAVEN_REGISTRY";

/// Width and height in pixels of a rendered figure.
pub const DEFAULT_TILE_SIZE: u32 = 160;

/// Number of transforms per leg of the distractor walk.
pub const DISTRACTOR_WALK_LEN: usize = 10;

/// Number of random combinations to try before giving up on generating a puzzle.
pub const MAX_ATTEMPTS: usize = 1000;

/// Number of answer choices displayed with a puzzle, the answer included.
pub const DEFAULT_CHOICES: usize = 6;

/// Largest alphabet drawn by the random generator for sets without a fixed length.
pub const MAX_ALPHABET_LEN: usize = 5;
