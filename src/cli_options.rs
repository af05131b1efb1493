/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! List the registry:
//!
//! ```text
//! $ raven --ls
//! Registry version 1
//! Figures:
//!   0  simple shape  [Shape]
//! ...
//! ```
//!
//! Generate three puzzle identifiers with a row and a column transition:
//!
//! ```text
//! $ raven -c 3 -m two --seed 42
//! ```
//!
//! Show the grid and the answer choices of a puzzle, then write its SVG contact sheet with the
//! answer cell left blank:
//!
//! ```text
//! $ raven --show <ID>
//! $ raven --render <ID> --output puzzle.svg --blank
//! ```

use clap::Parser;
use log::{debug, error};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::fs;
use std::path::PathBuf;

use raven_matrix::codec::PuzzleCodec;
use raven_matrix::config::{
    APPLICATION_NAME, COPYRIGHT_NOTICE, DEFAULT_CHOICES, DEFAULT_TILE_SIZE, REGISTRY_ENV, VERSION,
};
use raven_matrix::draw::SvgBackend;
use raven_matrix::generator::matrix::GRID_SIZE;
use raven_matrix::generator::random_puzzle::{Mode, RandomPuzzle};
use raven_matrix::puzzle::Puzzle;
use raven_matrix::registry::Registry;

/// Generate Raven's Progressive Matrices style puzzles.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the registry
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// JSON registry file (default: built-in registry, or the RAVEN_REGISTRY file)
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Number of random puzzle identifiers to generate
    #[arg(short, long, group = "action")]
    count: Option<usize>,

    /// Number of transitions of the generated puzzles
    #[arg(value_enum, short, long, default_value_t = Mode::Two)]
    mode: Mode,

    /// Seed of the random generator, for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the grid, the answer, and the answer choices of a puzzle
    #[arg(long, group = "action", value_name = "ID")]
    show: Option<String>,

    /// Write the grid of a puzzle as an SVG contact sheet
    #[arg(long, group = "action", value_name = "ID", requires = "output")]
    render: Option<String>,

    /// Output file for --render
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave the answer cell blank when rendering
    #[arg(short, long, default_value_t = false)]
    blank: bool,

    /// Size in pixels of a rendered figure
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Load the registry from the command line option, the environment, or the built-in one.
fn load_registry(path: Option<PathBuf>) -> Result<Registry, String> {
    let path: Option<PathBuf> = path.or_else(|| env::var_os(REGISTRY_ENV).map(PathBuf::from));
    match path {
        None => Ok(Registry::builtin()),
        Some(p) => Registry::from_file(&p).map_err(|e| format!("{}: {e}", p.display())),
    }
}

fn list(registry: &Registry) {
    println!("Registry version {}", registry.version);
    println!("Figures:");
    for (i, kind) in registry.figures.iter().enumerate() {
        println!("  {i:>2}  {}  {:?}", kind.name(), kind.slot_categories());
    }
    println!("Feature sets:");
    for (i, kind) in registry.feature_sets.iter().enumerate() {
        let length: String = kind.length.map(|l| format!(" x{l}")).unwrap_or_default();
        println!(
            "  {i:>2}  {}  {:?} {:?}{length}",
            kind.name, kind.category, kind.rule
        );
    }
    println!("Features:");
    for (i, feature) in registry.features.iter().enumerate() {
        println!("  {i:>2}  {:?} {feature}", feature.category());
    }
}

fn show<R: Rng>(puzzle: &Puzzle, rng: &mut R) {
    println!("Figure: {}", puzzle.figure().kind().name());
    for (slot, set) in puzzle.figure().slots().iter().enumerate() {
        let features: Vec<String> = set.features().iter().map(|f| f.to_string()).collect();
        println!(
            "  slot {slot}: {} [{}]",
            set.kind().name,
            features.join(", ")
        );
    }
    println!("Grid:");
    for (row, cells) in puzzle.matrix().rows().enumerate() {
        let cells: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(column, c)| {
                if row == GRID_SIZE - 1 && column == GRID_SIZE - 1 {
                    "?".to_string()
                } else {
                    c.to_string()
                }
            })
            .collect();
        println!("  {}", cells.join(" "));
    }
    let choices = puzzle.choices(DEFAULT_CHOICES, rng);
    println!("Choices:");
    for (i, c) in choices.configurations.iter().enumerate() {
        println!("  {}. {c}", i + 1);
    }
    println!(
        "Answer: {} {}",
        choices.answer + 1,
        puzzle.answer()
    );
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        // SAFETY: the logger is not initialized yet and no other thread exists
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();
    debug!("{APPLICATION_NAME} {VERSION}");

    let registry: Registry = match load_registry(args.registry) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("Cannot load the registry: {msg}");
            return 1;
        }
    };

    if args.ls {
        list(&registry);
        return 0;
    }

    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let codec: PuzzleCodec = PuzzleCodec::new(&registry);

    //
    // Generate random puzzles
    //
    if let Some(count) = args.count {
        let mut generator: RandomPuzzle = RandomPuzzle::new(&registry, args.mode);
        let mut attempts: usize = 0;
        for i in 0..count {
            debug!("Iteration {i}");
            let id: Result<String, String> = generator
                .generate(&mut rng)
                .map_err(|e| e.to_string())
                .and_then(|spec| codec.encode(&spec).map_err(|e| e.to_string()));
            attempts += generator.iteration;
            match id {
                Ok(id) => println!("{id}"),
                Err(msg) => {
                    eprintln!("Error: {msg}");
                    return 1;
                }
            }
        }
        debug!("{attempts} attempts for {count} puzzles");
        return 0;
    }

    //
    // Show a puzzle
    //
    if let Some(id) = args.show {
        return match codec.puzzle(&id) {
            Ok(puzzle) => {
                show(&puzzle, &mut rng);
                0
            }
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        };
    }

    //
    // Render a puzzle
    //
    if let Some(id) = args.render {
        let Some(output) = args.output else {
            eprintln!("Error: --render requires --output");
            return 2;
        };
        let backend: SvgBackend = SvgBackend::new(args.tile_size);
        let image = codec
            .puzzle(&id)
            .map_err(|e| e.to_string())
            .and_then(|p| p.render(&backend, args.blank).map_err(|e| e.to_string()));
        return match image {
            Ok(image) => match fs::write(&output, image.to_document()) {
                Ok(()) => 0,
                Err(e) => {
                    error!("Cannot write {}: {e}", output.display());
                    eprintln!("Error: cannot write {}: {e}", output.display());
                    1
                }
            },
            Err(msg) => {
                eprintln!("Error: {msg}");
                1
            }
        };
    }

    eprintln!("Nothing to do. Use --help to list the options.");
    2
}
