//! Identicon Core - Deterministic Avatar Generator
//!
//! # Guarantees
//! 1. Same seed and options, same bytes out
//! 2. No I/O, no globals, no hidden state in the pipeline
//! 3. Invalid input fails up front with `InvalidArgument`, never half-drawn
//! 4. Seed digests are not cryptographic; never use them for secrets

pub mod error;
pub mod hashing;
pub mod pattern;
pub mod color;
pub mod svg;
pub mod config;
pub mod pipeline;

pub use error::{IdenticonError, IdenticonResult};
pub use hashing::{generate_hash, generate_hash_with, Digest, HashAlgorithm};
pub use pattern::{generate_pattern, generate_pattern_with, CellState, FillMatrix, Symmetry};
pub use color::{select_color, Color};
pub use svg::{render_svg, render_svg_with, to_data_uri, Palette, RenderOptions, RenderStrategy};
pub use config::{IdenticonOptions, DEFAULT_DIGEST_BYTES, DEFAULT_GRID, DEFAULT_IMAGE_SIZE};
pub use pipeline::{generate_identicon, Identicon, IdenticonGenerator, IdenticonManifest};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
