//! Identicon Pipeline - Single Entry Point
//!
//! seed -> digest -> fill matrix (+ color) -> SVG. Each stage only sees the
//! output of the one before it. Tracing happens here and nowhere else; the
//! stages themselves stay pure.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::color::{select_color, Color};
use crate::config::IdenticonOptions;
use crate::error::IdenticonResult;
use crate::hashing::{compute_manifest_hash, generate_hash_with, sha256_hex, Digest};
use crate::pattern::{generate_pattern_with, FillMatrix};
use crate::svg::{render_svg_with, Palette};
use crate::ENGINE_VERSION;

/// Everything produced for one seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Identicon {
    pub digest: Digest,
    pub matrix: FillMatrix,
    pub color: Color,
    pub cell_size: f64,
    pub svg: String,
}

/// Reproducibility record for a generated identicon.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdenticonManifest {
    pub engine_version: String,
    pub digest: Digest,
    pub color: Color,
    pub filled_cells: usize,
    pub options: IdenticonOptions,
    pub svg_sha256: String,
    /// SHA-256 of the canonical manifest with this field empty.
    pub manifest_hash: String,
}

#[derive(Debug, Clone)]
pub struct IdenticonGenerator {
    options: IdenticonOptions,
}

impl IdenticonGenerator {
    pub fn new(options: IdenticonOptions) -> IdenticonResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &IdenticonOptions {
        &self.options
    }

    /// Run the full pipeline for one seed.
    pub fn generate(&self, seed: impl fmt::Display) -> IdenticonResult<Identicon> {
        let opts = &self.options;
        let _span = tracing::debug_span!(
            "identicon.generate",
            grid = opts.grid,
            image_size = opts.image_size
        )
        .entered();

        let digest = generate_hash_with(opts.algorithm, seed, opts.digest_bytes)?;
        let matrix = generate_pattern_with(&digest, opts.grid, opts.symmetry)?;
        let color = select_color(&digest)?;
        let cell_size = opts.cell_size();
        debug!(
            digest = %digest,
            color = %color,
            filled = matrix.filled_count(),
            cell_size,
            "pattern ready"
        );

        let svg = render_svg_with(
            opts.image_size,
            cell_size,
            opts.grid,
            &matrix,
            &Palette::new(color.clone()),
            &opts.render_options(),
        )?;
        debug!(bytes = svg.len(), strategy = ?opts.strategy, "svg rendered");

        Ok(Identicon {
            digest,
            matrix,
            color,
            cell_size,
            svg,
        })
    }

    /// Just the SVG document.
    pub fn render(&self, seed: impl fmt::Display) -> IdenticonResult<String> {
        Ok(self.generate(seed)?.svg)
    }

    /// Independent per-seed results; one bad seed does not affect the rest.
    pub fn generate_batch<I, S>(&self, seeds: I) -> Vec<IdenticonResult<Identicon>>
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        seeds.into_iter().map(|seed| self.generate(seed)).collect()
    }

    pub fn manifest(&self, identicon: &Identicon) -> IdenticonResult<IdenticonManifest> {
        let mut manifest = IdenticonManifest {
            engine_version: ENGINE_VERSION.to_string(),
            digest: identicon.digest.clone(),
            color: identicon.color.clone(),
            filled_cells: identicon.matrix.filled_count(),
            options: self.options.clone(),
            svg_sha256: sha256_hex(identicon.svg.as_bytes()),
            manifest_hash: String::new(),
        };
        manifest.manifest_hash = compute_manifest_hash(&manifest)?;
        Ok(manifest)
    }
}

impl Default for IdenticonGenerator {
    fn default() -> Self {
        Self {
            options: IdenticonOptions::default(),
        }
    }
}

/// Generate an identicon SVG for `seed` on an `n x n` grid, `image_size`
/// pixels square, with default hashing and rendering.
///
/// The default `image_size` (`DEFAULT_IMAGE_SIZE`) is tiny; pass something
/// like `250.0` for a usable avatar.
pub fn generate_identicon(
    seed: impl fmt::Display,
    n: usize,
    image_size: f64,
) -> IdenticonResult<String> {
    let options = IdenticonOptions::default()
        .with_grid(n)
        .with_image_size(image_size);
    IdenticonGenerator::new(options)?.render(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GRID;
    use crate::svg::RenderStrategy;

    #[test]
    fn test_generate_matches_stages() {
        let generator =
            IdenticonGenerator::new(IdenticonOptions::default().with_image_size(250.0)).unwrap();
        let icon = generator.generate("hello").unwrap();
        assert_eq!(icon.digest.as_str(), "2b1741ea3cd4d3dab78b3ddd2c0ccb32");
        assert_eq!(icon.color.as_str(), "#2b1741");
        assert_eq!(icon.cell_size, 50.0);
        assert_eq!(icon.matrix.size(), DEFAULT_GRID);
        assert_eq!(icon.svg.matches("<rect").count(), icon.matrix.filled_count());
    }

    #[test]
    fn test_zero_grid_fails_before_work() {
        let err = generate_identicon("hello", 0, 250.0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_defaults_render() {
        let svg = IdenticonGenerator::default().render("x").unwrap();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="5" height="5""#));
        assert!(svg.contains(r#"width="1" height="1""#));
    }

    #[test]
    fn test_batch_is_per_seed() {
        let generator = IdenticonGenerator::default();
        let results = generator.generate_batch(["a", "b", "a"]);
        assert_eq!(results.len(), 3);
        let svgs: Vec<_> = results.into_iter().map(|r| r.unwrap().svg).collect();
        assert_eq!(svgs[0], svgs[2]);
        assert_ne!(svgs[0], svgs[1]);
    }

    #[test]
    fn test_manifest_is_deterministic() {
        let options = IdenticonOptions {
            strategy: RenderStrategy::Path,
            ..IdenticonOptions::default().with_image_size(64.0)
        };
        let generator = IdenticonGenerator::new(options).unwrap();
        let m1 = generator.manifest(&generator.generate("alice").unwrap()).unwrap();
        let m2 = generator.manifest(&generator.generate("alice").unwrap()).unwrap();
        assert_eq!(m1.manifest_hash, m2.manifest_hash);
        assert_eq!(m1.svg_sha256, m2.svg_sha256);
        assert_eq!(m1.manifest_hash.len(), 64);

        let m3 = generator.manifest(&generator.generate("bob").unwrap()).unwrap();
        assert_ne!(m1.manifest_hash, m3.manifest_hash);
    }
}
