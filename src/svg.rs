//! Image Renderer - Fill Matrix to SVG
//!
//! Only numbers and validated `Color` values are interpolated into the
//! document; no caller text ever reaches the markup.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{IdenticonError, IdenticonResult};
use crate::pattern::{CellState, FillMatrix};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStrategy {
    /// One `<rect>` per filled cell.
    #[default]
    Rects,
    /// One `<path>` per fill color, a closed square sub-path per cell.
    Path,
}

/// Maps cell states to fills. `None` leaves the cell transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    filled: Color,
}

impl Palette {
    pub fn new(filled: Color) -> Self {
        Self { filled }
    }

    pub fn fill_for(&self, state: CellState) -> Option<&Color> {
        match state {
            CellState::Empty => None,
            CellState::Filled => Some(&self.filled),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub strategy: RenderStrategy,
    /// Full-canvas rectangle drawn before any cell.
    #[serde(default)]
    pub background: Option<Color>,
}

/// Render with one `<rect>` per filled cell on a transparent canvas.
pub fn render_svg(
    image_size: f64,
    cell_size: f64,
    n: usize,
    matrix: &FillMatrix,
    color: &Color,
) -> IdenticonResult<String> {
    render_svg_with(
        image_size,
        cell_size,
        n,
        matrix,
        &Palette::new(color.clone()),
        &RenderOptions::default(),
    )
}

pub fn render_svg_with(
    image_size: f64,
    cell_size: f64,
    n: usize,
    matrix: &FillMatrix,
    palette: &Palette,
    options: &RenderOptions,
) -> IdenticonResult<String> {
    if !(image_size.is_finite() && image_size > 0.0) {
        return Err(IdenticonError::invalid_argument(format!(
            "image size must be a positive finite number, got {}",
            image_size
        )));
    }
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(IdenticonError::invalid_argument(format!(
            "cell size must be a positive finite number, got {}",
            cell_size
        )));
    }
    if matrix.size() != n {
        return Err(IdenticonError::invalid_argument(format!(
            "matrix is {0}x{0} but grid size is {1}",
            matrix.size(),
            n
        )));
    }

    let mut svg = format!(
        r#"<svg xmlns="{ns}" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
        ns = SVG_NS,
        s = image_size
    );

    if let Some(bg) = &options.background {
        svg.push_str(&format!(r#"<rect width="100%" height="100%" fill="{}"/>"#, bg));
    }

    match options.strategy {
        RenderStrategy::Rects => {
            for (row, col, state) in matrix.cells() {
                if let Some(fill) = palette.fill_for(state) {
                    let (x, y) = cell_origin(row, col, cell_size);
                    svg.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{c}" height="{c}" fill="{}" />"#,
                        x,
                        y,
                        fill,
                        c = cell_size
                    ));
                }
            }
        }
        RenderStrategy::Path => {
            // (fill, path data) in order of first appearance
            let mut paths: Vec<(&Color, String)> = Vec::new();
            for (row, col, state) in matrix.cells() {
                let Some(fill) = palette.fill_for(state) else {
                    continue;
                };
                let (x, y) = cell_origin(row, col, cell_size);
                let segment = format!("M{} {}h{c}v{c}h-{c}z", x, y, c = cell_size);
                match paths.iter_mut().find(|(f, _)| *f == fill) {
                    Some((_, d)) => d.push_str(&segment),
                    None => paths.push((fill, segment)),
                }
            }
            for (fill, d) in paths {
                svg.push_str(&format!(r#"<path fill="{}" d="{}"/>"#, fill, d));
            }
        }
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn cell_origin(row: usize, col: usize, cell_size: f64) -> (f64, f64) {
    (col as f64 * cell_size, row as f64 * cell_size)
}

/// `data:` URI for inlining an SVG document in HTML or CSS.
pub fn to_data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(svg.as_bytes())
    )
}
