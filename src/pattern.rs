//! Pattern Generator - Digest to Fill Matrix
//!
//! Each cell reads one hex character of the digest (wrapping past the end):
//! even values fill the cell, odd values leave it empty.

use serde::{Deserialize, Serialize};

use crate::error::{IdenticonError, IdenticonResult};
use crate::hashing::Digest;

/// State of one grid cell. Only two states are produced today; the renderer
/// looks fills up per state so more shades can be added without an API break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    Filled,
}

impl CellState {
    fn from_nibble(value: u8) -> Self {
        if value % 2 == 0 {
            Self::Filled
        } else {
            Self::Empty
        }
    }

    pub fn is_filled(self) -> bool {
        self == Self::Filled
    }

    /// 1 for filled, 0 for empty.
    pub fn bit(self) -> u8 {
        u8::from(self.is_filled())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symmetry {
    /// Left half from the digest, right half mirrored.
    #[default]
    Mirrored,
    /// Every cell read independently.
    Independent,
}

/// Square `n x n` grid of cell states, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillMatrix {
    size: usize,
    rows: Vec<Vec<CellState>>,
}

impl FillMatrix {
    /// Build from explicit rows; fails unless the rows form a non-empty square.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> IdenticonResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(IdenticonError::invalid_argument("matrix must have at least one row"));
        }
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(IdenticonError::invalid_argument(format!(
                "row {} has {} cells, expected {}",
                r,
                row.len(),
                size
            )));
        }
        Ok(Self { size, rows })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rows(&self) -> &[Vec<CellState>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Iterate `(row, col, state)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, &state)| (r, c, state))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.cells().filter(|(_, _, s)| s.is_filled()).count()
    }

    pub fn is_mirror_symmetric(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().eq(row.iter().rev()))
    }

    /// Rows as 0/1 values.
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|s| s.bit()).collect())
            .collect()
    }
}

/// Mirrored pattern for `digest` on an `n x n` grid.
pub fn generate_pattern(digest: &Digest, n: usize) -> IdenticonResult<FillMatrix> {
    generate_pattern_with(digest, n, Symmetry::Mirrored)
}

pub fn generate_pattern_with(
    digest: &Digest,
    n: usize,
    symmetry: Symmetry,
) -> IdenticonResult<FillMatrix> {
    if n == 0 {
        return Err(IdenticonError::invalid_argument("grid size must be >= 1"));
    }
    if digest.is_empty() {
        return Err(IdenticonError::invalid_argument("digest must not be empty"));
    }

    let half_width = match symmetry {
        Symmetry::Mirrored => n.div_ceil(2),
        Symmetry::Independent => n,
    };

    let rows = (0..n)
        .map(|r| {
            let mut row: Vec<CellState> = (0..half_width)
                .map(|c| CellState::from_nibble(digest.nibble(r * half_width + c)))
                .collect();
            if symmetry == Symmetry::Mirrored {
                // odd n: the centre column is not duplicated
                let keep = if n % 2 == 0 { half_width } else { half_width - 1 };
                let mirrored: Vec<CellState> = row[..keep].iter().rev().copied().collect();
                row.extend(mirrored);
            }
            row
        })
        .collect();

    Ok(FillMatrix { size: n, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::generate_hash;

    fn digest(hex: &str) -> Digest {
        Digest::parse(hex).unwrap()
    }

    #[test]
    fn test_hello_pattern() {
        let d = generate_hash("hello", 16).unwrap();
        let m = generate_pattern(&d, 5).unwrap();
        assert_eq!(
            m.to_bits(),
            vec![
                vec![1, 0, 0, 0, 1],
                vec![0, 1, 0, 1, 0],
                vec![1, 1, 0, 1, 1],
                vec![1, 0, 1, 0, 1],
                vec![0, 0, 0, 0, 0],
            ]
        );
        assert_eq!(m.filled_count(), 11);
    }

    #[test]
    fn test_shape_for_various_sizes() {
        for hex in ["a", "0f", "2b1741ea3cd4d3dab78b3ddd2c0ccb32", "0123456789abcdef0123"] {
            for n in [1, 2, 5, 8] {
                let m = generate_pattern(&digest(hex), n).unwrap();
                assert_eq!(m.size(), n);
                assert_eq!(m.rows().len(), n);
                assert!(m.rows().iter().all(|row| row.len() == n));
                let mi = generate_pattern_with(&digest(hex), n, Symmetry::Independent).unwrap();
                assert!(mi.rows().iter().all(|row| row.len() == n));
            }
        }
    }

    #[test]
    fn test_mirror_invariant() {
        for seed in ["alice", "bob", "", "carol@example.com"] {
            let d = generate_hash(seed, 16).unwrap();
            for n in 1..=9 {
                let m = generate_pattern(&d, n).unwrap();
                for r in 0..n {
                    for j in 0..n {
                        assert_eq!(m.get(r, j), m.get(r, n - 1 - j));
                    }
                }
                assert!(m.is_mirror_symmetric());
            }
        }
    }

    #[test]
    fn test_even_grid_mirrors_whole_half() {
        // half width 2: row0 reads "0","1" -> [F,E], mirrored -> [F,E,E,F]
        let m = generate_pattern(&digest("01"), 4).unwrap();
        assert_eq!(m.to_bits()[0], vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_independent_reads_every_cell() {
        let m = generate_pattern_with(&digest("0123"), 2, Symmetry::Independent).unwrap();
        assert_eq!(m.to_bits(), vec![vec![1, 0], vec![1, 0]]);
        let m = generate_pattern_with(&digest("01"), 3, Symmetry::Independent).unwrap();
        // indices 0..9 wrap over "01"
        assert_eq!(m.to_bits(), vec![vec![1, 0, 1], vec![0, 1, 0], vec![1, 0, 1]]);
    }

    #[test]
    fn test_zero_grid_rejected() {
        let err = generate_pattern(&digest("abc"), 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_from_rows_requires_square() {
        use CellState::*;
        assert!(FillMatrix::from_rows(vec![]).is_err());
        assert!(FillMatrix::from_rows(vec![vec![Filled, Empty], vec![Empty]]).is_err());
        let m = FillMatrix::from_rows(vec![vec![Filled, Empty], vec![Empty, Filled]]).unwrap();
        assert_eq!(m.filled_count(), 2);
        assert!(!m.is_mirror_symmetric());
    }
}
