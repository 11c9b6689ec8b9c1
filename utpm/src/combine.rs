//! Assembles a rectangular grid of UTPM matrices into one larger UTPM,
//! and the adjoint direction: splitting a combined adjoint back into the
//! block grid it was assembled from.

use ndarray::{Axis, Slice};

use crate::error::{Result, UtpmError};
use crate::types::Coeffs;
use crate::value::Utpm;

/// Combines `grid[r][c]` into one UTPM whose `(d,p)` slice is the
/// corresponding block matrix. Every block in row `r` must share the
/// same row count; every block in column `c` must share the same column
/// count; every block must share the same `(D,P)`.
pub fn combine_blocks(grid: &[Vec<Utpm>]) -> Result<Utpm> {
    let rb = grid.len();
    if rb == 0 || grid[0].is_empty() {
        return Err(UtpmError::ShapeMismatch("combine_blocks: empty grid".into()));
    }
    let cb = grid[0].len();

    let (d, p, _, _) = grid[0][0].dim();
    let row_sizes: Vec<usize> = grid.iter().map(|row| row[0].shape().0).collect();
    let col_sizes: Vec<usize> = grid[0].iter().map(|cell| cell.shape().1).collect();

    for (r, row) in grid.iter().enumerate() {
        if row.len() != cb {
            return Err(UtpmError::ShapeMismatch(format!(
                "combine_blocks: row {r} has {} blocks, expected {cb}",
                row.len()
            )));
        }
        for (c, cell) in row.iter().enumerate() {
            let (cd, cp, cn, cm) = cell.dim();
            if cd != d || cp != p {
                return Err(UtpmError::ShapeMismatch(format!(
                    "combine_blocks: block ({r},{c}) has Taylor shape ({cd},{cp}), expected ({d},{p})"
                )));
            }
            if cn != row_sizes[r] || cm != col_sizes[c] {
                return Err(UtpmError::ShapeMismatch(format!(
                    "combine_blocks: block ({r},{c}) is {cn}x{cm}, expected {}x{}",
                    row_sizes[r], col_sizes[c]
                )));
            }
        }
    }

    let total_rows: usize = row_sizes.iter().sum();
    let total_cols: usize = col_sizes.iter().sum();
    let mut tc = Coeffs::zeros((d, p, total_rows, total_cols));

    let mut row_start = 0;
    for (r, row) in grid.iter().enumerate() {
        let mut col_start = 0;
        for (c, cell) in row.iter().enumerate() {
            let row_end = row_start + row_sizes[r];
            let col_end = col_start + col_sizes[c];
            tc.slice_mut(ndarray::s![.., .., row_start..row_end, col_start..col_end])
                .assign(cell.coeffs());
            col_start = col_end;
        }
        row_start += row_sizes[r];
    }

    Ok(Utpm::from_coeffs(tc))
}

/// Splits a combined adjoint `whole` into the block grid described by
/// `row_sizes`/`col_sizes`, the inverse of [`combine_blocks`]'s layout.
pub fn split_blocks(whole: &Coeffs, row_sizes: &[usize], col_sizes: &[usize]) -> Vec<Vec<Coeffs>> {
    let mut out = Vec::with_capacity(row_sizes.len());
    let mut row_start = 0;
    for &rs in row_sizes {
        let mut row_out = Vec::with_capacity(col_sizes.len());
        let mut col_start = 0;
        for &cs in col_sizes {
            let block = whole
                .slice_axis(Axis(2), Slice::from(row_start..row_start + rs))
                .slice_axis(Axis(3), Slice::from(col_start..col_start + cs))
                .to_owned();
            row_out.push(block);
            col_start += cs;
        }
        out.push(row_out);
        row_start += rs;
    }
    out
}
