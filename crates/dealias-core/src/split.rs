//! Block distribution of a two-dimensional array over processes.
//!
//! A distributed driver keeps each process's slab in one of two layouts: all
//! `nx` rows of a block of `y` columns (`nx × y`), or a block of `x` rows
//! with all `ny` columns (`x × ny`). The transpose between them needs a
//! buffer large enough for either, which is `n`.

use serde::{Deserialize, Serialize};

use crate::error::ConvError;

/// Local extents and offsets of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Global rows.
    pub nx: usize,
    /// Global columns.
    pub ny: usize,
    /// First local row.
    pub x0: usize,
    /// First local column.
    pub y0: usize,
    /// Local rows.
    pub x: usize,
    /// Local columns.
    pub y: usize,
    /// Elements in the local buffer, `max(x·ny, nx·y)`.
    pub n: usize,
}

/// Start and length of `rank`'s block when `len` items are dealt out in
/// blocks of `ceil(len / size)`.
fn block(len: usize, rank: usize, size: usize) -> (usize, usize) {
    let width = len.div_ceil(size);
    let start = (width * rank).min(len);
    (start, width.min(len - start))
}

impl Split {
    /// Slab of process `rank` out of `size` for an `nx × ny` array.
    pub fn new(nx: usize, ny: usize, rank: usize, size: usize) -> Result<Self, ConvError> {
        if rank >= size {
            return Err(ConvError::InvalidRank { rank, size });
        }
        let (x0, x) = block(nx, rank, size);
        let (y0, y) = block(ny, rank, size);
        Ok(Self {
            nx,
            ny,
            x0,
            y0,
            x,
            y,
            n: (x * ny).max(nx * y),
        })
    }

    /// Whether this process holds no rows and no columns.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}
