//! Fixed-size occupancy masks packed into an unsigned integer.
//!
//! A `BitBoard<T, N>` marks cells of an `N×N` grid. Cells are addressed as
//! `(x, y)` with `x` the column and `y` the row, matching the rest of the
//! crate. The type is `Copy`, allocation free and usable without `std`.

use core::fmt;
use core::ops::{BitAnd, BitOr};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BitBoardError {
    /// Column or row outside `[0, N)`.
    IndexOutOfBounds { x: usize, y: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
        }
    }
}

/// Set of cells on an `N×N` grid, one bit per cell in row-major order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Evaluated on first use; rejects `N` that does not fit in `T`.
    const FITS: () = assert!(N * N <= core::mem::size_of::<T>() * 8);

    /// An empty board.
    #[inline]
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::FITS;
        BitBoard { bits: T::zero() }
    }

    #[inline]
    fn index(x: usize, y: usize) -> Result<usize, BitBoardError> {
        if x >= N || y >= N {
            return Err(BitBoardError::IndexOutOfBounds { x, y });
        }
        Ok(y * N + x)
    }

    /// Returns whether `(x, y)` is marked.
    pub fn get(&self, x: usize, y: usize) -> Result<bool, BitBoardError> {
        let idx = Self::index(x, y)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Marks `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize) -> Result<(), BitBoardError> {
        let idx = Self::index(x, y)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Convenience for callers that already validated bounds.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// True if every cell marked in `self` is also marked in `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        (self.bits & !other.bits).is_zero()
    }

    /// Marked cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..N * N)
            .filter(move |idx| ((self.bits >> *idx) & T::one()) != T::zero())
            .map(|idx| (idx % N, idx / N))
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}> [", N, N)?;
        for y in 0..N {
            write!(f, "  ")?;
            for x in 0..N {
                let c = if self.contains(x, y) { '1' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}
