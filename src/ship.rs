//! Ship geometry and damage tracking on top of `BitBoard`.

use core::fmt;
use core::str::FromStr;
use num_traits::{PrimInt, Unsigned, Zero};

use crate::bitboard::BitBoard;
use crate::common::BoardError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along increasing `x` (same row).
    Horizontal,
    /// Extends along increasing `y` (same column).
    Vertical,
}

impl Orientation {
    /// Single-letter token used by clients.
    pub fn token(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }
}

impl FromStr for Orientation {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "H" | "h" => Ok(Orientation::Horizontal),
            "V" | "v" => Ok(Orientation::Vertical),
            _ => Err(BoardError::InvalidOrientation),
        }
    }
}

/// A ship on an N×N board. Occupied cells and hits are both bitboards.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    size: usize,
    orientation: Orientation,
    x: usize,
    y: usize,
    mask: BitBoard<T, N>,
    hits: BitBoard<T, N>,
}

impl<T, const N: usize> Ship<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Lay out a ship of `size` cells starting at (`x`, `y`).
    ///
    /// Fails if the size is zero or exceeds the board, or if any cell would
    /// fall outside the grid. Overlap is the board's concern.
    pub fn new(size: usize, orientation: Orientation, x: usize, y: usize) -> Result<Self, BoardError> {
        if size == 0 || size > N {
            return Err(BoardError::InvalidShipSize);
        }
        let (end_x, end_y) = match orientation {
            Orientation::Horizontal => (x.checked_add(size - 1), Some(y)),
            Orientation::Vertical => (Some(x), y.checked_add(size - 1)),
        };
        match (end_x, end_y) {
            (Some(ex), Some(ey)) if ex < N && ey < N => {}
            _ => return Err(BoardError::ShipOutOfBounds),
        }

        let mut mask = BitBoard::<T, N>::new();
        for i in 0..size {
            let (cx, cy) = match orientation {
                Orientation::Horizontal => (x + i, y),
                Orientation::Vertical => (x, y + i),
            };
            mask.set(cx, cy)?;
        }

        Ok(Ship {
            size,
            orientation,
            x,
            y,
            mask,
            hits: BitBoard::new(),
        })
    }

    /// Record a hit at (`x`, `y`). Returns `false` if the cell is not part of
    /// this ship or was already hit.
    pub fn hit(&mut self, x: usize, y: usize) -> bool {
        if !self.mask.contains(x, y) || self.hits.contains(x, y) {
            return false;
        }
        self.hits.set(x, y).is_ok()
    }

    pub fn occupies(&self, x: usize, y: usize) -> bool {
        self.mask.contains(x, y)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    /// A ship is sunk once every one of its cells is hit.
    pub fn is_sunk(&self) -> bool {
        self.hit_count() == self.size
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Origin of the ship as (x, y).
    pub fn origin(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BitBoard<T, N> {
        self.mask
    }

    /// Cells already hit.
    pub fn hits(&self) -> BitBoard<T, N> {
        self.hits
    }
}

impl<T, const N: usize> fmt::Debug for Ship<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ size: {}, origin: ({}, {}), orientation: {:?}, hits: {} }}",
            self.size,
            self.x,
            self.y,
            self.orientation,
            self.hit_count(),
        )
    }
}
