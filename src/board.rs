//! Per-player board: ship placement, shot resolution and the two views
//! handed out to clients.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, Cell, ShotOutcome};
use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, Ship};

const N: usize = BOARD_SIZE as usize;

type BB = BitBoard<u128, N>;

/// Ship type used on every board.
pub type BoardShip = Ship<u128, N>;

/// A rendered 10×10 grid, indexed `rows[y][x]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    pub rows: [[Cell; N]; N],
}

impl BoardView {
    /// Cell at (`x`, `y`), or `None` off the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Number of cells in the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.rows.iter().flatten().filter(|c| **c == cell).count()
    }

    /// Glyph grid, the shape older clients consume.
    pub fn to_chars(&self) -> [[char; N]; N] {
        let mut out = [['~'; N]; N];
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                out[y][x] = cell.glyph();
            }
        }
        out
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 0..N {
            write!(f, " {}", x)?;
        }
        writeln!(f)?;
        for (y, row) in self.rows.iter().enumerate() {
            write!(f, "{:>2}", y)?;
            for cell in row {
                write!(f, " {}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One player's grid and fleet.
///
/// Invariants: every ship cell belongs to exactly one ship, hits are a
/// subset of the ship map and misses are disjoint from it.
#[derive(Clone)]
pub struct Board {
    ships: Vec<BoardShip>,
    ship_map: BB,
    hits: BB,
    misses: BB,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Board {
            ships: Vec::new(),
            ship_map: BB::new(),
            hits: BB::new(),
            misses: BB::new(),
        }
    }

    /// Ships placed so far, in placement order.
    pub fn ships(&self) -> &[BoardShip] {
        &self.ships
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    /// Place a ship of `size` cells at (`x`, `y`).
    ///
    /// Validation happens before any mutation, so a rejected placement
    /// leaves the board unchanged.
    pub fn place_ship(
        &mut self,
        x: usize,
        y: usize,
        size: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let ship = BoardShip::new(size, orientation, x, y)?;
        let mask = ship.mask();
        let occupied = self.ship_map | self.hits | self.misses;
        if !(occupied & mask).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map = self.ship_map | mask;
        self.ships.push(ship);
        Ok(())
    }

    /// Resolve an incoming shot at (`x`, `y`).
    ///
    /// Re-shooting a cell returns `AlreadyShot` without touching any state.
    pub fn receive_shot(&mut self, x: usize, y: usize) -> Result<ShotOutcome, BoardError> {
        if x >= N || y >= N {
            return Err(BoardError::ShotOutOfBounds);
        }
        if self.hits.get(x, y)? || self.misses.get(x, y)? {
            return Ok(ShotOutcome::AlreadyShot);
        }
        if !self.ship_map.get(x, y)? {
            self.misses.set(x, y)?;
            return Ok(ShotOutcome::Miss);
        }

        let ship = self
            .ships
            .iter_mut()
            .find(|s| s.occupies(x, y))
            .ok_or(BoardError::UnknownShipHit)?;
        ship.hit(x, y);
        let sunk = ship.is_sunk();
        self.hits.set(x, y)?;
        Ok(if sunk { ShotOutcome::Sunk } else { ShotOutcome::Hit })
    }

    /// Returns `true` when every placed ship is sunk. Vacuously true for an
    /// empty fleet.
    pub fn is_fleet_destroyed(&self) -> bool {
        self.ships.iter().all(|s| s.is_sunk())
    }

    /// Cell state at (`x`, `y`).
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= N || y >= N {
            return None;
        }
        Some(if self.hits.contains(x, y) {
            Cell::Hit
        } else if self.misses.contains(x, y) {
            Cell::Miss
        } else if self.ship_map.contains(x, y) {
            Cell::Ship
        } else {
            Cell::Empty
        })
    }

    /// Full grid, ships included. Only for the board's owner.
    pub fn own_view(&self) -> BoardView {
        self.render(true)
    }

    /// Grid as the opponent may see it: intact ship cells show as water.
    pub fn opponent_view(&self) -> BoardView {
        self.render(false)
    }

    fn render(&self, reveal_ships: bool) -> BoardView {
        let mut view = BoardView::default();
        for (y, row) in view.rows.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                let cell = self.cell(x, y).unwrap_or_default();
                *slot = match cell {
                    Cell::Ship if !reveal_ships => Cell::Empty,
                    other => other,
                };
            }
        }
        view
    }

    /// Returns a random free (x, y, Orientation) for a ship of `size`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        if size == 0 || size > N {
            return Err(BoardError::InvalidShipSize);
        }
        let occupied = self.ship_map | self.hits | self.misses;
        for _ in 0..100 {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orient {
                Orientation::Horizontal => (N - size, N - 1),
                Orientation::Vertical => (N - 1, N - size),
            };
            let x = rng.random_range(0..=max_x);
            let y = rng.random_range(0..=max_y);
            let ship = BoardShip::new(size, orient, x, y)?;
            if (occupied & ship.mask()).is_empty() {
                return Ok((x, y, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("ships", &self.ships)
            .field("hits", &self.hits.count_ones())
            .field("misses", &self.misses.count_ones())
            .finish()
    }
}
