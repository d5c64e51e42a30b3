//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece type.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Out-of-range coordinates follow per-axis rules: columns outside 0..10 and rows at or
//! below the floor are blocked, rows above the top (y < 0) are open space so a piece
//! spawning partly above the board is still placeable.

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameBoard {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl GameBoard {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * BOARD_WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Contents of (x, y); anything off the grid reads as empty
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.get(x, y).flatten()
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a block may not occupy (x, y)
    ///
    /// Side walls and the floor are blocked, space above the top row is open,
    /// and in-bounds cells are blocked when occupied.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.is_occupied(x, y)
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        let start = y * BOARD_WIDTH;
        self.cells[start..start + BOARD_WIDTH]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y.min(BOARD_HEIGHT - 1) * BOARD_WIDTH;
        &self.cells[start..start + BOARD_WIDTH]
    }

    /// True iff every block of the piece is inside the side walls, above the floor,
    /// and on an empty cell. Blocks above the top row are ignored.
    pub fn can_place(&self, piece: &Tetromino) -> bool {
        piece
            .block_positions()
            .iter()
            .all(|p| !self.is_blocked(p.x, p.y))
    }

    /// Whether the piece would fit after translating by (dx, dy)
    pub fn can_move(&self, piece: &Tetromino, dx: i32, dy: i32) -> bool {
        self.can_place(&piece.moved(dx, dy))
    }

    /// Whether the piece would fit after one rotation step, in place
    pub fn can_rotate(&self, piece: &Tetromino, clockwise: bool) -> bool {
        self.can_place(&piece.rotated(clockwise))
    }

    /// Write the piece's type into every in-bounds block cell
    ///
    /// Blocks above the top row are dropped. Returns the number of cells written.
    pub fn lock_piece(&mut self, piece: &Tetromino) -> usize {
        let mut written = 0;
        for p in piece.block_positions() {
            if self.set(p.x, p.y, Some(piece.kind())) {
                written += 1;
            }
        }
        written
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    /// Uses a two-pointer algorithm with zero-allocation
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, BOARD_HEIGHT> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_y = BOARD_HEIGHT;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                // Not full: compact it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * BOARD_WIDTH;
                    let dst_start = write_y * BOARD_WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + BOARD_WIDTH, dst_start);
                }
            }
        }

        // Vacated rows at the top
        for cell in &mut self.cells[..write_y * BOARD_WIDTH] {
            *cell = None;
        }

        cleared_rows
    }

    /// Remove full rows, compact the rest downward, return how many were removed
    pub fn clear_lines(&mut self) -> u32 {
        self.clear_full_rows().len() as u32
    }

    /// Y the piece's origin would reach by falling straight down
    pub fn drop_position(&self, piece: &Tetromino) -> i32 {
        let mut probe = *piece;
        while self.can_move(&probe, 0, 1) {
            probe.move_by(0, 1);
        }
        probe.position().y
    }

    /// True iff a just-spawned piece cannot be placed
    pub fn is_game_over(&self, piece: &Tetromino) -> bool {
        !self.can_place(piece)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Encode the board as a row-major grid of cell codes (0 = empty, 1..=7 = type)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH]; BOARD_HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * BOARD_WIDTH + x].map_or(0, |kind| kind.code());
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::types::TetrominoType;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(GameBoard::index(0, 0), Some(0));
        assert_eq!(GameBoard::index(9, 0), Some(9));
        assert_eq!(GameBoard::index(0, 1), Some(10));
        assert_eq!(GameBoard::index(9, 19), Some(199));
        assert_eq!(GameBoard::index(-1, 0), None);
        assert_eq!(GameBoard::index(10, 0), None);
        assert_eq!(GameBoard::index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = GameBoard::new();

        board.set(0, 0, Some(TetrominoType::I));
        board.set(5, 10, Some(TetrominoType::T));

        assert_eq!(board.get(0, 0), Some(Some(TetrominoType::I)));
        assert_eq!(board.get(5, 10), Some(Some(TetrominoType::T)));

        assert_eq!(board.cells[0], Some(TetrominoType::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(TetrominoType::T));
    }

    #[test]
    fn test_axis_semantics() {
        let board = GameBoard::new();

        assert!(board.is_blocked(-1, 5));
        assert!(board.is_blocked(10, 5));
        assert!(board.is_blocked(4, 20));
        assert!(!board.is_blocked(4, -3));
        assert_eq!(board.cell(-1, -1), None);
    }

    #[test]
    fn test_lock_drops_blocks_above_top() {
        let mut board = GameBoard::new();
        let piece = Tetromino::at(TetrominoType::I, Position::new(0, -2), 1);

        // Vertical I at column 2 spans y = -2..=1
        assert_eq!(board.lock_piece(&piece), 2);
        assert!(board.is_occupied(2, 0));
        assert!(board.is_occupied(2, 1));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = GameBoard::new();
        board.set(0, 19, Some(TetrominoType::I));
        board.set(9, 0, Some(TetrominoType::L));

        let mut grid = [[0u8; BOARD_WIDTH]; BOARD_HEIGHT];
        board.write_u8_grid(&mut grid);

        assert_eq!(grid[19][0], 1);
        assert_eq!(grid[0][9], 7);
        assert_eq!(grid.iter().flatten().filter(|c| **c != 0).count(), 2);
    }
}
