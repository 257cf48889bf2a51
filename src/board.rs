use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{N, SYMBOL_BLACK, SYMBOL_EMPTY, SYMBOL_WHITE};
use crate::error::{KonaneError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Color::Black => SYMBOL_BLACK,
            Color::White => SYMBOL_WHITE,
        }
    }

    /// Parse a player color from its board symbol, ignoring case.
    pub fn from_symbol(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            SYMBOL_BLACK => Some(Color::Black),
            SYMBOL_WHITE => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell as `(row, col)`. Row 0 is the top row, printed as rank 8.
pub type Point = (usize, usize);

/// An 8x8 Konane board. Each cell is a piece or empty (`None`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Color>; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; N]; N],
        }
    }

    /// The standard starting layout: every cell filled, colors alternating,
    /// Black in the top-left corner.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for row in 0..N {
            for col in 0..N {
                let color = if (row + col) % 2 == 0 {
                    Color::Black
                } else {
                    Color::White
                };
                board.cells[row][col] = Some(color);
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, (row, col): Point) -> Option<Color> {
        self.cells[row][col]
    }

    #[inline]
    pub fn set(&mut self, (row, col): Point, cell: Option<Color>) {
        self.cells[row][col] = cell;
    }

    #[inline]
    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.get(pt).is_none()
    }

    /// Step `steps` cells from `pt` along `dir`, or `None` if that leaves the board.
    #[inline]
    pub fn offset(pt: Point, dir: (isize, isize), steps: isize) -> Option<Point> {
        let row = pt.0 as isize + dir.0 * steps;
        let col = pt.1 as isize + dir.1 * steps;
        if (0..N as isize).contains(&row) && (0..N as isize).contains(&col) {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    /// Orthogonal neighbors of a cell that lie on the board.
    pub fn neighbors(pt: Point) -> impl Iterator<Item = Point> {
        crate::constants::DIRECTIONS
            .into_iter()
            .filter_map(move |dir| Self::offset(pt, dir, 1))
    }

    /// Number of pieces of the given color.
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Some(color))
            .count()
    }

    /// Total number of pieces on the board.
    pub fn pieces(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..N)
            .flat_map(|row| (0..N).map(move |col| (row, col)))
            .filter(|&pt| self.is_empty_at(pt))
    }

    /// Load a board layout from a text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Board> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| KonaneError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let board = text.parse()?;
        log::debug!("loaded board from {}", path.display());
        Ok(board)
    }
}

impl FromStr for Board {
    type Err = KonaneError;

    /// Parse one row per line, `N` symbols per row, no separators.
    fn from_str(s: &str) -> Result<Board> {
        let rows: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        if rows.len() != N {
            return Err(KonaneError::BoardFormat(format!(
                "expected {N} rows, found {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != N {
                return Err(KonaneError::BoardFormat(format!(
                    "row {} has {} cells, expected {N}",
                    row + 1,
                    line.chars().count()
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    SYMBOL_EMPTY => None,
                    _ => Some(Color::from_symbol(ch).ok_or_else(|| {
                        KonaneError::BoardFormat(format!(
                            "unexpected symbol {ch:?} at row {}, column {}",
                            row + 1,
                            col + 1
                        ))
                    })?),
                };
                board.set((row, col), cell);
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  | ")?;
        for col in 0..N {
            write!(f, "{} ", (b'A' + col as u8) as char)?;
        }
        writeln!(f)?;
        writeln!(f, "--+{}", "--".repeat(N))?;

        for row in 0..N {
            write!(f, "{} | ", N - row)?;
            for col in 0..N {
                let ch = match self.get((row, col)) {
                    Some(color) => color.symbol(),
                    None => SYMBOL_EMPTY,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
