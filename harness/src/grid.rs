//! Dense rectangular grids parsed from character maps.

use std::ops::RangeInclusive;

use crate::contract::ParseError;

/// A cell position. `row` grows downward, `col` to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Taxicab distance.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Row-major grid of `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Build a grid from a cell generator.
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(Coord) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                cells.push(f(Coord::new(row, col)));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.height && at.col < self.width
    }

    #[must_use]
    pub fn get(&self, at: Coord) -> Option<T> {
        if self.contains(at) {
            Some(self.cells[at.row * self.width + at.col])
        } else {
            None
        }
    }

    /// Bottom-right cell. Grids are never empty.
    #[must_use]
    pub const fn last(&self) -> Coord {
        Coord::new(self.height - 1, self.width - 1)
    }

    /// In-bounds orthogonal neighbours in up, left, right, down order.
    pub fn neighbors(&self, at: Coord) -> impl Iterator<Item = Coord> + '_ {
        let up = at.row.checked_sub(1).map(|row| Coord::new(row, at.col));
        let left = at.col.checked_sub(1).map(|col| Coord::new(at.row, col));
        let right = Some(Coord::new(at.row, at.col + 1));
        let down = Some(Coord::new(at.row + 1, at.col));
        [up, left, right, down]
            .into_iter()
            .flatten()
            .filter(move |&c| self.contains(c))
    }
}

impl Grid<u8> {
    /// Parse a block of decimal digits, one row per line, each within
    /// `allowed`.
    ///
    /// Blank lines are ignored. Every row must have the same width. Errors
    /// carry the 1-based line number of the input, blank lines included.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on a non-digit, a digit outside `allowed`, a
    /// ragged row, or empty input.
    pub fn parse_digits(input: &str, allowed: RangeInclusive<u8>) -> Result<Self, ParseError> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = idx + 1;
            for ch in line.chars() {
                let digit = ch.to_digit(10).ok_or_else(|| {
                    ParseError::new(line_no, format!("expected a digit, found {ch:?}"))
                })?;
                let digit = digit as u8;
                if !allowed.contains(&digit) {
                    return Err(ParseError::new(
                        line_no,
                        format!(
                            "digit {digit} outside {} to {}",
                            allowed.start(),
                            allowed.end()
                        ),
                    ));
                }
                cells.push(digit);
            }
            match width {
                None => width = Some(line.len()),
                Some(w) if w == line.len() => {}
                Some(w) => {
                    return Err(ParseError::new(
                        line_no,
                        format!("row has {} cells, expected {w}", line.len()),
                    ));
                }
            }
            height += 1;
        }
        let width = width.ok_or_else(|| ParseError::new(1, "grid is empty"))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }
}
