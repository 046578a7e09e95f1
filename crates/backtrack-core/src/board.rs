//! Queen placements on a square board.
//!
//! A [`Placement`] holds one optional row per column. The engines own their
//! working placement exclusively; consumers only ever see clones wrapped in a
//! [`PlacementSnapshot`].

use std::fmt;

use crate::error::{BacktrackError, Result};

/// Queen rows indexed by column, `None` for columns without a queen.
///
/// # Example
///
/// ```
/// use backtrack_core::Placement;
///
/// let mut placement = Placement::new(4).unwrap();
/// placement.place(0, 1);
/// placement.place(1, 3);
///
/// assert_eq!(placement.get(0), Some(1));
/// assert_eq!(placement.placed_count(), 2);
/// assert!(!placement.is_complete());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    rows: Vec<Option<usize>>,
}

impl Placement {
    /// Creates an empty placement for an `size`x`size` board.
    ///
    /// # Errors
    ///
    /// Returns [`BacktrackError::InvalidBoardSize`] for a zero-sized board.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(BacktrackError::InvalidBoardSize(size));
        }
        Ok(Self {
            rows: vec![None; size],
        })
    }

    /// Builds a complete placement from explicit rows.
    ///
    /// Rows are not checked for safety; use [`crate::is_valid_solution`].
    pub fn from_rows(rows: &[usize]) -> Result<Self> {
        if rows.is_empty() {
            return Err(BacktrackError::InvalidBoardSize(0));
        }
        if let Some(&row) = rows.iter().find(|&&r| r >= rows.len()) {
            return Err(BacktrackError::InvalidInput(format!(
                "row {} out of range for board size {}",
                row,
                rows.len()
            )));
        }
        Ok(Self {
            rows: rows.iter().map(|&r| Some(r)).collect(),
        })
    }

    /// Board size N.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Row of the queen in `col`, if one is placed.
    pub fn get(&self, col: usize) -> Option<usize> {
        self.rows.get(col).copied().flatten()
    }

    /// Places a queen at (`row`, `col`) and unsets every later column.
    ///
    /// Keeps the invariant that only columns up to the current search depth
    /// carry a queen.
    ///
    /// # Panics
    ///
    /// Panics if `col` or `row` is not below the board size.
    pub fn place(&mut self, col: usize, row: usize) {
        let size = self.size();
        assert!(col < size, "column {} out of range for board size {}", col, size);
        assert!(row < size, "row {} out of range for board size {}", row, size);
        self.rows[col] = Some(row);
        self.clear_from(col + 1);
    }

    /// Unsets every column from `col` onward.
    pub fn clear_from(&mut self, col: usize) {
        for slot in self.rows.iter_mut().skip(col) {
            *slot = None;
        }
    }

    /// Unsets every column.
    pub fn clear(&mut self) {
        self.clear_from(0);
    }

    /// Number of columns holding a queen.
    pub fn placed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    /// True when every column holds a queen.
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(Option::is_some)
    }

    /// Raw column-indexed rows.
    pub fn rows(&self) -> &[Option<usize>] {
        &self.rows
    }

    /// Rows of a complete placement, `None` if any column is unset.
    pub fn to_rows(&self) -> Option<Vec<usize>> {
        self.rows.iter().copied().collect()
    }

    /// Renders the board with `Q` for queens and `.` for empty squares,
    /// one line per row.
    pub fn render(&self) -> String {
        let n = self.size();
        let mut out = String::with_capacity(n * (2 * n + 1));
        for row in 0..n {
            for col in 0..n {
                if col > 0 {
                    out.push(' ');
                }
                out.push(if self.get(col) == Some(row) { 'Q' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match row {
                Some(r) => write!(f, "{}", r)?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}

/// Point-in-time copy of a queen search, emitted once per placement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementSnapshot {
    /// The board with columns after `column` unset.
    pub placement: Placement,
    /// Column that was just filled.
    pub column: usize,
    /// Row chosen for `column`.
    pub row: usize,
    /// Step counter of the producing search at emission time.
    pub step: u64,
}

impl PlacementSnapshot {
    pub fn new(placement: Placement, column: usize, row: usize, step: u64) -> Self {
        Self {
            placement,
            column,
            row,
            step,
        }
    }

    /// Status line such as `Placing queen 3/8`.
    pub fn status(&self) -> String {
        format!("Placing queen {}/{}", self.column + 1, self.placement.size())
    }
}
