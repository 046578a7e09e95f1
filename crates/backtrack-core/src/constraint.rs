//! N-Queens safety predicate.
//!
//! Pure functions over a [`Placement`]; only columns before the queried
//! column are consulted.

use crate::board::Placement;

/// Returns true if a queen at (`row`, `col`) shares no row or diagonal with
/// any queen in an earlier column.
///
/// # Example
///
/// ```
/// use backtrack_core::{is_safe, Placement};
///
/// let mut placement = Placement::new(4).unwrap();
/// placement.place(0, 0);
///
/// assert!(!is_safe(0, 1, &placement)); // same row
/// assert!(!is_safe(1, 1, &placement)); // same diagonal
/// assert!(is_safe(2, 1, &placement));
/// ```
pub fn is_safe(row: usize, col: usize, placement: &Placement) -> bool {
    (0..col).all(|i| match placement.get(i) {
        Some(r) => r != row && r.abs_diff(row) != i.abs_diff(col),
        None => true,
    })
}

/// Rows of column `col` that are safe against the earlier columns, ascending.
pub fn safe_rows(col: usize, placement: &Placement) -> Vec<usize> {
    (0..placement.size())
        .filter(|&row| is_safe(row, col, placement))
        .collect()
}

/// True if the placement is complete and no two queens attack each other.
pub fn is_valid_solution(placement: &Placement) -> bool {
    placement.is_complete()
        && (0..placement.size()).all(|col| match placement.get(col) {
            Some(row) => is_safe(row, col, placement),
            None => false,
        })
}
