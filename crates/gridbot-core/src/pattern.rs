//! Two-color parity pattern
//!
//! Pure coordinate-to-color resolution. The even-sum -> A tie-break is
//! load-bearing: deployed patterns were laid out with it, so re-running
//! over an existing area must resolve the same colors.

use crate::types::{Cell, Color};

/// Color of the cell at (x, z): A when `x + z` is even, B otherwise.
#[inline]
#[must_use]
pub fn color_at(x: i32, z: i32) -> Color {
    // Wrapping keeps parity correct at the i32 edges.
    if x.wrapping_add(z) % 2 == 0 {
        Color::A
    } else {
        Color::B
    }
}

/// Color of a cell.
#[inline]
#[must_use]
pub fn color_of(cell: Cell) -> Color {
    color_at(cell.x, cell.z)
}
