//! Harvesting from and depositing into grid cells.
//!
//! These are the only two ways an agent changes the grid. Harvesting takes
//! up to a requested amount (or whatever is left); depositing adds an amount
//! back. Neither creates nor destroys resource, so the grid total plus the
//! agents' stores is unchanged by any combination of the two.

use pasture_types::Position;
use rust_decimal::Decimal;

use crate::error::WorldError;
use crate::grid::Grid;

/// Take up to `requested` units from the cell at `position`.
///
/// If the cell holds fewer units than requested, the entire remaining
/// amount is taken and the cell is left at zero. Returns the amount removed.
///
/// # Errors
///
/// Returns [`WorldError::CellOutOfBounds`] outside the grid.
pub fn harvest(grid: &mut Grid, position: Position, requested: Decimal) -> Result<Decimal, WorldError> {
    let available = grid.get_at(position)?;
    let taken = if available >= requested {
        requested
    } else if available > Decimal::ZERO {
        available
    } else {
        Decimal::ZERO
    };
    let remaining = available
        .checked_sub(taken)
        .ok_or(WorldError::ArithmeticOverflow)?;
    grid.set_at(position, remaining)?;
    Ok(taken)
}

/// Add `amount` units to the cell at `position`.
///
/// # Errors
///
/// Returns [`WorldError::CellOutOfBounds`] outside the grid,
/// [`WorldError::NegativeCell`] if the result would be negative, or
/// [`WorldError::ArithmeticOverflow`] if the addition overflows.
pub fn deposit(grid: &mut Grid, position: Position, amount: Decimal) -> Result<(), WorldError> {
    let current = grid.get_at(position)?;
    let updated = current
        .checked_add(amount)
        .ok_or(WorldError::ArithmeticOverflow)?;
    grid.set_at(position, updated)
}
