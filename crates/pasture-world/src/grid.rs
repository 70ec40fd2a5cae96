//! The 2-D resource field agents graze on.
//!
//! A [`Grid`] is a rectangular, row-major array of non-negative resource
//! quantities. Its shape is fixed at construction; only cell values change
//! afterwards. Quantities are exact decimals because agents deposit their
//! (averaged, fractional) stores back into cells.

use pasture_types::Position;
use rust_decimal::Decimal;

use crate::error::WorldError;

/// Bounds-checked rectangular resource field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    height: usize,
    /// Number of columns.
    width: usize,
    /// Row-major cell values, `height * width` long.
    cells: Vec<Decimal>,
}

impl Grid {
    /// Build a grid from rows of cell values.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyGrid`] for zero rows or columns,
    /// [`WorldError::RaggedGrid`] if the rows differ in length,
    /// [`WorldError::NegativeCell`] if any value is negative, and
    /// [`WorldError::TooLarge`] if a dimension does not fit a coordinate.
    pub fn from_rows(rows: Vec<Vec<Decimal>>) -> Result<Self, WorldError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(WorldError::EmptyGrid);
        }
        check_addressable(height)?;
        check_addressable(width)?;

        let mut cells = Vec::with_capacity(height.saturating_mul(width));
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(WorldError::RaggedGrid {
                    row: row_idx.saturating_add(1),
                    expected: width,
                    found: row.len(),
                });
            }
            for (col_idx, value) in row.into_iter().enumerate() {
                if value.is_sign_negative() && !value.is_zero() {
                    return Err(WorldError::NegativeCell {
                        position: position_of(row_idx, col_idx),
                        value,
                    });
                }
                cells.push(value);
            }
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Build a `height x width` grid with every cell set to `value`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grid::from_rows`].
    pub fn filled(height: usize, width: usize, value: Decimal) -> Result<Self, WorldError> {
        Self::from_rows(vec![vec![value; width]; height])
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Largest valid `y` coordinate (`height - 1`).
    pub fn y_bound(&self) -> u32 {
        u32::try_from(self.height.saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// Largest valid `x` coordinate (`width - 1`).
    pub fn x_bound(&self) -> u32 {
        u32::try_from(self.width.saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// Whether `position` addresses a cell of this grid.
    pub fn contains(&self, position: Position) -> bool {
        position.y <= self.y_bound() && position.x <= self.x_bound()
    }

    /// Read the cell at row `y`, column `x`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellOutOfBounds`] outside the grid.
    pub fn get(&self, y: u32, x: u32) -> Result<Decimal, WorldError> {
        self.get_at(Position::new(y, x))
    }

    /// Overwrite the cell at row `y`, column `x`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellOutOfBounds`] outside the grid and
    /// [`WorldError::NegativeCell`] for negative values.
    pub fn set(&mut self, y: u32, x: u32, value: Decimal) -> Result<(), WorldError> {
        self.set_at(Position::new(y, x), value)
    }

    /// Read the cell at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellOutOfBounds`] outside the grid.
    pub fn get_at(&self, position: Position) -> Result<Decimal, WorldError> {
        let idx = self.offset(position)?;
        self.cells
            .get(idx)
            .copied()
            .ok_or_else(|| self.out_of_bounds(position))
    }

    /// Overwrite the cell at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellOutOfBounds`] outside the grid and
    /// [`WorldError::NegativeCell`] for negative values.
    pub fn set_at(&mut self, position: Position, value: Decimal) -> Result<(), WorldError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(WorldError::NegativeCell { position, value });
        }
        let idx = self.offset(position)?;
        let err = self.out_of_bounds(position);
        let cell = self.cells.get_mut(idx).ok_or(err)?;
        *cell = value;
        Ok(())
    }

    /// Sum of every cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if the sum overflows.
    pub fn total(&self) -> Result<Decimal, WorldError> {
        self.cells.iter().try_fold(Decimal::ZERO, |acc, value| {
            acc.checked_add(*value).ok_or(WorldError::ArithmeticOverflow)
        })
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Decimal]> {
        self.cells.chunks(self.width)
    }

    /// Every row with its cells rounded to whole units (half to even).
    pub fn rounded_rows(&self) -> Vec<Vec<Decimal>> {
        self.rows()
            .map(|row| row.iter().map(|value| value.round()).collect())
            .collect()
    }

    /// Row-major offset of `position`, checked against the shape.
    fn offset(&self, position: Position) -> Result<usize, WorldError> {
        if !self.contains(position) {
            return Err(self.out_of_bounds(position));
        }
        let y = usize::try_from(position.y).map_err(|_conversion_err| self.out_of_bounds(position))?;
        let x = usize::try_from(position.x).map_err(|_conversion_err| self.out_of_bounds(position))?;
        y.checked_mul(self.width)
            .and_then(|row_start| row_start.checked_add(x))
            .ok_or(WorldError::ArithmeticOverflow)
    }

    const fn out_of_bounds(&self, position: Position) -> WorldError {
        WorldError::CellOutOfBounds {
            position,
            height: self.height,
            width: self.width,
        }
    }
}

/// Reject dimensions whose largest index does not fit a `u32` coordinate.
fn check_addressable(dimension: usize) -> Result<(), WorldError> {
    u32::try_from(dimension.saturating_sub(1))
        .map(|_| ())
        .map_err(|_conversion_err| WorldError::TooLarge(dimension))
}

fn position_of(row_idx: usize, col_idx: usize) -> Position {
    Position::new(
        u32::try_from(row_idx).unwrap_or(u32::MAX),
        u32::try_from(col_idx).unwrap_or(u32::MAX),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(vec![
            vec![dec!(1), dec!(2), dec!(3)],
            vec![dec!(4), dec!(5), dec!(6)],
        ])
        .unwrap()
    }

    #[test]
    fn shape_and_bounds() {
        let grid = sample();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.y_bound(), 1);
        assert_eq!(grid.x_bound(), 2);
    }

    #[test]
    fn get_is_row_major() {
        let grid = sample();
        assert_eq!(grid.get(0, 0).unwrap(), dec!(1));
        assert_eq!(grid.get(0, 2).unwrap(), dec!(3));
        assert_eq!(grid.get(1, 0).unwrap(), dec!(4));
        assert_eq!(grid.get(1, 2).unwrap(), dec!(6));
    }

    #[test]
    fn set_then_get() {
        let mut grid = sample();
        grid.set(1, 1, dec!(42.5)).unwrap();
        assert_eq!(grid.get(1, 1).unwrap(), dec!(42.5));
        assert_eq!(grid.total().unwrap(), dec!(58.5));
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut grid = sample();
        assert!(matches!(
            grid.get(2, 0),
            Err(WorldError::CellOutOfBounds { height: 2, width: 3, .. })
        ));
        assert!(grid.get(0, 3).is_err());
        assert!(grid.set(5, 5, dec!(1)).is_err());
    }

    #[test]
    fn negative_write_is_rejected() {
        let mut grid = sample();
        let result = grid.set(0, 0, dec!(-1));
        assert!(matches!(result, Err(WorldError::NegativeCell { .. })));
        assert_eq!(grid.get(0, 0).unwrap(), dec!(1));
    }

    #[test]
    fn empty_and_ragged_are_rejected() {
        assert!(matches!(Grid::from_rows(Vec::new()), Err(WorldError::EmptyGrid)));
        assert!(matches!(Grid::from_rows(vec![Vec::new()]), Err(WorldError::EmptyGrid)));
        let ragged = Grid::from_rows(vec![vec![dec!(1), dec!(2)], vec![dec!(3)]]);
        assert!(matches!(
            ragged,
            Err(WorldError::RaggedGrid { row: 2, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn rounded_rows_round_half_to_even() {
        let grid = Grid::from_rows(vec![vec![dec!(2.5), dec!(3.5), dec!(4.4), dec!(4.6)]]).unwrap();
        let rounded = grid.rounded_rows();
        assert_eq!(rounded, vec![vec![dec!(2), dec!(4), dec!(4), dec!(5)]]);
    }

    #[test]
    fn filled_grid_total() {
        let grid = Grid::filled(4, 5, dec!(10)).unwrap();
        assert_eq!(grid.total().unwrap(), dec!(200));
        assert_eq!(grid.rows().count(), 4);
    }
}
