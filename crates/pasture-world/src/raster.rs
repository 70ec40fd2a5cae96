//! Parsing comma-delimited raster text into a [`Grid`].
//!
//! The raster format is one grid row per line with cells separated by
//! commas. Every cell must be numeric; fractional values are truncated
//! toward zero to whole units. All rows must have the same number of cells
//! as the first. Blank lines are skipped.

use core::str::FromStr;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::RasterError;
use crate::grid::Grid;

/// Read and parse a raster file.
///
/// # Errors
///
/// Returns [`RasterError::Io`] if the file cannot be read, and any error
/// [`parse_raster`] returns for its contents.
pub fn load_raster(path: &Path) -> Result<Grid, RasterError> {
    let contents = std::fs::read_to_string(path)?;
    let grid = parse_raster(&contents)?;
    debug!(
        path = %path.display(),
        height = grid.height(),
        width = grid.width(),
        "Raster loaded"
    );
    Ok(grid)
}

/// Parse raster text into a grid.
///
/// Row and column numbers in errors are 1-based and count lines of the
/// input as written (including skipped blank lines).
///
/// # Errors
///
/// Returns [`RasterError::NonNumeric`] for a cell that is not a number,
/// [`RasterError::InconsistentRow`] for a row whose length differs from
/// the first row, [`RasterError::NegativeCell`] for negative values, and
/// [`RasterError::Empty`] if there are no rows at all.
pub fn parse_raster(text: &str) -> Result<Grid, RasterError> {
    let mut rows: Vec<Vec<Decimal>> = Vec::new();
    let mut expected: Option<usize> = None;

    for (line_idx, line) in text.lines().enumerate() {
        let row_number = line_idx.saturating_add(1);
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .enumerate()
            .map(|(col_idx, raw)| parse_cell(raw, row_number, col_idx.saturating_add(1)))
            .collect::<Result<Vec<_>, _>>()?;

        match expected {
            None => expected = Some(row.len()),
            Some(width) if width != row.len() => {
                return Err(RasterError::InconsistentRow {
                    row: row_number,
                    expected: width,
                    found: row.len(),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(RasterError::Empty);
    }
    Ok(Grid::from_rows(rows)?)
}

/// Parse one cell, truncating toward zero.
fn parse_cell(raw: &str, row: usize, column: usize) -> Result<Decimal, RasterError> {
    let trimmed = raw.trim();
    let non_numeric = || RasterError::NonNumeric {
        row,
        column,
        value: trimmed.to_owned(),
    };
    if trimmed.is_empty() {
        return Err(non_numeric());
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_plain_err| Decimal::from_scientific(trimmed))
        .map_err(|_parse_err| non_numeric())?
        .trunc();
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RasterError::NegativeCell { row, column, value });
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::io::Write as _;

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_rows_and_columns() {
        let grid = parse_raster("1,2,3\n4,5,6\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.get(1, 2).unwrap(), dec!(6));
    }

    #[test]
    fn truncates_fractional_cells() {
        let grid = parse_raster("1.9,2.0,3e1\n").unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), dec!(1));
        assert_eq!(grid.get(0, 1).unwrap(), dec!(2));
        assert_eq!(grid.get(0, 2).unwrap(), dec!(30));
    }

    #[test]
    fn tolerates_whitespace_and_crlf() {
        let grid = parse_raster(" 1 , 2\r\n3,4 \r\n\r\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 0).unwrap(), dec!(3));
    }

    #[test]
    fn non_numeric_reports_position() {
        let err = parse_raster("1,2\n3,x\n").unwrap_err();
        match err {
            RasterError::NonNumeric { row, column, value } => {
                assert_eq!((row, column), (2, 2));
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn quoted_cells_are_non_numeric() {
        assert!(matches!(
            parse_raster("\"1\",2\n"),
            Err(RasterError::NonNumeric { row: 1, column: 1, .. })
        ));
    }

    #[test]
    fn empty_cell_is_non_numeric() {
        assert!(matches!(
            parse_raster("1,,3\n"),
            Err(RasterError::NonNumeric { row: 1, column: 2, .. })
        ));
    }

    #[test]
    fn inconsistent_row_reports_lengths() {
        let err = parse_raster("1,2,3\n4,5\n").unwrap_err();
        assert!(matches!(
            err,
            RasterError::InconsistentRow { row: 2, expected: 3, found: 2 }
        ));
    }

    #[test]
    fn negative_cell_is_rejected() {
        assert!(matches!(
            parse_raster("1,-2\n"),
            Err(RasterError::NegativeCell { row: 1, column: 2, .. })
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse_raster(""), Err(RasterError::Empty)));
        assert!(matches!(parse_raster("\n\n"), Err(RasterError::Empty)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0,10").unwrap();
        writeln!(file, "20,30").unwrap();
        let grid = load_raster(file.path()).unwrap();
        assert_eq!(grid.total().unwrap(), dec!(60));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_raster(Path::new("/definitely/not/here/in.txt"));
        assert!(matches!(result, Err(RasterError::Io { .. })));
    }
}
