//! Default agent start locations.
//!
//! Start locations come either from an HTML page, whose table cells carry
//! `class="y"` and `class="x"` attributes, or from a local text file with
//! one `y,x` pair per line. Either way the result is an ordered list of
//! positions, capped at [`MAX_START_LOCATIONS`].

use std::path::Path;

use pasture_agents::MAX_START_LOCATIONS;
use pasture_types::Position;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

/// Errors that can occur while loading start locations.
#[derive(Debug, thiserror::Error)]
pub enum StartLocationError {
    /// The local file could not be read.
    #[error("failed to read start locations file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The page could not be fetched.
    #[error("failed to fetch start locations page: {source}")]
    Http {
        /// The underlying HTTP error.
        #[from]
        source: reqwest::Error,
    },

    /// A coordinate was not a non-negative integer.
    #[error("invalid coordinate {value:?} in entry {entry}")]
    InvalidCoordinate {
        /// 1-based entry number.
        entry: usize,
        /// The text that failed to parse.
        value: String,
    },

    /// A cell selector could not be compiled.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector {
        /// The selector text.
        selector: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A file line did not hold exactly two comma-separated values.
    #[error("line {line}: expected `y,x`, found {found:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        found: String,
    },
}

/// Load start locations from a URL or a file path.
///
/// Sources beginning with `http://` or `https://` are fetched; anything
/// else is read as a local file.
///
/// # Errors
///
/// Returns [`StartLocationError`] if the source cannot be read or parsed.
pub async fn load(source: &str) -> Result<Vec<Position>, StartLocationError> {
    let locations = if source.starts_with("http://") || source.starts_with("https://") {
        debug!(url = source, "Fetching start locations");
        let body = reqwest::get(source).await?.error_for_status()?.text().await?;
        parse_html(&body)?
    } else {
        let contents = tokio::fs::read_to_string(Path::new(source)).await?;
        parse_pairs(&contents)?
    };
    info!(source, count = locations.len(), "Start locations loaded");
    Ok(locations)
}

/// Extract `(y, x)` pairs from an HTML page.
///
/// The text of every element carrying class `y` is paired, in document
/// order, with the text of every element carrying class `x`. Unpaired
/// trailing values are dropped. Class names inside text or comments are
/// not cells.
///
/// # Errors
///
/// Returns [`StartLocationError::InvalidCoordinate`] for non-numeric text.
pub fn parse_html(html: &str) -> Result<Vec<Position>, StartLocationError> {
    // A template context keeps bare `<td>` fragments as elements.
    let document = Html::parse_document(&format!("<template>{html}</template>"));
    let ys = class_texts(&document, ".y")?;
    let xs = class_texts(&document, ".x")?;
    if ys.len() != xs.len() {
        warn!(ys = ys.len(), xs = xs.len(), "Unequal numbers of y and x cells");
    }
    ys.iter()
        .zip(xs.iter())
        .take(MAX_START_LOCATIONS)
        .enumerate()
        .map(|(idx, (y, x))| {
            let entry = idx.saturating_add(1);
            Ok(Position::new(parse_coordinate(y, entry)?, parse_coordinate(x, entry)?))
        })
        .collect()
}

/// Parse `y,x` lines. Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns [`StartLocationError::MalformedLine`] for a line without exactly
/// two values and [`StartLocationError::InvalidCoordinate`] for a value
/// that is not a non-negative integer.
pub fn parse_pairs(text: &str) -> Result<Vec<Position>, StartLocationError> {
    let mut locations = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_number = idx.saturating_add(1);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split(',');
        let (Some(y), Some(x), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(StartLocationError::MalformedLine {
                line: line_number,
                found: trimmed.to_owned(),
            });
        };
        locations.push(Position::new(
            parse_coordinate(y, line_number)?,
            parse_coordinate(x, line_number)?,
        ));
        if locations.len() >= MAX_START_LOCATIONS {
            break;
        }
    }
    Ok(locations)
}

fn parse_coordinate(raw: &str, entry: usize) -> Result<u32, StartLocationError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_parse_err| StartLocationError::InvalidCoordinate {
            entry,
            value: raw.trim().to_owned(),
        })
}

/// Text of every element matching `selector`, in document order.
fn class_texts(document: &Html, selector: &'static str) -> Result<Vec<String>, StartLocationError> {
    let compiled = Selector::parse(selector).map_err(|e| StartLocationError::Selector {
        selector,
        reason: e.to_string(),
    })?;
    Ok(document
        .select(&compiled)
        .map(|element| element.text().collect::<String>())
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write as _;

    use super::*;

    const PAGE: &str = r#"
<html><body><table>
<tr><td class="y">12</td><td class="x">34</td></tr>
<tr><td class='y'> 5 </td><td class='x'>6</td></tr>
<tr><td class="yy">99</td><td class="x">7</td></tr>
</table></body></html>
"#;

    #[test]
    fn html_cells_are_paired_in_document_order() {
        let locations = parse_html(PAGE).unwrap();
        // The `yy` cell is not a `y` cell, so the third x is unpaired.
        assert_eq!(locations, vec![Position::new(12, 34), Position::new(5, 6)]);
    }

    #[test]
    fn cells_with_several_classes_or_spaced_attributes_count() {
        let page = r#"<td class="y odd">12</td><td class="x odd">34</td><td class = "y">5</td><td class = "x">6</td>"#;
        assert_eq!(
            parse_html(page).unwrap(),
            vec![Position::new(12, 34), Position::new(5, 6)]
        );
    }

    #[test]
    fn class_names_in_text_and_comments_are_not_cells() {
        let page = r#"<html><body>
<p>cells use class="y" and class="x"</p>
<!-- <td class="y">1</td><td class="x">2</td> -->
<table><tr><td class="y">3</td><td class="x">4</td></tr></table>
</body></html>"#;
        assert_eq!(parse_html(page).unwrap(), vec![Position::new(3, 4)]);
    }

    #[test]
    fn html_with_bad_number_is_rejected() {
        let page = r#"<td class="y">abc</td><td class="x">1</td>"#;
        assert!(matches!(
            parse_html(page),
            Err(StartLocationError::InvalidCoordinate { entry: 1, .. })
        ));
    }

    #[test]
    fn html_without_cells_is_empty() {
        assert!(parse_html("<html></html>").unwrap().is_empty());
    }

    #[test]
    fn pairs_file_is_parsed() {
        let locations = parse_pairs("# y,x\n1,2\n\n 3 , 4 \n").unwrap();
        assert_eq!(locations, vec![Position::new(1, 2), Position::new(3, 4)]);
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert!(matches!(
            parse_pairs("1,2\n3\n"),
            Err(StartLocationError::MalformedLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_pairs("1,2,3\n"),
            Err(StartLocationError::MalformedLine { line: 1, .. })
        ));
        assert!(matches!(
            parse_pairs("1,-2\n"),
            Err(StartLocationError::InvalidCoordinate { entry: 1, .. })
        ));
    }

    #[test]
    fn lists_are_capped() {
        let text: String = (0..150).map(|i| format!("{i},{i}\n")).collect();
        assert_eq!(parse_pairs(&text).unwrap().len(), MAX_START_LOCATIONS);

        let page: String = (0..150)
            .map(|i| format!("<td class=\"y\">{i}</td><td class=\"x\">{i}</td>"))
            .collect();
        assert_eq!(parse_html(&page).unwrap().len(), MAX_START_LOCATIONS);
    }

    #[tokio::test]
    async fn load_reads_local_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "7,8").unwrap();
        let source = file.path().to_str().unwrap().to_owned();
        let locations = load(&source).await.unwrap();
        assert_eq!(locations, vec![Position::new(7, 8)]);
    }

    #[tokio::test]
    async fn load_reports_missing_files() {
        let result = load("/no/such/starts.txt").await;
        assert!(matches!(result, Err(StartLocationError::Io { .. })));
    }
}
