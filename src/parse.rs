//! Free-text quantity parsing.
//!
//! Accepts one quantity per line as `name,qty,unit`. The unit is
//! optional and defaults to `count`; a bare name means one unit of it.
//!
//! ```
//! use u_mealplan::parse::parse_line;
//! use u_mealplan::models::Unit;
//!
//! let q = parse_line("Leite, 2, litro").unwrap();
//! assert_eq!((q.name.as_str(), q.qty, q.unit), ("leite", 2.0, Unit::L));
//! assert!(parse_line("x,,kg").is_err());
//! ```

use thiserror::Error;
use tracing::warn;

use crate::models::{Quantity, Unit};

/// A line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputFormatError {
    #[error("line is empty")]
    EmptyLine,

    #[error("missing ingredient name")]
    MissingName,

    #[error("missing quantity")]
    MissingQuantity,

    #[error("quantity '{0}' is not a finite number")]
    InvalidQuantity(String),

    #[error("quantity {0} is negative")]
    NegativeQuantity(f64),
}

/// Parses `name,qty,unit`.
///
/// The name is trimmed and lower-cased. The unit goes through the
/// synonym table. Fields past the third are ignored.
pub fn parse_line(line: &str) -> Result<Quantity, InputFormatError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputFormatError::EmptyLine);
    }

    let mut fields = line.split(',').map(str::trim);
    let name = fields.next().unwrap_or_default().to_lowercase();
    if name.is_empty() {
        return Err(InputFormatError::MissingName);
    }

    let Some(raw_qty) = fields.next() else {
        return Ok(Quantity::new(name, 1.0, Unit::Count));
    };
    if raw_qty.is_empty() {
        return Err(InputFormatError::MissingQuantity);
    }
    let qty: f64 = raw_qty
        .parse()
        .map_err(|_| InputFormatError::InvalidQuantity(raw_qty.to_string()))?;
    if !qty.is_finite() {
        return Err(InputFormatError::InvalidQuantity(raw_qty.to_string()));
    }
    if qty < 0.0 {
        return Err(InputFormatError::NegativeQuantity(qty));
    }

    let unit = fields.next().map_or(Unit::Count, Unit::parse);
    Ok(Quantity::new(name, qty, unit))
}

/// A rejected line with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub line_no: usize,
    pub text: String,
    pub error: InputFormatError,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Parsed quantities in input order.
    pub accepted: Vec<Quantity>,
    /// Lines that failed to parse.
    pub rejected: Vec<RejectedLine>,
}

impl ParseReport {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Parses one quantity per line. Blank lines are skipped silently.
pub fn parse_lines(text: &str) -> ParseReport {
    let mut report = ParseReport::default();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(q) => report.accepted.push(q),
            Err(error) => {
                warn!(line_no = i + 1, %error, "rejected input line");
                report.rejected.push(RejectedLine {
                    line_no: i + 1,
                    text: line.to_string(),
                    error,
                });
            }
        }
    }
    report
}
