//! Independent structural validation of candidate payment files.
//!
//! This check is usable on any text, not only files this crate generated,
//! so it re-derives everything from the content itself: field counts, the
//! declared record count, and the declared total.

use rust_decimal::Decimal;
use thiserror::Error;

/// Number of fields in the header line.
const HEADER_FIELDS: usize = 5;
/// Number of fields in each body line.
const BODY_FIELDS: usize = 17;
/// Index of the amount field within a body line.
const AMOUNT_FIELD: usize = 5;
/// Largest allowed difference between the declared and accumulated totals.
const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Reasons a candidate file fails structural validation.
#[derive(Debug, Error)]
pub enum StructureError {
    /// The file contains no lines at all.
    #[error("File is empty")]
    Empty,

    /// The header line is malformed.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// The number of body lines disagrees with the header's declared count.
    #[error("Header declares {declared} records but file contains {actual}")]
    RecordCountMismatch {
        /// The count declared in the header.
        declared: usize,
        /// The number of body lines found.
        actual: usize,
    },

    /// A body line is malformed.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number within the file.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// The accumulated amounts disagree with the header's declared total.
    #[error("Header declares total {declared} but records sum to {computed}")]
    TotalMismatch {
        /// The total declared in the header.
        declared: Decimal,
        /// The sum accumulated over the body lines.
        computed: Decimal,
    },
}

/// Validates the structural and arithmetic integrity of a candidate file.
///
/// Checks, in order: a well-formed 5-field header whose first field is
/// `"0"`, a body line count equal to the header's declared record count,
/// 17 fields per body line with `"1"` leading, parseable amounts, and an
/// accumulated sum within 0.01 of the header's declared total.
///
/// Lines may be terminated with either `\n` or `\r\n`; a trailing
/// terminator on the last line is accepted.
///
/// # Errors
///
/// Returns the first [`StructureError`] encountered.
pub fn validate_structure(content: &str) -> Result<(), StructureError> {
    let mut lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let Some((&header, body)) = lines.split_first() else {
        return Err(StructureError::Empty);
    };

    let header_fields: Vec<&str> = header.split(';').collect();
    if header_fields.len() != HEADER_FIELDS {
        return Err(StructureError::MalformedHeader(format!(
            "expected {HEADER_FIELDS} fields, found {}",
            header_fields.len()
        )));
    }
    if header_fields[0] != "0" {
        return Err(StructureError::MalformedHeader(format!(
            "record type must be \"0\", found \"{}\"",
            header_fields[0]
        )));
    }
    let declared_total: Decimal = header_fields[3].parse().map_err(|_| {
        StructureError::MalformedHeader(format!(
            "total \"{}\" is not a decimal amount",
            header_fields[3]
        ))
    })?;
    let declared_count: usize = header_fields[4].parse().map_err(|_| {
        StructureError::MalformedHeader(format!(
            "record count \"{}\" is not an integer",
            header_fields[4]
        ))
    })?;

    if body.len() != declared_count {
        return Err(StructureError::RecordCountMismatch {
            declared: declared_count,
            actual: body.len(),
        });
    }

    let mut computed_total = Decimal::ZERO;
    for (index, line) in body.iter().enumerate() {
        let line_number = index + 2;
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != BODY_FIELDS {
            return Err(StructureError::MalformedRecord {
                line: line_number,
                reason: format!("expected {BODY_FIELDS} fields, found {}", fields.len()),
            });
        }
        if fields[0] != "1" {
            return Err(StructureError::MalformedRecord {
                line: line_number,
                reason: format!("record type must be \"1\", found \"{}\"", fields[0]),
            });
        }
        let amount: Decimal =
            fields[AMOUNT_FIELD]
                .parse()
                .map_err(|_| StructureError::MalformedRecord {
                    line: line_number,
                    reason: format!(
                        "amount \"{}\" is not a decimal",
                        fields[AMOUNT_FIELD]
                    ),
                })?;
        computed_total += amount;
    }

    if (computed_total - declared_total).abs() > TOLERANCE {
        return Err(StructureError::TotalMismatch {
            declared: declared_total,
            computed: computed_total,
        });
    }

    Ok(())
}
