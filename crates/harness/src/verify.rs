//! Field-by-field verification of a rendered table row
//!
//! The student table exposes fields at fixed column offsets; the name is
//! split across two cells. Verification is all-fields-or-fail, and a
//! mismatch names the field that differed rather than emitting a generic
//! diff.

use tracing::info;

use crate::error::{HarnessError, HarnessResult};
use crate::generate::PersonRecord;

/// Column offsets in the rendered student table.
pub mod columns {
    pub const CODE: usize = 0;
    pub const LAST_NAME: usize = 1;
    pub const GIVEN_NAME: usize = 2;
    pub const PHONE: usize = 3;
    pub const EMAIL: usize = 4;
    pub const ADDRESS: usize = 7;

    /// Minimum cell count for a well-formed row.
    pub const MIN_CELLS: usize = 8;
}

fn check(field: &str, expected: &str, actual: &str) -> HarnessResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(HarnessError::AssertionMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Assert every displayed cell of a student row against the record that was
/// submitted.
pub fn verify_person(cells: &[String], expected: &PersonRecord) -> HarnessResult<()> {
    if cells.len() < columns::MIN_CELLS {
        return Err(HarnessError::AssertionMismatch {
            field: "row shape".to_string(),
            expected: format!("at least {} cells", columns::MIN_CELLS),
            actual: format!("{} cells", cells.len()),
        });
    }

    let cell = |i: usize| cells[i].trim();
    let actual_name = format!(
        "{} {}",
        cell(columns::LAST_NAME),
        cell(columns::GIVEN_NAME)
    );

    check("student code", &expected.code, cell(columns::CODE))?;
    check("full name", &expected.full_name, &actual_name)?;
    check("phone", &expected.phone, cell(columns::PHONE))?;
    check("email", &expected.email, cell(columns::EMAIL))?;
    check("address", &expected.address, cell(columns::ADDRESS))?;

    info!(code = %expected.code, "all fields verified");
    Ok(())
}

/// Assert a single column of a student row, used after the edit step.
pub fn verify_cell(
    cells: &[String],
    column: usize,
    field: &str,
    expected: &str,
) -> HarnessResult<()> {
    let actual = cells.get(column).map(|c| c.trim()).unwrap_or_default();
    check(field, expected, actual)
}
