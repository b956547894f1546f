//! CSV writers for produced assignments.

use crate::assign::{Assignment, ParticipantSet};
use crate::error::DataError;
use crate::preview::match_rows;
use std::borrow::Cow;
use std::io::Write;

/// Writes `giver_email,receiver_email` rows in assignment order.
///
/// Cells are written verbatim so the file reloads into exactly the same
/// pairs through [`read_pairs`](super::read_pairs).
pub fn write_pairs<W: Write>(output: W, assignment: &Assignment) -> Result<(), DataError> {
    let mut wtr = csv::Writer::from_writer(output);
    wtr.write_record(["giver_email", "receiver_email"])?;
    for pair in assignment {
        wtr.write_record([pair.giver.as_str(), pair.receiver.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the full human-readable export with names and emails.
///
/// Cells that a spreadsheet would evaluate as a formula are escaped with
/// [`escape_formula`].
pub fn write_matches<W: Write>(
    output: W,
    participants: &ParticipantSet,
    assignment: &Assignment,
) -> Result<(), DataError> {
    let rows = match_rows(participants, assignment)?;

    let mut wtr = csv::Writer::from_writer(output);
    wtr.write_record(["giver_name", "giver_email", "receiver_name", "receiver_email"])?;
    for row in &rows {
        wtr.write_record([
            escape_formula(&row.giver_name).as_ref(),
            escape_formula(&row.giver_email).as_ref(),
            escape_formula(&row.receiver_name).as_ref(),
            escape_formula(&row.receiver_email).as_ref(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prefixes `'` to cells starting with `=`, `+`, `-` or `@`.
///
/// ```
/// use u_santa::io::escape_formula;
///
/// assert_eq!(escape_formula("=SUM(A1)"), "'=SUM(A1)");
/// assert_eq!(escape_formula("Alice"), "Alice");
/// ```
pub fn escape_formula(cell: &str) -> Cow<'_, str> {
    if cell.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{cell}"))
    } else {
        Cow::Borrowed(cell)
    }
}
