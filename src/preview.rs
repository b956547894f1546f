//! Side-effect-free presentation of an assignment.
//!
//! Resolves keys back to names for operator review. Nothing here sends or
//! writes anything, so it can always be used to check a result before
//! notifications go out.

use crate::assign::{Assignment, Participant, ParticipantSet};
use crate::error::UnknownParticipant;

/// One resolved giver→receiver line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRow {
    pub giver_name: String,
    pub giver_email: String,
    pub receiver_name: String,
    pub receiver_email: String,
}

impl MatchRow {
    fn new(giver: &Participant, receiver: &Participant) -> Self {
        Self {
            giver_name: giver.name.clone(),
            giver_email: giver.key.clone(),
            receiver_name: receiver.name.clone(),
            receiver_email: receiver.key.clone(),
        }
    }
}

/// Resolves every pair of `assignment` against `participants`.
pub fn match_rows(
    participants: &ParticipantSet,
    assignment: &Assignment,
) -> Result<Vec<MatchRow>, UnknownParticipant> {
    let lookup = |key: &str| {
        participants
            .get(key)
            .ok_or_else(|| UnknownParticipant { key: key.to_string() })
    };

    assignment
        .iter()
        .map(|pair| -> Result<MatchRow, UnknownParticipant> {
            Ok(MatchRow::new(lookup(pair.giver.as_str())?, lookup(pair.receiver.as_str())?))
        })
        .collect()
}

/// Renders rows as an aligned two-column text table.
///
/// ```
/// use u_santa::preview::{render_table, MatchRow};
///
/// let rows = vec![MatchRow {
///     giver_name: "Alice".into(),
///     giver_email: "alice@example.com".into(),
///     receiver_name: "Bob".into(),
///     receiver_email: "bob@example.com".into(),
/// }];
/// let table = render_table(&rows);
/// assert!(table.contains("Alice <alice@example.com>  ->  Bob <bob@example.com>"));
/// ```
pub fn render_table(rows: &[MatchRow]) -> String {
    let cells: Vec<(String, String)> = rows
        .iter()
        .map(|r| {
            (
                format!("{} <{}>", r.giver_name, r.giver_email),
                format!("{} <{}>", r.receiver_name, r.receiver_email),
            )
        })
        .collect();

    let width = cells
        .iter()
        .map(|(giver, _)| giver.chars().count())
        .chain(std::iter::once("GIVER".len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{:<width$}      RECEIVER\n", "GIVER");
    for (giver, receiver) in &cells {
        out.push_str(&format!("{giver:<width$}  ->  {receiver}\n"));
    }
    out
}
