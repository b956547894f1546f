//! CSV readers for participants and constraint pairs.

use crate::assign::{normalize_key, ForbiddenPair, Pair, Participant, ParticipantSet};
use crate::error::DataError;
use csv::ByteRecord;
use std::collections::HashSet;
use std::io::Read;
use tracing::debug;

const PARTICIPANT_HEADERS: &str = "name,email";
const PAIR_HEADERS: &str = "giver_email,receiver_email";

/// Reads a `name,email` participants file.
///
/// Rows missing either field are skipped. A repeated email (after
/// normalization) is rejected with the line it appears on.
///
/// # Examples
///
/// ```
/// let csv = "Name , EMAIL\nAlice, Alice@Example.com\n,nobody@example.com\nBob,bob@example.com\n";
/// let set = u_santa::io::read_participants(csv.as_bytes()).unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get("alice@example.com").unwrap().name, "Alice");
/// ```
pub fn read_participants<R: Read>(input: R) -> Result<ParticipantSet, DataError> {
    let mut rdr = reader(input);
    let [name_col, email_col] = columns(&mut rdr, ["name", "email"], PARTICIPANT_HEADERS)?;

    let mut members = Vec::new();
    let mut seen = HashSet::new();
    let mut record = ByteRecord::new();

    while rdr.read_byte_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let name = field(&record, name_col);
        let email = normalize_key(&field(&record, email_col));

        if name.is_empty() || email.is_empty() {
            debug!(line, "skipping incomplete participant row");
            continue;
        }
        if !seen.insert(email.clone()) {
            return Err(DataError::DuplicateParticipant { key: email, line });
        }
        members.push(Participant::new(email, name));
    }

    Ok(ParticipantSet::new(members)?)
}

/// Reads a `giver_email,receiver_email` file.
///
/// Used for last year's matches and, via [`read_forbidden_pairs`], for
/// forbidden pairs. Incomplete rows are skipped. Pairs naming unknown
/// participants are kept here; the engine ignores them.
pub fn read_pairs<R: Read>(input: R) -> Result<Vec<Pair>, DataError> {
    let mut rdr = reader(input);
    let [giver_col, receiver_col] =
        columns(&mut rdr, ["giver_email", "receiver_email"], PAIR_HEADERS)?;

    let mut pairs = Vec::new();
    let mut record = ByteRecord::new();

    while rdr.read_byte_record(&mut record)? {
        let giver = field(&record, giver_col);
        let receiver = field(&record, receiver_col);
        if giver.is_empty() || receiver.is_empty() {
            debug!(line = record.position().map_or(0, |p| p.line()), "skipping incomplete pair row");
            continue;
        }
        pairs.push(Pair::new(giver, receiver));
    }

    Ok(pairs)
}

/// Reads forbidden pairs; `symmetric` also blocks the reverse direction of every row.
pub fn read_forbidden_pairs<R: Read>(
    input: R,
    symmetric: bool,
) -> Result<Vec<ForbiddenPair>, DataError> {
    Ok(read_pairs(input)?
        .into_iter()
        .map(|p| ForbiddenPair {
            giver: p.giver,
            receiver: p.receiver,
            symmetric,
        })
        .collect())
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().flexible(true).from_reader(input)
}

/// Locates the `wanted` columns among the trimmed, lower-cased headers.
fn columns<R: Read, const N: usize>(
    rdr: &mut csv::Reader<R>,
    wanted: [&str; N],
    expected: &'static str,
) -> Result<[usize; N], DataError> {
    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_lowercase()
        })
        .collect();

    let mut found = [0usize; N];
    for (slot, name) in found.iter_mut().zip(wanted) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or(DataError::MissingHeaders { expected })?;
    }
    Ok(found)
}

fn field(record: &ByteRecord, col: usize) -> String {
    record
        .get(col)
        .map(|b| String::from_utf8_lossy(b).trim().to_string())
        .unwrap_or_default()
}
