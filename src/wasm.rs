//! Browser binding of the assignment engine.
//!
//! Exposes a single `assign` function taking a plain JS object:
//!
//! ```text
//! { participants: [{ key, name }], prior?: [{ giver, receiver }],
//!   forbidden?: [{ giver, receiver, symmetric }], seed?: number }
//! ```
//!
//! and returning `{ status: "assigned", pairs: [...] }` or
//! `{ status: "no_solution" }`. Malformed input is thrown as a JS error.

use crate::assign::{assign, AssignOutcome, ForbiddenPair, Pair, Participant, ParticipantSet};
use crate::preview::{match_rows, MatchRow};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Debug, Deserialize)]
struct AssignRequest {
    participants: Vec<Participant>,
    #[serde(default)]
    prior: Vec<Pair>,
    #[serde(default)]
    forbidden: Vec<ForbiddenPair>,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum AssignReply {
    Assigned { pairs: Vec<MatchRow> },
    NoSolution,
}

/// Runs the engine on a JS request object.
#[wasm_bindgen(js_name = assign)]
pub fn assign_js(input: JsValue) -> Result<JsValue, JsValue> {
    let request: AssignRequest = serde_wasm_bindgen::from_value(input)?;
    let reply = handle(request).map_err(|e| JsValue::from_str(&e))?;
    Ok(serde_wasm_bindgen::to_value(&reply)?)
}

fn handle(request: AssignRequest) -> Result<AssignReply, String> {
    let participants = ParticipantSet::new(request.participants).map_err(|e| e.to_string())?;

    let outcome = assign(&participants, &request.prior, &request.forbidden, request.seed)
        .map_err(|e| e.to_string())?;

    match outcome {
        AssignOutcome::Assigned(a) => Ok(AssignReply::Assigned {
            pairs: match_rows(&participants, &a).map_err(|e| e.to_string())?,
        }),
        AssignOutcome::NoSolution => Ok(AssignReply::NoSolution),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(keys: &[&str], forbidden: Vec<ForbiddenPair>) -> AssignRequest {
        AssignRequest {
            participants: keys.iter().map(|k| Participant::new(k, k.to_uppercase())).collect(),
            prior: Vec::new(),
            forbidden,
            seed: Some(1),
        }
    }

    #[test]
    fn test_handle_assigned() {
        match handle(request(&["a@x.io", "b@x.io", "c@x.io"], vec![])).unwrap() {
            AssignReply::Assigned { pairs } => assert_eq!(pairs.len(), 3),
            AssignReply::NoSolution => panic!("expected an assignment"),
        }
    }

    #[test]
    fn test_handle_matches_constraint_keys_case_insensitively() {
        let forbidden = vec![ForbiddenPair {
            giver: "A@X.IO".into(),
            receiver: "B@x.io".into(),
            symmetric: true,
        }];
        let reply = handle(request(&["a@x.io", "b@x.io"], forbidden)).unwrap();
        assert_eq!(reply, AssignReply::NoSolution);
    }

    #[test]
    fn test_handle_precondition_error() {
        let err = handle(request(&["a@x.io"], vec![])).unwrap_err();
        assert!(err.contains("at least 2"));
    }
}
