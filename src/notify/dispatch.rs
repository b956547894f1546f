//! Sending one message per giver.

use super::message::{build_message, Message};
use super::template::MessageTemplate;
use super::transport::Transport;
use crate::assign::{Assignment, ParticipantSet};
use crate::error::{NotifyError, UnknownParticipant};
use tracing::{info, warn};

/// A message the transport refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub recipient: String,
    pub reason: String,
}

/// Outcome of a dispatch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Messages accepted by the transport.
    pub sent: usize,
    /// Messages the transport rejected, in send order.
    pub failures: Vec<DeliveryFailure>,
}

impl DispatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds the message for every giver of `assignment`, in assignment order.
///
/// Fails without partial output if any key is unknown or any address is
/// invalid.
pub fn compose(
    participants: &ParticipantSet,
    assignment: &Assignment,
    template: &MessageTemplate,
    from: &str,
) -> Result<Vec<Message>, NotifyError> {
    let lookup = |key: &str| {
        participants
            .get(key)
            .ok_or_else(|| UnknownParticipant { key: key.to_string() })
    };

    assignment
        .iter()
        .map(|pair| {
            let giver = lookup(pair.giver.as_str())?;
            let receiver = lookup(pair.receiver.as_str())?;
            build_message(template, giver, receiver, from)
        })
        .collect()
}

/// Notifies every giver of their receiver.
///
/// All messages are composed before the first send, so malformed input
/// sends nothing. Transport failures do not stop the run; they are
/// collected in the report.
pub fn dispatch<T: Transport + ?Sized>(
    participants: &ParticipantSet,
    assignment: &Assignment,
    template: &MessageTemplate,
    from: &str,
    transport: &mut T,
) -> Result<DispatchReport, NotifyError> {
    let messages = compose(participants, assignment, template, from)?;
    let mut report = DispatchReport::default();

    for message in &messages {
        match transport.send(message) {
            Ok(()) => report.sent += 1,
            Err(e) => {
                warn!(recipient = %message.to, error = %e, "delivery failed");
                report.failures.push(DeliveryFailure {
                    recipient: message.to.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        sent = report.sent,
        failed = report.failures.len(),
        "dispatch finished"
    );
    Ok(report)
}
