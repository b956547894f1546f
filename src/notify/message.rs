//! Message composition and header hygiene.

use super::template::{render, MessageTemplate};
use crate::assign::Participant;
use crate::error::NotifyError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::borrow::Cow;

/// Longest subject kept, in characters (RFC 5322 line limit).
pub const MAX_SUBJECT_CHARS: usize = 998;

/// Longest body line in octets, excluding CRLF (RFC 5322 section 2.1.1).
const MAX_LINE_OCTETS: usize = 998;

/// Raw bytes per RFC 2047 encoded word; 45 bytes become 60 base64
/// characters, keeping each word under 75.
const ENCODED_WORD_BYTES: usize = 45;

/// A plain-text message ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Message {
    /// Formats the message as an RFC 5322 document with CRLF line endings.
    pub fn to_rfc5322(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str(&format!("From: {}\r\n", self.from));
        out.push_str(&format!("To: {}\r\n", self.to));
        out.push_str(&format!("Subject: {}\r\n", encode_header_value(&self.subject)));
        out.push_str("MIME-Version: 1.0\r\n");
        out.push_str("Content-Type: text/plain; charset=utf-8\r\n");
        out.push_str("Content-Transfer-Encoding: 8bit\r\n\r\n");
        for line in self.body.lines() {
            for chunk in split_octets(line, MAX_LINE_OCTETS) {
                out.push_str(chunk);
                out.push_str("\r\n");
            }
        }
        out
    }
}

/// Encodes a non-ASCII header value as RFC 2047 `B` encoded words.
///
/// ASCII values are returned unchanged. Longer values become several
/// words folded onto continuation lines.
///
/// ```
/// use u_santa::notify::encode_header_value;
///
/// assert_eq!(encode_header_value("Hi"), "Hi");
/// assert_eq!(encode_header_value("Joyeux Noël"), "=?utf-8?b?Sm95ZXV4IE5vw6ts?=");
/// ```
pub fn encode_header_value(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        return Cow::Borrowed(value);
    }
    let words: Vec<String> = split_octets(value, ENCODED_WORD_BYTES)
        .into_iter()
        .map(|chunk| format!("=?utf-8?b?{}?=", BASE64.encode(chunk)))
        .collect();
    Cow::Owned(words.join("\r\n "))
}

/// Splits `s` into pieces of at most `max` bytes without breaking a character.
fn split_octets(s: &str, max: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s;
    while rest.len() > max {
        let mut cut = max;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (head, tail) = rest.split_at(cut);
        parts.push(head);
        rest = tail;
    }
    parts.push(rest);
    parts
}

/// Replaces CR and LF with spaces and trims, preventing header injection.
pub fn sanitize_header(value: &str) -> String {
    value.replace(['\r', '\n'], " ").trim().to_string()
}

/// Basic address check on the `addr-spec` part (inside `<...>` if present).
///
/// ```
/// use u_santa::notify::is_valid_email;
///
/// assert!(is_valid_email("alice@example.com"));
/// assert!(is_valid_email("Santa <santa@north.pole>"));
/// assert!(!is_valid_email("alice@localhost"));
/// assert!(!is_valid_email("not an address"));
/// assert!(!is_valid_email("a@b@example.com"));
/// ```
pub fn is_valid_email(addr: &str) -> bool {
    let addr = addr.trim();
    let spec = match (addr.rfind('<'), addr.rfind('>')) {
        (Some(open), Some(close)) if open < close => &addr[open + 1..close],
        _ => addr,
    };

    match spec.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !spec.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Renders `template` for one giver.
///
/// The subject is sanitized and capped at [`MAX_SUBJECT_CHARS`]; both
/// addresses are sanitized and validated.
pub fn build_message(
    template: &MessageTemplate,
    giver: &Participant,
    receiver: &Participant,
    from: &str,
) -> Result<Message, NotifyError> {
    let subject: String = sanitize_header(&render(&template.subject, giver, receiver))
        .chars()
        .take(MAX_SUBJECT_CHARS)
        .collect();
    let body = render(&template.body, giver, receiver);

    let from = sanitize_header(from);
    let to = sanitize_header(&giver.key);

    for address in [&from, &to] {
        if !is_valid_email(address) {
            return Err(NotifyError::InvalidAddress {
                address: address.clone(),
            });
        }
    }

    Ok(Message {
        from,
        to,
        subject,
        body,
    })
}
