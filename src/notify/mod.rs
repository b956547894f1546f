//! Giver notifications.
//!
//! Turns an assignment into one message per giver and hands the messages to
//! a [`Transport`]. The engine never sees this module: assignments are
//! computed in full before any message is built, and nothing here modifies
//! them.
//!
//! # Key Components
//!
//! - **Templates**: [`MessageTemplate`] with `{giver_name}`, `{giver_email}`,
//!   `{receiver_name}`, `{receiver_email}` placeholders
//! - **Messages**: [`build_message`] with header sanitization and address checks
//! - **Transports**: [`Transport`] trait, [`MemoryTransport`], [`FileTransport`],
//!   `SmtpRelay` (feature `smtp`)
//! - **Dispatch**: [`dispatch`] sends everything and reports per-recipient failures
//!
//! With the `smtp` feature, `SmtpRelay` delivers through an authenticated
//! SMTP relay. Other relays plug in as their own [`Transport`].

mod dispatch;
mod message;
#[cfg(feature = "smtp")]
mod smtp;
mod template;
mod transport;

pub use dispatch::{compose, dispatch, DeliveryFailure, DispatchReport};
pub use message::{
    build_message, encode_header_value, is_valid_email, sanitize_header, Message, MAX_SUBJECT_CHARS,
};
pub use template::{render, MessageTemplate, DEFAULT_BODY, DEFAULT_SUBJECT};
pub use transport::{FileTransport, MemoryTransport, Transport};

#[cfg(feature = "smtp")]
pub use smtp::{SmtpConfig, SmtpRelay, SmtpSecurity, DEFAULT_SMTP_PORT};
