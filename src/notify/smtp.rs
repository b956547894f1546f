//! Delivery through an SMTP relay.
//!
//! The relay connection is secured either with implicit TLS (SMTPS,
//! usually port 465) or with STARTTLS (usually port 587). Login is
//! optional; the credentials live in [`SmtpConfig`] and go no further than
//! the underlying `lettre` transport.

use super::message::Message;
use super::transport::Transport;
use crate::error::NotifyError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Transport as _;
use std::fmt;
use tracing::debug;

/// Port used when none is configured.
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// How the connection to the relay is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// TLS from the first byte.
    #[default]
    Tls,
    /// Plain connection upgraded with `STARTTLS`.
    StartTls,
}

/// Relay address, security mode and optional login.
///
/// # Examples
///
/// ```
/// use u_santa::notify::{SmtpConfig, SmtpSecurity};
///
/// let config = SmtpConfig::new("smtp.example.com")
///     .with_port(587)
///     .with_security(SmtpSecurity::StartTls)
///     .with_credentials("santa@example.com", "hunter2");
/// assert!(!format!("{config:?}").contains("hunter2"));
/// ```
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    credentials: Option<(String, String)>,
}

impl SmtpConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SMTP_PORT,
            security: SmtpSecurity::default(),
            credentials: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_security(mut self, security: SmtpSecurity) -> Self {
        self.security = security;
        self
    }

    /// Logs in with `username` and `password` before sending.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|(user, _)| user.as_str())
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("username", &self.username())
            .field("password", &self.credentials.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// [`Transport`] sending each message through an SMTP relay.
pub struct SmtpRelay {
    host: String,
    mailer: lettre::SmtpTransport,
}

impl SmtpRelay {
    /// Prepares the relay. No connection is made until [`verify`](Self::verify)
    /// or the first send.
    pub fn new(config: SmtpConfig) -> Result<Self, NotifyError> {
        let SmtpConfig {
            host,
            port,
            security,
            credentials,
        } = config;

        let builder = match security {
            SmtpSecurity::Tls => lettre::SmtpTransport::relay(&host),
            SmtpSecurity::StartTls => lettre::SmtpTransport::starttls_relay(&host),
        }
        .map_err(|e| NotifyError::Relay {
            host: host.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = builder.port(port);
        if let Some((username, password)) = credentials {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            host,
            mailer: builder.build(),
        })
    }

    /// Connects (and logs in, if configured) once, so a bad host or login
    /// fails before any message is sent.
    pub fn verify(&self) -> Result<(), NotifyError> {
        let relay_error = |reason: String| NotifyError::Relay {
            host: self.host.clone(),
            reason,
        };
        match self.mailer.test_connection() {
            Ok(true) => Ok(()),
            Ok(false) => Err(relay_error("relay refused the connection".into())),
            Err(e) => Err(relay_error(e.to_string())),
        }
    }
}

impl Transport for SmtpRelay {
    fn send(&mut self, message: &Message) -> Result<(), NotifyError> {
        let email = to_email(message)?;
        self.mailer.send(&email).map_err(|e| NotifyError::Transport {
            recipient: message.to.clone(),
            reason: e.to_string(),
        })?;
        debug!(recipient = %message.to, host = %self.host, "message relayed");
        Ok(())
    }
}

fn to_email(message: &Message) -> Result<lettre::Message, NotifyError> {
    let rejected = |reason: String| NotifyError::Transport {
        recipient: message.to.clone(),
        reason,
    };

    let from: Mailbox = message.from.parse().map_err(|e| rejected(format!("from: {e}")))?;
    let to: Mailbox = message.to.parse().map_err(|e| rejected(format!("to: {e}")))?;

    lettre::Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| rejected(e.to_string()))
}
