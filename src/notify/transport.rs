//! Message transports.

use super::message::Message;
use crate::error::NotifyError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Delivers composed messages.
///
/// Implementations own their connection details and credentials; the
/// engine and the dispatcher never see them.
pub trait Transport {
    /// Sends one message.
    fn send(&mut self, message: &Message) -> Result<(), NotifyError>;
}

/// Keeps messages in memory instead of sending them.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Vec<Message>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, in send order.
    pub fn messages(&self) -> &[Message] {
        &self.sent
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, message: &Message) -> Result<(), NotifyError> {
        self.sent.push(message.clone());
        Ok(())
    }
}

/// Writes each message as an `.eml` file into a directory.
///
/// Files are named `NNN-<recipient>.eml` in send order, so an operator can
/// inspect or hand them to a mail client.
#[derive(Debug)]
pub struct FileTransport {
    dir: PathBuf,
    written: usize,
}

impl FileTransport {
    /// Creates the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, NotifyError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(&self, recipient: &str) -> String {
        let safe: String = recipient
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '@' | '.' | '-' | '_' => c,
                _ => '_',
            })
            .collect();
        format!("{:03}-{safe}.eml", self.written + 1)
    }
}

impl Transport for FileTransport {
    fn send(&mut self, message: &Message) -> Result<(), NotifyError> {
        let path = self.dir.join(self.file_name(&message.to));
        fs::write(&path, message.to_rfc5322()).map_err(|e| NotifyError::Transport {
            recipient: message.to.clone(),
            reason: e.to_string(),
        })?;
        self.written += 1;
        debug!(path = %path.display(), "message written");
        Ok(())
    }
}
