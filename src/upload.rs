use std::fmt;
use std::io::Write;

use crate::destination::{TicketApi, UploadError};

/// Run-wide switch between printing payloads and creating tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DryRun,
    Apply,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::DryRun => f.write_str("dry run"),
            Mode::Apply => f.write_str("apply"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Printed,
    Created,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("failed to write payload: {0}")]
    Output(#[from] std::io::Error),
}

pub struct Uploader<'a> {
    api: &'a dyn TicketApi,
    mode: Mode,
}

impl<'a> Uploader<'a> {
    pub fn new(api: &'a dyn TicketApi, mode: Mode) -> Self {
        Self { api, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// One attempt per payload. Dry runs write the payload to `out` and never
    /// touch the network.
    pub async fn submit(&self, payload: &str, out: &mut dyn Write) -> Result<Outcome, SubmitError> {
        match self.mode {
            Mode::DryRun => {
                writeln!(out, "{payload}")?;
                Ok(Outcome::Printed)
            }
            Mode::Apply => {
                self.api.create_ticket(payload).await?;
                Ok(Outcome::Created)
            }
        }
    }
}
