use std::io::Write;

use tracing::{error, info};

use crate::destination::ReferenceData;
use crate::mapper::{self, MappingError};
use crate::model::source_record::SourceRecord;
use crate::upload::{Mode, Outcome, SubmitError, Uploader};

/// Everything that can sink a single row without stopping the run.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("malformed row: {0}")]
    Malformed(#[from] csv::Error),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("failed to render ticket: {0}")]
    Render(#[from] serde_json::Error),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

#[derive(Debug)]
pub struct RecordFailure {
    pub index: usize,
    pub payload: Option<String>,
    pub error: RecordError,
}

#[derive(Debug)]
pub struct RunSummary {
    pub mode: Mode,
    pub processed: usize,
    pub succeeded: usize,
    pub failures: Vec<RecordFailure>,
}

impl RunSummary {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            processed: 0,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn print(&self) {
        eprintln!("\nSummary:");
        eprintln!("  Mode: {}", self.mode);
        eprintln!("  Records processed: {}", self.processed);
        match self.mode {
            Mode::DryRun => eprintln!("  Tickets printed: {}", self.succeeded),
            Mode::Apply => eprintln!("  Tickets created: {}", self.succeeded),
        }
        eprintln!("  Records failed: {}", self.failed());
        for failure in &self.failures {
            eprintln!("    #{}: {}", failure.index, failure.error);
        }
    }
}

struct Attempt {
    payload: Option<String>,
    error: RecordError,
}

fn attempt(payload: Option<String>, error: impl Into<RecordError>) -> Attempt {
    Attempt {
        payload,
        error: error.into(),
    }
}

async fn process_record(
    row: Result<SourceRecord, csv::Error>,
    refs: &ReferenceData,
    uploader: &Uploader<'_>,
    out: &mut dyn Write,
) -> Result<Outcome, Attempt> {
    let record = row.map_err(|e| attempt(None, e))?;

    let ticket = mapper::map_record(&record, refs)
        .map_err(|e| attempt(serde_json::to_string_pretty(&record).ok(), e))?;

    let payload = ticket.to_payload().map_err(|e| attempt(None, e))?;

    uploader
        .submit(&payload, out)
        .await
        .map_err(|e| attempt(Some(payload.clone()), e))
}

/// Map and submit rows in input order. A failing row is logged with its
/// zero-based index and the payload that was attempted, then skipped.
pub async fn run<I>(
    rows: I,
    refs: &ReferenceData,
    uploader: &Uploader<'_>,
    out: &mut dyn Write,
) -> RunSummary
where
    I: IntoIterator<Item = Result<SourceRecord, csv::Error>>,
{
    let mut summary = RunSummary::new(uploader.mode());

    for (index, row) in rows.into_iter().enumerate() {
        summary.processed += 1;
        match process_record(row, refs, uploader, out).await {
            Ok(Outcome::Created) => {
                info!(index, "Ticket created");
                summary.succeeded += 1;
            }
            Ok(Outcome::Printed) => summary.succeeded += 1,
            Err(Attempt { payload, error }) => {
                let failure = RecordFailure {
                    index,
                    payload,
                    error,
                };
                error!(
                    index = failure.index,
                    payload = failure.payload.as_deref().unwrap_or("<unparsed row>"),
                    error = %failure.error,
                    "FAILED"
                );
                summary.failures.push(failure);
            }
        }
    }

    summary
}
