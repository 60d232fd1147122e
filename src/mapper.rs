use crate::destination::ReferenceData;
use crate::model::source_record::SourceRecord;
use crate::model::ticket::Ticket;
use crate::translate;

/// A source value that could not be resolved to a destination id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("unknown user for {field}: {email}")]
    UserNotFound { field: &'static str, email: String },

    #[error("unknown category: {0}")]
    CategoryNotFound(String),

    #[error("unknown priority: {0}")]
    PriorityNotFound(String),

    #[error("unknown status: {0}")]
    StatusNotFound(String),

    #[error("unknown milestone: {0}")]
    MilestoneNotFound(String),

    #[error("no translation for {field}: {value}")]
    NoTranslation { field: &'static str, value: String },
}

fn user_id(refs: &ReferenceData, field: &'static str, email: &str) -> Result<u64, MappingError> {
    refs.user_by_email(email)
        .map(|user| user.id)
        .ok_or_else(|| MappingError::UserNotFound {
            field,
            email: email.to_string(),
        })
}

fn no_translation(field: &'static str, value: &str) -> MappingError {
    MappingError::NoTranslation {
        field,
        value: value.to_string(),
    }
}

/// Build a destination ticket from one source row.
pub fn map_record(record: &SourceRecord, refs: &ReferenceData) -> Result<Ticket, MappingError> {
    let ticket_type =
        translate::ticket_type(&record.kind).ok_or_else(|| no_translation("type", &record.kind))?;

    let reporter_id = user_id(refs, "reporter", &record.reporter)?;
    let assignee_id = user_id(refs, "owner", &record.owner)?;

    let category_id = refs
        .category(&record.component)
        .map(|c| c.id)
        .ok_or_else(|| MappingError::CategoryNotFound(record.component.clone()))?;

    let priority_name = translate::priority(&record.priority)
        .ok_or_else(|| no_translation("priority", &record.priority))?;
    let priority_id = refs
        .priority(priority_name)
        .map(|p| p.id)
        .ok_or_else(|| MappingError::PriorityNotFound(priority_name.to_string()))?;

    let status_name = translate::status(&record.status)
        .ok_or_else(|| no_translation("status", &record.status))?;
    let status_id = refs
        .status(status_name)
        .map(|s| s.id)
        .ok_or_else(|| MappingError::StatusNotFound(status_name.to_string()))?;

    let milestone_id = match &record.milestone {
        Some(name) => Some(
            refs.milestone(name)
                .map(|m| m.id)
                .ok_or_else(|| MappingError::MilestoneNotFound(name.clone()))?,
        ),
        None => None,
    };

    Ok(Ticket {
        summary: record.summary.clone(),
        description: record.description.clone(),
        ticket_type,
        reporter_id,
        assignee_id,
        category_id,
        priority_id,
        status_id,
        milestone_id,
    })
}
