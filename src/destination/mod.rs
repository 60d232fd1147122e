pub mod codebase;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::model::reference::{NamedEntity, User};

/// Why a create-ticket call did not produce a ticket.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The destination ticketing API, scoped to one project.
#[async_trait]
pub trait TicketApi: Send + Sync {
    async fn statuses(&self) -> Result<Vec<NamedEntity>>;
    async fn priorities(&self) -> Result<Vec<NamedEntity>>;
    async fn categories(&self) -> Result<Vec<NamedEntity>>;
    async fn users(&self) -> Result<Vec<User>>;
    async fn milestones(&self) -> Result<Vec<NamedEntity>>;
    /// Submit an already rendered ticket body.
    async fn create_ticket(&self, payload: &str) -> std::result::Result<(), UploadError>;
}

/// Lookup collections fetched once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub statuses: Vec<NamedEntity>,
    pub priorities: Vec<NamedEntity>,
    pub categories: Vec<NamedEntity>,
    pub users: Vec<User>,
    pub milestones: Vec<NamedEntity>,
}

fn by_name<'a>(collection: &'a [NamedEntity], name: &str) -> Option<&'a NamedEntity> {
    collection.iter().find(|entity| entity.name == name)
}

impl ReferenceData {
    /// Fetch every collection in turn. The first failure aborts the load.
    pub async fn load(api: &dyn TicketApi) -> Result<Self> {
        let statuses = api.statuses().await.context("Failed to load ticket statuses")?;
        info!(count = statuses.len(), "Loaded statuses");
        let priorities = api
            .priorities()
            .await
            .context("Failed to load ticket priorities")?;
        info!(count = priorities.len(), "Loaded priorities");
        let categories = api
            .categories()
            .await
            .context("Failed to load ticket categories")?;
        info!(count = categories.len(), "Loaded categories");
        let users = api.users().await.context("Failed to load assignable users")?;
        info!(count = users.len(), "Loaded users");
        let milestones = api.milestones().await.context("Failed to load milestones")?;
        info!(count = milestones.len(), "Loaded milestones");

        Ok(Self {
            statuses,
            priorities,
            categories,
            users,
            milestones,
        })
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email_address == email)
    }

    pub fn status(&self, name: &str) -> Option<&NamedEntity> {
        by_name(&self.statuses, name)
    }

    pub fn priority(&self, name: &str) -> Option<&NamedEntity> {
        by_name(&self.priorities, name)
    }

    pub fn category(&self, name: &str) -> Option<&NamedEntity> {
        by_name(&self.categories, name)
    }

    pub fn milestone(&self, name: &str) -> Option<&NamedEntity> {
        by_name(&self.milestones, name)
    }
}

#[cfg(test)]
pub mod tests;
