use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::{ReferenceData, TicketApi, UploadError};
use crate::model::reference::{NamedEntity, User};

/// In-memory destination used by the driver and uploader tests.
pub struct MockApi {
    refs: ReferenceData,
    pub fetches: Mutex<Vec<&'static str>>,
    pub created: Mutex<Vec<String>>,
    fail_fetch: Option<&'static str>,
    reject_containing: Option<String>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            refs: sample_refs(),
            fetches: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            fail_fetch: None,
            reject_containing: None,
        }
    }

    pub fn failing_fetch(mut self, collection: &'static str) -> Self {
        self.fail_fetch = Some(collection);
        self
    }

    /// Reject any create call whose payload contains `needle`.
    pub fn rejecting(mut self, needle: &str) -> Self {
        self.reject_containing = Some(needle.to_string());
        self
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    fn fetch<T: Clone>(&self, name: &'static str, items: &[T]) -> Result<Vec<T>> {
        self.fetches.lock().unwrap().push(name);
        if self.fail_fetch == Some(name) {
            anyhow::bail!("Mock failure fetching {name}");
        }
        Ok(items.to_vec())
    }
}

#[async_trait]
impl TicketApi for MockApi {
    async fn statuses(&self) -> Result<Vec<NamedEntity>> {
        self.fetch("statuses", &self.refs.statuses)
    }

    async fn priorities(&self) -> Result<Vec<NamedEntity>> {
        self.fetch("priorities", &self.refs.priorities)
    }

    async fn categories(&self) -> Result<Vec<NamedEntity>> {
        self.fetch("categories", &self.refs.categories)
    }

    async fn users(&self) -> Result<Vec<User>> {
        self.fetch("users", &self.refs.users)
    }

    async fn milestones(&self) -> Result<Vec<NamedEntity>> {
        self.fetch("milestones", &self.refs.milestones)
    }

    async fn create_ticket(&self, payload: &str) -> std::result::Result<(), UploadError> {
        if let Some(needle) = &self.reject_containing {
            if payload.contains(needle.as_str()) {
                return Err(UploadError::Rejected {
                    status: 422,
                    body: "Summary is invalid".into(),
                });
            }
        }
        self.created.lock().unwrap().push(payload.to_string());
        Ok(())
    }
}

pub fn sample_refs() -> ReferenceData {
    ReferenceData {
        statuses: vec![
            NamedEntity::new(1, "New"),
            NamedEntity::new(2, "Accepted"),
            NamedEntity::new(3, "In Progress"),
            NamedEntity::new(4, "Completed"),
        ],
        priorities: vec![
            NamedEntity::new(10, "Critical"),
            NamedEntity::new(11, "High"),
            NamedEntity::new(12, "Normal"),
            NamedEntity::new(13, "Low"),
        ],
        categories: vec![
            NamedEntity::new(20, "Backend"),
            NamedEntity::new(21, "Frontend"),
        ],
        users: vec![
            User::new(30, "alice@example.com"),
            User::new(31, "bob@example.com"),
        ],
        milestones: vec![NamedEntity::new(40, "1.0"), NamedEntity::new(41, "2.0")],
    }
}

#[tokio::test]
async fn load_fetches_each_collection_once_in_order() {
    let api = MockApi::new();
    let refs = ReferenceData::load(&api).await.unwrap();

    assert_eq!(
        api.fetches.lock().unwrap().as_slice(),
        &["statuses", "priorities", "categories", "users", "milestones"]
    );
    assert_eq!(refs.statuses.len(), 4);
    assert_eq!(refs.users.len(), 2);
    assert_eq!(refs.milestones.len(), 2);
}

#[tokio::test]
async fn load_aborts_on_first_failure() {
    let api = MockApi::new().failing_fetch("categories");
    let result = ReferenceData::load(&api).await;

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load ticket categories"));
    assert_eq!(
        api.fetches.lock().unwrap().as_slice(),
        &["statuses", "priorities", "categories"]
    );
}

#[test]
fn lookups_are_exact() {
    let refs = sample_refs();
    assert_eq!(refs.status("Completed").map(|s| s.id), Some(4));
    assert_eq!(refs.priority("Critical").map(|p| p.id), Some(10));
    assert_eq!(refs.category("Frontend").map(|c| c.id), Some(21));
    assert_eq!(refs.milestone("2.0").map(|m| m.id), Some(41));
    assert_eq!(refs.user_by_email("bob@example.com").map(|u| u.id), Some(31));

    assert!(refs.category("frontend").is_none());
    assert!(refs.user_by_email("Bob@Example.com").is_none());
}

#[tokio::test]
async fn mock_rejects_matching_payloads() {
    let api = MockApi::new().rejecting("bad");
    assert!(api.create_ticket("good payload").await.is_ok());
    let err = api.create_ticket("bad payload").await.unwrap_err();
    assert!(err.to_string().contains("HTTP 422"));
    assert_eq!(api.created_count(), 1);
}
