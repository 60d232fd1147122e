use serde::{Deserialize, Serialize};

/// A status, priority, category or milestone as the destination system lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: u64,
    pub name: String,
}

/// An assignable user of the destination project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email_address: String,
}

#[cfg(test)]
impl NamedEntity {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
impl User {
    pub fn new(id: u64, email_address: impl Into<String>) -> Self {
        Self {
            id,
            email_address: email_address.into(),
        }
    }
}
