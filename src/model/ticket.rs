use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination ticket type. Sent as a tag, not resolved against a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    Bug,
    Enhancement,
    Task,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Bug => "bug",
            TicketType::Enhancement => "enhancement",
            TicketType::Task => "task",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket ready for the create-ticket call. Every id was resolved against
/// the loaded reference collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ticket_type: TicketType,
    pub reporter_id: u64,
    pub assignee_id: u64,
    pub category_id: u64,
    pub priority_id: u64,
    pub status_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    ticket: &'a Ticket,
}

impl Ticket {
    /// Render the request body. String fields go through JSON escaping only, so
    /// markup such as `<b>` or `&amp;` reaches the server as literal text.
    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Envelope { ticket: self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket {
            summary: "Crash on save".into(),
            description: None,
            ticket_type: TicketType::Bug,
            reporter_id: 1,
            assignee_id: 2,
            category_id: 3,
            priority_id: 4,
            status_id: 5,
            milestone_id: None,
        }
    }

    #[test]
    fn payload_wraps_ticket() {
        let value: serde_json::Value =
            serde_json::from_str(&ticket().to_payload().unwrap()).unwrap();
        assert_eq!(value["ticket"]["summary"], "Crash on save");
        assert_eq!(value["ticket"]["ticket_type"], "bug");
        assert_eq!(value["ticket"]["reporter_id"], 1);
        assert_eq!(value["ticket"]["status_id"], 5);
    }

    #[test]
    fn payload_omits_absent_optionals() {
        let payload = ticket().to_payload().unwrap();
        assert!(!payload.contains("description"));
        assert!(!payload.contains("milestone_id"));
    }

    #[test]
    fn payload_includes_present_optionals() {
        let mut t = ticket();
        t.description = Some("Steps to reproduce".into());
        t.milestone_id = Some(9);
        let value: serde_json::Value = serde_json::from_str(&t.to_payload().unwrap()).unwrap();
        assert_eq!(value["ticket"]["description"], "Steps to reproduce");
        assert_eq!(value["ticket"]["milestone_id"], 9);
    }

    #[test]
    fn markup_survives_as_literal_text() {
        let mut t = ticket();
        t.summary = "<script>alert(1)</script> & co".into();
        t.description = Some("a &amp; b <![CDATA[x]]> \"q\"".into());
        let payload = t.to_payload().unwrap();
        assert!(payload.contains("<script>alert(1)</script> & co"));

        let back: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(back["ticket"]["summary"], "<script>alert(1)</script> & co");
        assert_eq!(back["ticket"]["description"], "a &amp; b <![CDATA[x]]> \"q\"");
    }

    #[test]
    fn ticket_type_display() {
        assert_eq!(TicketType::Enhancement.to_string(), "enhancement");
    }
}
