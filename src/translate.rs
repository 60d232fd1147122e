//! Fixed source-to-destination value tables. Source values match case-insensitively.

use crate::model::ticket::TicketType;

const TICKET_TYPES: &[(&str, TicketType)] = &[
    ("defect", TicketType::Bug),
    ("bug", TicketType::Bug),
    ("enhancement", TicketType::Enhancement),
    ("feature", TicketType::Enhancement),
    ("task", TicketType::Task),
];

const PRIORITIES: &[(&str, &str)] = &[
    ("blocker", "Critical"),
    ("critical", "Critical"),
    ("major", "High"),
    ("minor", "Normal"),
    ("trivial", "Low"),
];

const STATUSES: &[(&str, &str)] = &[
    ("new", "New"),
    ("reopened", "New"),
    ("assigned", "Accepted"),
    ("accepted", "In Progress"),
    ("closed", "Completed"),
];

fn lookup<T: Copy>(table: &[(&str, T)], source: &str) -> Option<T> {
    let source = source.trim();
    table
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(source))
        .map(|(_, to)| *to)
}

pub fn ticket_type(source: &str) -> Option<TicketType> {
    lookup(TICKET_TYPES, source)
}

/// Destination priority name for a source priority.
pub fn priority(source: &str) -> Option<&'static str> {
    lookup(PRIORITIES, source)
}

/// Destination status name for a source status.
pub fn status(source: &str) -> Option<&'static str> {
    lookup(STATUSES, source)
}
