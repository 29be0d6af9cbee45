// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::ids::*;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Reservations,
    Tickets,
    Logs,
}

impl ResourceKind {
    pub const ALL: [Self; 3] = [Self::Reservations, Self::Tickets, Self::Logs];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Reservations => "reservations",
            Self::Tickets => "tickets",
            Self::Logs => "logs",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Reservations => "Reservations",
            Self::Tickets => "Tickets",
            Self::Logs => "Logs",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reservations" | "reservation" => Some(Self::Reservations),
            "tickets" | "ticket" => Some(Self::Tickets),
            "logs" | "log" => Some(Self::Logs),
            _ => None,
        }
    }

    /// Filter tab labels in display order. The first tab is always "All".
    pub const fn filter_tabs(self) -> &'static [&'static str] {
        match self {
            Self::Reservations => &["All", "Upcoming", "Ongoing", "Archived/Delivered"],
            Self::Tickets => &["All", "Pending", "Ongoing", "Archived/Delivered"],
            Self::Logs => &["All", "Info", "Warning", "Error"],
        }
    }

    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Reservations => "No reservations found.",
            Self::Tickets => "No tickets found.",
            Self::Logs => "No logs found.",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Reservations => 0,
            Self::Tickets => 1,
            Self::Logs => 2,
        }
    }
}

/// Filter key for a tab label: the label lower-cased.
pub fn filter_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// The two attributes the list-view pipeline reads from a record.
pub trait ListRecord {
    fn name(&self) -> &str;
    fn status(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub id: ReservationId,
    pub name: String,
    pub category: String,
    pub email: String,
    pub contact_number: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub location: String,
    pub status: String,
}

impl ListRecord for ReservationRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: TicketId,
    pub name: String,
    pub concern: String,
    pub ticket_number: String,
    #[serde(with = "iso_date")]
    pub date_requested: Date,
    pub approved_by: String,
    #[serde(with = "iso_date")]
    pub last_updated: Date,
    pub status: String,
    pub category: String,
}

impl ListRecord for TicketRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: LogEntryId,
    pub name: String,
    pub action: String,
    pub description: String,
    pub category: String,
    pub ip_address: String,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    pub status: String,
}

impl ListRecord for LogRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::{ResourceKind, TicketRecord, filter_key};
    use crate::TicketId;
    use anyhow::Result;
    use time::{Date, Month};

    #[test]
    fn resource_kind_parse_accepts_singular_and_case() {
        assert_eq!(
            ResourceKind::parse("Tickets"),
            Some(ResourceKind::Tickets)
        );
        assert_eq!(ResourceKind::parse(" log "), Some(ResourceKind::Logs));
        assert_eq!(ResourceKind::parse("invoices"), None);
    }

    #[test]
    fn every_resource_starts_with_all_tab() {
        for kind in ResourceKind::ALL {
            assert_eq!(filter_key(kind.filter_tabs()[0]), super::FILTER_ALL);
        }
    }

    #[test]
    fn filter_key_lowercases_compound_labels() {
        assert_eq!(filter_key("Archived/Delivered"), "archived/delivered");
    }

    #[test]
    fn ticket_dates_serialize_as_iso_strings() -> Result<()> {
        let ticket = TicketRecord {
            id: TicketId::new(4),
            name: "Dana".to_owned(),
            concern: "Projector flickers".to_owned(),
            ticket_number: "TCK-00004".to_owned(),
            date_requested: Date::from_calendar_date(2026, Month::March, 2)?,
            approved_by: "Morgan".to_owned(),
            last_updated: Date::from_calendar_date(2026, Month::March, 9)?,
            status: "Pending".to_owned(),
            category: "Technical".to_owned(),
        };

        let json = serde_json::to_value(&ticket)?;
        assert_eq!(json["id"], 4);
        assert_eq!(json["date_requested"], "2026-03-02");
        assert_eq!(json["last_updated"], "2026-03-09");
        Ok(())
    }
}
