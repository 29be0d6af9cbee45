// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Header rows and per-row cells for each resource's list view.

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::listview::VisibleSlice;
use crate::model::{ListRecord, LogRecord, ReservationRecord, ResourceKind, TicketRecord};
use crate::styles::{Badge, category_styles, status_styles};

pub const PREVIOUS_LABEL: &str = "< Previous";
pub const NEXT_LABEL: &str = "Next >";
pub const VIEW_DETAILS_LABEL: &str = "View Details";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    /// Secondary line shown under the main text (a ticket's concern).
    pub detail: Option<String>,
    pub badge: Option<Badge>,
}

impl TableCell {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: value.into(),
            detail: None,
            badge: None,
        }
    }

    pub fn with_detail(value: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::text(value)
        }
    }

    pub fn badge(value: impl Into<String>, badge: Badge) -> Self {
        Self {
            badge: Some(badge),
            ..Self::text(value)
        }
    }
}

pub trait TableRow: ListRecord {
    const KIND: ResourceKind;

    fn row_id(&self) -> i64;
    fn category(&self) -> &str;
    fn cells(&self) -> Vec<TableCell>;
    /// Every attribute, labelled, for a detail view.
    fn detail_fields(&self) -> Vec<(&'static str, String)>;
}

pub const fn headers(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Reservations => &[
            "Name",
            "Category",
            "Email",
            "Contact No.",
            "Start Date",
            "End Date",
            "Location",
            "Status",
        ],
        ResourceKind::Tickets => &[
            "Name",
            "Category",
            "Ticket No.",
            "Approved By",
            "Date Requested",
            "Last Updated",
            "Status",
            "Action",
        ],
        ResourceKind::Logs => &[
            "Name",
            "Category",
            "Action",
            "Description",
            "IP Address",
            "Logged At",
            "Level",
        ],
    }
}

impl TableRow for ReservationRecord {
    const KIND: ResourceKind = ResourceKind::Reservations;

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn cells(&self) -> Vec<TableCell> {
        vec![
            TableCell::text(&self.name),
            TableCell::badge(&self.category, category_styles(Self::KIND).badge(&self.category)),
            TableCell::text(&self.email),
            TableCell::text(&self.contact_number),
            TableCell::text(format_date(self.start_date)),
            TableCell::text(format_date(self.end_date)),
            TableCell::text(&self.location),
            TableCell::badge(&self.status, status_styles(Self::KIND).badge(&self.status)),
        ]
    }

    fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Category", self.category.clone()),
            ("Email", self.email.clone()),
            ("Contact No.", self.contact_number.clone()),
            ("Start Date", format_date(self.start_date)),
            ("End Date", format_date(self.end_date)),
            ("Location", self.location.clone()),
            ("Status", self.status.clone()),
        ]
    }
}

impl TableRow for TicketRecord {
    const KIND: ResourceKind = ResourceKind::Tickets;

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn cells(&self) -> Vec<TableCell> {
        vec![
            TableCell::with_detail(&self.name, &self.concern),
            TableCell::badge(&self.category, category_styles(Self::KIND).badge(&self.category)),
            TableCell::text(&self.ticket_number),
            TableCell::text(&self.approved_by),
            TableCell::text(format_date(self.date_requested)),
            TableCell::text(format_date(self.last_updated)),
            TableCell::badge(&self.status, status_styles(Self::KIND).badge(&self.status)),
            TableCell::text(VIEW_DETAILS_LABEL),
        ]
    }

    fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Ticket No.", self.ticket_number.clone()),
            ("Name", self.name.clone()),
            ("Concern", self.concern.clone()),
            ("Category", self.category.clone()),
            ("Approved By", self.approved_by.clone()),
            ("Date Requested", format_date(self.date_requested)),
            ("Last Updated", format_date(self.last_updated)),
            ("Status", self.status.clone()),
        ]
    }
}

impl TableRow for LogRecord {
    const KIND: ResourceKind = ResourceKind::Logs;

    fn row_id(&self) -> i64 {
        self.id.get()
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn cells(&self) -> Vec<TableCell> {
        vec![
            TableCell::text(&self.name),
            TableCell::badge(&self.category, category_styles(Self::KIND).badge(&self.category)),
            TableCell::text(&self.action),
            TableCell::text(&self.description),
            TableCell::text(&self.ip_address),
            TableCell::text(format_timestamp(self.logged_at)),
            TableCell::badge(&self.status, status_styles(Self::KIND).badge(&self.status)),
        ]
    }

    fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Action", self.action.clone()),
            ("Description", self.description.clone()),
            ("Category", self.category.clone()),
            ("IP Address", self.ip_address.clone()),
            ("Logged At", format_timestamp(self.logged_at)),
            ("Level", self.status.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    pub id: i64,
    pub cells: Vec<TableCell>,
    pub details: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProjection {
    pub kind: ResourceKind,
    pub headers: &'static [&'static str],
    pub rows: Vec<ProjectedRow>,
    pub filtered_count: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl TableProjection {
    pub fn project<R: TableRow>(slice: &VisibleSlice<'_, R>) -> Self {
        let rows = slice
            .rows
            .iter()
            .map(|record| ProjectedRow {
                id: record.row_id(),
                cells: record.cells(),
                details: record.detail_fields(),
            })
            .collect();

        Self {
            kind: R::KIND,
            headers: headers(R::KIND),
            rows,
            filtered_count: slice.filtered_count,
            page: slice.page,
            total_pages: slice.total_pages,
            has_previous: slice.has_previous(),
            has_next: slice.has_next(),
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows
            .is_empty()
            .then_some(self.kind.empty_message())
    }

    pub fn controls(&self) -> Vec<PageControl> {
        pagination_controls(self.page, self.total_pages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    Previous,
    Page(usize),
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub target: PageTarget,
    pub label: String,
    pub enabled: bool,
    pub current: bool,
}

impl PageControl {
    /// The label as plain text; the current page is bracketed.
    pub fn display_label(&self) -> String {
        if self.current {
            format!("[{}]", self.label)
        } else {
            self.label.clone()
        }
    }
}

pub fn pagination_text(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(PageControl::display_label)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Previous, one button per page, then next. Previous is disabled on the
/// first page and next on the last (or when there are no pages).
pub fn pagination_controls(page: usize, total_pages: usize) -> Vec<PageControl> {
    let mut controls = Vec::with_capacity(total_pages + 2);
    controls.push(PageControl {
        target: PageTarget::Previous,
        label: PREVIOUS_LABEL.to_owned(),
        enabled: page > 1,
        current: false,
    });
    controls.extend((1..=total_pages).map(|number| PageControl {
        target: PageTarget::Page(number),
        label: number.to_string(),
        enabled: true,
        current: number == page,
    }));
    controls.push(PageControl {
        target: PageTarget::Next,
        label: NEXT_LABEL.to_owned(),
        enabled: page < total_pages,
        current: false,
    });
    controls
}

pub fn format_date(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "1970-01-01".to_owned())
}

pub fn format_timestamp(value: OffsetDateTime) -> String {
    value
        .format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| "1970-01-01 00:00".to_owned())
}

#[cfg(test)]
mod tests {
    use super::{
        NEXT_LABEL, PREVIOUS_LABEL, PageTarget, TableProjection, TableRow, headers,
        pagination_controls,
    };
    use crate::listview::ListView;
    use crate::model::{LogRecord, ReservationRecord, ResourceKind, TicketRecord};
    use crate::styles::Tone;
    use crate::{LogEntryId, ReservationId, TicketId};
    use anyhow::Result;
    use time::{Date, Month, OffsetDateTime};

    fn ticket(id: i64, name: &str, status: &str, category: &str) -> Result<TicketRecord> {
        Ok(TicketRecord {
            id: TicketId::new(id),
            name: name.to_owned(),
            concern: format!("{name} concern"),
            ticket_number: format!("TCK-{id:05}"),
            date_requested: Date::from_calendar_date(2026, Month::April, 1)?,
            approved_by: "Morgan".to_owned(),
            last_updated: Date::from_calendar_date(2026, Month::April, 3)?,
            status: status.to_owned(),
            category: category.to_owned(),
        })
    }

    #[test]
    fn headers_line_up_with_cells_for_every_resource() -> Result<()> {
        let reservation = ReservationRecord {
            id: ReservationId::new(1),
            name: "Alice".to_owned(),
            category: "Co-Working".to_owned(),
            email: "alice@example.com".to_owned(),
            contact_number: "555-0100".to_owned(),
            start_date: Date::from_calendar_date(2026, Month::May, 1)?,
            end_date: Date::from_calendar_date(2026, Month::May, 2)?,
            location: "Hub A".to_owned(),
            status: "Upcoming".to_owned(),
        };
        let log = LogRecord {
            id: LogEntryId::new(1),
            name: "Avery".to_owned(),
            action: "login".to_owned(),
            description: "Signed in".to_owned(),
            category: "Auth".to_owned(),
            ip_address: "10.0.0.4".to_owned(),
            logged_at: OffsetDateTime::UNIX_EPOCH,
            status: "Info".to_owned(),
        };

        assert_eq!(
            reservation.cells().len(),
            headers(ResourceKind::Reservations).len()
        );
        assert_eq!(
            ticket(1, "Bob", "Pending", "Bug")?.cells().len(),
            headers(ResourceKind::Tickets).len()
        );
        assert_eq!(log.cells().len(), headers(ResourceKind::Logs).len());
        assert_eq!(log.cells()[5].text, "1970-01-01 00:00");
        Ok(())
    }

    #[test]
    fn ticket_cells_carry_badges_and_concern() -> Result<()> {
        let cells = ticket(7, "Dana", "Ongoing", "Billing")?.cells();
        assert_eq!(cells[0].text, "Dana");
        assert_eq!(cells[0].detail.as_deref(), Some("Dana concern"));
        assert_eq!(cells[1].badge.map(|badge| badge.tone), Some(Tone::Blue));
        assert_eq!(cells[2].text, "TCK-00007");
        assert_eq!(cells[4].text, "2026-04-01");
        assert_eq!(cells[6].badge.map(|badge| badge.tone), Some(Tone::Green));
        assert_eq!(cells[7].text, "View Details");
        Ok(())
    }

    #[test]
    fn projection_reports_empty_message_only_without_rows() -> Result<()> {
        let tickets = vec![ticket(1, "Bob", "Pending", "Bug")?];
        let mut view = ListView::new();

        let projection = TableProjection::project(&view.recompute(&tickets));
        assert_eq!(projection.empty_message(), None);
        assert_eq!(projection.rows[0].id, 1);

        view.set_query("zzz");
        let projection = TableProjection::project(&view.recompute(&tickets));
        assert_eq!(projection.empty_message(), Some("No tickets found."));
        assert_eq!(projection.total_pages, 0);
        Ok(())
    }

    #[test]
    fn pagination_controls_disable_edges() {
        let controls = pagination_controls(1, 3);
        assert_eq!(controls.len(), 5);
        assert_eq!(controls[0].label, PREVIOUS_LABEL);
        assert!(!controls[0].enabled);
        assert!(controls[1].current);
        assert_eq!(controls[4].label, NEXT_LABEL);
        assert!(controls[4].enabled);

        let last = pagination_controls(3, 3);
        assert!(last[0].enabled);
        assert!(last[3].current);
        assert_eq!(last[3].target, PageTarget::Page(3));
        assert!(!last[4].enabled);
    }

    #[test]
    fn pagination_controls_with_no_pages_disable_both_edges() {
        let controls = pagination_controls(1, 0);
        assert_eq!(controls.len(), 2);
        assert!(controls.iter().all(|control| !control.enabled));
    }
}
