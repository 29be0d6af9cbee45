// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use gwadmin_app::{NewLogEntry, NewReservation, NewTicket, ResourceKind};
use std::path::PathBuf;
use time::macros::datetime;
use time::{Date, Duration, OffsetDateTime};

const RESERVATION_CATEGORIES: [&str; 4] = ["Co-Working", "Virtual", "Private", "Meeting"];
const TICKET_CATEGORIES: [&str; 4] = ["Technical", "Billing", "Support", "Bug"];

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const APPROVERS: [&str; 5] = ["Morgan Reed", "Casey Flores", "Admin", "Quinn Price", ""];

const LOCATIONS: [&str; 8] = [
    "Hub A",
    "Hub B",
    "Room 101",
    "Room 204",
    "Boardroom",
    "Rooftop Lounge",
    "Online",
    "Studio 3",
];

const CONCERNS: [&str; 10] = [
    "Projector will not connect",
    "Invoice shows a duplicate charge",
    "Wi-Fi drops every few minutes",
    "Badge access denied at door",
    "Booking page shows an error",
    "Printer out of toner",
    "Refund request for cancelled booking",
    "Desk lamp flickers",
    "Calendar sync missing events",
    "Locker key lost",
];

const LOG_ACTIONS: [(&str, &str, &str); 8] = [
    ("Auth", "login", "Signed in to the admin console"),
    ("Auth", "logout", "Signed out"),
    ("Auth", "login_failed", "Rejected password for account"),
    ("Reservation", "create", "Created a reservation"),
    ("Reservation", "cancel", "Cancelled a reservation"),
    ("Ticket", "update", "Changed ticket status"),
    ("Ticket", "assign", "Approved ticket for follow-up"),
    ("System", "backup", "Nightly backup finished"),
];

const REFERENCE_NOW: OffsetDateTime = datetime!(2026-01-05 09:00 UTC);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Deterministic generator for admin records. The same seed always produces
/// the same sequence, and ticket numbers never repeat within one faker.
#[derive(Debug, Clone)]
pub struct AdminFaker {
    rng: DeterministicRng,
    next_ticket_number: u32,
}

impl AdminFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_ticket_number: 1,
        }
    }

    pub fn reservation(&mut self) -> NewReservation {
        let name = self.person_name();
        let start_date = self.date_near_reference(-60, 60);
        let end_date = start_date + Duration::days(self.int_range(0, 5));
        NewReservation {
            email: email_for(&name),
            name,
            category: self.pick(&RESERVATION_CATEGORIES).to_owned(),
            contact_number: format!("555-{:04}", self.int_range(0, 9999)),
            start_date,
            end_date,
            location: self.pick(&LOCATIONS).to_owned(),
            status: self.status(ResourceKind::Reservations).to_owned(),
        }
    }

    pub fn ticket(&mut self) -> NewTicket {
        let date_requested = self.date_near_reference(-90, 0);
        let last_updated = date_requested + Duration::days(self.int_range(0, 14));
        let ticket_number = format!("TCK-{:05}", self.next_ticket_number);
        self.next_ticket_number += 1;
        NewTicket {
            name: self.person_name(),
            concern: self.pick(&CONCERNS).to_owned(),
            ticket_number,
            date_requested,
            approved_by: self.pick(&APPROVERS).to_owned(),
            last_updated,
            status: self.status(ResourceKind::Tickets).to_owned(),
            category: self.pick(&TICKET_CATEGORIES).to_owned(),
        }
    }

    pub fn log_entry(&mut self) -> NewLogEntry {
        let (category, action, description) = LOG_ACTIONS[self.rng.int_n(LOG_ACTIONS.len())];
        let minutes = self.int_range(0, 60 * 24 * 30);
        NewLogEntry {
            name: self.person_name(),
            action: action.to_owned(),
            description: description.to_owned(),
            category: category.to_owned(),
            ip_address: format!(
                "10.{}.{}.{}",
                self.int_range(0, 255),
                self.int_range(0, 255),
                self.int_range(1, 254)
            ),
            logged_at: REFERENCE_NOW - Duration::minutes(minutes),
            status: self.status(ResourceKind::Logs).to_owned(),
        }
    }

    /// A status value drawn from the resource's filter tabs, never "All".
    pub fn status(&mut self, kind: ResourceKind) -> &'static str {
        let tabs = &kind.filter_tabs()[1..];
        tabs[self.rng.int_n(tabs.len())]
    }

    fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn date_near_reference(&mut self, min_days: i64, max_days: i64) -> Date {
        REFERENCE_NOW.date() + Duration::days(self.int_range(min_days, max_days))
    }
}

fn email_for(name: &str) -> String {
    let local = name.to_ascii_lowercase().replace(' ', ".");
    format!("{local}@example.com")
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("gwadmin.db");
    Ok((dir, db_path))
}
