// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use gwadmin_app::{ListView, NewReservation, ReservationId, ResourceKind, TicketId};
use gwadmin_db::{Store, validate_db_path};
use gwadmin_testkit::{AdminFaker, temp_db_path};
use time::{Date, Month};

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("/tmp/gwadmin.db").is_ok());
}

#[test]
fn bootstrap_rejects_schema_missing_required_column() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    store.raw_connection().execute_batch(
        "
            DROP TABLE tickets;
            CREATE TABLE tickets (
              id INTEGER PRIMARY KEY,
              name TEXT NOT NULL,
              concern TEXT NOT NULL DEFAULT '',
              ticket_number TEXT NOT NULL,
              date_requested TEXT NOT NULL,
              approved_by TEXT NOT NULL DEFAULT '',
              last_updated TEXT NOT NULL,
              category TEXT NOT NULL DEFAULT '',
              created_at TEXT NOT NULL
            );
            ",
    )?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = err.to_string();
    assert!(message.contains("table `tickets` is missing required columns"));
    assert!(message.contains("status"));
    Ok(())
}

#[test]
fn bootstrap_rejects_foreign_database() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE invoices (id INTEGER PRIMARY KEY);")?;

    let err = store.bootstrap().expect_err("unrelated schema should fail");
    assert!(err.to_string().contains("missing required table `reservations`"));
    Ok(())
}

#[test]
fn reservation_round_trips_through_store() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let input = NewReservation {
        name: "  Alice Walker ".to_owned(),
        category: "Co-Working".to_owned(),
        email: "alice@example.com".to_owned(),
        contact_number: "555-0101".to_owned(),
        start_date: Date::from_calendar_date(2026, Month::May, 4)?,
        end_date: Date::from_calendar_date(2026, Month::May, 6)?,
        location: "Hub A".to_owned(),
        status: "Upcoming".to_owned(),
    };
    let id = store.create_reservation(&input)?;

    let loaded = store.get_reservation(id)?;
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Alice Walker");
    assert_eq!(loaded.start_date, input.start_date);
    assert_eq!(loaded.end_date, input.end_date);
    assert_eq!(loaded.status, "Upcoming");
    Ok(())
}

#[test]
fn create_rejects_invalid_input_without_writing() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let mut faker = AdminFaker::new(5);
    let input = NewReservation {
        name: String::new(),
        ..faker.reservation()
    };
    assert!(store.create_reservation(&input).is_err());
    assert_eq!(store.count(ResourceKind::Reservations)?, 0);
    Ok(())
}

#[test]
fn duplicate_ticket_number_is_actionable() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let mut faker = AdminFaker::new(8);
    let first = faker.ticket();
    store.create_ticket(&first)?;

    let duplicate = faker.ticket();
    let duplicate = gwadmin_app::NewTicket {
        ticket_number: first.ticket_number.clone(),
        ..duplicate
    };
    let err = store
        .create_ticket(&duplicate)
        .expect_err("duplicate ticket number should fail");
    assert!(err.to_string().contains("already used by ticket 1"));
    assert_eq!(store.count(ResourceKind::Tickets)?, 1);
    Ok(())
}

#[test]
fn missing_records_report_not_found() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let err = store
        .get_ticket(TicketId::new(99))
        .expect_err("ticket should not exist");
    assert!(err.to_string().contains("ticket 99 not found"));
    assert!(store.get_reservation(ReservationId::new(1)).is_err());
    Ok(())
}

#[test]
fn lists_preserve_insertion_order() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let mut faker = AdminFaker::new(13);
    let mut expected_names = Vec::new();
    for _ in 0..12 {
        let entry = faker.log_entry();
        expected_names.push(entry.name.clone());
        store.create_log_entry(&entry)?;
    }

    let logs = store.list_logs()?;
    let names = logs.iter().map(|log| log.name.clone()).collect::<Vec<_>>();
    assert_eq!(names, expected_names);
    assert!(logs.windows(2).all(|pair| pair[0].id.get() < pair[1].id.get()));
    Ok(())
}

#[test]
fn log_timestamps_survive_storage() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let mut faker = AdminFaker::new(21);
    let entry = faker.log_entry();
    let id = store.create_log_entry(&entry)?;
    assert_eq!(store.get_log_entry(id)?.logged_at, entry.logged_at);
    Ok(())
}

#[test]
fn stored_tickets_feed_the_list_view() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let mut faker = AdminFaker::new(34);
    for _ in 0..17 {
        store.create_ticket(&faker.ticket())?;
    }

    let tickets = store.list_tickets()?;
    let view = ListView::new();
    let slice = view.recompute(&tickets);
    assert_eq!(slice.filtered_count, 17);
    assert_eq!(slice.total_pages, 3);
    assert_eq!(slice.rows.len(), 8);
    assert_eq!(slice.rows[0].ticket_number, "TCK-00001");
    Ok(())
}

#[test]
fn on_disk_store_reopens_with_data() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    let mut faker = AdminFaker::new(55);
    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        store.create_reservation(&faker.reservation())?;
        store.create_ticket(&faker.ticket())?;
    }

    let store = Store::open(&path)?;
    store.bootstrap()?;
    assert_eq!(store.count(ResourceKind::Reservations)?, 1);
    assert_eq!(store.count(ResourceKind::Tickets)?, 1);
    assert_eq!(store.count(ResourceKind::Logs)?, 0);
    Ok(())
}
