// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use gwadmin_app::{
    LogEntryId, LogRecord, NewLogEntry, NewReservation, NewTicket, ReservationId,
    ReservationRecord, ResourceKind, TicketId, TicketRecord,
};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info};

pub const APP_NAME: &str = "gwadmin";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "reservations",
        &[
            "id",
            "name",
            "category",
            "email",
            "contact_number",
            "start_date",
            "end_date",
            "location",
            "status",
            "created_at",
        ],
    ),
    (
        "tickets",
        &[
            "id",
            "name",
            "concern",
            "ticket_number",
            "date_requested",
            "approved_by",
            "last_updated",
            "status",
            "category",
            "created_at",
        ],
    ),
    (
        "logs",
        &[
            "id",
            "name",
            "action",
            "description",
            "category",
            "ip_address",
            "logged_at",
            "status",
            "created_at",
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[
    RequiredIndex {
        name: "idx_tickets_ticket_number",
        create_sql: "CREATE UNIQUE INDEX IF NOT EXISTS idx_tickets_ticket_number ON tickets (ticket_number);",
    },
    RequiredIndex {
        name: "idx_reservations_status",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations (status);",
    },
    RequiredIndex {
        name: "idx_tickets_status",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets (status);",
    },
    RequiredIndex {
        name: "idx_logs_status",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_logs_status ON logs (status);",
    },
];

const RESERVATION_COLUMNS: &str = "
    id, name, category, email, contact_number,
    start_date, end_date, location, status
";

const TICKET_COLUMNS: &str = "
    id, name, concern, ticket_number, date_requested,
    approved_by, last_updated, status, category
";

const LOG_COLUMNS: &str = "
    id, name, action, description, category,
    ip_address, logged_at, status
";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
            info!("created database schema");
        }

        ensure_required_indexes(&self.conn)?;
        Ok(())
    }

    pub fn create_reservation(&self, input: &NewReservation) -> Result<ReservationId> {
        input.validate()?;
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO reservations (
                  name, category, email, contact_number,
                  start_date, end_date, location, status, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    input.name.trim(),
                    input.category.trim(),
                    input.email.trim(),
                    input.contact_number.trim(),
                    format_date(input.start_date),
                    format_date(input.end_date),
                    input.location.trim(),
                    input.status.trim(),
                    now,
                ],
            )
            .context("insert reservation")?;

        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted reservation");
        Ok(ReservationId::new(id))
    }

    pub fn create_ticket(&self, input: &NewTicket) -> Result<TicketId> {
        input.validate()?;
        let ticket_number = input.ticket_number.trim();
        let existing = self
            .conn
            .query_row(
                "SELECT id FROM tickets WHERE ticket_number = ?",
                params![ticket_number],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .context("check ticket number")?;
        if let Some(existing) = existing {
            bail!(
                "ticket number {ticket_number} is already used by ticket {existing} -- choose a different number"
            );
        }

        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO tickets (
                  name, concern, ticket_number, date_requested,
                  approved_by, last_updated, status, category, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    input.name.trim(),
                    input.concern.trim(),
                    ticket_number,
                    format_date(input.date_requested),
                    input.approved_by.trim(),
                    format_date(input.last_updated),
                    input.status.trim(),
                    input.category.trim(),
                    now,
                ],
            )
            .context("insert ticket")?;

        let id = self.conn.last_insert_rowid();
        debug!(id, ticket_number, "inserted ticket");
        Ok(TicketId::new(id))
    }

    pub fn create_log_entry(&self, input: &NewLogEntry) -> Result<LogEntryId> {
        input.validate()?;
        let now = now_rfc3339()?;
        let logged_at = input
            .logged_at
            .format(&Rfc3339)
            .context("format log entry timestamp")?;
        self.conn
            .execute(
                "
                INSERT INTO logs (
                  name, action, description, category,
                  ip_address, logged_at, status, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    input.name.trim(),
                    input.action.trim(),
                    input.description.trim(),
                    input.category.trim(),
                    input.ip_address.trim(),
                    logged_at,
                    input.status.trim(),
                    now,
                ],
            )
            .context("insert log entry")?;

        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted log entry");
        Ok(LogEntryId::new(id))
    }

    pub fn get_reservation(&self, id: ReservationId) -> Result<ReservationRecord> {
        self.conn
            .query_row(
                &format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?"),
                params![id.get()],
                reservation_from_row,
            )
            .optional()
            .with_context(|| format!("load reservation {id}"))?
            .ok_or_else(|| anyhow!("reservation {id} not found -- choose an existing reservation"))
    }

    pub fn get_ticket(&self, id: TicketId) -> Result<TicketRecord> {
        self.conn
            .query_row(
                &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?"),
                params![id.get()],
                ticket_from_row,
            )
            .optional()
            .with_context(|| format!("load ticket {id}"))?
            .ok_or_else(|| anyhow!("ticket {id} not found -- choose an existing ticket"))
    }

    pub fn get_log_entry(&self, id: LogEntryId) -> Result<LogRecord> {
        self.conn
            .query_row(
                &format!("SELECT {LOG_COLUMNS} FROM logs WHERE id = ?"),
                params![id.get()],
                log_from_row,
            )
            .optional()
            .with_context(|| format!("load log entry {id}"))?
            .ok_or_else(|| anyhow!("log entry {id} not found -- choose an existing entry"))
    }

    pub fn list_reservations(&self) -> Result<Vec<ReservationRecord>> {
        self.list_rows(
            &format!("SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY id ASC"),
            "reservations",
            reservation_from_row,
        )
    }

    pub fn list_tickets(&self) -> Result<Vec<TicketRecord>> {
        self.list_rows(
            &format!("SELECT {TICKET_COLUMNS} FROM tickets ORDER BY id ASC"),
            "tickets",
            ticket_from_row,
        )
    }

    pub fn list_logs(&self) -> Result<Vec<LogRecord>> {
        self.list_rows(
            &format!("SELECT {LOG_COLUMNS} FROM logs ORDER BY id ASC"),
            "logs",
            log_from_row,
        )
    }

    pub fn count(&self, kind: ResourceKind) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", table_name(kind)),
                [],
                |row| row.get(0),
            )
            .with_context(|| format!("count {}", kind.label()))?;
        usize::try_from(count).with_context(|| format!("invalid {} count {count}", kind.label()))
    }

    fn list_rows<T>(
        &self,
        sql: &str,
        label: &str,
        map_row: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .with_context(|| format!("prepare {label} query"))?;
        let rows = stmt
            .query_map([], map_row)
            .with_context(|| format!("query {label}"))?;
        let records = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("collect {label}"))?;
        debug!(table = label, rows = records.len(), "listed records");
        Ok(records)
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("GWADMIN_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let app_dir = data_dir()?;
    Ok(app_dir.join("gwadmin.db"))
}

/// `<data dir>/gwadmin`, created if missing.
pub fn data_dir() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set GWADMIN_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir)
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

const fn table_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Reservations => "reservations",
        ResourceKind::Tickets => "tickets",
        ResourceKind::Logs => "logs",
    }
}

fn reservation_from_row(row: &Row<'_>) -> rusqlite::Result<ReservationRecord> {
    let start_date_raw: String = row.get(5)?;
    let end_date_raw: String = row.get(6)?;
    Ok(ReservationRecord {
        id: ReservationId::new(row.get(0)?),
        name: row.get(1)?,
        category: row.get(2)?,
        email: row.get(3)?,
        contact_number: row.get(4)?,
        start_date: parse_date(&start_date_raw).map_err(to_sql_error)?,
        end_date: parse_date(&end_date_raw).map_err(to_sql_error)?,
        location: row.get(7)?,
        status: row.get(8)?,
    })
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<TicketRecord> {
    let date_requested_raw: String = row.get(4)?;
    let last_updated_raw: String = row.get(6)?;
    Ok(TicketRecord {
        id: TicketId::new(row.get(0)?),
        name: row.get(1)?,
        concern: row.get(2)?,
        ticket_number: row.get(3)?,
        date_requested: parse_date(&date_requested_raw).map_err(to_sql_error)?,
        approved_by: row.get(5)?,
        last_updated: parse_date(&last_updated_raw).map_err(to_sql_error)?,
        status: row.get(7)?,
        category: row.get(8)?,
    })
}

fn log_from_row(row: &Row<'_>) -> rusqlite::Result<LogRecord> {
    let logged_at_raw: String = row.get(6)?;
    Ok(LogRecord {
        id: LogEntryId::new(row.get(0)?),
        name: row.get(1)?,
        action: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        ip_address: row.get(5)?,
        logged_at: parse_datetime(&logged_at_raw).map_err(to_sql_error)?,
        status: row.get(7)?,
    })
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; use a gwadmin database or migrate first"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; run migration before launching",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }

    let existing_indexes = index_names(conn)?;
    let missing = REQUIRED_INDEXES
        .iter()
        .filter(|index| !existing_indexes.contains(index.name))
        .map(|index| index.name)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!(
            "database is missing required indexes: {}; run migration before launching",
            missing.join(", ")
        );
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn index_names(conn: &Connection) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(
            "
            SELECT name
            FROM sqlite_master
            WHERE type = 'index'
              AND name NOT LIKE 'sqlite_%'
            ORDER BY name ASC
            ",
        )
        .context("prepare index names query")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("query index names")?;
    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .context("collect index names")
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}

fn parse_datetime(raw: &str) -> Result<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    bail!("unsupported datetime format {raw:?}")
}

fn parse_date(raw: &str) -> Result<Date> {
    if let Ok(value) = Date::parse(raw, &format_description!("[year]-[month]-[day]")) {
        return Ok(value);
    }

    // Imported rows may carry full timestamps; keep the date part.
    let date_time = parse_datetime(raw)?;
    Ok(date_time.date())
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}

fn format_date(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "1970-01-01".to_owned())
}
