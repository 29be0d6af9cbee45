// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub name: String,
    pub category: String,
    pub email: String,
    pub contact_number: String,
    pub start_date: Date,
    pub end_date: Date,
    pub location: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub name: String,
    pub concern: String,
    pub ticket_number: String,
    pub date_requested: Date,
    pub approved_by: String,
    pub last_updated: Date,
    pub status: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub name: String,
    pub action: String,
    pub description: String,
    pub category: String,
    pub ip_address: String,
    pub logged_at: OffsetDateTime,
    pub status: String,
}

impl NewReservation {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("reservation name is required -- enter a name and retry");
        }
        if self.status.trim().is_empty() {
            bail!("reservation status is required -- choose a status and retry");
        }
        if self.end_date < self.start_date {
            bail!("reservation end date must be on/after start date");
        }
        validate_email(&self.email, "reservation")?;
        Ok(())
    }
}

impl NewTicket {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("ticket name is required -- enter a requester name and retry");
        }
        if self.ticket_number.trim().is_empty() {
            bail!("ticket number is required -- enter a ticket number and retry");
        }
        if self.status.trim().is_empty() {
            bail!("ticket status is required -- choose a status and retry");
        }
        if self.last_updated < self.date_requested {
            bail!("ticket last-updated date must be on/after the requested date");
        }
        Ok(())
    }
}

impl NewLogEntry {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("log entry name is required -- record who performed the action");
        }
        if self.action.trim().is_empty() {
            bail!("log entry action is required -- describe what happened");
        }
        if self.status.trim().is_empty() {
            bail!("log entry level is required -- use info, warning, or error");
        }
        Ok(())
    }
}

fn validate_email(email: &str, entity: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }

    let Some((local, domain)) = email.split_once('@') else {
        bail!("{entity} email {email:?} is missing '@' -- use name@example.com form");
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        bail!("{entity} email {email:?} is malformed -- use name@example.com form");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewLogEntry, NewReservation, NewTicket};
    use anyhow::Result;
    use time::{Date, Month, OffsetDateTime};

    fn reservation() -> Result<NewReservation> {
        Ok(NewReservation {
            name: "Alice".to_owned(),
            category: "Meeting".to_owned(),
            email: "alice@example.com".to_owned(),
            contact_number: "555-0101".to_owned(),
            start_date: Date::from_calendar_date(2026, Month::May, 4)?,
            end_date: Date::from_calendar_date(2026, Month::May, 6)?,
            location: "Room 2".to_owned(),
            status: "Upcoming".to_owned(),
        })
    }

    #[test]
    fn reservation_validation_accepts_well_formed_input() -> Result<()> {
        reservation()?.validate()
    }

    #[test]
    fn reservation_validation_rejects_empty_name() -> Result<()> {
        let input = NewReservation {
            name: "  ".to_owned(),
            ..reservation()?
        };
        let error = input.validate().expect_err("blank name should fail");
        assert!(error.to_string().contains("name is required"));
        Ok(())
    }

    #[test]
    fn reservation_validation_rejects_inverted_dates() -> Result<()> {
        let input = NewReservation {
            end_date: Date::from_calendar_date(2026, Month::May, 1)?,
            ..reservation()?
        };
        assert!(input.validate().is_err());
        Ok(())
    }

    #[test]
    fn reservation_validation_allows_missing_email_but_rejects_malformed() -> Result<()> {
        let blank = NewReservation {
            email: String::new(),
            ..reservation()?
        };
        blank.validate()?;

        let malformed = NewReservation {
            email: "alice.example.com".to_owned(),
            ..reservation()?
        };
        let error = malformed.validate().expect_err("missing @ should fail");
        assert!(error.to_string().contains("missing '@'"));

        let no_domain_dot = NewReservation {
            email: "alice@localhost".to_owned(),
            ..reservation()?
        };
        assert!(no_domain_dot.validate().is_err());
        Ok(())
    }

    #[test]
    fn ticket_validation_requires_ticket_number() -> Result<()> {
        let day = Date::from_calendar_date(2026, Month::June, 1)?;
        let input = NewTicket {
            name: "Bob".to_owned(),
            concern: "Printer jam".to_owned(),
            ticket_number: String::new(),
            date_requested: day,
            approved_by: String::new(),
            last_updated: day,
            status: "Pending".to_owned(),
            category: "Support".to_owned(),
        };
        let error = input.validate().expect_err("missing ticket number should fail");
        assert!(error.to_string().contains("ticket number is required"));
        Ok(())
    }

    #[test]
    fn log_entry_validation_requires_level() {
        let input = NewLogEntry {
            name: "system".to_owned(),
            action: "login".to_owned(),
            description: String::new(),
            category: "Auth".to_owned(),
            ip_address: "10.0.0.1".to_owned(),
            logged_at: OffsetDateTime::UNIX_EPOCH,
            status: String::new(),
        };
        assert!(input.validate().is_err());
    }
}
