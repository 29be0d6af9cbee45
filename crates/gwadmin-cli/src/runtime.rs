// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use gwadmin_app::ResourceKind;
use gwadmin_db::Store;
use gwadmin_testkit::AdminFaker;
use gwadmin_tui::{ResourceCounts, ResourceSnapshot};
use tracing::info;

const DEMO_SEED: u64 = 2026;
const DEMO_RESERVATIONS: usize = 14;
const DEMO_TICKETS: usize = 17;
const DEMO_LOGS: usize = 23;

pub struct DbRuntime<'a> {
    store: &'a Store,
}

impl<'a> DbRuntime<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

impl gwadmin_tui::AppRuntime for DbRuntime<'_> {
    fn load_counts(&mut self) -> Result<ResourceCounts> {
        Ok(ResourceCounts {
            reservations: self.store.count(ResourceKind::Reservations)?,
            tickets: self.store.count(ResourceKind::Tickets)?,
            logs: self.store.count(ResourceKind::Logs)?,
        })
    }

    fn load_snapshot(&mut self, kind: ResourceKind) -> Result<ResourceSnapshot> {
        load_snapshot(self.store, kind)
    }
}

pub fn load_snapshot(store: &Store, kind: ResourceKind) -> Result<ResourceSnapshot> {
    let snapshot = match kind {
        ResourceKind::Reservations => ResourceSnapshot::Reservations(store.list_reservations()?),
        ResourceKind::Tickets => ResourceSnapshot::Tickets(store.list_tickets()?),
        ResourceKind::Logs => ResourceSnapshot::Logs(store.list_logs()?),
    };
    Ok(snapshot)
}

/// Fills an empty store with a fixed, seeded set of records.
pub fn seed_demo_data(store: &Store) -> Result<()> {
    let mut faker = AdminFaker::new(DEMO_SEED);
    for _ in 0..DEMO_RESERVATIONS {
        store
            .create_reservation(&faker.reservation())
            .context("seed demo reservation")?;
    }
    for _ in 0..DEMO_TICKETS {
        store
            .create_ticket(&faker.ticket())
            .context("seed demo ticket")?;
    }
    for _ in 0..DEMO_LOGS {
        store
            .create_log_entry(&faker.log_entry())
            .context("seed demo log entry")?;
    }
    info!(
        reservations = DEMO_RESERVATIONS,
        tickets = DEMO_TICKETS,
        logs = DEMO_LOGS,
        "seeded demo data"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DbRuntime, seed_demo_data};
    use anyhow::Result;
    use gwadmin_app::ResourceKind;
    use gwadmin_db::Store;
    use gwadmin_tui::{AppRuntime, ResourceSnapshot};

    #[test]
    fn demo_seed_fills_every_resource() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;
        seed_demo_data(&store)?;

        let mut runtime = DbRuntime::new(&store);
        let counts = runtime.load_counts()?;
        assert_eq!(counts.get(ResourceKind::Reservations), 14);
        assert_eq!(counts.get(ResourceKind::Tickets), 17);
        assert_eq!(counts.get(ResourceKind::Logs), 23);
        Ok(())
    }

    #[test]
    fn demo_seed_is_deterministic() -> Result<()> {
        let left = Store::open_memory()?;
        left.bootstrap()?;
        seed_demo_data(&left)?;

        let right = Store::open_memory()?;
        right.bootstrap()?;
        seed_demo_data(&right)?;

        assert_eq!(left.list_tickets()?, right.list_tickets()?);
        assert_eq!(left.list_logs()?, right.list_logs()?);
        Ok(())
    }

    #[test]
    fn snapshot_matches_requested_resource() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;
        seed_demo_data(&store)?;

        let mut runtime = DbRuntime::new(&store);
        for kind in ResourceKind::ALL {
            let snapshot = runtime.load_snapshot(kind)?;
            assert_eq!(snapshot.kind(), kind);
        }

        let ResourceSnapshot::Tickets(tickets) = runtime.load_snapshot(ResourceKind::Tickets)?
        else {
            anyhow::bail!("expected a ticket snapshot");
        };
        assert_eq!(tickets[0].ticket_number, "TCK-00001");
        Ok(())
    }
}
