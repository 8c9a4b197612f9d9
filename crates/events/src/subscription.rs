//! Table-scoped views over the [`EventBus`].

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::bus::{EventBus, RowChange, SiteEvent};

/// Which events a subscriber wants: every change on `table`, or only one
/// kind of change when `change` is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableFilter {
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<RowChange>,
}

impl TableFilter {
    /// All changes on `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            change: None,
        }
    }

    pub fn with_change(mut self, change: RowChange) -> Self {
        self.change = Some(change);
        self
    }

    pub fn matches(&self, event: &SiteEvent) -> bool {
        self.table == event.table && self.change.is_none_or(|c| c == event.change)
    }
}

/// A bus receiver that yields only events matching its filter.
pub struct Subscription {
    filter: TableFilter,
    receiver: broadcast::Receiver<SiteEvent>,
}

impl Subscription {
    pub fn new(bus: &EventBus, filter: TableFilter) -> Self {
        Self {
            filter,
            receiver: bus.subscribe(),
        }
    }

    pub fn filter(&self) -> &TableFilter {
        &self.filter
    }

    /// Wait for the next matching event.
    ///
    /// Lagging is logged and skipped. Returns `None` once the bus is gone.
    pub async fn next(&mut self) -> Option<SiteEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        table = %self.filter.table,
                        "Subscription lagged, some events were dropped"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
