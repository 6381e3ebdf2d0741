//! Loading state and stale-response guard for product insights.
//!
//! Every request gets a ticket carrying a sequence number and the product id
//! it was issued for. A completion is applied only when its ticket is still
//! the outstanding one and the product is still selected; superseded requests
//! run to completion and are dropped here.

use serde::Serialize;

/// Identifies one insight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightTicket {
    pub seq: u64,
    pub product_id: String,
}

/// What the detail panel's insight area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InsightState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A request for `product_id` is in flight.
    Loading { product_id: String },
    /// Text for `product_id` has arrived.
    Ready { product_id: String, text: String },
}

impl InsightState {
    pub fn is_loading(&self) -> bool {
        matches!(self, InsightState::Loading { .. })
    }
}

#[derive(Debug, Default)]
pub struct InsightTracker {
    next_seq: u64,
    pending: Option<InsightTicket>,
    state: InsightState,
}

impl InsightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InsightState {
        &self.state
    }

    pub fn pending(&self) -> Option<&InsightTicket> {
        self.pending.as_ref()
    }

    /// Starts a loading interval for `product_id`, superseding any earlier ticket.
    pub fn begin(&mut self, product_id: &str) -> InsightTicket {
        self.next_seq += 1;
        let ticket = InsightTicket {
            seq: self.next_seq,
            product_id: product_id.to_string(),
        };
        self.pending = Some(ticket.clone());
        self.state = InsightState::Loading {
            product_id: product_id.to_string(),
        };
        ticket
    }

    /// Drops whatever is shown or pending; used when the selection goes away.
    pub fn reset(&mut self) {
        self.pending = None;
        self.state = InsightState::Idle;
    }

    /// Applies a completed request if it is still current.
    ///
    /// `selected_id` is the live selection at delivery time. Returns whether the
    /// text was applied.
    pub fn resolve(&mut self, ticket: &InsightTicket, text: String, selected_id: Option<&str>) -> bool {
        let current = self.pending.as_ref() == Some(ticket);
        let still_selected = selected_id == Some(ticket.product_id.as_str());

        if !(current && still_selected) {
            tracing::debug!(
                "[InsightTracker] Dropping stale insight #{} for '{}'",
                ticket.seq,
                ticket.product_id
            );
            return false;
        }

        self.pending = None;
        self.state = InsightState::Ready {
            product_id: ticket.product_id.clone(),
            text,
        };
        true
    }
}
