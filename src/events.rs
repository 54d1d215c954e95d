//! Entity-change events.
//!
//! Every mutating handler reports what changed through an [`EventSender`].
//! The processor task logs each event and republishes it on a broadcast
//! channel that feeds the `/api/events` SSE stream, giving connected
//! clients one authoritative change feed to revalidate against.

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

/// Capacity of the broadcast buffer behind the SSE feed. Slow subscribers
/// lose oldest events first, which only costs them an extra refetch.
const BROADCAST_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum Event {
    InventoryItemCreated(i32),
    InventoryItemUpdated(i32),
    InventoryItemDeleted(i32),
    InventoryItemSold(i32),
    LocationCreated(i32),
    LocationUpdated(i32),
    LocationDeleted(i32),
    LocationTransferRecorded(i32),
    BankCreated(i32),
    BankUpdated(i32),
    BankDeleted(i32),
    BankInterestRateCreated(i32),
    CompanyCreated(i32),
    CompanyUpdated(i32),
    CompanyDeleted(i32),
    QuotationCreated(i32),
    QuotationUpdated(i32),
    QuotationDeleted(i32),
    InvoiceCreated(i32),
    InvoiceUpdated(i32),
    InvoiceDeleted(i32),
    ManufacturerCreated(i32),
    ManufacturerUpdated(i32),
    ManufacturerDeleted(i32),
    UserCreated(i32),
    UserUpdated(i32),
    UserDeleted(i32),
    FinancingRateCreated(i32),
    FinancingRateUpdated(i32),
    FinancingRateDeleted(i32),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event. A failure is logged and swallowed: losing a change
    /// notification must never fail the mutation that produced it.
    pub async fn send(&self, event: Event) {
        if let Err(err) = self.sender.send(event).await {
            warn!("event channel closed, dropping event: {}", err);
        }
    }
}

/// Handle to the broadcast side of the event pipeline. Cheap to clone;
/// each SSE connection takes its own subscription.
#[derive(Debug, Clone)]
pub struct EventBroadcast {
    sender: broadcast::Sender<Event>,
}

impl EventBroadcast {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    fn publish(&self, event: Event) {
        // Err here only means no subscriber is currently connected.
        let _ = self.sender.send(event);
    }
}

impl Default for EventBroadcast {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains the event queue: logs each event and republishes it to SSE
/// subscribers. Runs until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>, broadcast: EventBroadcast) {
    while let Some(event) = rx.recv().await {
        info!(event = ?event, "entity change");
        broadcast.publish(event);
    }
    info!("event channel closed, processor exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_flow_from_sender_to_broadcast_subscribers() {
        let (tx, rx) = mpsc::channel(16);
        let sender = EventSender::new(tx);
        let broadcast = EventBroadcast::new();
        let mut subscription = broadcast.subscribe();
        let processor = tokio::spawn(process_events(rx, broadcast));

        sender.send(Event::BankCreated(3)).await;
        let received = subscription.recv().await.unwrap();
        assert!(matches!(received, Event::BankCreated(3)));

        drop(sender);
        processor.await.unwrap();
    }

    #[tokio::test]
    async fn send_after_processor_exit_is_swallowed() {
        let (tx, rx) = mpsc::channel(16);
        let sender = EventSender::new(tx);
        drop(rx);
        // must not panic or error the caller
        sender.send(Event::InventoryItemDeleted(9)).await;
    }

    #[test]
    fn events_serialise_with_type_tag() {
        let json = serde_json::to_value(Event::QuotationCreated(7)).unwrap();
        assert_eq!(json["type"], "QuotationCreated");
        assert_eq!(json["id"], 7);
    }
}
