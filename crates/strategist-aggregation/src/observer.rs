//! Aggregation callbacks
//!
//! The protocol never returns errors to its caller; everything it has to say
//! goes through an [`AggregationObserver`]. [`ChannelObserver`] turns the
//! callbacks into [`AggregationEvent`]s on an unbounded channel so a single
//! consumer (the wizard session) can apply them in its own loop.

use crate::protocol::CycleId;
use strategist_core::{AggregateFailure, PartContent};
use tokio::sync::mpsc;

/// Receives the outcome of each part of a cycle
pub trait AggregationObserver: Send + Sync {
    /// A part arrived and passed validation; called at most once per part
    fn on_part_arrived(&self, cycle: CycleId, content: PartContent);

    /// Every part failed; called at most once per cycle, after all parts settled
    fn on_all_failed(&self, cycle: CycleId, failure: AggregateFailure);
}

/// What happened in a cycle
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    PartArrived(PartContent),
    AllFailed(AggregateFailure),
}

/// Event tagged with the cycle that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationEvent {
    pub cycle: CycleId,
    pub kind: EventKind,
}

/// Observer forwarding callbacks to a channel
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<AggregationEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AggregationEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Observer writing into an existing channel
    #[inline]
    #[must_use]
    pub fn from_sender(sender: mpsc::UnboundedSender<AggregationEvent>) -> Self {
        Self { sender }
    }

    fn send(&self, event: AggregationEvent) {
        // receiver gone means nobody is looking at this cycle any more
        if self.sender.send(event).is_err() {
            tracing::debug!("Aggregation event dropped: receiver closed");
        }
    }
}

impl AggregationObserver for ChannelObserver {
    fn on_part_arrived(&self, cycle: CycleId, content: PartContent) {
        self.send(AggregationEvent {
            cycle,
            kind: EventKind::PartArrived(content),
        });
    }

    fn on_all_failed(&self, cycle: CycleId, failure: AggregateFailure) {
        self.send(AggregationEvent {
            cycle,
            kind: EventKind::AllFailed(failure),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_observer_forwards() {
        let (observer, mut events) = ChannelObserver::new();
        observer.on_part_arrived(CycleId::new(3), PartContent::ExecutiveSummary("hi".into()));

        let event = events.recv().await.unwrap();
        assert_eq!(event.cycle, CycleId::new(3));
        assert!(matches!(event.kind, EventKind::PartArrived(_)));
    }

    #[test]
    fn closed_receiver_is_not_an_error() {
        let (observer, events) = ChannelObserver::new();
        drop(events);
        observer.on_all_failed(CycleId::new(1), AggregateFailure { failures: vec![] });
    }
}
