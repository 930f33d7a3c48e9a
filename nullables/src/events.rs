//! Nullable event sink: records every event for inspection.

use wrap_exchange::{EventSink, ExchangeEvent};

#[derive(Debug, Default)]
pub struct NullEventSink {
    events: Vec<ExchangeEvent>,
}

impl NullEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&ExchangeEvent> {
        self.events.last()
    }

    /// Number of recorded events of the given kind (see [`ExchangeEvent::kind`]).
    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Drain all recorded events.
    pub fn take(&mut self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for NullEventSink {
    fn emit(&mut self, event: ExchangeEvent) {
        self.events.push(event);
    }
}
