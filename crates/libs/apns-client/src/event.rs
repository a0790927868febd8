use apns_wire::{GatewayResponse, Message};

/// Outcome announcement for one send attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SendEvent {
    Completed { message: Message },
    Failed { message: Message, response: GatewayResponse },
}

impl SendEvent {
    pub fn message(&self) -> &Message {
        match self {
            SendEvent::Completed { message } | SendEvent::Failed { message, .. } => message,
        }
    }
}

/// External listener for send outcomes.
///
/// Sinks are observational: they never influence the send result, and the
/// pipeline calls them at most once per attempt.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &SendEvent);
}
