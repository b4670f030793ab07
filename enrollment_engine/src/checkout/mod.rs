//! Checkout attempts as an explicit state machine.
mod state;

use log::*;
pub use state::{CheckoutEvent, CheckoutState, InvalidTransition};

/// Tracks one checkout attempt and every state it has passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutAttempt {
    order_id: String,
    state: CheckoutState,
    history: Vec<CheckoutState>,
}

impl CheckoutAttempt {
    pub fn new<S: Into<String>>(order_id: S) -> Self {
        Self { order_id: order_id.into(), state: CheckoutState::Idle, history: vec![CheckoutState::Idle] }
    }

    /// Picks up an attempt whose order was created and whose widget was opened in earlier requests.
    pub fn resume_opened<S: Into<String>>(order_id: S) -> Result<Self, InvalidTransition> {
        let mut attempt = Self::new(order_id);
        attempt.apply(CheckoutEvent::OrderCreated)?;
        attempt.apply(CheckoutEvent::GatewayOpened)?;
        Ok(attempt)
    }

    pub fn apply(&mut self, event: CheckoutEvent) -> Result<CheckoutState, InvalidTransition> {
        let next = self.state.advance(event)?;
        trace!("🛒️ Checkout for {}: {} -> {next}", self.order_id, self.state);
        self.state = next;
        self.history.push(next);
        Ok(next)
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn history(&self) -> &[CheckoutState] {
        &self.history
    }
}
