use std::fmt::Debug;

use chrono::{Local, Utc};
use ldg_common::Paise;
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    api::errors::CheckoutError,
    checkout::{CheckoutAttempt, CheckoutEvent, CheckoutState},
    db_types::{GatewayOrder, NewGatewayOrder, PaymentConfirmation, Registrant, RegistrationRow},
    traits::{PaymentGateway, RegistrantLedger},
};

/// What the storefront sends once the checkout widget reports a completed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCompletion {
    pub confirmation: PaymentConfirmation,
    pub registrant: Registrant,
    pub amount: Paise,
}

/// The final state of a checkout attempt, along with the message to show the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub state: CheckoutState,
    pub success: bool,
    pub message: String,
    pub order_id: String,
    pub payment_id: String,
    pub history: Vec<CheckoutState>,
}

impl CheckoutOutcome {
    fn from_attempt(attempt: &CheckoutAttempt, payment_id: &str) -> Self {
        let state = attempt.state();
        Self {
            state,
            success: state == CheckoutState::Saved,
            message: state.customer_message().to_string(),
            order_id: attempt.order_id().to_string(),
            payment_id: payment_id.to_string(),
            history: attempt.history().to_vec(),
        }
    }
}

/// `CheckoutFlowApi` carries a checkout attempt from order creation through signature verification to recording
/// the registration.
///
/// The steps are strictly sequential and none of them is retried. In particular, if the ledger append fails after
/// the signature has been verified, the customer has paid but there is no record of it; the failure is logged with
/// both the order and payment ids so that it can be reconciled by hand.
pub struct CheckoutFlowApi<G, L> {
    gateway: G,
    ledger: L,
}

impl<G, L> Debug for CheckoutFlowApi<G, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutFlowApi")
    }
}

impl<G, L> CheckoutFlowApi<G, L>
where
    G: PaymentGateway,
    L: RegistrantLedger,
{
    pub fn new(gateway: G, ledger: L) -> Self {
        Self { gateway, ledger }
    }

    /// Asks the gateway for a new order. There is no idempotency key, so every call creates a new order.
    pub async fn create_order(&self, amount: Paise, currency: &str) -> Result<GatewayOrder, CheckoutError> {
        if !amount.is_positive() {
            return Err(CheckoutError::InvalidAmount(format!("{amount} is not a chargeable amount")));
        }
        let currency = currency.trim().to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CheckoutError::InvalidAmount(format!("'{currency}' is not a currency code")));
        }
        let receipt = format!("rcpt_{}", Utc::now().timestamp_millis());
        let order = self.gateway.create_order(NewGatewayOrder { amount, currency, receipt }).await.map_err(|e| {
            warn!("💳️ Could not create gateway order for {amount}. {e}");
            e
        })?;
        info!("💳️ Created gateway order {} for {}", order.order_id, order.amount);
        Ok(order)
    }

    /// Checks the signature the checkout widget returned. `Ok(false)` means the signature does not match.
    pub fn verify_payment(&self, confirmation: &PaymentConfirmation) -> Result<bool, CheckoutError> {
        let valid = self.gateway.verify_payment(confirmation)?;
        if valid {
            info!("💳️ Payment {} for order {} verified", confirmation.payment_id, confirmation.order_id);
        } else {
            warn!(
                "💳️ Signature mismatch for payment {} on order {}. Rejecting.",
                confirmation.payment_id, confirmation.order_id
            );
        }
        Ok(valid)
    }

    pub async fn save_registration(&self, row: RegistrationRow) -> Result<(), CheckoutError> {
        let order_id = row.order_id.clone();
        let payment_id = row.payment_id.clone();
        self.ledger.append_row(row.to_row()).await.map_err(|e| {
            error!("📄️ Payment {payment_id} for order {order_id} was NOT recorded. {e}");
            e
        })?;
        info!("📄️ Recorded registration for payment {payment_id} on order {order_id}");
        Ok(())
    }

    /// Runs verification and persistence for a payment the widget reported as complete.
    ///
    /// A failed signature check or a failed append is reported in the returned outcome. Only configuration problems
    /// (such as a missing gateway secret) are returned as errors.
    pub async fn complete(&self, completion: CheckoutCompletion) -> Result<CheckoutOutcome, CheckoutError> {
        let CheckoutCompletion { confirmation, registrant, amount } = completion;
        let mut attempt = CheckoutAttempt::resume_opened(confirmation.order_id.as_str())?;
        attempt.apply(CheckoutEvent::PaymentCompleted)?;
        attempt.apply(CheckoutEvent::VerificationStarted)?;
        if !self.verify_payment(&confirmation)? {
            attempt.apply(CheckoutEvent::SignatureInvalid)?;
            return Ok(CheckoutOutcome::from_attempt(&attempt, &confirmation.payment_id));
        }
        attempt.apply(CheckoutEvent::SignatureValid)?;
        attempt.apply(CheckoutEvent::PersistenceStarted)?;
        let row = RegistrationRow::new(
            registrant,
            amount.as_rupees_string(),
            confirmation.payment_id.clone(),
            confirmation.order_id.clone(),
            Local::now(),
        );
        match self.save_registration(row).await {
            Ok(()) => attempt.apply(CheckoutEvent::RowSaved)?,
            Err(_) => attempt.apply(CheckoutEvent::SaveFailed)?,
        };
        Ok(CheckoutOutcome::from_attempt(&attempt, &confirmation.payment_id))
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::traits::{LedgerError, PaymentGatewayError};

    struct StubGateway {
        valid: Result<bool, PaymentGatewayError>,
    }

    impl PaymentGateway for StubGateway {
        async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, PaymentGatewayError> {
            Ok(GatewayOrder {
                order_id: "order_abc".into(),
                amount: order.amount,
                currency: order.currency,
                receipt: Some(order.receipt),
                status: "created".into(),
            })
        }

        fn verify_payment(&self, _: &PaymentConfirmation) -> Result<bool, PaymentGatewayError> {
            self.valid.clone()
        }
    }

    #[derive(Clone, Default)]
    struct StubLedger {
        fail: bool,
        rows: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl RegistrantLedger for StubLedger {
        async fn append_row(&self, row: Vec<String>) -> Result<(), LedgerError> {
            if self.fail {
                return Err(LedgerError::AppendFailed("quota exceeded".into()));
            }
            self.rows.lock().unwrap().push(row);
            Ok(())
        }
    }

    fn completion() -> CheckoutCompletion {
        CheckoutCompletion {
            confirmation: PaymentConfirmation {
                order_id: "order_abc".into(),
                payment_id: "pay_123".into(),
                signature: "sig".into(),
            },
            registrant: Registrant { full_name: "Asha".into(), ..Default::default() },
            amount: Paise::from_rupees(1999),
        }
    }

    #[tokio::test]
    async fn create_order_validates_amount_and_currency() {
        let api = CheckoutFlowApi::new(StubGateway { valid: Ok(true) }, StubLedger::default());
        let order = api.create_order(Paise::from(199_900), "inr").await.unwrap();
        assert_eq!(order.currency, "INR");
        assert!(order.receipt.unwrap().starts_with("rcpt_"));
        assert!(matches!(api.create_order(Paise::default(), "INR").await, Err(CheckoutError::InvalidAmount(_))));
        assert!(matches!(api.create_order(Paise::from(100), "rupees").await, Err(CheckoutError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn complete_saves_verified_payments() {
        let ledger = StubLedger::default();
        let api = CheckoutFlowApi::new(StubGateway { valid: Ok(true) }, ledger.clone());
        let outcome = api.complete(completion()).await.unwrap();
        assert_eq!(outcome.state, CheckoutState::Saved);
        assert!(outcome.success);
        assert_eq!(outcome.history.last(), Some(&CheckoutState::Saved));
        let rows = ledger.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][..8], &["Asha", "", "", "", "", "1999", "pay_123", "order_abc"]);
    }

    #[tokio::test]
    async fn complete_rejects_bad_signatures() {
        let ledger = StubLedger::default();
        let api = CheckoutFlowApi::new(StubGateway { valid: Ok(false) }, ledger.clone());
        let outcome = api.complete(completion()).await.unwrap();
        assert_eq!(outcome.state, CheckoutState::VerificationFailed);
        assert_eq!(outcome.message, "Payment verification failed.");
        assert!(ledger.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn complete_reports_save_failures() {
        let ledger = StubLedger { fail: true, ..Default::default() };
        let api = CheckoutFlowApi::new(StubGateway { valid: Ok(true) }, ledger);
        let outcome = api.complete(completion()).await.unwrap();
        assert_eq!(outcome.state, CheckoutState::SaveFailed);
        assert!(!outcome.success);
        assert!(outcome.history.contains(&CheckoutState::Verified));
    }

    #[tokio::test]
    async fn missing_secret_is_an_error() {
        let gateway = StubGateway { valid: Err(PaymentGatewayError::MissingSecret) };
        let api = CheckoutFlowApi::new(gateway, StubLedger::default());
        let err = api.complete(completion()).await.unwrap_err();
        assert_eq!(err, CheckoutError::GatewayError(PaymentGatewayError::MissingSecret));
    }
}
