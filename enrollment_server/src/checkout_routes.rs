//! The checkout flow as a whole: one call to open the payment widget for a new order, and one to verify and record
//! the payment once the widget reports it complete.
use actix_web::{http::StatusCode, web, HttpResponse};
use enrollment_engine::{
    checkout::{CheckoutAttempt, CheckoutEvent, CheckoutState},
    CheckoutCompletion,
    CheckoutFlowApi,
    PaymentGateway,
    RegistrantLedger,
};
use log::*;
use razorpay_tools::{CheckoutOptions, Prefill, CHECKOUT_SCRIPT_ID, CHECKOUT_SCRIPT_URL};

use crate::{
    config::WidgetSettings,
    data_objects::{CheckoutRequest, CheckoutResponse, CompleteCheckoutRequest},
    errors::ServerError,
    route,
};

route!(start_checkout => Post "/checkout" impl PaymentGateway, RegistrantLedger);
/// Creates an order and returns everything the storefront needs to open the payment widget for it.
pub async fn start_checkout<G, L>(
    body: web::Json<CheckoutRequest>,
    widget: web::Data<WidgetSettings>,
    api: web::Data<CheckoutFlowApi<G, L>>,
) -> Result<HttpResponse, ServerError>
where
    G: PaymentGateway,
    L: RegistrantLedger,
{
    let CheckoutRequest { amount, currency, prefill } = body.into_inner();
    let amount = amount.to_paise().map_err(|e| ServerError::InvalidAmount(e.to_string()))?;
    debug!("🛒️ Starting checkout for {amount}");
    let order = api.create_order(amount, &currency).await?;
    let mut attempt = CheckoutAttempt::new(order.order_id.as_str());
    let state = attempt.apply(CheckoutEvent::OrderCreated).map_err(|e| ServerError::BackendError(e.to_string()))?;
    let branding = &widget.branding;
    let options = CheckoutOptions::new(
        widget.key_id.clone(),
        order.order_id.clone(),
        order.amount.value(),
        order.currency.clone(),
    )
    .with_branding(branding.name.as_str(), branding.description.as_str(), branding.theme_color.as_str())
    .with_prefill(Prefill { name: prefill.name, email: prefill.email, contact: prefill.contact });
    Ok(HttpResponse::Ok().json(CheckoutResponse {
        order_id: order.order_id,
        state,
        script_url: CHECKOUT_SCRIPT_URL.to_string(),
        script_id: CHECKOUT_SCRIPT_ID.to_string(),
        options,
    }))
}

route!(complete_checkout => Post "/checkout/complete" impl PaymentGateway, RegistrantLedger);
/// Verifies a completed payment and records the registration in one call.
///
/// The response carries the final checkout state. `Saved` is a 200, `VerificationFailed` a 400 and `SaveFailed` a 500.
pub async fn complete_checkout<G, L>(
    body: web::Json<CompleteCheckoutRequest>,
    api: web::Data<CheckoutFlowApi<G, L>>,
) -> Result<HttpResponse, ServerError>
where
    G: PaymentGateway,
    L: RegistrantLedger,
{
    let CompleteCheckoutRequest { payment, registrant, amount } = body.into_inner();
    let amount = amount.to_paise().map_err(|e| ServerError::InvalidAmount(e.to_string()))?;
    let completion = CheckoutCompletion { confirmation: payment.into(), registrant, amount };
    debug!("🛒️ Completing checkout for order {}", completion.confirmation.order_id);
    let outcome = api.complete(completion).await?;
    let status = match outcome.state {
        CheckoutState::Saved => StatusCode::OK,
        CheckoutState::VerificationFailed => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    info!("🛒️ Checkout for order {} finished in state {}", outcome.order_id, outcome.state);
    Ok(HttpResponse::build(status).json(outcome))
}
