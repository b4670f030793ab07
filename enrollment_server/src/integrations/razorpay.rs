use enrollment_engine::{
    db_types::{GatewayOrder, NewGatewayOrder, PaymentConfirmation},
    PaymentGateway,
    PaymentGatewayError,
};
use ldg_common::Paise;
use log::*;
use razorpay_tools::{NewRazorpayOrder, RazorpayApi, RazorpayApiError, RazorpayConfig, RazorpayOrder};

/// Razorpay as the payment gateway behind the checkout flow.
#[derive(Clone)]
pub struct RazorpayGateway {
    api: RazorpayApi,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        let api = RazorpayApi::new(config)?;
        Ok(Self { api })
    }
}

impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, PaymentGatewayError> {
        let request = NewRazorpayOrder { amount: order.amount.value(), currency: order.currency, receipt: order.receipt };
        let order = self.api.create_order(&request).await.map_err(gateway_error)?;
        Ok(gateway_order(order))
    }

    fn verify_payment(&self, confirmation: &PaymentConfirmation) -> Result<bool, PaymentGatewayError> {
        self.api
            .verify_payment(&confirmation.order_id, &confirmation.payment_id, &confirmation.signature)
            .map_err(gateway_error)
    }
}

fn gateway_order(order: RazorpayOrder) -> GatewayOrder {
    GatewayOrder {
        order_id: order.id,
        amount: Paise::from(order.amount),
        currency: order.currency,
        receipt: order.receipt,
        status: order.status,
    }
}

fn gateway_error(e: RazorpayApiError) -> PaymentGatewayError {
    match e {
        RazorpayApiError::MissingKeySecret => PaymentGatewayError::MissingSecret,
        RazorpayApiError::QueryError { status, message } if (400..500).contains(&status) => {
            warn!("💳️ Razorpay rejected the request ({status}). {message}");
            PaymentGatewayError::GatewayRejected(message)
        },
        e => PaymentGatewayError::CommunicationError(e.to_string()),
    }
}
