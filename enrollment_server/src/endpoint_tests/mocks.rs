use enrollment_engine::{
    db_types::{GatewayOrder, NewGatewayOrder, PaymentConfirmation},
    LedgerError,
    PaymentGateway,
    PaymentGatewayError,
    RegistrantLedger,
};
use mockall::mock;

mock! {
    pub Gateway {}
    impl PaymentGateway for Gateway {
        async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, PaymentGatewayError>;
        fn verify_payment(&self, confirmation: &PaymentConfirmation) -> Result<bool, PaymentGatewayError>;
    }
}

mock! {
    pub Ledger {}
    impl RegistrantLedger for Ledger {
        async fn append_row(&self, row: Vec<String>) -> Result<(), LedgerError>;
    }
}
