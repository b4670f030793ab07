use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("The ledger is not configured. {0}")]
    NotConfigured(String),
    #[error("Could not authenticate with the ledger. {0}")]
    AuthenticationError(String),
    #[error("Could not append the row. {0}")]
    AppendFailed(String),
}

/// An append-only record of rows, e.g. a spreadsheet. There is no read-back and no transactionality.
#[allow(async_fn_in_trait)]
pub trait RegistrantLedger {
    async fn append_row(&self, row: Vec<String>) -> Result<(), LedgerError>;
}
