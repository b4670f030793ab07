use enrollment_engine::{LedgerError, RegistrantLedger};
use log::*;
use sheets_tools::{SheetsApi, SheetsApiError, SheetsConfig};

/// A Google spreadsheet used as an append-only ledger.
#[derive(Clone)]
pub struct SheetsLedger {
    api: SheetsApi,
}

impl SheetsLedger {
    pub fn new(config: SheetsConfig) -> Result<Self, SheetsApiError> {
        if let Some(missing) = config.missing_setting() {
            warn!(
                "📄️ The {missing} for spreadsheet '{}' is not configured. Appends will fail until it is.",
                config.spreadsheet_id
            );
        }
        let api = SheetsApi::new(config)?;
        Ok(Self { api })
    }
}

impl RegistrantLedger for SheetsLedger {
    async fn append_row(&self, row: Vec<String>) -> Result<(), LedgerError> {
        let response = self.api.append_row(row).await.map_err(ledger_error)?;
        trace!("📄️ Sheets reported {} updated cell(s)", response.updates.updated_cells);
        Ok(())
    }
}

fn ledger_error(e: SheetsApiError) -> LedgerError {
    match e {
        SheetsApiError::NotConfigured(s) => LedgerError::NotConfigured(s),
        SheetsApiError::SigningError(s) | SheetsApiError::TokenError(s) => LedgerError::AuthenticationError(s),
        e => LedgerError::AppendFailed(e.to_string()),
    }
}
