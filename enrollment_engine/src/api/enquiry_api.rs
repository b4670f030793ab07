use std::fmt::Debug;

use log::*;

use crate::{api::errors::EnquiryError, db_types::EnquiryForm, traits::RegistrantLedger};

/// Records the enquiry form that prospective students fill in before they are shown the payment button.
pub struct EnquiryApi<L> {
    ledger: L,
}

impl<L> Debug for EnquiryApi<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EnquiryApi")
    }
}

impl<L> EnquiryApi<L>
where L: RegistrantLedger
{
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub async fn submit(&self, form: EnquiryForm) -> Result<(), EnquiryError> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(EnquiryError::IncompleteForm(missing.join(", ")));
        }
        self.ledger.append_row(form.to_row()).await.map_err(|e| {
            error!("📄️ Could not record enquiry from {}. {e}", form.name);
            e
        })?;
        debug!("📄️ Recorded enquiry from {}", form.name);
        Ok(())
    }
}
