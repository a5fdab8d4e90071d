use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::renewals::validator::{RENEWAL_HORIZON_DAYS, RenewalError, validate_renewal_date_within};

pub(crate) const RENEWAL_HELP_TEXT: &str = "Enter a date between now and 4 weeks (default 3).";

// FormError keys a rejected value to the input field it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FormError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FormError {
    pub fn new(field: &str, err: RenewalError) -> Self {
        FormError {
            field: field.to_string(),
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

// RenewalInput is a submitted renewal date; each form names its own field but all
// of them clean through the same date check.
pub(crate) trait RenewalInput: Sync + Send {
    fn field(&self) -> &'static str;

    fn proposed_date(&self) -> NaiveDate;

    fn clean(&self, today: NaiveDate) -> Result<NaiveDate, FormError> {
        self.clean_within(today, RENEWAL_HORIZON_DAYS)
    }

    fn clean_within(&self, today: NaiveDate, horizon_days: i64) -> Result<NaiveDate, FormError> {
        let proposed = self.proposed_date();
        validate_renewal_date_within(proposed, today, horizon_days)
            .map(|_| proposed)
            .map_err(|err| FormError::new(self.field(), err))
    }
}

// bare date form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RenewBookForm {
    pub renewal_date: NaiveDate,
}

impl RenewalInput for RenewBookForm {
    fn field(&self) -> &'static str {
        "renewal_date"
    }

    fn proposed_date(&self) -> NaiveDate {
        self.renewal_date
    }
}

// edits due_back of the instance directly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RenewBookModelForm {
    pub due_back: NaiveDate,
}

impl RenewalInput for RenewBookModelForm {
    fn field(&self) -> &'static str {
        "due_back"
    }

    fn proposed_date(&self) -> NaiveDate {
        self.due_back
    }
}
