use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use crate::core::library::LibraryError;

// a renewal may push the due date at most four weeks past today
pub(crate) const RENEWAL_HORIZON_DAYS: i64 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum RenewalError {
    PastDate,
    TooFarAhead,
}

impl RenewalError {
    pub fn code(&self) -> &'static str {
        match self {
            RenewalError::PastDate => "PastDateError",
            RenewalError::TooFarAhead => "TooFarAheadError",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RenewalError::PastDate => "Invalid date - renewal in past",
            RenewalError::TooFarAhead => "Invalid date - renewal more than 4 weeks ahead",
        }
    }
}

impl Display for RenewalError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<RenewalError> for LibraryError {
    fn from(err: RenewalError) -> Self {
        LibraryError::validation(err.message(), Some(err.code().to_string()))
    }
}

pub(crate) fn validate_renewal_date(proposed: NaiveDate, today: NaiveDate) -> Result<(), RenewalError> {
    validate_renewal_date_within(proposed, today, RENEWAL_HORIZON_DAYS)
}

// today and today + horizon_days are both accepted
pub(crate) fn validate_renewal_date_within(proposed: NaiveDate, today: NaiveDate,
                                           horizon_days: i64) -> Result<(), RenewalError> {
    if proposed < today {
        return Err(RenewalError::PastDate);
    }
    if proposed > today + Duration::days(horizon_days) {
        return Err(RenewalError::TooFarAhead);
    }
    Ok(())
}
