use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use crate::core::library::LibraryResult;
use crate::instances::dto::BookInstanceDto;
use crate::renewals::forms::{FormError, RenewalInput};

pub mod service;

// Where a completed renewal sends the librarian next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RedirectTarget {
    AllBorrowed,
}

impl RedirectTarget {
    pub fn path(&self) -> &'static str {
        match self {
            RedirectTarget::AllBorrowed => "/loans",
        }
    }
}

// AwaitingInput -> Submitted (rejected, may resubmit) -> Completed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub(crate) enum RenewalState {
    AwaitingInput {
        instance_id: String,
        proposed_date: NaiveDate,
        help_text: String,
    },
    Submitted {
        instance_id: String,
        proposed_date: NaiveDate,
        error: FormError,
    },
    Completed {
        instance: BookInstanceDto,
        redirect: RedirectTarget,
    },
}

#[async_trait]
pub(crate) trait RenewalService: Sync + Send {
    // proposes today + the default renewal period for an existing instance
    async fn begin(&self, instance_id: &str) -> LibraryResult<RenewalState>;

    // validates against today and on success stores the new due date
    async fn submit(&self, instance_id: &str, input: &dyn RenewalInput) -> LibraryResult<RenewalState>;
}
