use async_trait::async_trait;
use serde::Serialize;
use crate::auth::guard::{authorize, LoginRequired, PermissionRequired};
use crate::auth::principal::Principal;
use crate::core::command::{Command, CommandError};
use crate::core::library::Permission;
use crate::renewals::domain::{RenewalService, RenewalState};
use crate::renewals::forms::{RenewalInput, RenewBookForm, RenewBookModelForm};

pub(crate) struct RenewBookCommand {
    renewal_service: Box<dyn RenewalService>,
}

impl RenewBookCommand {
    pub(crate) fn new(renewal_service: Box<dyn RenewalService>) -> Self {
        Self {
            renewal_service,
        }
    }
}

#[derive(Debug)]
pub(crate) enum RenewalSubmission {
    Form(RenewBookForm),
    Model(RenewBookModelForm),
}

impl RenewalSubmission {
    fn as_input(&self) -> &dyn RenewalInput {
        match self {
            RenewalSubmission::Form(form) => form,
            RenewalSubmission::Model(form) => form,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RenewBookCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) instance_id: String,
    pub(crate) submission: RenewalSubmission,
}

#[derive(Debug, Serialize)]
pub(crate) struct RenewBookCommandResponse {
    pub state: RenewalState,
}

// guards run before the submitted date is ever looked at
#[async_trait]
impl Command<RenewBookCommandRequest, RenewBookCommandResponse> for RenewBookCommand {
    async fn execute(&self, req: RenewBookCommandRequest) -> Result<RenewBookCommandResponse, CommandError> {
        authorize(&req.principal, &[&LoginRequired, &PermissionRequired(Permission::CanMarkReturned)])?;
        let state = self.renewal_service.submit(req.instance_id.as_str(), req.submission.as_input()).await?;
        Ok(RenewBookCommandResponse { state })
    }
}
