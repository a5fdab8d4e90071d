use async_trait::async_trait;
use serde::Serialize;
use crate::auth::guard::{authorize, LoginRequired, PermissionRequired};
use crate::auth::principal::Principal;
use crate::core::command::{Command, CommandError};
use crate::core::library::Permission;
use crate::renewals::domain::{RenewalService, RenewalState};

pub(crate) struct BeginRenewalCommand {
    renewal_service: Box<dyn RenewalService>,
}

impl BeginRenewalCommand {
    pub(crate) fn new(renewal_service: Box<dyn RenewalService>) -> Self {
        Self {
            renewal_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct BeginRenewalCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) instance_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BeginRenewalCommandResponse {
    pub state: RenewalState,
}

#[async_trait]
impl Command<BeginRenewalCommandRequest, BeginRenewalCommandResponse> for BeginRenewalCommand {
    async fn execute(&self, req: BeginRenewalCommandRequest) -> Result<BeginRenewalCommandResponse, CommandError> {
        authorize(&req.principal, &[&LoginRequired, &PermissionRequired(Permission::CanMarkReturned)])?;
        let state = self.renewal_service.begin(req.instance_id.as_str()).await?;
        Ok(BeginRenewalCommandResponse { state })
    }
}
