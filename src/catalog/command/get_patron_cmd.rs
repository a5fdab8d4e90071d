use async_trait::async_trait;
use serde::Serialize;
use crate::auth::guard::{authorize, LoginRequired};
use crate::auth::principal::Principal;
use crate::catalog::command::require_librarian;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::patrons::dto::PatronDto;

pub(crate) struct GetPatronCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetPatronCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GetPatronCommandRequest {
    pub(crate) principal: Principal,
    pub(crate) patron_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetPatronCommandResponse {
    pub patron: PatronDto,
}

// patrons may read their own record, staff may read any
#[async_trait]
impl Command<GetPatronCommandRequest, GetPatronCommandResponse> for GetPatronCommand {
    async fn execute(&self, req: GetPatronCommandRequest) -> Result<GetPatronCommandResponse, CommandError> {
        authorize(&req.principal, &[&LoginRequired])?;
        if req.principal.user_id.as_deref() != Some(req.patron_id.as_str()) {
            require_librarian(&req.principal)?;
        }
        let patron = self.catalog_service.find_patron_by_id(req.patron_id.as_str()).await?;
        Ok(GetPatronCommandResponse { patron })
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::principal::Principal;
    use crate::catalog::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest};
    use crate::catalog::command::get_patron_cmd::{GetPatronCommand, GetPatronCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::Permission;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_read_own_patron_record_only() {
        let config = Configuration::new("patrons-cmd");
        let librarian = Principal::user("librarian", &[Permission::CanMarkReturned]);
        let mut req: AddPatronCommandRequest = serde_json::from_str(
            r#"{"username": "jdoe", "email": "jdoe@example.com", "first_name": "Jane", "last_name": "Doe"}"#)
            .expect("should parse request");
        req.principal = librarian.clone();
        let patron = AddPatronCommand::new(factory::create_catalog_service(&config, RepositoryStore::InMemory).await)
            .execute(req).await.expect("should add patron").patron;
        assert_eq!("Jane Doe", patron.display_name().as_str());

        let cmd = GetPatronCommand::new(factory::create_catalog_service(&config, RepositoryStore::InMemory).await);
        let own = cmd.execute(GetPatronCommandRequest {
            principal: Principal::user(patron.patron_id.as_str(), &[]),
            patron_id: patron.patron_id.clone(),
        }).await.expect("should read own record");
        assert_eq!("jdoe", own.patron.username.as_str());

        let err = cmd.execute(GetPatronCommandRequest {
            principal: Principal::user("someone-else", &[]),
            patron_id: patron.patron_id.clone(),
        }).await.expect_err("should refuse");
        assert!(matches!(err, CommandError::Forbidden { .. }));

        cmd.execute(GetPatronCommandRequest { principal: librarian, patron_id: patron.patron_id })
            .await.expect("staff should read any record");
    }
}
