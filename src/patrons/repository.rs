pub mod ddb_patron_repository;
pub mod memory_patron_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::patrons::domain::model::PatronEntity;

pub(crate) const PATRONS_TABLE: &str = "patrons";
pub(crate) const PATRONS_KEY: &str = "patron_id";
pub(crate) const PATRONS_INDEX: &str = "patrons_ndx";

#[async_trait]
pub(crate) trait PatronRepository: Repository<PatronEntity> {
    async fn find_by_username(&self, username: &str) -> LibraryResult<Option<PatronEntity>> {
        let res = self.query(&HashMap::from([("username".to_string(), username.to_string())]), None, 2).await?;
        Ok(res.records.into_iter().next())
    }
}
