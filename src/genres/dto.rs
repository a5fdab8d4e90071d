use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::genres::domain::model::GenreEntity;
use crate::utils::date::serializer;

// GenreDto is a data transfer object for Genre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct GenreDto {
    pub genre_id: String,
    pub version: i64,
    pub branch_id: String,
    pub name: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl GenreDto {
    pub fn new(branch_id: &str, name: &str) -> GenreDto {
        GenreDto {
            genre_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for GenreDto {
    fn id(&self) -> String {
        self.genre_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl From<&GenreEntity> for GenreDto {
    fn from(other: &GenreEntity) -> Self {
        Self {
            genre_id: other.genre_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            name: other.name.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&GenreDto> for GenreEntity {
    fn from(other: &GenreDto) -> Self {
        Self {
            genre_id: other.genre_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            name: other.name.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::genres::domain::model::GenreEntity;
    use crate::genres::dto::GenreDto;

    #[tokio::test]
    async fn test_should_convert_genre() {
        let genre = GenreDto::new("test", "Fantasy");
        let entity = GenreEntity::from(&genre);
        assert_eq!("Fantasy", entity.name.as_str());
        assert_eq!(genre, GenreDto::from(&entity));
    }
}
