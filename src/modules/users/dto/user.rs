use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use super::models;

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<models::Model> for UserDto {
    fn from(model: models::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[must_use]
pub fn to_dtos(models: Vec<models::Model>) -> Vec<UserDto> {
    models.into_iter().map(UserDto::from).collect()
}
