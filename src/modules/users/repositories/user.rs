use sea_orm::DatabaseConnection;

use super::models;
use crate::repository::Repository;

pub type UserRepository = Repository<'static, models::Entity>;

#[must_use]
pub fn user_repository(db: &DatabaseConnection) -> UserRepository {
    Repository::new(db)
}
