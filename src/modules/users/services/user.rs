use sea_orm::{ActiveValue, ColumnTrait, Value};
use validator::Validate;

use super::models;
use super::repositories::UserRepository;
use super::validations::{CreateUser, ListQuery, UpdateUser};
use crate::errors::ApiError;
use crate::repository::Modifier;

const RESOURCE: &str = "User";

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    #[must_use]
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns a validation error for a bad query, otherwise any store
    /// failure.
    pub async fn get_all(
        &self,
        query: &ListQuery,
    ) -> Result<(Vec<models::Model>, u64), ApiError> {
        query.validate().map_err(ApiError::from)?;

        let offset = (query.page - 1) * query.limit;
        let modifier = if query.search.is_empty() {
            None
        } else {
            Some(Modifier::new().filter(models::Column::Name.contains(&query.search)))
        };

        self.repo
            .get_all(offset, query.limit, modifier)
            .await
            .map_err(ApiError::database)
    }

    /// # Errors
    ///
    /// Returns 404 when the user does not exist.
    pub async fn get_one(&self, id: i32) -> Result<models::Model, ApiError> {
        self.repo
            .get_by_id(id, None)
            .await
            .map_err(|err| ApiError::from_repo(RESOURCE, Some(id.to_string()), err))
    }

    /// # Errors
    ///
    /// Returns a validation error for a bad body, otherwise any store
    /// failure.
    pub async fn create_one(&self, req: CreateUser) -> Result<models::Model, ApiError> {
        req.validate().map_err(ApiError::from)?;

        let entity = models::ActiveModel {
            name: ActiveValue::Set(req.name),
            ..Default::default()
        };
        self.repo
            .create_one(entity)
            .await
            .map_err(ApiError::database)
    }

    /// Partial update: only the supplied fields are written.
    ///
    /// # Errors
    ///
    /// Returns 400 when no field is supplied, 404 when the user does not
    /// exist.
    pub async fn update_one(&self, id: i32, req: UpdateUser) -> Result<models::Model, ApiError> {
        req.validate().map_err(ApiError::from)?;

        let mut updates: Vec<(models::Column, Value)> = Vec::new();
        if let Some(name) = req.name {
            updates.push((models::Column::Name, name.into()));
        }
        if updates.is_empty() {
            return Err(ApiError::bad_request("No fields to update"));
        }

        self.repo
            .patch_one(id, updates, None)
            .await
            .map_err(|err| ApiError::from_repo(RESOURCE, Some(id.to_string()), err))?;

        self.get_one(id).await
    }

    /// # Errors
    ///
    /// Returns 404 when the user does not exist (or was already deleted).
    pub async fn delete_one(&self, id: i32) -> Result<(), ApiError> {
        self.repo
            .delete_one(id)
            .await
            .map_err(|err| ApiError::from_repo(RESOURCE, Some(id.to_string()), err))
    }
}
