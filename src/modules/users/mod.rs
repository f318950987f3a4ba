#[path = "controllers/user.rs"]
pub mod controllers;
#[path = "dto/user.rs"]
pub mod dto;
#[path = "models/user.rs"]
pub mod models;
#[path = "repositories/user.rs"]
pub mod repositories;
pub mod routes;
#[path = "services/user.rs"]
pub mod services;
#[path = "validations/user.rs"]
pub mod validations;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::modules::Module;

pub struct UserModule;

impl Module for UserModule {
    fn register(&self, api: Router, db: &DatabaseConnection) -> Router {
        api.nest("/users", routes::routes(db))
    }
}
