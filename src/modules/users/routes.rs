use axum::Router;
use axum::routing::get;
use sea_orm::DatabaseConnection;

use super::controllers;
use super::repositories::user_repository;
use super::services::UserService;

pub fn routes(db: &DatabaseConnection) -> Router {
    let service = UserService::new(user_repository(db));

    Router::new()
        .route("/", get(controllers::get_all).post(controllers::create_one))
        .route(
            "/{id}",
            get(controllers::get_one)
                .patch(controllers::update_one)
                .delete(controllers::delete_one),
        )
        .with_state(service)
}
