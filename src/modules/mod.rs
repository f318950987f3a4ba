use axum::Router;
use sea_orm::DatabaseConnection;

pub mod users;

/// A self-contained feature module that wires its own routes into the API
/// router. Implementations are listed in [`crate::routes::api_router`]; the
/// scaffolder appends new entries there.
pub trait Module {
    fn register(&self, api: Router, db: &DatabaseConnection) -> Router;
}
