// Central route registration. The scaffolder inserts an import line and a
// registry line above the sentinel comments below; keep both sentinels
// intact so later generations stay insertable.

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::modules::Module;

use crate::modules::users;
// MODULE IMPORTS

/// Builds the `/api` router by letting every registered module wire itself in.
pub fn api_router(db: &DatabaseConnection) -> Router {
    let modules: Vec<Box<dyn Module>> = vec![
        Box::new(users::UserModule),
        // MODULE REGISTRY
    ];

    let mut api = Router::new();
    for module in &modules {
        api = module.register(api, db);
    }
    api
}
