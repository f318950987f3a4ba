pub mod config;
pub mod errors;
pub mod health;
pub mod modules;
pub mod repository;
pub mod response;
pub mod routes;
pub mod scaffold;

pub use errors::ApiError;
pub use repository::{CrudEntity, Modifier, Repository};
