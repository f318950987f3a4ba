use chrono::Utc;
use sea_orm::{ActiveValue, Database, TransactionTrait};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crudforge::config::Config;
use crudforge::modules::users::models;
use crudforge::modules::users::repositories::user_repository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let db = Database::connect(&config.database_url).await?;

    let txn = db.begin().await?;
    let users = user_repository(&db).with_tx(&txn);

    let now = Utc::now().fixed_offset();
    let admin = models::ActiveModel {
        id: ActiveValue::Set(1),
        name: ActiveValue::Set("Super Admin".to_string()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };
    users.upsert(admin, &[models::Column::Id]).await?;

    txn.commit().await?;
    info!("seed completed");
    Ok(())
}
