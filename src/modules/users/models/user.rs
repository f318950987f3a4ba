use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Order};
use serde::{Deserialize, Serialize};

use crate::repository::CrudEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    /// Soft-delete marker; rows with a value here are invisible to default
    /// reads.
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now().fixed_offset();
        if insert && self.created_at.is_not_set() {
            self.created_at = ActiveValue::Set(now);
        }
        self.updated_at = ActiveValue::Set(now);
        Ok(self)
    }
}

impl CrudEntity for Entity {
    type Id = i32;

    const ENTITY_NAME: &'static str = "user";

    fn id_column() -> Self::Column {
        Column::Id
    }

    fn deleted_at_column() -> Option<Self::Column> {
        Some(Column::DeletedAt)
    }

    fn updated_at_column() -> Option<Self::Column> {
        Some(Column::UpdatedAt)
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![
            (Column::CreatedAt, Order::Desc),
            (Column::UpdatedAt, Order::Desc),
        ]
    }
}
