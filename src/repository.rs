//! # Generic Data-Access Layer
//!
//! One type-parameterized repository implementing the common persistence
//! operations for any Sea-ORM entity, so feature modules never rewrite CRUD
//! plumbing. A concrete repository is a thin instantiation:
//!
//! ```rust,ignore
//! pub type UserRepository = Repository<'static, user::Entity>;
//!
//! let repo: UserRepository = Repository::new(&db);
//! let (users, total) = repo.get_all(0, 10, None).await?;
//! ```
//!
//! Per-call customization goes through an optional [`Modifier`]: an explicit,
//! composable filter/ordering value applied exactly once, after the base
//! scope (table plus soft-delete filter) and before pagination.
//!
//! Errors are plain [`DbErr`]; every mutation that matches zero rows returns
//! [`DbErr::RecordNotFound`] so callers can translate it uniformly.

use std::fmt::Display;
use std::marker::PhantomData;

use chrono::Utc;
use sea_orm::sea_query::{Expr, IntoCondition, OnConflict};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IdenStatic, IntoActiveModel, Iterable, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Value,
};

/// Per-entity description consumed by [`Repository`].
///
/// Implemented once per Sea-ORM entity. Entities with a
/// [`deleted_at_column`](CrudEntity::deleted_at_column) are soft-deleted:
/// deletion stamps the column instead of removing the row, and every default
/// read excludes rows where it is non-null.
pub trait CrudEntity: EntityTrait {
    /// Primary identifier type (numeric in this boilerplate).
    type Id: Into<Value> + Clone + Display + Send + Sync;

    /// Singular name used in not-found messages, e.g. `"user"`.
    const ENTITY_NAME: &'static str;

    fn id_column() -> Self::Column;

    /// Nullable deletion-timestamp column; `None` means hard delete.
    fn deleted_at_column() -> Option<Self::Column> {
        None
    }

    /// Update-timestamp column stamped by column-level mutations, which
    /// bypass `ActiveModelBehavior`; `None` disables stamping.
    fn updated_at_column() -> Option<Self::Column> {
        None
    }

    /// Ordering applied when a call passes no modifier.
    fn default_order() -> Vec<(Self::Column, Order)> {
        Vec::new()
    }
}

/// Optional per-call query customization: extra filter conditions and
/// ordering, applied once after the base scope is established.
///
/// ```rust,ignore
/// let modifier = Modifier::new()
///     .filter(user::Column::Name.contains("smith"))
///     .order_by(user::Column::CreatedAt, Order::Desc);
/// ```
pub struct Modifier<E: EntityTrait> {
    condition: Condition,
    order_by: Vec<(E::Column, Order)>,
}

impl<E: EntityTrait> Default for Modifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> Modifier<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            condition: Condition::all(),
            order_by: Vec::new(),
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: impl IntoCondition) -> Self {
        self.condition = self.condition.add(filter.into_condition());
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: E::Column, order: Order) -> Self {
        self.order_by.push((column, order));
        self
    }

    fn condition(&self) -> Condition {
        self.condition.clone()
    }

    fn apply_to_select(&self, mut query: Select<E>) -> Select<E> {
        query = query.filter(self.condition.clone());
        for (column, order) in &self.order_by {
            query = query.order_by(*column, order.clone());
        }
        query
    }
}

#[derive(Clone)]
enum Conn<'c> {
    Pool(DatabaseConnection),
    Tx(&'c DatabaseTransaction),
}

// Runs $body against whichever connection backs the repository. The body is
// monomorphized per arm, so it can use the concrete connection type directly.
macro_rules! on_conn {
    ($repo:expr, $db:ident => $body:expr) => {
        match &$repo.conn {
            Conn::Pool($db) => $body,
            Conn::Tx($db) => {
                let $db = *$db;
                $body
            }
        }
    };
}

/// Generic repository over one entity type.
///
/// Pool-backed instances are `'static` and cheap to clone (the connection is
/// a handle); [`Repository::with_tx`] derives a transaction-scoped instance
/// that borrows the caller's transaction, leaving commit/rollback with the
/// caller.
pub struct Repository<'c, E> {
    conn: Conn<'c>,
    _entity: PhantomData<E>,
}

impl<E> Clone for Repository<'_, E> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: CrudEntity> Repository<'static, E> {
    #[must_use]
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            conn: Conn::Pool(db.clone()),
            _entity: PhantomData,
        }
    }
}

impl<E> Repository<'_, E>
where
    E: CrudEntity,
    E::Model: Sync,
{
    /// Returns a repository bound to an active transaction. Multiple
    /// repositories over different entity types may share one transaction;
    /// the caller commits or rolls back.
    #[must_use]
    pub fn with_tx<'t>(&self, txn: &'t DatabaseTransaction) -> Repository<'t, E> {
        Repository {
            conn: Conn::Tx(txn),
            _entity: PhantomData,
        }
    }

    /// Base read scope: the entity's table minus soft-deleted rows.
    fn base_select(&self) -> Select<E> {
        let mut query = E::find();
        if let Some(column) = E::deleted_at_column() {
            query = query.filter(column.is_null());
        }
        query
    }

    /// Same scope as [`base_select`](Self::base_select), for mutations.
    fn live_condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(column) = E::deleted_at_column() {
            condition = condition.add(column.is_null());
        }
        condition
    }

    fn not_found(detail: impl Display) -> DbErr {
        DbErr::RecordNotFound(format!("{} {detail}", E::ENTITY_NAME))
    }

    /// Fetches one page plus the total count matching the same predicate.
    ///
    /// The count runs before pagination is applied, so `total` is invariant
    /// across page/limit choices for a fixed filter. `limit` is not validated
    /// here; that is the caller's (validation layer's) job.
    ///
    /// # Errors
    ///
    /// Returns any store-level [`DbErr`] unchanged.
    pub async fn get_all(
        &self,
        offset: u64,
        limit: u64,
        modifier: Option<Modifier<E>>,
    ) -> Result<(Vec<E::Model>, u64), DbErr> {
        let mut query = self.base_select();
        match modifier {
            Some(modifier) => query = modifier.apply_to_select(query),
            None => {
                for (column, order) in E::default_order() {
                    query = query.order_by(column, order);
                }
            }
        }
        let total = on_conn!(self, db => query.clone().count(db).await)?;
        let items = on_conn!(self, db => query.offset(offset).limit(limit).all(db).await)?;
        Ok((items, total))
    }

    /// # Errors
    ///
    /// Returns [`DbErr::RecordNotFound`] when no live row matches `id`.
    pub async fn get_by_id(
        &self,
        id: E::Id,
        modifier: Option<Modifier<E>>,
    ) -> Result<E::Model, DbErr> {
        let mut query = self.base_select().filter(E::id_column().eq(id.clone()));
        if let Some(modifier) = modifier {
            query = modifier.apply_to_select(query);
        }
        on_conn!(self, db => query.one(db).await)?
            .ok_or_else(|| Self::not_found(format_args!("{id} not found")))
    }

    /// Fetches every live row whose id is in `ids`.
    ///
    /// Partial matches are a silent success: callers get whatever subset
    /// exists and cannot tell "all found" from "some found". Only an empty
    /// result is an error.
    ///
    /// # Errors
    ///
    /// Returns [`DbErr::RecordNotFound`] when no row matches any id.
    pub async fn get_by_ids(
        &self,
        ids: Vec<E::Id>,
        modifier: Option<Modifier<E>>,
    ) -> Result<Vec<E::Model>, DbErr> {
        let mut query = self.base_select().filter(E::id_column().is_in(ids));
        if let Some(modifier) = modifier {
            query = modifier.apply_to_select(query);
        }
        let items = on_conn!(self, db => query.all(db).await)?;
        if items.is_empty() {
            return Err(Self::not_found("ids matched no rows"));
        }
        Ok(items)
    }

    /// Inserts one row and returns it with generated fields (id, timestamps)
    /// populated.
    ///
    /// # Errors
    ///
    /// Returns any store-level [`DbErr`] unchanged.
    pub async fn create_one<A>(&self, entity: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        on_conn!(self, db => entity.insert(db).await)
    }

    /// Inserts a batch in a single statement; all-or-nothing per the store's
    /// semantics for one batched insert. An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// Returns any store-level [`DbErr`] unchanged.
    pub async fn create_many<A>(&self, entities: Vec<A>) -> Result<(), DbErr>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        if entities.is_empty() {
            return Ok(());
        }
        on_conn!(self, db => E::insert_many(entities).exec_without_returning(db).await)?;
        Ok(())
    }

    /// Overwrites the full live row matching `id` with the set values of
    /// `entity`. The entity's update-timestamp column, when declared and left
    /// unset by the caller, is stamped automatically.
    ///
    /// # Errors
    ///
    /// Returns [`DbErr::RecordNotFound`] when zero rows were affected.
    pub async fn update_one<A>(
        &self,
        id: E::Id,
        entity: A,
        modifier: Option<Modifier<E>>,
    ) -> Result<(), DbErr>
    where
        A: ActiveModelTrait<Entity = E> + Send,
    {
        let stamp = E::updated_at_column().filter(|column| entity.get(*column).is_not_set());
        let mut update = E::update_many()
            .set(entity)
            .filter(self.live_condition())
            .filter(E::id_column().eq(id.clone()));
        if let Some(column) = stamp {
            update = update.col_expr(column, Expr::value(Utc::now().fixed_offset()));
        }
        if let Some(modifier) = modifier {
            update = update.filter(modifier.condition());
        }
        let result = on_conn!(self, db => update.exec(db).await)?;
        if result.rows_affected == 0 {
            return Err(Self::not_found(format_args!("{id} not found")));
        }
        Ok(())
    }

    /// Saves a batch in one upsert statement keyed on the id column.
    ///
    /// Zero rows affected is reported as not-found; this deliberately
    /// conflates "target rows missing" with "nothing needed updating", the
    /// documented convention for all batched mutations here.
    ///
    /// # Errors
    ///
    /// Returns [`DbErr::RecordNotFound`] when zero rows were affected
    /// (including an empty batch).
    pub async fn update_many<A>(&self, entities: Vec<A>) -> Result<(), DbErr>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        if entities.is_empty() {
            return Err(Self::not_found("batch affected no rows"));
        }
        let id_column = E::id_column();
        let update_columns: Vec<E::Column> = E::Column::iter()
            .filter(|column| column.as_str() != id_column.as_str())
            .collect();
        let statement = E::insert_many(entities).on_conflict(
            OnConflict::column(id_column)
                .update_columns(update_columns)
                .to_owned(),
        );
        let rows = on_conn!(self, db => statement.exec_without_returning(db).await)?;
        if rows == 0 {
            return Err(Self::not_found("batch affected no rows"));
        }
        Ok(())
    }

    /// Applies a partial column-level update to the live row matching `id`.
    /// The entity's update-timestamp column, when declared and absent from
    /// `updates`, is stamped automatically.
    ///
    /// # Errors
    ///
    /// Returns [`DbErr::Custom`] for an empty update set and
    /// [`DbErr::RecordNotFound`] when zero rows were affected.
    pub async fn patch_one(
        &self,
        id: E::Id,
        updates: Vec<(E::Column, Value)>,
        modifier: Option<Modifier<E>>,
    ) -> Result<(), DbErr> {
        if updates.is_empty() {
            return Err(DbErr::Custom(format!(
                "no columns to patch for {}",
                E::ENTITY_NAME
            )));
        }
        let stamp = E::updated_at_column().filter(|stamp| {
            !updates
                .iter()
                .any(|(column, _)| column.as_str() == stamp.as_str())
        });
        let mut update = E::update_many()
            .filter(self.live_condition())
            .filter(E::id_column().eq(id.clone()));
        for (column, value) in updates {
            update = update.col_expr(column, Expr::value(value));
        }
        if let Some(column) = stamp {
            update = update.col_expr(column, Expr::value(Utc::now().fixed_offset()));
        }
        if let Some(modifier) = modifier {
            update = update.filter(modifier.condition());
        }
        let result = on_conn!(self, db => update.exec(db).await)?;
        if result.rows_affected == 0 {
            return Err(Self::not_found(format_args!("{id} not found")));
        }
        Ok(())
    }

    /// Deletes the row matching `id`: stamps the deletion timestamp for
    /// soft-deletable entities, removes the row otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DbErr::RecordNotFound`] when zero rows were affected.
    pub async fn delete_one(&self, id: E::Id) -> Result<(), DbErr> {
        let rows = if let Some(deleted_column) = E::deleted_at_column() {
            let update = E::update_many()
                .col_expr(deleted_column, Expr::value(Utc::now().fixed_offset()))
                .filter(deleted_column.is_null())
                .filter(E::id_column().eq(id.clone()));
            on_conn!(self, db => update.exec(db).await)?.rows_affected
        } else {
            let delete = E::delete_many().filter(E::id_column().eq(id.clone()));
            on_conn!(self, db => delete.exec(db).await)?.rows_affected
        };
        if rows == 0 {
            return Err(Self::not_found(format_args!("{id} not found")));
        }
        Ok(())
    }

    /// Deletes every live row matching the modifier (all live rows when the
    /// modifier is absent).
    ///
    /// # Errors
    ///
    /// Returns [`DbErr::RecordNotFound`] when zero rows were affected.
    pub async fn delete_many(&self, modifier: Option<Modifier<E>>) -> Result<(), DbErr> {
        let condition = modifier.map_or_else(Condition::all, |modifier| modifier.condition());
        let rows = if let Some(deleted_column) = E::deleted_at_column() {
            let update = E::update_many()
                .col_expr(deleted_column, Expr::value(Utc::now().fixed_offset()))
                .filter(deleted_column.is_null())
                .filter(condition);
            on_conn!(self, db => update.exec(db).await)?.rows_affected
        } else {
            let delete = E::delete_many().filter(condition);
            on_conn!(self, db => delete.exec(db).await)?.rows_affected
        };
        if rows == 0 {
            return Err(Self::not_found("rows matched nothing to delete"));
        }
        Ok(())
    }

    /// Inserts `entity`, or on a unique-constraint conflict over
    /// `conflict_columns` overwrites every other column of the existing row.
    ///
    /// # Errors
    ///
    /// Returns any store-level [`DbErr`] unchanged.
    pub async fn upsert<A>(&self, entity: A, conflict_columns: &[E::Column]) -> Result<(), DbErr>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        let update_columns: Vec<E::Column> = E::Column::iter()
            .filter(|column| {
                !conflict_columns
                    .iter()
                    .any(|conflict| conflict.as_str() == column.as_str())
            })
            .collect();
        let statement = E::insert(entity).on_conflict(
            OnConflict::columns(conflict_columns.iter().copied())
                .update_columns(update_columns)
                .to_owned(),
        );
        on_conn!(self, db => statement.exec_without_returning(db).await)?;
        Ok(())
    }
}
