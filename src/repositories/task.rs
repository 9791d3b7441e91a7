//! Task repository for database operations.

use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::task::{self, SyncStatus};

/// Repository for task-related database operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Ids of every cached task.
    pub async fn existing_ids<C>(conn: &C) -> Result<HashSet<String>, DbErr>
    where
        C: ConnectionTrait,
    {
        let ids: Vec<String> = task::Entity::find()
            .select_only()
            .column(task::Column::Id)
            .into_tuple()
            .all(conn)
            .await?;
        Ok(ids.into_iter().collect())
    }

    /// Get all tasks ordered by their position in the project.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<task::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        task::Entity::find()
            .order_by_asc(task::Column::OrderIndex)
            .order_by_asc(task::Column::Id)
            .all(conn)
            .await
    }

    /// Get a single task by remote id.
    pub async fn get_by_id<C>(conn: &C, id: &str) -> Result<Option<task::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        task::Entity::find_by_id(id.to_string()).one(conn).await
    }

    /// Get the task whose board card has the given id.
    pub async fn get_by_card_id<C>(conn: &C, card_id: &str) -> Result<Option<task::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        task::Entity::find()
            .filter(task::Column::MiroCardId.eq(card_id))
            .one(conn)
            .await
    }

    /// Tasks in a given sync state, ordered the way cards are laid out.
    pub async fn get_with_status<C>(conn: &C, status: SyncStatus) -> Result<Vec<task::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        task::Entity::find()
            .filter(task::Column::SyncStatus.eq(status))
            .order_by_asc(task::Column::OrderIndex)
            .order_by_asc(task::Column::Id)
            .all(conn)
            .await
    }

    pub async fn insert<C>(conn: &C, task: task::ActiveModel) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        task::Entity::insert(task).exec_without_returning(conn).await?;
        Ok(())
    }

    /// Update a task in the database.
    pub async fn update<C>(conn: &C, task: task::ActiveModel) -> Result<task::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        task.update(conn).await
    }
}
